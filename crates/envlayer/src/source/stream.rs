//! Stream-backed configuration source and provider.
//!
//! A stream is a one-shot handle: the source hands it to its provider at
//! build time and the provider consumes it on first load. There is no file
//! resolution and no reload.

use std::io::Read;
use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::error::ConfigError;
use crate::map::EnvMap;
use crate::parser;
use crate::source::{ConfigProvider, ConfigSource};

/// Source descriptor wrapping a caller-supplied stream.
pub struct EnvStreamSource {
    reader: Mutex<Option<Box<dyn Read + Send>>>,
}

impl EnvStreamSource {
    /// Wrap `reader` as a one-shot configuration source.
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Some(Box::new(reader))),
        }
    }
}

impl ConfigSource for EnvStreamSource {
    /// Hand the stream to a fresh provider.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StreamConsumed`] on a second build; the
    /// stream was moved into the first provider.
    fn build(&self) -> Result<Arc<dyn ConfigProvider>, ConfigError> {
        let reader = self
            .reader
            .lock()
            .expect("stream slot lock poisoned")
            .take()
            .ok_or(ConfigError::StreamConsumed)?;
        Ok(Arc::new(EnvStreamProvider::new(reader)))
    }
}

/// Provider that parses its stream exactly once.
pub struct EnvStreamProvider {
    reader: Mutex<Option<Box<dyn Read + Send>>>,
    data: RwLock<Arc<EnvMap>>,
}

impl EnvStreamProvider {
    fn new(reader: Box<dyn Read + Send>) -> Self {
        Self {
            reader: Mutex::new(Some(reader)),
            data: RwLock::new(Arc::new(EnvMap::new())),
        }
    }
}

impl ConfigProvider for EnvStreamProvider {
    fn load(&self) -> Result<(), ConfigError> {
        let reader = self
            .reader
            .lock()
            .expect("stream slot lock poisoned")
            .take()
            .ok_or(ConfigError::StreamConsumed)?;

        let map = parser::read(reader)?;
        debug!(entries = map.len(), "stream provider loaded");
        *self.data.write().expect("data lock poisoned") = Arc::new(map);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.snapshot().get(key).map(str::to_owned)
    }

    fn snapshot(&self) -> Arc<EnvMap> {
        self.data.read().expect("data lock poisoned").clone()
    }

    fn name(&self) -> String {
        "env stream".to_owned()
    }
}
