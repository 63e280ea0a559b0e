//! Source registration and the layered configuration it produces.
//!
//! Responsibilities:
//! - Keep the ordered list of registered configuration sources.
//! - Build and load each provider, producing a [`Configuration`].
//!
//! Does NOT handle:
//! - Parsing or file access (sources own that).
//! - Merging mappings into one store; lookups scan the layers instead.
//!
//! Invariants:
//! - Later sources override earlier ones on key lookups.
//! - A failed build or load of any source aborts `build` with its error.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::error::ConfigError;
use crate::source::file::EnvFileSource;
use crate::source::stream::EnvStreamSource;
use crate::source::{ConfigProvider, ConfigSource};

/// Ordered collection of configuration sources.
#[derive(Default)]
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Create a builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append any configuration source.
    pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Append a required `.env` file source without reload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] when `path` is empty.
    pub fn add_env_file(self, path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        self.add_env_file_with(path, |source| source)
    }

    /// Append a `.env` file source configured by `configure`.
    ///
    /// ```
    /// use envlayer::ConfigBuilder;
    ///
    /// let builder = ConfigBuilder::new()
    ///     .add_env_file_with(".env", |source| source.optional(true))?;
    /// # Ok::<(), envlayer::ConfigError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] when `path` is empty.
    pub fn add_env_file_with(
        self,
        path: impl Into<PathBuf>,
        configure: impl FnOnce(EnvFileSource) -> EnvFileSource,
    ) -> Result<Self, ConfigError> {
        let source = configure(EnvFileSource::new(path)?);
        Ok(self.add_source(source))
    }

    /// Append a one-shot stream source.
    pub fn add_env_stream(self, reader: impl Read + Send + 'static) -> Self {
        self.add_source(EnvStreamSource::new(reader))
    }

    /// Build every provider and load it, in registration order.
    ///
    /// # Errors
    ///
    /// The first source that fails to build or load aborts the whole
    /// build; no configuration with partially loaded layers is returned.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let mut providers = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let provider = source.build()?;
            provider.load()?;
            debug!(provider = %provider.name(), "configuration source loaded");
            providers.push(provider);
        }
        Ok(Configuration { providers })
    }
}

/// Layered view over loaded providers.
pub struct Configuration {
    providers: Vec<Arc<dyn ConfigProvider>>,
}

impl Configuration {
    /// Look up `key` across the layers; later sources override earlier
    /// ones.
    pub fn get(&self, key: &str) -> Option<String> {
        self.providers
            .iter()
            .rev()
            .find_map(|provider| provider.get(key))
    }

    /// The loaded providers, in registration order.
    pub fn providers(&self) -> &[Arc<dyn ConfigProvider>] {
        &self.providers
    }
}
