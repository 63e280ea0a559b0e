//! File-backed configuration source and provider.
//!
//! Responsibilities:
//! - Resolve a file handle through a [`FileProvider`] and parse it into
//!   the provider's mapping.
//! - Honor `optional` (a missing file loads an empty mapping) and
//!   `reload_on_change` (re-load when the external watcher signals).
//!
//! Does NOT handle:
//! - Watching the file system (see `watch` for the boundary contract).
//! - Parsing (delegated to `parser`).
//!
//! Invariants:
//! - Every load builds the new mapping fully, then swaps it in as one
//!   reference; a failed reload keeps the previous mapping.
//! - Change callbacks fire after the swap, never before.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock, Weak};

use tracing::{debug, error};

use crate::error::ConfigError;
use crate::fs::{FileProvider, PhysicalFs};
use crate::map::EnvMap;
use crate::parser;
use crate::source::{ConfigProvider, ConfigSource};
use crate::watch::{ChangeCallback, ChangeNotifier};

/// Source descriptor for a `.env` file.
pub struct EnvFileSource {
    path: PathBuf,
    optional: bool,
    reload_on_change: bool,
    fs: Arc<dyn FileProvider>,
    notifier: Option<Arc<dyn ChangeNotifier>>,
}

impl EnvFileSource {
    /// Describe the `.env` file at `path`, required and without reload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPath`] when `path` is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidPath);
        }
        Ok(Self {
            path,
            optional: false,
            reload_on_change: false,
            fs: Arc::new(PhysicalFs),
            notifier: None,
        })
    }

    /// Suppress the load error when the file does not exist; the provider
    /// loads an empty mapping instead.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Re-load the file whenever the change notifier signals it.
    ///
    /// Takes effect only when a [`ChangeNotifier`] is also configured.
    pub fn reload_on_change(mut self, reload: bool) -> Self {
        self.reload_on_change = reload;
        self
    }

    /// Resolve the file through a custom provider instead of the local
    /// file system.
    pub fn file_provider(mut self, fs: Arc<dyn FileProvider>) -> Self {
        self.fs = fs;
        self
    }

    /// Wire the external watcher that delivers change notifications.
    pub fn change_notifier(mut self, notifier: Arc<dyn ChangeNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

impl ConfigSource for EnvFileSource {
    fn build(&self) -> Result<Arc<dyn ConfigProvider>, ConfigError> {
        let provider = Arc::new(EnvFileProvider {
            fs: Arc::clone(&self.fs),
            path: self.path.clone(),
            optional: self.optional,
            data: RwLock::new(Arc::new(EnvMap::new())),
            callbacks: Mutex::new(Vec::new()),
        });

        if self.reload_on_change
            && let Some(notifier) = &self.notifier
        {
            let weak: Weak<EnvFileProvider> = Arc::downgrade(&provider);
            notifier.subscribe(
                &self.path,
                Box::new(move || {
                    let Some(provider) = weak.upgrade() else {
                        return;
                    };
                    if let Err(err) = provider.load() {
                        // No caller to propagate to on the watcher thread;
                        // the previous mapping stays in place.
                        error!(
                            path = %provider.path.display(),
                            error = %err,
                            "reload failed, keeping previous data"
                        );
                    }
                }),
            );
        }

        Ok(provider)
    }
}

/// Provider holding the most recently parsed contents of a `.env` file.
pub struct EnvFileProvider {
    fs: Arc<dyn FileProvider>,
    path: PathBuf,
    optional: bool,
    data: RwLock<Arc<EnvMap>>,
    callbacks: Mutex<Vec<ChangeCallback>>,
}

impl EnvFileProvider {
    /// The path this provider reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn swap(&self, map: EnvMap) {
        *self.data.write().expect("data lock poisoned") = Arc::new(map);

        let callbacks = self.callbacks.lock().expect("callback lock poisoned");
        for callback in callbacks.iter() {
            callback();
        }
    }
}

impl ConfigProvider for EnvFileProvider {
    fn load(&self) -> Result<(), ConfigError> {
        if !self.fs.exists(&self.path) {
            if self.optional {
                debug!(
                    path = %self.path.display(),
                    "optional file missing, loading empty mapping"
                );
                self.swap(EnvMap::new());
                return Ok(());
            }
            return Err(ConfigError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let reader = self.fs.open(&self.path)?;
        let map = parser::read(reader)?;
        debug!(
            path = %self.path.display(),
            entries = map.len(),
            "file provider loaded"
        );
        self.swap(map);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.snapshot().get(key).map(str::to_owned)
    }

    fn snapshot(&self) -> Arc<EnvMap> {
        self.data.read().expect("data lock poisoned").clone()
    }

    fn name(&self) -> String {
        format!("env file {}", self.path.display())
    }

    fn subscribe(&self, callback: ChangeCallback) {
        self.callbacks
            .lock()
            .expect("callback lock poisoned")
            .push(callback);
    }
}
