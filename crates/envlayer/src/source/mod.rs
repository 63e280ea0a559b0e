//! Configuration source and provider contracts.
//!
//! Responsibilities:
//! - Define the capability traits the builder composes: a source is a
//!   recipe that builds a provider; a provider holds the mapping.
//!
//! Does NOT handle:
//! - Parsing (see `parser`) or layering across sources (see `builder`).
//!
//! Invariants:
//! - `load` replaces a provider's mapping as a whole; readers observe the
//!   fully-old or fully-new mapping, never an in-progress one.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::map::EnvMap;
use crate::watch::ChangeCallback;

pub mod file;
pub mod stream;

#[cfg(test)]
mod tests;

/// A recipe from which a provider can (re)produce a mapping.
pub trait ConfigSource {
    /// Construct the provider for this source.
    ///
    /// Building wires the provider up but does not load data; the builder
    /// (or host) calls [`ConfigProvider::load`] afterwards.
    fn build(&self) -> Result<Arc<dyn ConfigProvider>, ConfigError>;
}

/// The stateful holder of the most recently loaded mapping.
pub trait ConfigProvider: Send + Sync {
    /// (Re)load the provider's data, replacing any prior mapping
    /// atomically.
    fn load(&self) -> Result<(), ConfigError>;

    /// Look up a value by its normalized key, case-insensitively.
    fn get(&self, key: &str) -> Option<String>;

    /// A consistent snapshot of the full mapping.
    fn snapshot(&self) -> Arc<EnvMap>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> String;

    /// Register a callback fired after the mapping has been replaced.
    ///
    /// Providers whose data never changes after the initial load ignore
    /// subscriptions.
    fn subscribe(&self, _callback: ChangeCallback) {}
}
