//! Flat `.env`-style configuration sources for layered application
//! configuration.
//!
//! This crate parses `key=value` files into a flat, case-insensitive
//! key/value mapping and adapts the result into composable configuration
//! sources that a [`ConfigBuilder`] layers in registration order.
//!
//! The dialect is deliberately small: one entry per line, `;`/`#`/`/`
//! comments, blank lines, and simple outer-quote stripping. Keys written
//! with `__` are rewritten to `:`-delimited hierarchical paths
//! (`Parent__Child` becomes `Parent:Child`), so env-style files
//! interoperate with path-addressed configuration from other sources.
//!
//! ```no_run
//! use envlayer::{ConfigBuilder, ConfigError};
//!
//! let config = ConfigBuilder::new()
//!     .add_env_file_with(".env", |source| source.optional(true))?
//!     .build()?;
//!
//! if let Some(url) = config.get("database:url") {
//!     println!("connecting to {url}");
//! }
//! # Ok::<(), ConfigError>(())
//! ```

pub mod builder;
pub mod constants;
mod error;
pub mod fs;
pub mod map;
pub mod parser;
pub mod source;
pub mod watch;

pub use builder::{ConfigBuilder, Configuration};
pub use error::{ConfigError, ParseError};
pub use fs::{FileProvider, MemoryFs, PhysicalFs};
pub use map::{EnvMap, KeyPolicy};
pub use source::file::{EnvFileProvider, EnvFileSource};
pub use source::stream::{EnvStreamProvider, EnvStreamSource};
pub use source::{ConfigProvider, ConfigSource};
pub use watch::{ChangeCallback, ChangeNotifier, ManualNotifier};
