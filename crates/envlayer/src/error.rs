//! Error types for parsing and source registration.
//!
//! Responsibilities:
//! - Define parse-time errors (malformed line, duplicate key, stream I/O).
//! - Define registration- and load-time errors for sources and providers.
//!
//! Does NOT handle:
//! - Error reporting or recovery (callers decide; nothing is swallowed).
//!
//! Invariants:
//! - A parse failure never yields a partial mapping.
//! - `UnrecognizedLine` carries the raw line as read, before trimming.
//! - `DuplicateKey` carries the normalized key.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading a `.env`-style stream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A non-blank, non-comment line contains no `=` separator.
    #[error("unrecognized line format: {line:?}")]
    UnrecognizedLine { line: String },

    /// The normalized key was already present in the mapping.
    #[error("duplicate key: {key:?}")]
    DuplicateKey { key: String },

    /// The underlying stream failed mid-read.
    #[error("failed to read stream: {0}")]
    Io(#[from] io::Error),
}

/// Errors produced while registering or loading configuration sources.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A required (non-optional) file does not exist.
    #[error("configuration file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// The path given at registration was empty.
    #[error("invalid file path: path must not be empty")]
    InvalidPath,

    /// The one-shot stream behind a stream source was already consumed.
    #[error("stream source has already been consumed")]
    StreamConsumed,

    /// Opening the configuration file failed.
    #[error("failed to open configuration file: {0}")]
    Io(#[from] io::Error),
}
