//! File-system abstraction for file-backed sources.
//!
//! Responsibilities:
//! - Define the read-only file capability a file source resolves through.
//! - Provide a local-disk implementation and an in-memory one for tests
//!   and embedders.
//!
//! Does NOT handle:
//! - Path discovery or base-path resolution (the host owns that).
//! - Watching for changes (see `watch`).

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Read-only file access used by file-backed configuration sources.
///
/// Hosts with their own file abstraction implement this at the boundary;
/// everything behind `open` is theirs.
pub trait FileProvider: Send + Sync {
    /// Open the file at `path` for reading.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// File provider backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalFs;

impl FileProvider for PhysicalFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(std::fs::File::open(path)?))
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory file provider.
///
/// Lets tests exercise file sources without touching the disk, and lets
/// embedders serve configuration from baked-in content.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFs {
    /// Create an empty in-memory file table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file.
    pub fn put(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .expect("file table lock poisoned")
            .insert(path.into(), contents.into());
    }

    /// Remove a file if present.
    pub fn remove(&self, path: &Path) {
        self.files
            .lock()
            .expect("file table lock poisoned")
            .remove(path);
    }
}

impl FileProvider for MemoryFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        let files = self.files.lock().expect("file table lock poisoned");
        match files.get(path) {
            Some(contents) => Ok(Box::new(Cursor::new(contents.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .expect("file table lock poisoned")
            .contains_key(path)
    }
}
