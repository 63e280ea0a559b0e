//! Tests for the stream- and file-backed sources.
//!
//! Responsibilities:
//! - Test source build semantics and provider load/lookup behavior.
//! - Test optional-file and reload-on-change handling.
//!
//! Does NOT handle:
//! - Parser edge cases (tested in `parser`).
//!
//! Invariants:
//! - File tests run against `MemoryFs` (or `tempfile` where the physical
//!   file system is the point); no test touches process-global state.

use std::path::Path;
use std::sync::Arc;

use crate::fs::MemoryFs;
use crate::source::file::EnvFileSource;


/// Build a file source over an in-memory file table.
fn memory_source(fs: &Arc<MemoryFs>, path: &str) -> EnvFileSource {
    EnvFileSource::new(path)
        .expect("path is non-empty")
        .file_provider(Arc::clone(fs) as Arc<dyn crate::fs::FileProvider>)
}

/// Shorthand for an in-memory file table seeded with one file.
fn seeded_fs(path: &str, contents: &str) -> Arc<MemoryFs> {
    let fs = Arc::new(MemoryFs::new());
    fs.put(Path::new(path), contents);
    fs
}
