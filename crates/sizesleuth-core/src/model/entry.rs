//! A single file found by a scan.

use std::path::{Path, PathBuf};

/// One `(path, size)` pair produced by the scanner.
///
/// Entries are never mutated after creation; a new scan produces a fresh set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path of the file, as reached from the scan root.
    pub path: PathBuf,
    /// Logical size in bytes.
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// The directory containing this file, if any.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path.parent()
    }
}
