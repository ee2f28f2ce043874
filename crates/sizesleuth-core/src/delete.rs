//! File deletion with per-path results.
//!
//! A failure on one path never stops the others. Every attempt, successful
//! or not, is written to the diagnostic log.

use crate::diagnostics::DiagnosticLog;
use crate::error::DeleteError;
use std::path::{Path, PathBuf};

/// Result of one deletion attempt.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub path: PathBuf,
    pub result: Result<(), DeleteError>,
}

impl DeleteOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Remove a single file from storage.
///
/// Directories are not removed; `remove_file` fails on them and the error
/// is reported as [`DeleteError::Io`].
pub fn delete_file(path: &Path) -> Result<(), DeleteError> {
    std::fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))
}

/// Delete every path in `paths`, in order, and report each outcome.
///
/// An empty slice performs no filesystem operations and writes nothing to
/// the log.
pub fn delete_entries(paths: &[PathBuf], log: &DiagnosticLog) -> Vec<DeleteOutcome> {
    paths
        .iter()
        .map(|path| {
            let result = delete_file(path);
            match &result {
                Ok(()) => log.deleted(path),
                Err(e) => log.delete_failed(e),
            }
            DeleteOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect()
}
