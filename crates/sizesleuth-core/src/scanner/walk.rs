//! Recursive directory walk using `jwalk`.
//!
//! Produces a fully materialised `Vec<FileEntry>`. Sorting needs every
//! entry, so nothing is streamed. Directory symlinks are not followed.
//! A file whose size cannot be read is skipped and reported through the
//! `on_error` callback; the walk always carries on.

use super::CancelToken;
use crate::diagnostics::DiagnosticLog;
use crate::error::ScanItemError;
use crate::model::FileEntry;
use std::io;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

/// How many walked entries pass between two cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 256;

/// How many files are found between two progress callbacks.
const PROGRESS_INTERVAL: usize = 2_000;

/// Everything a walk produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Files in traversal order (siblings sorted by name).
    pub entries: Vec<FileEntry>,
    /// Entries and directories that were skipped.
    pub error_count: u64,
    /// `true` if the walk stopped because the token was cancelled.
    pub cancelled: bool,
}

/// Read the size of the file at `path`.
///
/// Follows file symlinks, so a dangling link is an error. Returns
/// `Ok(None)` for anything that resolves to a directory (a symlink to a
/// directory), which is skipped without being treated as a failure.
pub fn probe_size(path: &Path) -> io::Result<Option<u64>> {
    let meta = std::fs::metadata(path)?;
    Ok(if meta.is_dir() { None } else { Some(meta.len()) })
}

/// Walk `root` and return every file with its size.
///
/// Skipped entries are written to `log`; nothing is returned as an error.
pub fn scan_directory(root: &Path, cancel: &CancelToken, log: &DiagnosticLog) -> Vec<FileEntry> {
    walk_files(
        root,
        cancel,
        probe_size,
        |err| log.scan_item_error(&err),
        |_, _| {},
    )
    .entries
}

/// Walk `root` with an explicit size probe and callbacks.
///
/// - `probe` reads one file's size (see [`probe_size`]).
/// - `on_error` receives every skipped entry.
/// - `on_progress` receives `(files_found, latest_path)` every few thousand
///   files.
pub fn walk_files<S, E, P>(
    root: &Path,
    cancel: &CancelToken,
    mut probe: S,
    mut on_error: E,
    mut on_progress: P,
) -> WalkOutcome
where
    S: FnMut(&Path) -> io::Result<Option<u64>>,
    E: FnMut(ScanItemError),
    P: FnMut(u64, &Path),
{
    let start = Instant::now();
    let mut outcome = WalkOutcome::default();
    let mut visited: u64 = 0;

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        visited += 1;
        if visited % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            debug!(
                "Walk of {} cancelled after {} entries",
                root.display(),
                visited
            );
            outcome.cancelled = true;
            return outcome;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are directory reads that failed.
                outcome.error_count += 1;
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                on_error(ScanItemError::ReadDir {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        match probe(&path) {
            Ok(Some(size)) => {
                outcome.entries.push(FileEntry::new(path, size));
                let found = outcome.entries.len();
                if found % PROGRESS_INTERVAL == 0 {
                    if let Some(latest) = outcome.entries.last() {
                        on_progress(found as u64, &latest.path);
                    }
                }
            }
            Ok(None) => {}
            Err(source) => {
                outcome.error_count += 1;
                on_error(ScanItemError::Metadata { path, source });
            }
        }
    }

    outcome.cancelled = cancel.is_cancelled();
    debug!(
        "Walk of {} finished: {} files, {} skipped, {} entries visited in {:?}",
        root.display(),
        outcome.entries.len(),
        outcome.error_count,
        visited,
        start.elapsed()
    );
    outcome
}
