/// Background scanning.
///
/// One scan runs on one dedicated thread: walk the tree, sort the entries
/// largest-first, render them into rows, and send the rows to the UI in
/// batches. The UI owns the display list; the worker only sends messages.
///
/// Each scan session has its own [`CancelToken`]. Cancellation is
/// cooperative: the worker checks the token between walked entries and
/// between rendered rows, and stops at the next check.
pub mod progress;
pub mod walk;

pub use walk::{probe_size, scan_directory, walk_files, WalkOutcome};

use crate::diagnostics::DiagnosticLog;
use crate::error::{CoreError, CoreResult};
use crate::model::{sort_largest_first, DisplayRow, FileEntry};
use crossbeam_channel::{Receiver, Sender};
use progress::ScanProgress;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::info;

/// Maximum number of progress messages that may queue up in the channel.
///
/// The UI drains this channel once per frame. If it falls behind, the
/// scanner blocks on `send` instead of buffering without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 1_024;

/// Rows per [`ScanProgress::Rows`] message.
pub const RENDER_BATCH_SIZE: usize = 256;

/// Per-session cancellation flag, shared by the handle and its worker.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to stop at its next check.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress updates.
///
/// Dropping the handle drops the receiver; the worker notices on its next
/// send and exits.
pub struct ScanHandle {
    /// Receiver for progress updates and rendered rows.
    pub progress_rx: Receiver<ScanProgress>,
    /// The directory being scanned.
    pub root: PathBuf,
    cancel: CancelToken,
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// `true` once the worker thread has returned.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Block until the worker thread exits.
    pub fn join(mut self) -> thread::Result<()> {
        match self.thread.take() {
            Some(t) => t.join(),
            None => Ok(()),
        }
    }
}

/// Start a new scan of `root` on a background thread.
///
/// Returns a [`ScanHandle`] for receiving progress and rows and for
/// requesting cancellation. Entries that cannot be measured are written to
/// `log` and reported as [`ScanProgress::Error`].
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `root` does not exist.
/// - [`CoreError::NotADirectory`] if `root` is not a directory.
/// - [`CoreError::Spawn`] if the worker thread cannot be created.
pub fn start_scan(root: PathBuf, log: DiagnosticLog) -> CoreResult<ScanHandle> {
    if !root.exists() {
        return Err(CoreError::NotFound(root));
    }
    if !root.is_dir() {
        return Err(CoreError::NotADirectory(root));
    }

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel = CancelToken::new();
    let worker_cancel = cancel.clone();
    let worker_root = root.clone();

    let thread = thread::Builder::new()
        .name("sizesleuth-scanner".into())
        .spawn(move || run_scan(&worker_root, &progress_tx, &worker_cancel, &log))
        .map_err(CoreError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        root,
        cancel,
        thread: Some(thread),
    })
}

/// Body of the scan thread: walk, sort, render, report.
fn run_scan(root: &Path, tx: &Sender<ScanProgress>, cancel: &CancelToken, log: &DiagnosticLog) {
    let start = Instant::now();
    info!("Starting scan of {}", root.display());

    let outcome = walk_files(
        root,
        cancel,
        probe_size,
        |err| {
            log.scan_item_error(&err);
            let _ = tx.send(ScanProgress::Error {
                path: err.path().display().to_string(),
                message: err.to_string(),
            });
        },
        |files_found, current| {
            let _ = tx.send(ScanProgress::Update {
                files_found,
                current_path: current.display().to_string(),
            });
        },
    );

    if outcome.cancelled {
        info!("Scan of {} stopped during the walk", root.display());
        let _ = tx.send(ScanProgress::Cancelled);
        return;
    }

    let error_count = outcome.error_count;
    let mut entries = outcome.entries;
    sort_largest_first(&mut entries);
    let file_count = entries.len() as u64;
    let total_size: u64 = entries.iter().map(|e| e.size).sum();

    if !render_rows(entries, tx, cancel) {
        info!("Scan of {} stopped while rendering", root.display());
        let _ = tx.send(ScanProgress::Cancelled);
        return;
    }

    let duration = start.elapsed();
    info!(
        "Scan of {} complete: {} files, {} skipped, in {:?}",
        root.display(),
        file_count,
        error_count,
        duration
    );
    let _ = tx.send(ScanProgress::Complete {
        duration,
        file_count,
        total_size,
        error_count,
    });
}

/// Render sorted entries into rows and send them in batches.
///
/// The token is checked before each row. On cancellation the rows rendered
/// so far are still sent, then rendering stops. Returns `false` if it
/// stopped early (cancelled, or the receiver is gone).
fn render_rows(entries: Vec<FileEntry>, tx: &Sender<ScanProgress>, cancel: &CancelToken) -> bool {
    let mut batch: Vec<DisplayRow> = Vec::with_capacity(RENDER_BATCH_SIZE);

    for entry in entries {
        if cancel.is_cancelled() {
            if !batch.is_empty() {
                let _ = tx.send(ScanProgress::Rows(batch));
            }
            return false;
        }
        batch.push(DisplayRow::render(entry));
        if batch.len() == RENDER_BATCH_SIZE {
            let full = std::mem::replace(&mut batch, Vec::with_capacity(RENDER_BATCH_SIZE));
            if tx.send(ScanProgress::Rows(full)).is_err() {
                return false;
            }
        }
    }

    if !batch.is_empty() && tx.send(ScanProgress::Rows(batch)).is_err() {
        return false;
    }
    true
}
