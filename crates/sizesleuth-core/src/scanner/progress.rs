//! Scan progress reporting: messages sent from the scan thread to the UI
//! thread via a crossbeam channel.
//!
//! The worker never touches UI state. Rendered rows travel through this
//! channel and the receiving side appends them to its own display list.

use crate::model::DisplayRow;
use std::time::Duration;

/// Messages sent from the scan thread to the UI.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update while the directory walk is running.
    Update {
        files_found: u64,
        current_path: String,
    },
    /// A non-fatal error (one file or directory skipped).
    Error { path: String, message: String },
    /// A batch of sorted, rendered rows, in display order.
    Rows(Vec<DisplayRow>),
    /// Every row has been sent.
    Complete {
        duration: Duration,
        file_count: u64,
        total_size: u64,
        error_count: u64,
    },
    /// The scan stopped early. Rows sent before this message stay valid.
    Cancelled,
}
