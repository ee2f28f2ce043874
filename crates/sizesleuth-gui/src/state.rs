/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes.
/// The scan thread communicates via a channel; its messages are applied in
/// `process_scan_messages()`, which runs once per frame on the UI thread.
///
/// The display list is only ever written here. Rows rendered by the worker
/// arrive as messages, and deletions are refused while a scan is running,
/// so there is exactly one writer at any time.
use chrono::{DateTime, Local};
use crossbeam_channel::TryRecvError;
use sizesleuth_core::delete::delete_entries;
use sizesleuth_core::diagnostics::DiagnosticLog;
use sizesleuth_core::model::DisplayList;
use sizesleuth_core::scanner::progress::ScanProgress;
use sizesleuth_core::scanner::ScanHandle;
use sizesleuth_core::settings::Settings;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No scan running. Results of the last scan (if any) are shown.
    Idle,
    /// A worker is walking, sorting, or rendering.
    Scanning,
}

/// Which rows a pending deletion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Selected,
    All,
}

/// A non-fatal problem shown to the user until dismissed.
#[derive(Debug, Clone)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Local>,
}

/// Default number of scan messages drained from the channel per frame.
///
/// Prevents a backlog (e.g. after the window was hidden) from blocking the
/// render thread for a perceptible duration when it is eventually shown again.
const MAX_MESSAGES_PER_FRAME: usize = 300;

/// Maximum notifications kept on screen. The oldest is dropped first.
const MAX_NOTIFICATIONS: usize = 8;

/// Failed paths named individually in a delete summary.
const MAX_LISTED_FAILURES: usize = 5;

/// All application state.
pub struct AppState {
    // ── Configuration ──────────────────────────────────
    pub settings: Settings,
    pub log: DiagnosticLog,
    /// `true` = dark mode, `false` = light mode.
    pub dark_mode: bool,
    /// Scan messages applied per call to `process_scan_messages`.
    pub messages_per_frame: usize,

    // ── Scan ───────────────────────────────────────────
    /// Contents of the folder path field.
    pub root_input: String,
    pub phase: AppPhase,
    pub scan_handle: Option<ScanHandle>,
    /// Root of the most recent scan.
    pub scan_root: Option<PathBuf>,
    pub scan_files_found: u64,
    pub scan_current_path: String,
    pub scan_error_count: u64,
    pub scan_duration: Option<Duration>,
    /// True if the most recent scan was stopped (partial results).
    pub scan_was_cancelled: bool,

    // ── Results ────────────────────────────────────────
    pub rows: DisplayList,
    /// Indices into `rows`.
    pub selected: BTreeSet<usize>,

    // ── Dialogs ────────────────────────────────────────
    pub pending_delete: Option<DeleteTarget>,
    pub notifications: Vec<Notification>,
    pub show_about: bool,
}

impl AppState {
    /// Create initial application state.
    pub fn new(settings: Settings, log: DiagnosticLog) -> Self {
        let dark_mode = settings.dark_mode;
        Self {
            settings,
            log,
            dark_mode,
            messages_per_frame: MAX_MESSAGES_PER_FRAME,
            root_input: String::new(),
            phase: AppPhase::Idle,
            scan_handle: None,
            scan_root: None,
            scan_files_found: 0,
            scan_current_path: String::new(),
            scan_error_count: 0,
            scan_duration: None,
            scan_was_cancelled: false,
            rows: DisplayList::new(),
            selected: BTreeSet::new(),
            pending_delete: None,
            notifications: Vec::new(),
            show_about: false,
        }
    }

    pub fn is_scanning(&self) -> bool {
        self.phase == AppPhase::Scanning
    }

    // ── Scan lifecycle ─────────────────────────────────────────────────

    /// Start scanning `path`, replacing the current results.
    ///
    /// Returns `false` without touching the current results if a scan is
    /// already running or `path` is not a directory (the latter raises a
    /// notification).
    pub fn start_scan(&mut self, path: PathBuf) -> bool {
        if self.is_scanning() {
            warn!("Ignoring scan request for {}: scan in progress", path.display());
            return false;
        }

        let handle = match sizesleuth_core::scanner::start_scan(path.clone(), self.log.clone()) {
            Ok(h) => h,
            Err(e) => {
                self.notify("Cannot scan", e.to_string());
                return false;
            }
        };

        self.phase = AppPhase::Scanning;
        self.root_input = path.display().to_string();
        self.scan_root = Some(path);
        self.scan_files_found = 0;
        self.scan_current_path.clear();
        self.scan_error_count = 0;
        self.scan_duration = None;
        self.scan_was_cancelled = false;
        self.rows.clear();
        self.selected.clear();
        self.pending_delete = None;
        self.scan_handle = Some(handle);
        true
    }

    /// Start scanning whatever is in the path field.
    pub fn start_scan_from_input(&mut self) -> bool {
        let path = PathBuf::from(self.root_input.trim());
        self.start_scan(path)
    }

    /// Stop the running scan.
    ///
    /// The worker is asked to stop and its channel is dropped, so no further
    /// rows are applied. Rows already shown stay. The phase is Idle when
    /// this returns.
    pub fn cancel_scan(&mut self) {
        if let Some(handle) = self.scan_handle.take() {
            handle.cancel();
            info!("Scan of {} stopped by user", handle.root.display());
        }
        if self.is_scanning() {
            self.phase = AppPhase::Idle;
            self.scan_was_cancelled = true;
        }
    }

    /// Process pending scan messages. Called once per frame.
    ///
    /// Returns `true` if the UI should repaint (new data arrived).
    pub fn process_scan_messages(&mut self) -> bool {
        let Some(handle) = &self.scan_handle else {
            return false;
        };

        // Drain without blocking, subject to a per-frame budget.
        let mut messages = Vec::new();
        let mut disconnected = false;
        while messages.len() < self.messages_per_frame.max(1) {
            match handle.progress_rx.try_recv() {
                Ok(m) => messages.push(m),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        let repaint = !messages.is_empty() || disconnected;
        for msg in messages {
            if !self.is_scanning() {
                break;
            }
            self.apply_scan_message(msg);
        }

        if disconnected && self.is_scanning() {
            // The worker went away without a terminal message.
            warn!("Scanner thread exited unexpectedly");
            self.finish_scan(true);
            self.notify("Scan stopped", "The scanner stopped unexpectedly.".to_string());
        }

        repaint
    }

    fn apply_scan_message(&mut self, msg: ScanProgress) {
        match msg {
            ScanProgress::Update {
                files_found,
                current_path,
            } => {
                self.scan_files_found = files_found;
                self.scan_current_path = current_path;
            }
            ScanProgress::Error { .. } => {
                // Already written to the diagnostic log by the worker.
                self.scan_error_count += 1;
            }
            ScanProgress::Rows(rows) => {
                self.rows.extend(rows);
                self.scan_files_found = self.scan_files_found.max(self.rows.len() as u64);
            }
            ScanProgress::Complete {
                duration,
                file_count,
                error_count,
                ..
            } => {
                self.scan_files_found = file_count;
                self.scan_error_count = error_count;
                self.scan_duration = Some(duration);
                self.finish_scan(false);
            }
            ScanProgress::Cancelled => {
                self.finish_scan(true);
            }
        }
    }

    fn finish_scan(&mut self, cancelled: bool) {
        self.phase = AppPhase::Idle;
        self.scan_was_cancelled = cancelled;
        self.scan_handle = None;
    }

    // ── Selection ──────────────────────────────────────────────────────

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Flip the selection state of one row.
    pub fn toggle_selected(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.rows.len()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    // ── Deletion ───────────────────────────────────────────────────────

    /// Ask to delete the selected rows. Opens the confirmation dialog, or
    /// deletes immediately when confirmation is turned off.
    pub fn request_delete_selected(&mut self) {
        if self.refuse_while_scanning() || self.selected.is_empty() {
            return;
        }
        if self.settings.confirm_delete {
            self.pending_delete = Some(DeleteTarget::Selected);
        } else {
            self.delete_selected();
        }
    }

    /// Ask to delete every listed row. Does nothing on an empty list.
    pub fn request_delete_all(&mut self) {
        if self.refuse_while_scanning() || self.rows.is_empty() {
            return;
        }
        if self.settings.confirm_delete {
            self.pending_delete = Some(DeleteTarget::All);
        } else {
            self.delete_all();
        }
    }

    /// Carry out the deletion the user just confirmed. Returns the number
    /// of files deleted.
    pub fn confirm_pending_delete(&mut self) -> usize {
        match self.pending_delete.take() {
            Some(DeleteTarget::Selected) => self.delete_selected(),
            Some(DeleteTarget::All) => self.delete_all(),
            None => 0,
        }
    }

    pub fn cancel_pending_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the files behind the selected rows. Returns how many were
    /// deleted; failures are summarised in one notification.
    pub fn delete_selected(&mut self) -> usize {
        if self.refuse_while_scanning() {
            return 0;
        }
        let indices: Vec<usize> = self.selected.iter().copied().collect();
        let deleted = self.delete_rows(indices);
        self.selected.clear();
        deleted
    }

    /// Delete the files behind every listed row.
    pub fn delete_all(&mut self) -> usize {
        if self.refuse_while_scanning() {
            return 0;
        }
        let deleted = self.delete_rows(0..self.rows.len());
        self.selected.clear();
        deleted
    }

    /// Delete the rows at `indices`, highest index first.
    ///
    /// Indices are sorted and deduplicated here, so removing a row never
    /// shifts an index that is still waiting to be processed. A row whose
    /// file could not be deleted stays in the list.
    fn delete_rows(&mut self, indices: impl IntoIterator<Item = usize>) -> usize {
        let ordered: BTreeSet<usize> = indices.into_iter().collect();
        let targets: Vec<(usize, PathBuf)> = ordered
            .into_iter()
            .rev()
            .filter_map(|i| self.rows.get(i).map(|row| (i, row.path().to_path_buf())))
            .collect();
        if targets.is_empty() {
            return 0;
        }

        let paths: Vec<PathBuf> = targets.iter().map(|(_, p)| p.clone()).collect();
        let outcomes = delete_entries(&paths, &self.log);

        let mut deleted = 0;
        let mut failures = Vec::new();
        for ((index, _), outcome) in targets.iter().zip(outcomes) {
            match outcome.result {
                Ok(()) => {
                    self.rows.remove(*index);
                    deleted += 1;
                }
                Err(e) => failures.push(e.to_string()),
            }
        }
        info!("Deleted {deleted} of {} file(s)", targets.len());

        if let Some(message) = failure_summary(&failures) {
            self.notify("Could not delete file", message);
        }
        deleted
    }

    fn refuse_while_scanning(&mut self) -> bool {
        if self.is_scanning() {
            self.notify(
                "Scan in progress",
                "Stop the scan before deleting files.".to_string(),
            );
            return true;
        }
        false
    }

    // ── Misc actions ───────────────────────────────────────────────────

    /// Open the folder containing the file at `index` in the platform file
    /// manager.
    pub fn open_containing_folder(&mut self, index: usize) {
        let Some(dir) = self
            .rows
            .get(index)
            .and_then(|row| row.entry.parent_dir())
            .map(|d| d.to_path_buf())
        else {
            return;
        };
        if let Err(e) = open::that_detached(&dir) {
            self.notify("Could not open folder", format!("{}: {e}", dir.display()));
        }
    }

    /// Show a non-fatal message to the user.
    pub fn notify(&mut self, title: &str, message: String) {
        warn!("{title}: {message}");
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        self.notifications.push(Notification {
            title: title.to_string(),
            message,
            raised_at: Local::now(),
        });
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }
}

/// One message covering every failure of a delete pass, or `None` if
/// nothing failed.
fn failure_summary(failures: &[String]) -> Option<String> {
    match failures {
        [] => None,
        [only] => Some(only.clone()),
        _ => {
            let mut message = format!("{} files could not be deleted:", failures.len());
            for failure in failures.iter().take(MAX_LISTED_FAILURES) {
                message.push('\n');
                message.push_str(failure);
            }
            if failures.len() > MAX_LISTED_FAILURES {
                message.push_str(&format!(
                    "\n...and {} more (see the diagnostic log)",
                    failures.len() - MAX_LISTED_FAILURES
                ));
            }
            Some(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizesleuth_core::model::{DisplayRow, FileEntry};
    use std::fs;

    /// State listing `count` real files, named so row `i` is `file{i}`.
    fn state_with_files(dir: &std::path::Path, count: usize) -> AppState {
        let mut state = AppState::new(Settings::default(), DiagnosticLog::disabled());
        state.rows.extend((0..count).map(|i| {
            let path = dir.join(format!("file{i}"));
            fs::write(&path, b"x").unwrap();
            DisplayRow::render(FileEntry::new(path, (count - i) as u64))
        }));
        state
    }

    fn remaining(state: &AppState) -> Vec<String> {
        state
            .rows
            .iter()
            .map(|r| r.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn unordered_duplicate_indices_delete_the_right_rows() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = state_with_files(tmp.path(), 5);

        assert_eq!(state.delete_rows(vec![1, 3, 1, 4]), 3);
        assert_eq!(remaining(&state), vec!["file0", "file2"]);
        assert!(tmp.path().join("file0").exists());
        assert!(!tmp.path().join("file1").exists());
        assert!(tmp.path().join("file2").exists());
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = state_with_files(tmp.path(), 2);

        assert_eq!(state.delete_rows(vec![7, 0]), 1);
        assert_eq!(remaining(&state), vec!["file1"]);
    }

    #[test]
    fn many_failures_make_one_notification() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = state_with_files(tmp.path(), 12);
        for i in 0..12 {
            fs::remove_file(tmp.path().join(format!("file{i}"))).unwrap();
        }

        assert_eq!(state.delete_all(), 0);
        assert_eq!(state.rows.len(), 12);
        assert_eq!(state.notifications.len(), 1);
        let message = &state.notifications[0].message;
        assert!(message.starts_with("12 files could not be deleted:"), "{message}");
        assert!(message.ends_with("...and 7 more (see the diagnostic log)"), "{message}");
    }

    #[test]
    fn summary_of_a_single_failure_is_the_error_itself() {
        assert_eq!(failure_summary(&[]), None);
        assert_eq!(
            failure_summary(&["file no longer exists: /a".to_string()]),
            Some("file no longer exists: /a".to_string())
        );
    }
}
