//! Diagnostic log: an append-only, plain-text record of scan errors and
//! deletions.
//!
//! One free-text message per line, no timestamps, no schema. The file is
//! opened once in append mode and shared between the scan worker and the UI
//! thread behind a mutex. Every line is mirrored to `tracing` so it also
//! shows up in the console output.

use crate::error::{CoreResult, DeleteError, ScanItemError};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Default file name for the diagnostic log, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "sizesleuth.log";

/// Severity written as part of the tracing mirror. The file itself carries
/// only the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Info,
    Error,
}

/// Cheaply cloneable handle to the diagnostic log file.
///
/// A disabled log accepts every call and writes nothing to disk; it is used
/// when the file cannot be opened so the application keeps working.
#[derive(Clone, Debug)]
pub struct DiagnosticLog {
    inner: Option<Arc<Mutex<LineWriter<File>>>>,
    path: Option<PathBuf>,
}

impl DiagnosticLog {
    /// Open (or create) the log file at `path` in append mode.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            inner: Some(Arc::new(Mutex::new(LineWriter::new(file)))),
            path: Some(path.to_path_buf()),
        })
    }

    /// A log that writes nothing to disk.
    pub fn disabled() -> Self {
        Self {
            inner: None,
            path: None,
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, message: &str) {
        self.write_line(Severity::Info, message);
    }

    pub fn error(&self, message: &str) {
        self.write_line(Severity::Error, message);
    }

    /// Record an entry skipped during a scan.
    pub fn scan_item_error(&self, err: &ScanItemError) {
        self.error(&err.to_string());
    }

    /// Record a successful deletion.
    pub fn deleted(&self, path: &Path) {
        self.info(&format!("deleted file: {}", path.display()));
    }

    /// Record a failed deletion.
    pub fn delete_failed(&self, err: &DeleteError) {
        self.error(&err.to_string());
    }

    fn write_line(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "sizesleuth::diagnostics", "{message}"),
            Severity::Error => error!(target: "sizesleuth::diagnostics", "{message}"),
        }

        let Some(inner) = &self.inner else {
            return;
        };
        // A message containing newlines would break the one-line-per-event
        // shape of the file.
        let line = message.replace(['\r', '\n'], " ");
        let mut writer = inner.lock();
        if let Err(e) = writeln!(writer, "{line}") {
            warn!("Failed to write diagnostic log line: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn writes_one_line_per_message() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("diag.log");
        let log = DiagnosticLog::open(&path).unwrap();

        log.info("scan started");
        log.error("something\nwent wrong");

        assert_eq!(
            read_lines(&path),
            vec!["scan started".to_string(), "something went wrong".to_string()]
        );
    }

    #[test]
    fn reopening_appends() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("diag.log");

        DiagnosticLog::open(&path).unwrap().info("first");
        DiagnosticLog::open(&path).unwrap().info("second");

        assert_eq!(read_lines(&path), vec!["first", "second"]);
    }

    #[test]
    fn clones_share_the_same_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("diag.log");
        let log = DiagnosticLog::open(&path).unwrap();
        let worker_log = log.clone();

        let handle = std::thread::spawn(move || worker_log.info("from worker"));
        handle.join().unwrap();
        log.info("from ui");

        assert_eq!(read_lines(&path).len(), 2);
    }

    #[test]
    fn scan_and_delete_helpers_format_messages() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("diag.log");
        let log = DiagnosticLog::open(&path).unwrap();

        log.scan_item_error(&ScanItemError::Metadata {
            path: PathBuf::from("/x/y.bin"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        log.deleted(Path::new("/x/z.bin"));

        let lines = read_lines(&path);
        assert_eq!(lines[0], "could not read size of /x/y.bin: denied");
        assert_eq!(lines[1], "deleted file: /x/z.bin");
    }

    #[test]
    fn disabled_log_has_no_path() {
        let log = DiagnosticLog::disabled();
        log.error("ignored");
        assert!(log.path().is_none());
    }
}
