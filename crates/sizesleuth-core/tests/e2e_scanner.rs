//! End-to-end scanner integration tests.
//!
//! These tests run the real scan thread against a real temporary
//! filesystem and check what arrives through the progress channel: the
//! rows, their order, and the terminal message.

use sizesleuth_core::diagnostics::DiagnosticLog;
use sizesleuth_core::model::DisplayRow;
use sizesleuth_core::scanner::progress::ScanProgress;
use sizesleuth_core::scanner::{scan_directory, start_scan, CancelToken, PROGRESS_CHANNEL_CAPACITY};
use sizesleuth_core::CoreError;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    fs::write(path, vec![0u8; n]).unwrap();
}

/// Create a file of `len` bytes without writing them (sparse where the
/// filesystem supports it).
fn sized_file(path: &Path, len: u64) {
    let f = fs::File::create(path).unwrap();
    f.set_len(len).unwrap();
}

fn log_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(str::to_owned)
        .collect()
}

/// What a finished scan delivered through its channel.
struct Drained {
    rows: Vec<DisplayRow>,
    errors: usize,
    completed: bool,
}

/// Drain every message until `Complete` or `Cancelled`.
///
/// Gives up after 30 seconds so a stuck scanner fails the test instead of
/// hanging the suite.
fn drain(handle: sizesleuth_core::scanner::ScanHandle) -> Drained {
    let mut drained = Drained {
        rows: Vec::new(),
        errors: 0,
        completed: false,
    };
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    loop {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner did not finish within 30 seconds"
        );
        match handle.progress_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(ScanProgress::Rows(rows)) => drained.rows.extend(rows),
            Ok(ScanProgress::Error { .. }) => drained.errors += 1,
            Ok(ScanProgress::Update { .. }) => {}
            Ok(ScanProgress::Complete { .. }) => {
                drained.completed = true;
                break;
            }
            Ok(ScanProgress::Cancelled) => break,
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                panic!("scanner channel disconnected before a terminal message");
            }
        }
    }
    // The terminal message is the worker's last act; the thread must be
    // gone shortly after it.
    while !handle.is_finished() {
        assert!(
            std::time::Instant::now() < deadline,
            "scanner thread still running after its terminal message"
        );
        std::thread::sleep(Duration::from_millis(5));
    }
    handle.join().expect("scanner thread panicked");
    drained
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Files of 10 B, ~5 MB and ~2 GB must come back largest first.
#[test]
fn scan_renders_largest_first() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let scan_root = tmp.path().join("root");
    let nested = scan_root.join("nested");
    fs::create_dir_all(&nested).unwrap();
    sized_file(&scan_root.join("tiny.txt"), 10);
    sized_file(&nested.join("huge.img"), 2_000_000_000);
    sized_file(&scan_root.join("medium.bin"), 5_000_000);

    let log = DiagnosticLog::open(&tmp.path().join("diag.log")).unwrap();
    let handle = start_scan(scan_root, log).unwrap();
    let drained = drain(handle);

    assert!(drained.completed);
    let listed: Vec<(String, u64)> = drained
        .rows
        .iter()
        .map(|r| {
            (
                r.path().file_name().unwrap().to_string_lossy().into_owned(),
                r.size(),
            )
        })
        .collect();
    assert_eq!(
        listed,
        vec![
            ("huge.img".to_string(), 2_000_000_000),
            ("medium.bin".to_string(), 5_000_000),
            ("tiny.txt".to_string(), 10),
        ]
    );

    let labels: Vec<String> = drained.rows.iter().map(DisplayRow::label).collect();
    assert!(labels[0].ends_with("huge.img - 1.86 GB"), "{}", labels[0]);
    assert!(labels[1].ends_with("medium.bin - 4.77 MB"), "{}", labels[1]);
    assert!(labels[2].ends_with("tiny.txt - 10 bytes"), "{}", labels[2]);
}

/// Equal sizes keep traversal (name) order, so two scans agree.
#[test]
fn equal_sizes_render_reproducibly() {
    let tmp = TempDir::new().unwrap();
    for name in ["delta", "alpha", "charlie", "bravo"] {
        write_bytes(&tmp.path().join(name), 64);
    }

    let first = drain(start_scan(tmp.path().to_path_buf(), DiagnosticLog::disabled()).unwrap());
    let second = drain(start_scan(tmp.path().to_path_buf(), DiagnosticLog::disabled()).unwrap());

    let names = |rows: &[DisplayRow]| -> Vec<String> {
        rows.iter()
            .map(|r| r.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    };
    assert_eq!(names(&first.rows), vec!["alpha", "bravo", "charlie", "delta"]);
    assert_eq!(names(&first.rows), names(&second.rows));
}

/// A dangling symlink cannot be measured: it is skipped, logged once, and
/// the other files are still returned.
#[cfg(unix)]
#[test]
fn unreadable_file_is_skipped_and_logged_once() {
    let tmp = TempDir::new().unwrap();
    let scan_root = tmp.path().join("root");
    fs::create_dir_all(&scan_root).unwrap();
    write_bytes(&scan_root.join("a.bin"), 100);
    write_bytes(&scan_root.join("b.bin"), 200);
    write_bytes(&scan_root.join("c.bin"), 300);
    std::os::unix::fs::symlink(scan_root.join("vanished.bin"), scan_root.join("dangling.bin"))
        .unwrap();

    let log_path = tmp.path().join("diag.log");
    let log = DiagnosticLog::open(&log_path).unwrap();
    let entries = scan_directory(&scan_root, &CancelToken::new(), &log);

    assert_eq!(entries.len(), 3);
    let lines = log_lines(&log_path);
    assert_eq!(lines.len(), 1, "log: {lines:?}");
    assert!(lines[0].contains("dangling.bin"));
}

/// The same failure through the scan thread surfaces as one `Error`
/// message and the scan still completes.
#[cfg(unix)]
#[test]
fn unreadable_file_reports_error_message() {
    let tmp = TempDir::new().unwrap();
    let scan_root = tmp.path().join("root");
    fs::create_dir_all(&scan_root).unwrap();
    write_bytes(&scan_root.join("ok.bin"), 10);
    std::os::unix::fs::symlink(scan_root.join("nowhere"), scan_root.join("broken")).unwrap();

    let log = DiagnosticLog::open(&tmp.path().join("diag.log")).unwrap();
    let drained = drain(start_scan(scan_root, log).unwrap());

    assert!(drained.completed);
    assert_eq!(drained.errors, 1);
    assert_eq!(drained.rows.len(), 1);
}

/// Scans of an empty directory complete with no rows.
#[test]
fn scan_empty_directory() {
    let tmp = TempDir::new().unwrap();
    let drained = drain(start_scan(tmp.path().to_path_buf(), DiagnosticLog::disabled()).unwrap());
    assert!(drained.completed);
    assert!(drained.rows.is_empty());
}

/// Cancellation must stop the scan gracefully with a terminal message.
#[test]
fn scan_cancellation_sends_terminal_message() {
    let tmp = TempDir::new().unwrap();
    for i in 0..600 {
        write_bytes(&tmp.path().join(format!("file{i:04}.bin")), i);
    }

    let handle = start_scan(tmp.path().to_path_buf(), DiagnosticLog::disabled()).unwrap();
    // The scanner may already be done by the time the flag is read, so
    // either terminal message is accepted.
    handle.cancel();
    assert!(handle.is_cancelled());
    let drained = drain(handle);
    // A cancelled scan never delivers the full list; a completed one does.
    if drained.completed {
        assert_eq!(drained.rows.len(), 600);
    } else {
        assert!(drained.rows.len() < 600);
    }
}

#[test]
fn missing_root_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let result = start_scan(tmp.path().join("absent"), DiagnosticLog::disabled());
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[test]
fn file_root_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 1);
    let result = start_scan(file, DiagnosticLog::disabled());
    assert!(matches!(result, Err(CoreError::NotADirectory(_))));
}

/// `PROGRESS_CHANNEL_CAPACITY` must never be 0, which would turn every
/// `send()` into a rendezvous.
const _: () = assert!(
    PROGRESS_CHANNEL_CAPACITY > 0,
    "PROGRESS_CHANNEL_CAPACITY must be > 0"
);
