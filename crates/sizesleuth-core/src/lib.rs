/// SizeSleuth Core — scanning, sorting, deletion, and the diagnostic log.
///
/// This crate contains all business logic with zero UI dependencies.
/// It is designed to be reusable across different frontends (GUI, CLI, TUI).
///
/// # Modules
///
/// - [`model`]: File entries, size formatting, and the rendered display list.
/// - [`scanner`]: Background directory walk with cooperative cancellation.
/// - [`delete`]: Per-file removal with per-path results.
/// - [`diagnostics`]: Append-only plain-text diagnostic log.
/// - [`settings`]: JSON settings with defaults.
/// - [`error`]: Error types shared across the crate.
pub mod delete;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod scanner;
pub mod settings;

pub use error::{CoreError, CoreResult, DeleteError, ScanItemError};
