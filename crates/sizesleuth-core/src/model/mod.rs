/// Data model for SizeSleuth scan results.
///
/// Re-exports the scanned entry type, the rendered display list, and the
/// size formatting helpers.
pub mod entry;
pub mod listing;
pub mod size;

pub use entry::FileEntry;
pub use listing::{sort_largest_first, DisplayList, DisplayRow, LABEL_SEPARATOR};
