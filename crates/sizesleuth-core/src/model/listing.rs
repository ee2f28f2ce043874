//! The rendered, largest-first list of scan results.
//!
//! The scan worker sorts the materialised entries and renders each into a
//! [`DisplayRow`]. Rows are handed to the UI thread in batches; only the UI
//! thread owns and mutates the [`DisplayList`].

use super::entry::FileEntry;
use super::size::format_size;
use compact_str::CompactString;
use rayon::slice::ParallelSliceMut;
use std::path::Path;

/// Separator between the path and the size in a rendered label.
pub const LABEL_SEPARATOR: &str = " - ";

/// Sort entries by size, largest first.
///
/// The sort is stable: entries of equal size keep the order in which the
/// scanner produced them, so repeated scans of an unchanged tree render
/// identically.
pub fn sort_largest_first(entries: &mut [FileEntry]) {
    // rayon's par_sort_by is a stable merge sort.
    entries.par_sort_by(|a, b| b.size.cmp(&a.size));
}

/// One rendered line of the results list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// The entry this row was rendered from. Deletion uses `entry.path`
    /// directly, so the label never has to be parsed back.
    pub entry: FileEntry,
    /// Pre-formatted size, e.g. `"4.77 MB"`. Short enough to stay inline.
    pub size_label: CompactString,
}

impl DisplayRow {
    /// Render an entry for display.
    pub fn render(entry: FileEntry) -> Self {
        let size_label = CompactString::from(format_size(entry.size));
        Self { entry, size_label }
    }

    /// Full label: `"{path} - {size}"`.
    pub fn label(&self) -> String {
        format!(
            "{}{}{}",
            self.entry.path.display(),
            LABEL_SEPARATOR,
            self.size_label
        )
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.entry.path
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.entry.size
    }
}

/// Ordered rows shown to the user.
///
/// Rebuilt wholesale on each scan (by [`clear`](Self::clear) and
/// [`extend`](Self::extend)), mutated incrementally by index removal when
/// files are deleted.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    rows: Vec<DisplayRow>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = DisplayRow>) {
        self.rows.extend(rows);
    }

    /// Remove the row at `index`, shifting later rows up by one.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<DisplayRow> {
        if index < self.rows.len() {
            Some(self.rows.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&DisplayRow> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayRow> {
        self.rows.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the sizes of every listed file.
    pub fn total_size(&self) -> u64 {
        self.rows.iter().map(DisplayRow::size).sum()
    }
}
