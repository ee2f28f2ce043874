/// UI widgets for SizeSleuth.

pub mod dialogs;
pub mod file_list;
pub mod status_bar;
pub mod toolbar;
