/// SizeSleuth GUI — egui-based desktop frontend.
///
/// This crate contains all UI code. Scanning, deletion, and the diagnostic
/// log live in `sizesleuth-core`.
pub mod app;
pub mod state;
pub mod widgets;

pub use app::{SizeSleuthApp, SizeSleuthState};
