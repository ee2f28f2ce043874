/// Bottom status bar: scan progress and list statistics.
use crate::state::{AppPhase, AppState};
use egui::Ui;
use sizesleuth_core::model::size::{format_count, format_size};

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    // Extract theme-adaptive colours once for this frame.
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

    ui.horizontal(|ui| match state.phase {
        AppPhase::Scanning => {
            ui.spinner();
            ui.label(
                egui::RichText::new("Scanning... Please wait.")
                    .size(12.0)
                    .color(color_normal),
            );

            ui.separator();

            ui.label(
                egui::RichText::new(format!("{} files", format_count(state.scan_files_found)))
                    .size(12.0)
                    .color(color_normal),
            );

            if !state.scan_current_path.is_empty() {
                ui.separator();
                ui.label(
                    egui::RichText::new(truncate_path(&state.scan_current_path, 60))
                        .size(12.0)
                        .color(color_weak),
                );
            }

            if state.scan_error_count > 0 {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} errors",
                        format_count(state.scan_error_count)
                    ))
                    .size(12.0)
                    .color(color_warning),
                );
            }
        }
        AppPhase::Idle if state.scan_root.is_none() => {
            ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
        }
        AppPhase::Idle => {
            let (status_text, status_color) = if state.scan_was_cancelled {
                ("\u{23f9} Scan stopped (partial results)", color_warning)
            } else {
                ("\u{2713} Scan complete", color_success)
            };
            ui.label(
                egui::RichText::new(status_text)
                    .size(12.0)
                    .color(status_color),
            );

            ui.separator();

            ui.label(
                egui::RichText::new(format!("{} files", format_count(state.rows.len() as u64)))
                    .size(12.0)
                    .color(color_normal),
            );

            ui.separator();

            ui.label(
                egui::RichText::new(format_size(state.rows.total_size()))
                    .size(12.0)
                    .color(color_accent),
            );

            if !state.selected.is_empty() {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} selected",
                        format_count(state.selected.len() as u64)
                    ))
                    .size(12.0)
                    .color(color_normal),
                );
            }

            if let Some(duration) = state.scan_duration {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{:.1}s", duration.as_secs_f64()))
                        .size(12.0)
                        .color(color_weak),
                );
            }

            if state.scan_error_count > 0 {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} skipped",
                        format_count(state.scan_error_count)
                    ))
                    .size(12.0)
                    .color(color_warning),
                );
            }
        }
    });
}

/// Truncate a path string to fit within `max_len` characters,
/// replacing the middle with "..." if needed.
fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }
    let half = max_len.saturating_sub(3) / 2;
    let head: String = path.chars().take(half).collect();
    let tail: String = path.chars().skip(len - half).collect();
    format!("{head}...{tail}")
}
