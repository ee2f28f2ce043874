/// Virtualised list of scanned files, largest first.
///
/// Click toggles a row's selection, double-click opens the containing
/// folder, right-click shows a context menu. Actions are collected while
/// drawing and applied afterwards so the list is never mutated mid-frame.
use crate::state::{AppPhase, AppState};
use egui::{Rect, Sense, Ui, Vec2};

const ROW_HEIGHT: f32 = 22.0;

/// Width reserved for the right-aligned size column.
const SIZE_COLUMN_WIDTH: f32 = 110.0;

/// Deferred action from a row interaction.
enum RowAction {
    Toggle(usize),
    OpenFolder(usize),
}

/// Draw the file list (centre content area).
pub fn file_list(ui: &mut Ui, state: &mut AppState) {
    if state.rows.is_empty() {
        empty_state(ui, state);
        return;
    }

    let color_selection = ui.visuals().selection.bg_fill;
    let color_hover = ui.visuals().widgets.hovered.weak_bg_fill;
    let color_text = ui.visuals().text_color();
    let color_selected_text = ui.visuals().selection.stroke.color;
    let color_size = ui.visuals().hyperlink_color;

    let mut action = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, ROW_HEIGHT, state.rows.len(), |ui, range| {
            for index in range {
                let Some(row) = state.rows.get(index) else {
                    break;
                };

                let (row_rect, row_response) = ui.allocate_exact_size(
                    Vec2::new(ui.available_width(), ROW_HEIGHT),
                    Sense::click(),
                );
                let painter = ui.painter_at(row_rect);

                let is_selected = state.is_selected(index);
                if is_selected {
                    painter.rect_filled(row_rect, 0.0, color_selection);
                } else if row_response.hovered() {
                    painter.rect_filled(row_rect, 0.0, color_hover);
                }

                if row_response.double_clicked() {
                    action = Some(RowAction::OpenFolder(index));
                } else if row_response.clicked() {
                    action = Some(RowAction::Toggle(index));
                }

                row_response.context_menu(|ui| {
                    if ui.button("📂 Open containing folder").clicked() {
                        action = Some(RowAction::OpenFolder(index));
                        ui.close_menu();
                    }
                    if ui.button("📋 Copy path").clicked() {
                        ui.ctx().copy_text(row.path().display().to_string());
                        ui.close_menu();
                    }
                });

                let text_color = if is_selected {
                    color_selected_text
                } else {
                    color_text
                };
                let path_rect = Rect::from_min_max(
                    row_rect.min,
                    egui::pos2(row_rect.right() - SIZE_COLUMN_WIDTH, row_rect.bottom()),
                );
                ui.painter_at(path_rect).text(
                    egui::pos2(row_rect.left() + 6.0, row_rect.center().y),
                    egui::Align2::LEFT_CENTER,
                    row.path().display().to_string(),
                    egui::FontId::proportional(13.0),
                    text_color,
                );
                painter.text(
                    egui::pos2(row_rect.right() - 8.0, row_rect.center().y),
                    egui::Align2::RIGHT_CENTER,
                    row.size_label.as_str(),
                    egui::FontId::monospace(12.0),
                    color_size,
                );

                row_response.on_hover_text(row.label());
            }
        });

    match action {
        Some(RowAction::Toggle(index)) => state.toggle_selected(index),
        Some(RowAction::OpenFolder(index)) => state.open_containing_folder(index),
        None => {}
    }
}

fn empty_state(ui: &mut Ui, state: &AppState) {
    let muted = ui.visuals().weak_text_color();
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        match state.phase {
            AppPhase::Scanning => {
                ui.spinner();
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Scanning... results appear once sizes are sorted.")
                        .size(14.0)
                        .color(muted),
                );
            }
            AppPhase::Idle if state.scan_root.is_some() => {
                ui.label(
                    egui::RichText::new("No files found.")
                        .size(14.0)
                        .color(muted),
                );
            }
            AppPhase::Idle => {
                ui.label(
                    egui::RichText::new("Enter a folder and click Scan to list its largest files.")
                        .size(14.0)
                        .color(muted),
                );
            }
        }
    });
}
