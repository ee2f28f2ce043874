/// Top action bar -- folder field, scan controls, selection and delete
/// actions, theme toggle, and branding.
use crate::state::AppState;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // App title -- uses the egui accent/hyperlink colour so it adapts to
        // dark and light mode automatically.
        ui.label(
            egui::RichText::new("📏 SizeSleuth")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        let idle = !state.is_scanning();

        // Folder field. Enter starts a scan.
        let path_edit = ui.add_enabled(
            idle,
            egui::TextEdit::singleline(&mut state.root_input)
                .hint_text("Folder to scan")
                .desired_width(320.0),
        );
        let submitted = path_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let scan_btn = ui.add_enabled(
            idle,
            egui::Button::new("▶ Scan").min_size(egui::vec2(70.0, 28.0)),
        );
        if idle && (scan_btn.clicked() || submitted) {
            state.start_scan_from_input();
        }

        let stop_btn = ui.add_enabled(
            !idle,
            egui::Button::new("⏹ Stop").min_size(egui::vec2(70.0, 28.0)),
        );
        if stop_btn.clicked() {
            state.cancel_scan();
        }

        ui.separator();

        let has_rows = !state.rows.is_empty();
        if ui
            .add_enabled(has_rows, egui::Button::new("Select all"))
            .clicked()
        {
            state.select_all();
        }
        if ui
            .add_enabled(!state.selected.is_empty(), egui::Button::new("Deselect all"))
            .clicked()
        {
            state.deselect_all();
        }

        ui.separator();

        // Deletion is disabled during a scan; the list is still being filled.
        let can_delete_selected = idle && !state.selected.is_empty();
        if ui
            .add_enabled(can_delete_selected, egui::Button::new("🗑 Delete selected"))
            .on_disabled_hover_text(if idle {
                "Select one or more files first"
            } else {
                "Cannot delete while a scan is running"
            })
            .clicked()
        {
            state.request_delete_selected();
        }
        if ui
            .add_enabled(idle && has_rows, egui::Button::new("🗑 Delete all"))
            .on_disabled_hover_text(if idle {
                "Nothing to delete"
            } else {
                "Cannot delete while a scan is running"
            })
            .clicked()
        {
            state.request_delete_all();
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About SizeSleuth").clicked() {
                state.show_about = true;
            }

            // ── Theme toggle (☀ light / 🌙 dark) ──────────────────
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
