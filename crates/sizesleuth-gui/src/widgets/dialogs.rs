/// Modal-style windows: delete confirmation, notifications, and About.
use crate::state::{AppState, DeleteTarget};
use sizesleuth_core::model::size::format_count;

/// Ask the user to confirm a pending deletion.
pub fn confirm_delete(ctx: &egui::Context, state: &mut AppState) {
    let Some(target) = state.pending_delete else {
        return;
    };
    let count = match target {
        DeleteTarget::Selected => state.selected.len(),
        DeleteTarget::All => state.rows.len(),
    };

    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Confirm delete")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Permanently delete {} file(s)?",
                format_count(count as u64)
            ));
            ui.label(
                egui::RichText::new("This cannot be undone.")
                    .size(12.0)
                    .color(ui.visuals().warn_fg_color),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("🗑 Delete").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_pending_delete();
    } else if cancelled {
        state.cancel_pending_delete();
    }
}

/// Stack of dismissable notifications in the bottom-right corner.
pub fn notifications(ctx: &egui::Context, state: &mut AppState) {
    let mut dismissed = None;

    for (i, note) in state.notifications.iter().enumerate() {
        egui::Window::new(note.title.clone())
            .id(egui::Id::new(("notification", i)))
            .collapsible(false)
            .resizable(false)
            .anchor(
                egui::Align2::RIGHT_BOTTOM,
                [-12.0, -36.0 - i as f32 * 96.0],
            )
            .fixed_size([300.0, 0.0])
            .show(ctx, |ui| {
                ui.label(note.message.as_str());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(note.raised_at.format("%H:%M:%S").to_string())
                            .size(10.0)
                            .color(ui.visuals().weak_text_color()),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("OK").clicked() {
                            dismissed = Some(i);
                        }
                    });
                });
            });
    }

    if let Some(i) = dismissed {
        state.dismiss_notification(i);
    }
}

/// The About window.
pub fn about(ctx: &egui::Context, state: &mut AppState) {
    let mut show_about = state.show_about;
    egui::Window::new("About SizeSleuth")
        .open(&mut show_about)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([340.0, 0.0])
        .show(ctx, |ui| {
            // Theme-aware colours so the dialog reads well in both modes.
            let accent = ui.visuals().hyperlink_color;
            let muted = ui.visuals().weak_text_color();
            let normal = ui.visuals().text_color();

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("📏 SizeSleuth")
                        .size(24.0)
                        .strong()
                        .color(accent),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(13.0)
                        .color(muted),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Lists every file under a folder, largest first,\n\
                         and lets you delete the ones you no longer need.",
                    )
                    .size(12.0)
                    .color(normal),
                );
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);
                if let Some(path) = state.log.path() {
                    ui.label(
                        egui::RichText::new(format!("Diagnostic log: {}", path.display()))
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(4.0);
                }
                ui.label(
                    egui::RichText::new("Built with Rust & egui")
                        .size(11.0)
                        .color(muted),
                );
                ui.add_space(8.0);
            });
        });
    state.show_about = show_about;
}
