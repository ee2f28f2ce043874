/// Main `eframe::App` implementation for SizeSleuth.
///
/// This is the top-level UI layout that composes the toolbar, file list,
/// status bar, and dialogs.
use crate::state::AppState;
use crate::widgets;
use sizesleuth_core::diagnostics::DiagnosticLog;
use sizesleuth_core::settings::Settings;
use std::path::PathBuf;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that the
/// initial scan (if any) is already running when the window first paints.
pub struct SizeSleuthState {
    pub(crate) inner: AppState,
}

impl SizeSleuthState {
    /// Build the state and pre-fill the folder field.
    ///
    /// `initial_dir` is shown in the folder field. When `scan_now` is true
    /// (a directory was named on the command line) the scan starts
    /// immediately.
    pub fn build(
        settings: Settings,
        log: DiagnosticLog,
        initial_dir: Option<PathBuf>,
        scan_now: bool,
    ) -> Self {
        let mut state = AppState::new(settings, log);

        if let Some(dir) = initial_dir {
            state.root_input = dir.display().to_string();
            if scan_now {
                state.start_scan(dir);
            }
        }

        Self { inner: state }
    }

    /// Access the controller, e.g. to drive it without a window.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.inner
    }
}

/// The SizeSleuth application.
pub struct SizeSleuthApp {
    state: AppState,
}

impl SizeSleuthApp {
    /// Create a new application instance from pre-built state.
    ///
    /// The state should have been constructed by [`SizeSleuthState::build()`]
    /// *before* `eframe::run_native` is called.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: SizeSleuthState) -> Self {
        let visuals = if state.inner.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        cc.egui_ctx.set_visuals(visuals);

        Self { state: state.inner }
    }
}

impl eframe::App for SizeSleuthApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        // Called every frame so that toggling dark_mode takes effect
        // immediately on the next rendered frame.
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process background messages ───────────────────────────────────
        let data_changed = self.state.process_scan_messages();

        // Keep polling while the worker runs, even when nothing arrived.
        if self.state.is_scanning() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        } else if data_changed {
            ctx.request_repaint();
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Dialogs ───────────────────────────────────────────────────────
        widgets::dialogs::about(ctx, &mut self.state);
        widgets::dialogs::confirm_delete(ctx, &mut self.state);
        widgets::dialogs::notifications(ctx, &mut self.state);

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── File list ─────────────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::file_list::file_list(ui, &mut self.state);
        });
    }
}
