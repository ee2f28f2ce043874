//! SizeSleuth — find the largest files under a folder and delete them.
//!
//! Thin binary entry point. All logic lives in the `sizesleuth-core`
//! and `sizesleuth-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use sizesleuth_core::diagnostics::DiagnosticLog;
use sizesleuth_core::settings::Settings;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("SizeSleuth starting");

    let settings = Settings::load_or_default(&Settings::default_path());

    // A log that cannot be opened must not stop the application.
    let log = match DiagnosticLog::open(&settings.log_path) {
        Ok(log) => log,
        Err(e) => {
            tracing::warn!(
                "Could not open diagnostic log {}: {e} -- continuing without it",
                settings.log_path.display()
            );
            DiagnosticLog::disabled()
        }
    };

    // An explicit directory argument is scanned straight away; otherwise the
    // folder field is only pre-filled.
    let cli_dir = std::env::args_os().nth(1).map(PathBuf::from);
    let scan_now = cli_dir.is_some();
    let initial_dir = settings.initial_dir(cli_dir);

    // Build application state *before* opening the window so the first
    // rendered frame arrives immediately.
    let state = sizesleuth_gui::SizeSleuthState::build(settings, log, initial_dir, scan_now);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SizeSleuth -- Largest Files")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SizeSleuth",
        options,
        Box::new(|cc| {
            Ok(Box::new(sizesleuth_gui::SizeSleuthApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
