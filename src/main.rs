mod app;
mod data;
mod error;
mod processing;
mod state;
mod ui;

use app::SheetLensApp;
use eframe::egui;
use state::settings::Settings;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // A broken config file falls back to defaults and is reported on the first frame.
    let (settings, startup_error) = Settings::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SheetLens")
            .with_inner_size(settings.window_size)
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "SheetLens",
        options,
        Box::new(move |cc| Ok(Box::new(SheetLensApp::new(cc, settings, startup_error)))),
    )
}
