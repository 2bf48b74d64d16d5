//! plotty - Main Entry Point
//!
//! Interactive plotter for a function of `x` with slider-controlled
//! parameters.

use plotty_rs::{
    config::{self, AppState},
    frontend::PlottyApp,
    presets::PresetCatalog,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Daily log file in the app data directory, if it can be created
fn file_log_writer() -> Option<RollingFileAppender> {
    let dir = config::log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Logging to file disabled, cannot create {:?}: {}", dir, e);
        return None;
    }
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("plotty")
        .filename_suffix("log")
        .build(&dir)
        .map_err(|e| eprintln!("Logging to file disabled: {}", e))
        .ok()
}

fn main() -> eframe::Result<()> {
    // Initialize logging
    let file_layer = file_log_writer().map(|writer| fmt::layer().with_ansi(false).with_writer(writer));
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,plotty_rs=debug")),
        )
        .with(fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!("Starting plotty {}", env!("CARGO_PKG_VERSION"));

    let app_state = AppState::load_or_default();
    let presets = PresetCatalog::load_or_builtin();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([640.0, 420.0])
            .with_title("Plotty"),
        ..Default::default()
    };

    eframe::run_native(
        "Plotty",
        native_options,
        Box::new(move |cc| {
            if app_state.ui_preferences.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            Ok(Box::new(PlottyApp::new(cc, app_state, presets)))
        }),
    )
}
