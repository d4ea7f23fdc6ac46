#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod dialogs;
mod views;

use app::SolarDashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Optional config file as the only argument.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_title("Solar Panel Monitoring"),
        ..Default::default()
    };

    eframe::run_native(
        "SolarWatch",
        options,
        Box::new(move |cc| Ok(Box::new(SolarDashboardApp::new(cc, config_path)))),
    )
}
