#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

// Remote API worker and wire decoding
mod api;

// Application shell
mod app;

// Scatter-chart engine: materialization, statistics, scales, hit-testing
mod chart;

// Application constants
mod constants;

// Row storage and per-column summaries
mod data;

// Error handling
mod error;

// Application state modules
mod state;

// Panels and render surface
mod ui;

use app::Anthroscope;

fn main() -> eframe::Result {
    env_logger::init();

    let host = std::env::var(constants::api::HOST_ENV_VAR)
        .unwrap_or_else(|_| constants::api::DEFAULT_HOST.to_string());
    log::info!("using data API at {host}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Anthroscope — Anthropometric Measurements",
        options,
        Box::new(move |_| Ok(Box::new(Anthroscope::new(host)))),
    )
}
