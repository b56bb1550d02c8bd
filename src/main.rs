#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe_sketchpad::config::{SketchConfig, CONFIG_ENV_VAR};

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_sketchpad::SketchApp::new(cc, config)))),
    )
}

/// Config path from the first argument, then the environment; defaults otherwise
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> SketchConfig {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR));

    match path {
        Some(path) => SketchConfig::load(&path).unwrap_or_else(|err| {
            log::error!("Ignoring config {}: {}", std::path::Path::new(&path).display(), err);
            SketchConfig::default()
        }),
        None => SketchConfig::default(),
    }
}
