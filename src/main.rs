mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use app::NominaApp;
use eframe::egui;
use nomina_viewer::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new("."));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nómina – Carga Académica",
        options,
        Box::new(|_cc| Ok(Box::new(NominaApp::new(config)))),
    )
}
