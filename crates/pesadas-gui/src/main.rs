//! GUI entry point for pesadas

mod actions;
mod app;
mod records_panel;
mod surface;

use app::PesadasApp;
use eframe::egui;
use pesadas_app::logging::init_logging;

fn main() -> eframe::Result<()> {
    init_logging(false);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([720.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pesadas",
        options,
        Box::new(|cc| Ok(Box::new(PesadasApp::new(cc)))),
    )
}
