//! Main application structure

use eframe::egui::{self, Color32, RichText};
use pesadas_app::config::Config;
use pesadas_app::repository::{open_controller, open_record_store_at};
use pesadas_app::view::ViewController;
use pesadas_domain::service::SystemClock;
use pesadas_infra::persistence::FileStorage;
use pesadas_types::Result;
use tracing::{debug, error, warn};

use crate::actions::{back_to_normal, dispatch};
use crate::records_panel::{render_notices, RecordsPanel};
use crate::surface::EguiSurface;

/// Main application state
pub struct PesadasApp {
    /// None when no storage directory could be opened
    controller: Option<ViewController<FileStorage>>,
    /// What the controller last rendered
    surface: EguiSurface,
    panel: RecordsPanel,
    /// Why the controller is missing
    startup_error: Option<String>,
}

impl PesadasApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Using default configuration: {}", e);
            Config::default()
        });

        let mut surface = EguiSurface::new();
        let (controller, startup_error) = match open_with_fallback(&config) {
            Ok(mut controller) => {
                controller.render(&mut surface);
                (Some(controller), None)
            }
            Err(e) => {
                error!("Could not open record storage: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Self {
            controller,
            surface,
            panel: RecordsPanel::new(),
            startup_error,
        }
    }
}

/// Open the configured store, falling back to a temp directory
fn open_with_fallback(config: &Config) -> Result<ViewController<FileStorage>> {
    open_controller(config).or_else(|e| {
        let fallback_dir = std::env::temp_dir().join("pesadas");
        warn!("{}; falling back to {}", e, fallback_dir.display());
        let store = open_record_store_at(fallback_dir)?;
        Ok(ViewController::new(
            store,
            SystemClock::new(config.timestamp_format.clone()),
        ))
    })
}

impl eframe::App for PesadasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = &self.startup_error {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new("No se pudo abrir el almacenamiento").strong());
                    ui.label(RichText::new(message).color(Color32::LIGHT_RED));
                });
                return;
            }

            self.panel.ui(ui, &mut self.surface);
        });

        if let (Some(controller), Some(action)) =
            (self.controller.as_mut(), self.panel.take_pending_action())
        {
            let was_filtered = !back_to_normal(controller);
            if let Err(e) = dispatch(controller, &mut self.surface, action) {
                debug!("Action not applied: {}", e);
            }
            if was_filtered && back_to_normal(controller) {
                self.panel.clear_filters();
            }
            ctx.request_repaint();
        }

        render_notices(ctx, &mut self.surface);
    }
}
