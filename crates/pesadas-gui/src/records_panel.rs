//! Weighing records panel: form, filters, table and dialogs

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use pesadas_app::view::{format_weight, Severity, TableRow, COLUMNS};
use std::time::Instant;

use crate::actions::PanelAction;
use crate::surface::EguiSurface;

/// Panel for entering and browsing weighings
pub struct RecordsPanel {
    /// Search box contents
    search_text: String,
    /// Minimum net filter contents
    min_net_text: String,
    /// Action to execute (returned to parent)
    pending_action: Option<PanelAction>,
}

impl RecordsPanel {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            min_net_text: String::new(),
            pending_action: None,
        }
    }

    /// Take pending action (consumed by caller)
    pub fn take_pending_action(&mut self) -> Option<PanelAction> {
        self.pending_action.take()
    }

    /// Forget filter inputs once the full table is back
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.min_net_text.clear();
    }

    fn raise(&mut self, action: PanelAction) {
        // First action in a frame wins
        if self.pending_action.is_none() {
            self.pending_action = Some(action);
        }
    }

    /// Render the panel UI
    pub fn ui(&mut self, ui: &mut Ui, surface: &mut EguiSurface) {
        ui.heading("Registro de pesadas");
        ui.add_space(8.0);

        // Everything behind an open dialog is inert until it is answered
        let enabled = !surface.dialog_open();
        ui.add_enabled_ui(enabled, |ui| {
            self.render_form(ui, surface);

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            self.render_toolbar(ui);

            ui.add_space(8.0);

            self.render_table(ui, surface);
        });

        self.render_edit_dialog(ui, surface);
        self.render_confirm_dialog(ui, surface);
    }

    fn render_form(&mut self, ui: &mut Ui, surface: &mut EguiSurface) {
        let mut submit = false;

        ui.horizontal(|ui| {
            ui.label("Matrícula:");
            let identifier = ui.add(
                egui::TextEdit::singleline(&mut surface.form.identifier)
                    .hint_text("AB123CD")
                    .desired_width(120.0),
            );
            if surface.take_focus_request() {
                identifier.request_focus();
            }

            ui.label("Tara:");
            let empty = ui.add(
                egui::TextEdit::singleline(&mut surface.form.empty_weight)
                    .hint_text("0")
                    .desired_width(80.0),
            );

            ui.label("Bruto:");
            let gross = ui.add(
                egui::TextEdit::singleline(&mut surface.form.gross_weight)
                    .hint_text("0")
                    .desired_width(80.0),
            );

            let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
            let submitted_by_enter =
                enter && (identifier.lost_focus() || empty.lost_focus() || gross.lost_focus());

            if ui.button("Registrar").clicked() || submitted_by_enter {
                submit = true;
            }
        });

        if submit {
            self.raise(PanelAction::Submit);
        }
    }

    fn render_toolbar(&mut self, ui: &mut Ui) {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Buscar:");
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.search_text)
                    .hint_text("Matrícula")
                    .desired_width(140.0),
            );
            if search.changed() {
                action = Some(PanelAction::Search(self.search_text.clone()));
            }

            ui.add_space(16.0);

            ui.label("Neto mínimo:");
            let min_net = ui.add(
                egui::TextEdit::singleline(&mut self.min_net_text)
                    .hint_text("0")
                    .desired_width(80.0),
            );
            let enter = min_net.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Filtrar").clicked() || enter {
                action = Some(PanelAction::FilterMinNet(self.min_net_text.clone()));
            }
            if ui.button("Mostrar todo").clicked() {
                action = Some(PanelAction::ShowAll);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(RichText::new("Borrar todo").color(Color32::LIGHT_RED))
                    .clicked()
                {
                    action = Some(PanelAction::ClearAll);
                }
            });
        });

        if let Some(action) = action {
            self.raise(action);
        }
    }

    fn render_table(&mut self, ui: &mut Ui, surface: &EguiSurface) {
        let mut action = None;
        let rows = surface.table.rows();
        let max_height = (ui.available_height() - 40.0).max(120.0);

        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(32.0))
            .column(Column::initial(120.0))
            .columns(Column::initial(80.0), 3)
            .column(Column::remainder().at_least(150.0))
            .columns(Column::auto(), 2)
            .max_scroll_height(max_height)
            .header(22.0, |mut header| {
                for title in COLUMNS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in rows {
                    body.row(24.0, |mut table_row| {
                        for cell in row_cells(row) {
                            table_row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                        table_row.col(|ui| {
                            if ui.small_button("Editar").clicked() {
                                action = Some(PanelAction::Edit(row.position));
                            }
                        });
                        table_row.col(|ui| {
                            if ui
                                .small_button(RichText::new("Eliminar").color(Color32::LIGHT_RED))
                                .clicked()
                            {
                                action = Some(PanelAction::Delete(row.position));
                            }
                        });
                    });
                }
            });

        if let Some(message) = surface.table.placeholder() {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(message).italics().color(Color32::GRAY));
            });
        }

        if let Some(action) = action {
            self.raise(action);
        }
    }

    fn render_edit_dialog(&mut self, ui: &mut Ui, surface: &mut EguiSurface) {
        let Some(edit) = surface.edit.as_mut() else {
            return;
        };

        let mut action = None;

        egui::Window::new(format!("Editar pesada #{}", edit.draft.number))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                egui::Grid::new("edit_record_form")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Matrícula:");
                        ui.add(
                            egui::TextEdit::singleline(&mut edit.draft.identifier)
                                .desired_width(140.0),
                        );
                        ui.end_row();

                        ui.label("Tara:");
                        ui.add(
                            egui::TextEdit::singleline(&mut edit.draft.empty_weight)
                                .desired_width(100.0),
                        );
                        ui.end_row();

                        ui.label("Bruto:");
                        ui.add(
                            egui::TextEdit::singleline(&mut edit.draft.gross_weight)
                                .desired_width(100.0),
                        );
                        ui.end_row();
                    });

                if let Some(error) = &edit.error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(Color32::LIGHT_RED));
                }

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    if ui.button("Guardar").clicked() {
                        action = Some(PanelAction::SaveEdit);
                    }
                    if ui.button("Cancelar").clicked() {
                        action = Some(PanelAction::CancelEdit);
                    }
                });
            });

        if let Some(action) = action {
            self.raise(action);
        }
    }

    fn render_confirm_dialog(&mut self, ui: &mut Ui, surface: &EguiSurface) {
        let Some(request) = &surface.confirmation else {
            return;
        };

        let mut answer = None;

        egui::Window::new(&request.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(&request.message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(RichText::new(&request.confirm_label).color(Color32::LIGHT_RED))
                        .clicked()
                    {
                        answer = Some(true);
                    }
                    if ui.button("Cancelar").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(confirmed) = answer {
            self.raise(PanelAction::Answer(confirmed));
        }
    }
}

impl Default for RecordsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of the six data columns
fn row_cells(row: &TableRow) -> [String; 6] {
    [
        row.number.to_string(),
        row.identifier.clone(),
        format_weight(row.empty_weight),
        format_weight(row.gross_weight),
        format_weight(row.net_weight),
        row.recorded_at.clone(),
    ]
}

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => Color32::LIGHT_BLUE,
        Severity::Success => Color32::LIGHT_GREEN,
        Severity::Warning => Color32::YELLOW,
        Severity::Error => Color32::LIGHT_RED,
    }
}

/// Draw live notices stacked in the top-right corner
pub fn render_notices(ctx: &egui::Context, surface: &mut EguiSurface) {
    let now = Instant::now();
    let notices = surface.live_notices(now);
    if notices.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .interactable(false)
        .show(ctx, |ui| {
            for active in notices {
                ui.scope(|ui| {
                    ui.set_opacity(active.opacity(now));
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.set_max_width(280.0);
                        ui.label(
                            RichText::new(&active.notice.title)
                                .strong()
                                .color(severity_color(active.notice.severity)),
                        );
                        if !active.notice.message.is_empty() {
                            ui.label(&active.notice.message);
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });

    ctx.request_repaint_after(std::time::Duration::from_millis(50));
}
