//! View controller: turns user intents into record store operations and
//! keeps the rendered table in sync.
//!
//! Destructive intents use a two-step protocol. `request_delete` and
//! `request_clear_all` only ask the surface for confirmation and remember
//! the pending action; the mutation happens in `resolve_confirmation`, where
//! the target index is checked again against the current sequence.

pub mod surface;
pub mod table;

pub use surface::{
    ConfirmationRequest, Confirmer, EditDialogSurface, EditDraft, FormSurface, Notice, Notifier,
    Severity, TableSurface, ViewSurface,
};
pub use table::{format_weight, TableRow, TableView, COLUMNS, NO_RECORDS_MESSAGE, NO_RESULTS_MESSAGE};

use pesadas_domain::service::{parse_record_input, parse_weight, Clock, RecordFilter, SystemClock};
use pesadas_domain::{KeyValueStorage, WeighingRecord};
use pesadas_store::RecordStore;
use pesadas_types::{Error, RecordError, Result};
use tracing::{debug, warn};

/// Which table content is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Full sequence
    Normal,
    /// Derived subset from a filter or search
    Filtered,
}

/// Destructive action waiting for the user's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    /// `number` is the row number the user saw when asking
    Delete { index: usize, number: usize },
    ClearAll,
}

/// Owns the record store for one session and drives a [`ViewSurface`]
pub struct ViewController<S, C = SystemClock> {
    store: RecordStore<S>,
    clock: C,
    mode: ViewMode,
    pending: Option<PendingAction>,
    /// Sequence positions of the rows on screen, in display order
    displayed: Vec<usize>,
}

impl<S: KeyValueStorage, C: Clock> ViewController<S, C> {
    pub fn new(store: RecordStore<S>, clock: C) -> Self {
        Self {
            store,
            clock,
            mode: ViewMode::Normal,
            pending: None,
            displayed: Vec::new(),
        }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    /// Direct store access. A pending delete is still rechecked against the
    /// store when it is confirmed.
    pub fn store_mut(&mut self) -> &mut RecordStore<S> {
        &mut self.store
    }

    /// 1-based row number under which `index` is currently shown.
    ///
    /// Falls back to the sequence position when nothing showing it was
    /// rendered yet.
    pub fn display_number(&self, index: usize) -> usize {
        self.displayed
            .iter()
            .position(|&p| p == index)
            .map_or(index + 1, |row| row + 1)
    }

    /// Validate the form and append a new record.
    ///
    /// On rejection the form keeps its values and nothing is stored.
    pub fn submit_new_record<U: ViewSurface>(
        &mut self,
        surface: &mut U,
        raw_identifier: &str,
        raw_empty_weight: &str,
        raw_gross_weight: &str,
    ) -> Result<()> {
        let input = match parse_record_input(raw_identifier, raw_empty_weight, raw_gross_weight) {
            Ok(input) => input,
            Err(e) => {
                surface.notify(rejection_notice(&e));
                return Err(e.into());
            }
        };

        let record = WeighingRecord::new(
            &input.identifier,
            input.empty_weight,
            input.gross_weight,
            self.clock.now(),
        )?;

        if let Err(e) = self.store.add(record) {
            self.report_failure(surface, &e);
            return Err(e);
        }

        self.render(surface);
        surface.reset_form();
        surface.focus_identifier();
        surface.notify(Notice::new(
            Severity::Success,
            "Pesada registrada!",
            format!("{} (neto {})", input.identifier, format_weight(input.net_weight())),
        ));
        Ok(())
    }

    /// First step of deleting one record: ask for confirmation
    pub fn request_delete<U: ViewSurface>(&mut self, surface: &mut U, index: usize) -> Result<()> {
        if index >= self.store.len() {
            return Err(self.report_stale_index(surface, index));
        }

        let number = self.display_number(index);
        self.pending = Some(PendingAction::Delete { index, number });
        surface.request_confirmation(ConfirmationRequest {
            title: "¿Estás seguro?".to_string(),
            message: format!("Se eliminará la pesada #{}", number),
            confirm_label: "Sí, borrar".to_string(),
        });
        Ok(())
    }

    /// First step of clearing everything. Does nothing when already empty.
    pub fn request_clear_all<U: ViewSurface>(&mut self, surface: &mut U) {
        if self.store.is_empty() {
            return;
        }

        self.pending = Some(PendingAction::ClearAll);
        surface.request_confirmation(ConfirmationRequest {
            title: "Borrar todos los registros?".to_string(),
            message: "Esta acción no se puede deshacer".to_string(),
            confirm_label: "Sí, borrar todo".to_string(),
        });
    }

    /// Second step: apply or drop the pending action.
    ///
    /// Cancelling leaves everything as it was and shows nothing.
    pub fn resolve_confirmation<U: ViewSurface>(
        &mut self,
        surface: &mut U,
        confirmed: bool,
    ) -> Result<()> {
        let Some(action) = self.pending.take() else {
            return Ok(());
        };

        if !confirmed {
            debug!("Cancelled {:?}", action);
            return Ok(());
        }

        match action {
            PendingAction::Delete { index, number } => self.delete_confirmed(surface, index, number),
            PendingAction::ClearAll => self.clear_confirmed(surface),
        }
    }

    fn delete_confirmed<U: ViewSurface>(
        &mut self,
        surface: &mut U,
        index: usize,
        number: usize,
    ) -> Result<()> {
        match self.store.remove_at(index) {
            Ok(removed) => {
                // Positions after `index` shifted; an open edit would hit the wrong record
                surface.close_edit_dialog();
                self.render(surface);
                surface.notify(Notice::new(
                    Severity::Success,
                    "Eliminada",
                    format!("Se borró la pesada #{} de {}", number, removed.identifier()),
                ));
                Ok(())
            }
            Err(Error::Record(RecordError::OutOfRange { .. })) => {
                let err = self.report_stale_index(surface, index);
                self.render(surface);
                Err(err)
            }
            Err(e) => {
                self.report_failure(surface, &e);
                Err(e)
            }
        }
    }

    fn clear_confirmed<U: ViewSurface>(&mut self, surface: &mut U) -> Result<()> {
        if let Err(e) = self.store.clear() {
            self.report_failure(surface, &e);
            return Err(e);
        }

        surface.close_edit_dialog();
        self.render(surface);
        surface.notify(Notice::new(
            Severity::Success,
            "Registros eliminados",
            "Todos los registros fueron borrados",
        ));
        Ok(())
    }

    /// Open the edit dialog pre-filled with the record at `index`
    pub fn open_edit<U: ViewSurface>(&mut self, surface: &mut U, index: usize) -> Result<()> {
        let Some(record) = self.store.get(index) else {
            return Err(self.report_stale_index(surface, index));
        };

        surface.open_edit_dialog(EditDraft {
            position: index,
            number: self.display_number(index),
            identifier: record.identifier().to_string(),
            empty_weight: format_weight(record.empty_weight()),
            gross_weight: format_weight(record.gross_weight()),
        });
        Ok(())
    }

    /// Validate the edit dialog and update the record at `index`.
    ///
    /// Validation failures are shown inside the dialog, which stays open.
    /// `recorded_at` is never touched.
    pub fn request_edit<U: ViewSurface>(
        &mut self,
        surface: &mut U,
        index: usize,
        raw_identifier: &str,
        raw_empty_weight: &str,
        raw_gross_weight: &str,
    ) -> Result<()> {
        if index >= self.store.len() {
            surface.close_edit_dialog();
            return Err(self.report_stale_index(surface, index));
        }

        let input = match parse_record_input(raw_identifier, raw_empty_weight, raw_gross_weight) {
            Ok(input) => input,
            Err(e) => {
                surface.show_edit_error(edit_error_message(&e));
                return Err(e.into());
            }
        };

        if let Err(e) =
            self.store
                .edit_at(index, &input.identifier, input.empty_weight, input.gross_weight)
        {
            self.report_failure(surface, &e);
            return Err(e);
        }

        let number = self.display_number(index);
        surface.close_edit_dialog();
        self.render(surface);
        surface.notify(Notice::new(
            Severity::Success,
            "Guardado",
            format!("Pesada #{} actualizada.", number),
        ));
        Ok(())
    }

    /// Render the full sequence and return to normal mode
    pub fn render<U: TableSurface>(&mut self, surface: &mut U) {
        self.mode = ViewMode::Normal;
        self.show(
            surface,
            TableView::from_records(self.store.records().iter().enumerate(), NO_RECORDS_MESSAGE),
        );
    }

    /// Render only the records matching `predicate`, numbered from 1.
    ///
    /// The sequence itself is untouched. Returns the number of matches.
    pub fn render_filtered<U, P>(&mut self, surface: &mut U, predicate: P, empty_message: &str) -> usize
    where
        U: TableSurface,
        P: Fn(&WeighingRecord) -> bool,
    {
        self.mode = ViewMode::Filtered;
        let view = TableView::from_records(
            self.store
                .records()
                .iter()
                .enumerate()
                .filter(|(_, r)| predicate(*r)),
            empty_message,
        );
        let matches = view.rows().len();
        self.show(surface, view);
        matches
    }

    fn show<U: TableSurface>(&mut self, surface: &mut U, view: TableView) {
        self.displayed = view.rows().iter().map(|row| row.position).collect();
        surface.replace_rows(view);
    }

    /// Show records whose net weight is at least the given minimum
    pub fn filter_min_net<U: ViewSurface>(&mut self, surface: &mut U, raw_minimum: &str) -> Result<usize> {
        let Some(minimum) = parse_weight(raw_minimum) else {
            surface.notify(Notice::new(
                Severity::Warning,
                "Valor inválido",
                "Ingresa un neto mínimo válido",
            ));
            return Err(RecordError::IncompleteInput.into());
        };

        let filter = RecordFilter::MinNet(minimum);
        let matches = self.render_filtered(surface, |r| filter.matches(r), NO_RESULTS_MESSAGE);
        if matches == 0 {
            surface.notify(Notice::new(
                Severity::Info,
                "Sin resultados",
                format!(
                    "No se encontraron pesadas con neto mayor o igual a {}",
                    format_weight(minimum)
                ),
            ));
        }
        Ok(matches)
    }

    /// Show records whose identifier contains the text; blank text shows all
    pub fn search<U: TableSurface>(&mut self, surface: &mut U, raw_text: &str) -> usize {
        match RecordFilter::search(raw_text) {
            Some(filter) => self.render_filtered(surface, |r| filter.matches(r), NO_RESULTS_MESSAGE),
            None => {
                self.render(surface);
                self.store.len()
            }
        }
    }

    /// Leave filtered mode
    pub fn show_all<U: TableSurface>(&mut self, surface: &mut U) {
        self.render(surface);
    }

    fn report_stale_index<U: Notifier>(&self, surface: &mut U, index: usize) -> Error {
        let len = self.store.len();
        debug!("Ignoring stale index {} (len {})", index, len);
        surface.notify(Notice::new(
            Severity::Info,
            "Sin cambios",
            format!("La pesada #{} ya no existe", self.display_number(index)),
        ));
        RecordError::OutOfRange { index, len }.into()
    }

    fn report_failure<U: Notifier>(&self, surface: &mut U, error: &Error) {
        warn!("Operation failed: {}", error);
        let notice = match error {
            Error::Record(RecordError::StorageWriteFailure(detail)) => Notice::new(
                Severity::Error,
                "Error de almacenamiento",
                format!("No se pudieron guardar los cambios: {}", detail),
            ),
            Error::Record(e) => rejection_notice(e),
            other => Notice::new(Severity::Error, "Error", other.to_string()),
        };
        surface.notify(notice);
    }
}

fn rejection_notice(error: &RecordError) -> Notice {
    match error {
        RecordError::InvalidWeights { .. } => Notice::new(
            Severity::Error,
            "Valores incorrectos",
            "La tara no puede ser mayor que el bruto.",
        ),
        _ => Notice::new(
            Severity::Warning,
            "Campos incompletos",
            "Completa los campos primero!",
        ),
    }
}

fn edit_error_message(error: &RecordError) -> &'static str {
    match error {
        RecordError::InvalidWeights { .. } => "La tara no puede ser mayor que el bruto",
        _ => "Completa todos los campos correctamente",
    }
}
