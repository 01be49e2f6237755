//! Collaborator interfaces between the view controller and a front end
//!
//! A front end (terminal, egui window, test recorder) implements all of
//! these and thereby [`ViewSurface`].

use serde::Serialize;

use super::table::TableView;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Warning => "aviso",
            Severity::Error => "error",
        }
    }
}

/// User-facing feedback message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Question put to the user before a destructive action
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
}

/// Current values of a record, as text, for pre-filling the edit dialog
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    /// Sequence position of the record being edited
    pub position: usize,
    /// Row number the record was shown under
    pub number: usize,
    pub identifier: String,
    pub empty_weight: String,
    pub gross_weight: String,
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Asks the user to confirm.
///
/// The answer is delivered later through
/// [`ViewController::resolve_confirmation`](super::ViewController::resolve_confirmation).
pub trait Confirmer {
    fn request_confirmation(&mut self, request: ConfirmationRequest);
}

/// The new-record form
pub trait FormSurface {
    /// Clear identifier, empty weight and gross weight fields
    fn reset_form(&mut self);

    /// Return keyboard focus to the identifier field
    fn focus_identifier(&mut self);
}

pub trait EditDialogSurface {
    fn open_edit_dialog(&mut self, draft: EditDraft);

    /// Show a validation message inside the open dialog
    fn show_edit_error(&mut self, message: &str);

    fn close_edit_dialog(&mut self);
}

pub trait TableSurface {
    /// Replace the whole table body
    fn replace_rows(&mut self, view: TableView);
}

/// Everything the view controller needs from a front end
pub trait ViewSurface: Notifier + Confirmer + FormSurface + EditDialogSurface + TableSurface {}

impl<T> ViewSurface for T where T: Notifier + Confirmer + FormSurface + EditDialogSurface + TableSurface {}
