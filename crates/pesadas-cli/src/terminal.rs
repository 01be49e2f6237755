//! Terminal implementation of the view surface
//!
//! Notices go to stderr. Confirmations are asked on stderr and answered from
//! stdin, unless `--yes` was given.

use std::io::{self, BufRead, Write};

use pesadas_app::view::{
    ConfirmationRequest, Confirmer, EditDialogSurface, EditDraft, FormSurface, Notice, Notifier,
    Severity, TableSurface, TableView,
};
use tracing::debug;

pub struct TerminalSurface {
    assume_yes: bool,
    answer: Option<bool>,
    table: TableView,
    edit_draft: Option<EditDraft>,
}

impl TerminalSurface {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            answer: None,
            table: TableView::default(),
            edit_draft: None,
        }
    }

    /// Answer to the last confirmation request, if one was asked
    pub fn take_answer(&mut self) -> Option<bool> {
        self.answer.take()
    }

    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn take_edit_draft(&mut self) -> Option<EditDraft> {
        self.edit_draft.take()
    }
}

/// "s", "si", "sí", "y", "yes" (any case) confirm; anything else cancels
fn is_affirmative(line: &str) -> bool {
    matches!(
        line.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

fn prompt(request: &ConfirmationRequest) -> bool {
    eprint!(
        "{} {} ({}) [s/N]: ",
        request.title, request.message, request.confirm_label
    );
    let _ = io::stderr().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => is_affirmative(&line),
        Err(e) => {
            debug!("Could not read confirmation: {}", e);
            false
        }
    }
}

impl Notifier for TerminalSurface {
    fn notify(&mut self, notice: Notice) {
        match notice.severity {
            Severity::Info | Severity::Success => {
                eprintln!("{}: {}", notice.title, notice.message)
            }
            Severity::Warning | Severity::Error => eprintln!(
                "[{}] {}: {}",
                notice.severity.label(),
                notice.title,
                notice.message
            ),
        }
    }
}

impl Confirmer for TerminalSurface {
    fn request_confirmation(&mut self, request: ConfirmationRequest) {
        let confirmed = self.assume_yes || prompt(&request);
        self.answer = Some(confirmed);
    }
}

impl FormSurface for TerminalSurface {
    fn reset_form(&mut self) {}

    fn focus_identifier(&mut self) {}
}

impl EditDialogSurface for TerminalSurface {
    fn open_edit_dialog(&mut self, draft: EditDraft) {
        self.edit_draft = Some(draft);
    }

    fn show_edit_error(&mut self, message: &str) {
        eprintln!("[{}] {}", Severity::Warning.label(), message);
    }

    fn close_edit_dialog(&mut self) {
        self.edit_draft = None;
    }
}

impl TableSurface for TerminalSurface {
    fn replace_rows(&mut self, view: TableView) {
        self.table = view;
    }
}
