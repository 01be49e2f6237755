//! Shared fixtures for view controller tests

#![allow(dead_code)]

use pesadas_app::view::{
    ConfirmationRequest, Confirmer, EditDialogSurface, EditDraft, FormSurface, Notice, Notifier,
    Severity, TableSurface, TableView, ViewController,
};
use pesadas_domain::service::FixedClock;
use pesadas_infra::persistence::MemoryStorage;
use pesadas_store::RecordStore;

pub const STAMP: &str = "18/10/2026, 09:30:00";

/// Surface that records every call made by the controller
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub notices: Vec<Notice>,
    pub confirmations: Vec<ConfirmationRequest>,
    pub form_resets: usize,
    pub focus_requests: usize,
    pub edit_dialog: Option<EditDraft>,
    pub edit_errors: Vec<String>,
    pub table: TableView,
    pub renders: usize,
}

impl RecordingSurface {
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn last_severity(&self) -> Option<Severity> {
        self.notices.last().map(|n| n.severity)
    }

    pub fn identifiers(&self) -> Vec<String> {
        self.table.rows().iter().map(|r| r.identifier.clone()).collect()
    }
}

impl Notifier for RecordingSurface {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl Confirmer for RecordingSurface {
    fn request_confirmation(&mut self, request: ConfirmationRequest) {
        self.confirmations.push(request);
    }
}

impl FormSurface for RecordingSurface {
    fn reset_form(&mut self) {
        self.form_resets += 1;
    }

    fn focus_identifier(&mut self) {
        self.focus_requests += 1;
    }
}

impl EditDialogSurface for RecordingSurface {
    fn open_edit_dialog(&mut self, draft: EditDraft) {
        self.edit_dialog = Some(draft);
    }

    fn show_edit_error(&mut self, message: &str) {
        self.edit_errors.push(message.to_string());
    }

    fn close_edit_dialog(&mut self) {
        self.edit_dialog = None;
    }
}

impl TableSurface for RecordingSurface {
    fn replace_rows(&mut self, view: TableView) {
        self.table = view;
        self.renders += 1;
    }
}

pub type TestController = ViewController<MemoryStorage, FixedClock>;

pub fn controller_with(storage: MemoryStorage) -> TestController {
    let store = RecordStore::load(storage).expect("load store");
    ViewController::new(store, FixedClock(STAMP.to_string()))
}

pub fn empty_controller() -> TestController {
    controller_with(MemoryStorage::new())
}

/// Controller pre-filled through the normal submit path
pub fn controller_with_records(records: &[(&str, &str, &str)]) -> (TestController, RecordingSurface) {
    let mut controller = empty_controller();
    let mut surface = RecordingSurface::default();
    for (id, empty, gross) in records {
        controller
            .submit_new_record(&mut surface, id, empty, gross)
            .expect("seed record");
    }
    (controller, surface)
}
