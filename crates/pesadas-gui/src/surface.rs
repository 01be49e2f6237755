//! Frame-to-frame state the view controller writes into
//!
//! The panel reads this every frame; the controller only ever touches it
//! through the `ViewSurface` traits.

use std::time::{Duration, Instant};

use pesadas_app::view::{
    ConfirmationRequest, Confirmer, EditDialogSurface, EditDraft, FormSurface, Notice, Notifier,
    TableSurface, TableView,
};

/// How long a notice stays on screen
pub const NOTICE_LIFETIME: Duration = Duration::from_millis(3000);

/// Final part of the lifetime during which the notice fades out
const NOTICE_FADE: Duration = Duration::from_millis(600);

/// New-record form fields, kept as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub identifier: String,
    pub empty_weight: String,
    pub gross_weight: String,
}

/// Edit window contents
#[derive(Debug, Clone, PartialEq)]
pub struct EditWindow {
    pub draft: EditDraft,
    /// Inline validation message
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ActiveNotice {
    pub notice: Notice,
    shown_at: Instant,
}

impl ActiveNotice {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= NOTICE_LIFETIME
    }

    /// 1.0 while fresh, ramping down to 0.0 at expiry
    pub fn opacity(&self, now: Instant) -> f32 {
        let remaining = NOTICE_LIFETIME.saturating_sub(now.saturating_duration_since(self.shown_at));
        if remaining >= NOTICE_FADE {
            1.0
        } else {
            remaining.as_secs_f32() / NOTICE_FADE.as_secs_f32()
        }
    }
}

#[derive(Debug, Default)]
pub struct EguiSurface {
    pub form: FormFields,
    pub table: TableView,
    pub edit: Option<EditWindow>,
    pub confirmation: Option<ConfirmationRequest>,
    notices: Vec<ActiveNotice>,
    focus_requested: bool,
}

impl EguiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a pending request to focus the identifier field
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Hide the confirmation window once the user has answered
    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Notices still on screen at `now`; expired ones are dropped
    pub fn live_notices(&mut self, now: Instant) -> &[ActiveNotice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }

    pub fn has_notices(&self) -> bool {
        !self.notices.is_empty()
    }

    /// An edit or confirmation window is waiting for the user
    pub fn dialog_open(&self) -> bool {
        self.edit.is_some() || self.confirmation.is_some()
    }
}

impl Notifier for EguiSurface {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(ActiveNotice {
            notice,
            shown_at: Instant::now(),
        });
    }
}

impl Confirmer for EguiSurface {
    fn request_confirmation(&mut self, request: ConfirmationRequest) {
        self.confirmation = Some(request);
    }
}

impl FormSurface for EguiSurface {
    fn reset_form(&mut self) {
        self.form = FormFields::default();
    }

    fn focus_identifier(&mut self) {
        self.focus_requested = true;
    }
}

impl EditDialogSurface for EguiSurface {
    fn open_edit_dialog(&mut self, draft: EditDraft) {
        self.edit = Some(EditWindow { draft, error: None });
    }

    fn show_edit_error(&mut self, message: &str) {
        if let Some(edit) = self.edit.as_mut() {
            edit.error = Some(message.to_string());
        }
    }

    fn close_edit_dialog(&mut self) {
        self.edit = None;
    }
}

impl TableSurface for EguiSurface {
    fn replace_rows(&mut self, view: TableView) {
        self.table = view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesadas_app::view::Severity;

    fn draft() -> EditDraft {
        EditDraft {
            position: 0,
            number: 1,
            identifier: "AB123".to_string(),
            empty_weight: "1000".to_string(),
            gross_weight: "3000".to_string(),
        }
    }

    #[test]
    fn test_reset_form_clears_fields_and_focus_is_one_shot() {
        let mut surface = EguiSurface::new();
        surface.form.identifier = "AB123".to_string();
        surface.form.empty_weight = "1000".to_string();

        surface.reset_form();
        surface.focus_identifier();

        assert_eq!(surface.form, FormFields::default());
        assert!(surface.take_focus_request());
        assert!(!surface.take_focus_request());
    }

    #[test]
    fn test_edit_error_only_lands_in_open_dialog() {
        let mut surface = EguiSurface::new();
        surface.show_edit_error("ignored");
        assert!(surface.edit.is_none());

        surface.open_edit_dialog(draft());
        surface.show_edit_error("La tara no puede ser mayor que el bruto");
        assert_eq!(
            surface.edit.as_ref().and_then(|e| e.error.as_deref()),
            Some("La tara no puede ser mayor que el bruto")
        );

        surface.close_edit_dialog();
        assert!(surface.edit.is_none());
    }

    #[test]
    fn test_dialog_open_tracks_both_windows() {
        let mut surface = EguiSurface::new();
        assert!(!surface.dialog_open());

        surface.open_edit_dialog(draft());
        assert!(surface.dialog_open());
        surface.close_edit_dialog();

        surface.request_confirmation(ConfirmationRequest {
            title: "¿Estás seguro?".to_string(),
            message: "Se eliminará la pesada #1".to_string(),
            confirm_label: "Sí, borrar".to_string(),
        });
        assert!(surface.dialog_open());
        surface.dismiss_confirmation();
        assert!(!surface.dialog_open());
    }

    #[test]
    fn test_notices_fade_then_expire() {
        let mut surface = EguiSurface::new();
        surface.notify(Notice::new(Severity::Success, "Guardado", "ok"));
        let shown_at = surface.notices[0].shown_at;

        assert_eq!(surface.live_notices(shown_at).len(), 1);
        assert_eq!(surface.notices[0].opacity(shown_at), 1.0);

        let fading = shown_at + NOTICE_LIFETIME - NOTICE_FADE / 2;
        let alpha = surface.notices[0].opacity(fading);
        assert!(alpha > 0.0 && alpha < 1.0);

        assert!(surface.live_notices(shown_at + NOTICE_LIFETIME).is_empty());
        assert!(!surface.has_notices());
    }
}
