//! User intents raised by the panel, applied to the view controller

use pesadas_app::view::{ViewController, ViewMode};
use pesadas_domain::service::Clock;
use pesadas_domain::KeyValueStorage;
use pesadas_types::Result;

use crate::surface::EguiSurface;

/// Action to be executed after the frame's widgets are drawn
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    /// Submit the new-record form
    Submit,
    /// Search text changed
    Search(String),
    /// Apply the minimum-net filter
    FilterMinNet(String),
    ShowAll,
    ClearAll,
    /// Open the edit window for a sequence position
    Edit(usize),
    /// Save the edit window
    SaveEdit,
    CancelEdit,
    /// Ask to delete a sequence position
    Delete(usize),
    /// Answer to the open confirmation window
    Answer(bool),
}

/// Apply one action. Failures have already been shown as notices.
pub fn dispatch<S, C>(
    controller: &mut ViewController<S, C>,
    surface: &mut EguiSurface,
    action: PanelAction,
) -> Result<()>
where
    S: KeyValueStorage,
    C: Clock,
{
    match action {
        PanelAction::Submit => {
            let form = surface.form.clone();
            controller.submit_new_record(
                surface,
                &form.identifier,
                &form.empty_weight,
                &form.gross_weight,
            )
        }
        PanelAction::Search(text) => {
            controller.search(surface, &text);
            Ok(())
        }
        PanelAction::FilterMinNet(text) => controller.filter_min_net(surface, &text).map(|_| ()),
        PanelAction::ShowAll => {
            controller.show_all(surface);
            Ok(())
        }
        PanelAction::ClearAll => {
            controller.request_clear_all(surface);
            Ok(())
        }
        PanelAction::Edit(position) => controller.open_edit(surface, position),
        PanelAction::SaveEdit => {
            let Some(edit) = surface.edit.clone() else {
                return Ok(());
            };
            let draft = edit.draft;
            controller.request_edit(
                surface,
                draft.position,
                &draft.identifier,
                &draft.empty_weight,
                &draft.gross_weight,
            )
        }
        PanelAction::CancelEdit => {
            surface.edit = None;
            Ok(())
        }
        PanelAction::Delete(position) => controller.request_delete(surface, position),
        PanelAction::Answer(confirmed) => {
            surface.dismiss_confirmation();
            controller.resolve_confirmation(surface, confirmed)
        }
    }
}

/// True when the table shows every record again, so filter inputs are stale
pub fn back_to_normal<S, C>(controller: &ViewController<S, C>) -> bool
where
    S: KeyValueStorage,
    C: Clock,
{
    controller.mode() == ViewMode::Normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesadas_app::view::{Severity, TableView};
    use pesadas_domain::service::FixedClock;
    use pesadas_infra::persistence::MemoryStorage;
    use pesadas_store::RecordStore;

    const STAMP: &str = "01/02/2024, 10:00:00";

    fn controller() -> ViewController<MemoryStorage, FixedClock> {
        let store = RecordStore::load(MemoryStorage::new()).unwrap();
        ViewController::new(store, FixedClock(STAMP.to_string()))
    }

    fn fill_form(surface: &mut EguiSurface, identifier: &str, empty: &str, gross: &str) {
        surface.form.identifier = identifier.to_string();
        surface.form.empty_weight = empty.to_string();
        surface.form.gross_weight = gross.to_string();
    }

    fn add(c: &mut ViewController<MemoryStorage, FixedClock>, s: &mut EguiSurface, id: &str) {
        fill_form(s, id, "1000", "3000");
        dispatch(c, s, PanelAction::Submit).unwrap();
    }

    fn identifiers(surface: &EguiSurface) -> Vec<String> {
        surface
            .table
            .rows()
            .iter()
            .map(|r| r.identifier.clone())
            .collect()
    }

    #[test]
    fn test_submit_clears_form_and_focuses_identifier() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        fill_form(&mut s, " ab123 ", "1000", "3000");

        dispatch(&mut c, &mut s, PanelAction::Submit).unwrap();

        assert_eq!(identifiers(&s), vec!["AB123"]);
        assert!(s.form.identifier.is_empty());
        assert!(s.take_focus_request());
    }

    #[test]
    fn test_rejected_submit_keeps_form() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        fill_form(&mut s, "AB123", "5000", "3000");

        assert!(dispatch(&mut c, &mut s, PanelAction::Submit).is_err());

        assert_eq!(s.form.empty_weight, "5000");
        assert!(c.store().is_empty());
        let notices = s.live_notices(std::time::Instant::now());
        assert_eq!(notices[0].notice.severity, Severity::Error);
    }

    #[test]
    fn test_delete_waits_for_answer() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        add(&mut c, &mut s, "AAA");
        add(&mut c, &mut s, "BBB");

        dispatch(&mut c, &mut s, PanelAction::Delete(0)).unwrap();
        assert!(s.confirmation.is_some());
        assert_eq!(c.store().len(), 2);

        dispatch(&mut c, &mut s, PanelAction::Answer(false)).unwrap();
        assert!(s.confirmation.is_none());
        assert_eq!(c.store().len(), 2);

        dispatch(&mut c, &mut s, PanelAction::Delete(0)).unwrap();
        dispatch(&mut c, &mut s, PanelAction::Answer(true)).unwrap();
        assert_eq!(identifiers(&s), vec!["BBB"]);
    }

    #[test]
    fn test_delete_from_search_result_hits_matching_record() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        add(&mut c, &mut s, "AAA");
        add(&mut c, &mut s, "BBB");

        dispatch(&mut c, &mut s, PanelAction::Search("bb".to_string())).unwrap();
        assert!(!back_to_normal(&c));
        let position = s.table.rows()[0].position;
        assert_eq!(position, 1);

        dispatch(&mut c, &mut s, PanelAction::Delete(position)).unwrap();
        dispatch(&mut c, &mut s, PanelAction::Answer(true)).unwrap();

        assert_eq!(identifiers(&s), vec!["AAA"]);
        assert!(back_to_normal(&c));
    }

    #[test]
    fn test_edit_error_keeps_window_open() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        add(&mut c, &mut s, "AAA");

        dispatch(&mut c, &mut s, PanelAction::Edit(0)).unwrap();
        if let Some(edit) = s.edit.as_mut() {
            edit.draft.gross_weight = "10".to_string();
        }
        assert!(dispatch(&mut c, &mut s, PanelAction::SaveEdit).is_err());
        assert!(s.edit.as_ref().is_some_and(|e| e.error.is_some()));

        if let Some(edit) = s.edit.as_mut() {
            edit.draft.gross_weight = "4000".to_string();
        }
        dispatch(&mut c, &mut s, PanelAction::SaveEdit).unwrap();
        assert!(s.edit.is_none());
        assert_eq!(s.table.rows()[0].net_weight, 3000.0);
    }

    #[test]
    fn test_delete_while_editing_never_saves_onto_shifted_record() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        for (id, gross) in [("AAA", "10"), ("BBB", "10"), ("CCC", "10")] {
            fill_form(&mut s, id, "0", gross);
            dispatch(&mut c, &mut s, PanelAction::Submit).unwrap();
        }

        dispatch(&mut c, &mut s, PanelAction::Edit(1)).unwrap();
        dispatch(&mut c, &mut s, PanelAction::Delete(0)).unwrap();
        dispatch(&mut c, &mut s, PanelAction::Answer(true)).unwrap();
        assert!(s.edit.is_none());
        assert!(!s.dialog_open());

        // A late save has no window to read from
        dispatch(&mut c, &mut s, PanelAction::SaveEdit).unwrap();

        let stored: Vec<(String, f64)> = c
            .store()
            .records()
            .iter()
            .map(|r| (r.identifier().to_string(), r.gross_weight()))
            .collect();
        assert_eq!(
            stored,
            vec![("BBB".to_string(), 10.0), ("CCC".to_string(), 10.0)]
        );
    }

    #[test]
    fn test_edit_window_carries_row_number_in_filtered_view() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        add(&mut c, &mut s, "AAA");
        add(&mut c, &mut s, "BBB");

        dispatch(&mut c, &mut s, PanelAction::Search("bbb".to_string())).unwrap();
        let position = s.table.rows()[0].position;
        dispatch(&mut c, &mut s, PanelAction::Edit(position)).unwrap();

        let draft = &s.edit.as_ref().unwrap().draft;
        assert_eq!((draft.position, draft.number), (1, 1));
    }

    #[test]
    fn test_clear_all_on_empty_store_asks_nothing() {
        let mut c = controller();
        let mut s = EguiSurface::new();

        dispatch(&mut c, &mut s, PanelAction::ClearAll).unwrap();

        assert!(s.confirmation.is_none());
        assert_eq!(s.table, TableView::default());
    }

    #[test]
    fn test_min_net_filter_and_show_all() {
        let mut c = controller();
        let mut s = EguiSurface::new();
        add(&mut c, &mut s, "AAA");
        fill_form(&mut s, "BBB", "1000", "1500");
        dispatch(&mut c, &mut s, PanelAction::Submit).unwrap();

        dispatch(&mut c, &mut s, PanelAction::FilterMinNet("1000".to_string())).unwrap();
        assert_eq!(identifiers(&s), vec!["AAA"]);

        dispatch(&mut c, &mut s, PanelAction::ShowAll).unwrap();
        assert_eq!(identifiers(&s), vec!["AAA", "BBB"]);
    }
}
