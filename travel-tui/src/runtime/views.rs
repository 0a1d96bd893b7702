use crate::app::{App, Dialog};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod form;
mod page;
mod report;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Routes a key to the topmost overlay, or to the page underneath.
pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return;
    }

    if app.report_picker.is_some() {
        report::handle_report_picker_key(key, app, action_tx);
        return;
    }

    match &app.dialog {
        Some(Dialog::Form(_)) => form::handle_form_key(key, app, action_tx),
        Some(Dialog::Delete(_)) => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
        None => page::handle_page_key(key, app, action_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::super::action_queue::channel;
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::Page;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn alert_swallows_keys_until_dismissed() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.show_alert("Employee not found");

        handle_key(press(KeyCode::Char('2')), &mut app, &tx);
        assert_eq!(app.page, Page::Analytics);
        assert!(rx.try_recv().is_err());

        handle_key(press(KeyCode::Enter), &mut app, &tx);
        assert_eq!(app.alert, None);
    }

    #[test]
    fn number_key_switches_page_and_loads_it() {
        let (tx, mut rx) = channel();
        let mut app = test_app();

        handle_key(press(KeyCode::Char('4')), &mut app, &tx);

        assert_eq!(app.page, Page::BusinessTrips);
        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::LoadPage {
                page: Page::BusinessTrips,
                force: false
            })
        );
    }

    #[test]
    fn refresh_forces_a_reload() {
        let (tx, mut rx) = channel();
        let mut app = test_app();

        handle_key(press(KeyCode::Char('r')), &mut app, &tx);

        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::LoadPage {
                page: Page::Analytics,
                force: true
            })
        );
    }

    #[test]
    fn typing_in_a_form_does_not_navigate() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.switch_page(Page::Employees);
        handle_key(press(KeyCode::Char('n')), &mut app, &tx);

        handle_key(press(KeyCode::Char('1')), &mut app, &tx);
        handle_key(press(KeyCode::Char('q')), &mut app, &tx);

        assert_eq!(app.page, Page::Employees);
        assert!(app.running);
        assert!(rx.try_recv().is_err());

        handle_key(press(KeyCode::Enter), &mut app, &tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::SubmitForm));
    }

    #[test]
    fn report_picker_enqueues_chosen_download() {
        let (tx, mut rx) = channel();
        let mut app = test_app();

        handle_key(press(KeyCode::Char('d')), &mut app, &tx);
        handle_key(press(KeyCode::Down), &mut app, &tx);
        handle_key(press(KeyCode::Tab), &mut app, &tx);
        handle_key(press(KeyCode::Enter), &mut app, &tx);

        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::DownloadReport {
                format: crate::types::ReportFormat::Json,
                dataset: crate::types::ReportDataset::TotalExpenses,
            })
        );
    }
}
