use crate::app::{App, Page};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

fn go_to(page: Page, app: &mut App, action_tx: &ActionTx) {
    app.switch_page(page);
    enqueue_action(action_tx, Action::LoadPage { page, force: false });
}

pub(super) fn handle_page_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(page) = Page::from_digit(c) {
                go_to(page, app, action_tx);
            }
        }
        KeyCode::Tab => go_to(app.page.next(), app, action_tx),
        KeyCode::BackTab => go_to(app.page.prev(), app, action_tx),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(
                action_tx,
                Action::LoadPage {
                    page: app.page,
                    force: true,
                },
            );
        }
        KeyCode::Char('n') | KeyCode::Char('a') => app.open_create_dialog(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_dialog(),
        KeyCode::Char('x') | KeyCode::Delete => app.open_delete_dialog(),
        KeyCode::Char('d') => app.open_report_picker(),
        _ => {}
    }
}
