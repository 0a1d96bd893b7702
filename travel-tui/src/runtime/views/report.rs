use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_report_picker_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(picker) = app.report_picker.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => picker.next_dataset(),
        KeyCode::Up | KeyCode::Char('k') => picker.prev_dataset(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            picker.toggle_format()
        }
        KeyCode::Enter => {
            let (format, dataset) = (picker.format(), picker.dataset());
            enqueue_action(action_tx, Action::DownloadReport { format, dataset });
        }
        KeyCode::Esc => app.close_report_picker(),
        _ => {}
    }
}
