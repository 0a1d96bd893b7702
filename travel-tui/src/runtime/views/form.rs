use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Esc {
        app.close_dialog();
        return;
    }
    if key.code == KeyCode::Enter {
        enqueue_action(action_tx, Action::SubmitForm);
        return;
    }

    let Some(dialog) = app.form_dialog_mut() else {
        return;
    };
    let form = &mut dialog.form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left => form.left(),
        KeyCode::Right => form.right(),
        KeyCode::Home => form.home(),
        KeyCode::End => form.end(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(c)
        }
        _ => {}
    }
}
