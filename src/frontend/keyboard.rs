use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode};
use crate::frontend::actions;

/// Handle a single key event.
/// Returns Ok(true) if the app should exit, Ok(false) otherwise.
pub fn handle_key_event(key: KeyEvent, app: &mut App) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('i') => app.input_mode = InputMode::Insert,

            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),

            _ => {}
        },

        InputMode::Insert => match key.code {
            KeyCode::Esc => app.input_mode = InputMode::Normal,

            KeyCode::Char(c) => app.input.push(c),
            KeyCode::Backspace => {
                app.input.pop();
            }

            KeyCode::Enter => {
                actions::submit_input(app)?;
            }

            KeyCode::Up => app.scroll_up(),
            KeyCode::Down => app.scroll_down(),

            _ => {}
        },
    }

    Ok(false)
}
