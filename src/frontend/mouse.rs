use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::App;
use crate::frontend::actions;

/// Handle clicks on the send button and wheel scrolling over the thread.
pub fn handle_mouse_event(me: MouseEvent, app: &mut App) -> Result<()> {
    match me.kind {
        MouseEventKind::Up(MouseButton::Left) => {
            let clicked = Position::new(me.column, me.row);
            if app.send_button_area.is_some_and(|area| area.contains(clicked)) {
                actions::submit_input(app)?;
            }
        }

        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::ScrollDown => app.scroll_down(),

        _ => {}
    }

    Ok(())
}
