use std::sync::mpsc::Sender;
use std::sync::Arc;

use ratatui::layout::Rect;

use crate::render::{Block, MessageFrom, RenderedMessage};
use crate::session::ChatContext;

/// Stable id of the "..." placeholder shown while a reply is pending.
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";

/// Current input mode of the TUI (similar to Vim).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode: keys are commands (q, i, j, k).
    Normal,
    /// Insert mode: keys go into the input box, Enter sends.
    Insert,
}

/// Sent by request workers back to the UI thread.
#[derive(Debug)]
pub enum BackendEvent {
    Reply { text: String },
}

/// Global application state used by the TUI.
pub struct App {
    /// Buffer, persona and proxy client shared with workers.
    pub ctx: Arc<ChatContext>,
    /// Rendered message nodes, oldest first.
    pub thread: Vec<RenderedMessage>,
    /// Current text in the input box.
    pub input: String,
    pub input_mode: InputMode,
    /// Vertical scroll offset of the thread. Clamped while drawing.
    pub msg_scroll: usize,
    /// Screen area of the send button (set every frame).
    pub send_button_area: Option<Rect>,
    pub backend_tx: Sender<BackendEvent>,
    /// Requests started but not answered yet.
    pub in_flight: usize,
}

impl App {
    pub fn new(ctx: Arc<ChatContext>, backend_tx: Sender<BackendEvent>) -> Self {
        Self {
            ctx,
            thread: Vec::new(),
            input: String::new(),
            // The shopper lands in the input box, ready to type.
            input_mode: InputMode::Insert,
            msg_scroll: 0,
            send_button_area: None,
            backend_tx,
            in_flight: 0,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight > 0
    }

    /// Append a node and keep the newest message in view.
    pub fn push_message(&mut self, msg: RenderedMessage) {
        self.thread.push(msg);
        self.scroll_to_bottom();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.msg_scroll = usize::MAX;
    }

    pub fn scroll_up(&mut self) {
        self.msg_scroll = self.msg_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.msg_scroll = self.msg_scroll.saturating_add(1);
    }

    pub fn has_typing_indicator(&self) -> bool {
        self.thread.iter().any(|m| m.id == TYPING_INDICATOR_ID)
    }

    /// Insert the placeholder unless one is already shown.
    pub fn show_typing(&mut self) {
        if self.has_typing_indicator() {
            return;
        }
        self.push_message(RenderedMessage {
            id: TYPING_INDICATOR_ID.to_string(),
            from: MessageFrom::Bot,
            body: vec![Block::Paragraph("...".into())],
            time: String::new(),
        });
    }

    /// Remove the placeholder if present.
    pub fn hide_typing(&mut self) {
        self.thread.retain(|m| m.id != TYPING_INDICATOR_ID);
    }
}
