use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, InputMode};
use crate::render::{MessageFrom, RenderedMessage};

/// Width of the send button drawn at the right of the input box.
const SEND_BUTTON_WIDTH: u16 = 10;
/// Indent of bubble text under the avatar line.
const BUBBLE_INDENT: usize = 2;

/// Draw the whole UI based on the current App state.
pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(3),    // Messages
            Constraint::Length(3), // Input
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_messages(f, app, chunks[1]);
    draw_input(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let status = if app.is_sending() {
        Span::styled("typing…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("online", Style::default().fg(Color::Green))
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("OnWear Customer Assistant  ", Style::default().add_modifier(Modifier::BOLD)),
        status,
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    // Subtract 2 rows/cols for the block borders.
    let viewport_height = area.height.saturating_sub(2).max(1) as usize;
    let inner_width = area.width.saturating_sub(2).max(1) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for msg in &app.thread {
        message_lines(msg, inner_width, &mut lines);
        // spacer line after each message
        lines.push(Line::from(""));
    }

    // Clamp the scroll offset and remember it, so scrolling up from "bottom" works.
    let max_scroll = lines.len().saturating_sub(viewport_height);
    let scroll = app.msg_scroll.min(max_scroll);
    app.msg_scroll = scroll;

    let visible: Vec<Line> = lines.into_iter().skip(scroll).take(viewport_height).collect();

    let messages_widget =
        Paragraph::new(visible).block(Block::default().borders(Borders::ALL).title("Messages"));
    f.render_widget(messages_widget, area);
}

/// Avatar line, wrapped bubble lines and a dim timestamp.
/// Bot messages hug the left edge, user messages the right.
fn message_lines(msg: &RenderedMessage, width: usize, out: &mut Vec<Line<'static>>) {
    let (color, align_right) = match msg.from {
        MessageFrom::Bot => (Color::Cyan, false),
        MessageFrom::User => (Color::Magenta, true),
    };
    let place = |text: String, style: Style| -> Line<'static> {
        if align_right {
            let pad = width.saturating_sub(text.width());
            Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(text, style)])
        } else {
            Line::from(Span::styled(text, style))
        }
    };

    out.push(place(
        msg.from.avatar().to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));

    let text_width = width.saturating_sub(BUBBLE_INDENT).max(1);
    for line in msg.to_lines() {
        for piece in wrap(&line, text_width) {
            let text = if align_right {
                piece
            } else {
                format!("{:indent$}{piece}", "", indent = BUBBLE_INDENT)
            };
            out.push(place(text, Style::default()));
        }
    }

    if !msg.time.is_empty() {
        out.push(place(msg.time.clone(), Style::default().fg(Color::DarkGray)));
    }
}

/// Split `text` into pieces no wider than `width` terminal cells.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += w;
    }

    pieces.push(current);
    pieces
}

fn draw_input(f: &mut Frame, app: &mut App, area: Rect) {
    let mode_label = match app.input_mode {
        InputMode::Normal => "[NORMAL] i: type, j/k: scroll, q: quit",
        InputMode::Insert => "[INSERT] Enter: send, Esc: normal mode",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(SEND_BUTTON_WIDTH)])
        .split(area);

    // Keep the tail of a long input visible.
    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    let shown = tail_fitting(&app.input, inner_width.saturating_sub(1));

    let input_widget = Paragraph::new(shown)
        .block(Block::default().borders(Borders::ALL).title(format!("Type your message {mode_label}")));
    f.render_widget(input_widget, chunks[0]);

    // Save the button rect so the mouse handler can hit-test it.
    app.send_button_area = Some(chunks[1]);
    let send_button = Paragraph::new("➤ Send")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(send_button, chunks[1]);

    if app.input_mode == InputMode::Insert {
        let x = chunks[0].x + 1 + shown.width() as u16;
        f.set_cursor_position((x, chunks[0].y + 1));
    }
}

/// Longest suffix of `text` that fits in `width` cells.
fn tail_fitting(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}
