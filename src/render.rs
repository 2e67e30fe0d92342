use uuid::Uuid;

use crate::clock::current_time;

/// Who a rendered message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageFrom {
    User,
    Bot,
}

impl MessageFrom {
    pub fn avatar(&self) -> &'static str {
        match self {
            MessageFrom::User => "🙂 You",
            MessageFrom::Bot => "🤖 OnWear",
        }
    }
}

/// Shape of a bot reply, decided by whoever produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderableReply {
    /// Free text; `-` lines become list items, the rest paragraphs.
    Paragraphs(String),
    /// Ordered options, shown numbered. Replies from the proxy are always text.
    #[cfg_attr(not(test), allow(dead_code))]
    Items(Vec<String>),
}

/// Piece of a message bubble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// User text, shown exactly as typed.
    Plain(String),
    Paragraph(String),
    ListItem(String),
    Numbered(usize, String),
}

impl Block {
    pub fn display(&self) -> String {
        match self {
            Block::Plain(text) | Block::Paragraph(text) => text.clone(),
            Block::ListItem(text) => format!("• {text}"),
            Block::Numbered(n, text) => format!("{n}. {text}"),
        }
    }
}

/// A message node: avatar, bubble body and timestamp.
#[derive(Clone, Debug)]
pub struct RenderedMessage {
    pub id: String,
    pub from: MessageFrom,
    pub body: Vec<Block>,
    pub time: String,
}

impl RenderedMessage {
    fn new(from: MessageFrom, body: Vec<Block>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from,
            body,
            time: current_time(),
        }
    }

    /// Bubble contents flattened to display lines.
    pub fn to_lines(&self) -> Vec<String> {
        self.body.iter().map(Block::display).collect()
    }
}

pub fn render_user(text: &str) -> RenderedMessage {
    RenderedMessage::new(MessageFrom::User, vec![Block::Plain(text.to_string())])
}

pub fn render_bot(reply: &RenderableReply) -> RenderedMessage {
    let body = match reply {
        RenderableReply::Items(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| Block::Numbered(i + 1, item.clone()))
            .collect(),
        RenderableReply::Paragraphs(text) => format_paragraphs(text),
    };
    RenderedMessage::new(MessageFrom::Bot, body)
}

fn format_paragraphs(text: &str) -> Vec<Block> {
    text.split('\n')
        .map(|line| {
            let line = line.trim();
            match line.strip_prefix('-') {
                Some(item) => Block::ListItem(item.trim().to_string()),
                None => Block::Paragraph(line.to_string()),
            }
        })
        .collect()
}
