/// Maximum number of turns kept as context for the assistant.
pub const MAX_TURNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message exchanged by either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Rolling window over the most recent turns, oldest first.
#[derive(Debug, Default)]
pub struct ConversationBuffer {
    turns: Vec<Turn>,
}

impl ConversationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a turn and drop from the front until at most `MAX_TURNS` remain.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(..excess);
        }
    }

    #[cfg(test)]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn to_context_string(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role.as_str(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn keeps_only_the_most_recent_turns_in_order() {
        let mut buffer = ConversationBuffer::new();
        for i in 0..25 {
            buffer.append(Turn::user(format!("msg {i}")));
            assert!(buffer.len() <= MAX_TURNS);
        }

        let kept: Vec<_> = buffer.turns().iter().map(|t| t.content.as_str()).collect();
        let expected: Vec<String> = (15..25).map(|i| format!("msg {i}")).collect();
        assert_eq!(kept, expected);
    }

    #[test]
    fn below_the_cap_nothing_is_dropped() {
        let mut buffer = ConversationBuffer::new();
        buffer.append(Turn::user("a"));
        buffer.append(Turn::assistant("b"));
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.last(), Some(&Turn::assistant("b")));
    }

    #[test]
    fn context_string_labels_each_role() {
        let mut buffer = ConversationBuffer::new();
        buffer.append(Turn::user("Do you have Nike shoes?"));
        buffer.append(Turn::assistant("Yes, we do!"));
        buffer.append(Turn::user("How much?"));

        assert_eq!(
            buffer.to_context_string(),
            "User: Do you have Nike shoes?\nAssistant: Yes, we do!\nUser: How much?"
        );
    }

    #[test]
    fn empty_buffer_renders_empty_context() {
        let buffer = ConversationBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.to_context_string(), "");
    }
}
