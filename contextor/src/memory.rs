//! Per-session conversation memory with a bounded exchange window.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::User => "Human",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Ordered `(role, message)` turns; keeps at most `window` question/answer exchanges.
///
/// Recording an exchange beyond the window evicts the oldest one.
#[derive(Clone, Debug)]
pub struct ConversationMemory {
    window: usize,
    turns: VecDeque<Turn>,
}

impl ConversationMemory {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            turns: VecDeque::with_capacity(window * 2),
        }
    }

    /// Appends one exchange (user question, assistant answer).
    pub fn record(&mut self, question: &str, answer: &str) {
        self.turns.push_back(Turn {
            role: Role::User,
            content: question.to_string(),
        });
        self.turns.push_back(Turn {
            role: Role::Assistant,
            content: answer.to_string(),
        });
        while self.turns.len() > self.window * 2 {
            self.turns.pop_front();
        }
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of stored exchanges.
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders the history as `Human: ...` / `Assistant: ...` lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for t in &self.turns {
            out.push_str(t.role.label());
            out.push_str(": ");
            out.push_str(&t.content);
            out.push('\n');
        }
        out
    }
}
