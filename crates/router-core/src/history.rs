use crate::ConversationTurn;
use std::collections::VecDeque;

pub const DEFAULT_MAX_TURNS: usize = 50;

/// Append-only conversation log with a retention cap.
///
/// When `max_turns` is reached the oldest turn is evicted. A cap of zero keeps
/// every turn.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: VecDeque<ConversationTurn>,
    max_turns: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::with_max_turns(DEFAULT_MAX_TURNS)
    }

    pub fn with_max_turns(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns,
        }
    }

    pub fn unbounded() -> Self {
        Self::with_max_turns(0)
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        if self.max_turns > 0 && self.turns.len() == self.max_turns {
            self.turns.pop_front();
        }
        self.turns.push_back(turn);
    }

    /// The last `count` turns, oldest first. Returns fewer when the history is shorter.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ConversationTurn> {
        let skip = self.turns.len().saturating_sub(count);
        self.turns.iter().skip(skip)
    }

    /// The last `count` turns rendered as `role: content` lines.
    pub fn render_recent(&self, count: usize) -> String {
        self.recent(count)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.back()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
