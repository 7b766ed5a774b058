//! Rolling narration log shown by the viewer.
use std::collections::VecDeque;

/// Number of lines the viewer shows.
pub const DEFAULT_LOG_LINES: usize = 3;

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    /// Round the line was logged in, when combat was running.
    pub round: Option<u32>,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, round: Option<u32>) -> Self {
        Self {
            text: text.into(),
            round,
        }
    }
}

/// Bounded log that keeps the newest entries at the front.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LINES)
    }
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    /// Adds an entry at the front, evicting the oldest one when full.
    ///
    /// Blank text is ignored.
    pub fn push(&mut self, entry: MessageEntry) {
        if entry.text.is_empty() {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::new(message, None));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    /// Line texts, newest first.
    pub fn lines(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_three_newest_first() {
        let mut log = MessageLog::default();
        for line in ["one", "two", "three", "four"] {
            log.push_text(line);
        }

        assert_eq!(log.lines(), vec!["four", "three", "two"]);
    }

    #[test]
    fn ignores_blank_lines_and_clears() {
        let mut log = MessageLog::new(0);
        assert_eq!(log.capacity(), 1);

        log.push_text("");
        assert!(log.is_empty());

        log.push_text("Combat started");
        log.clear();
        assert!(log.is_empty());
    }
}
