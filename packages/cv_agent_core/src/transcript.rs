use crate::models::ConversationEntry;

/// Append-only record of answered questions, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<ConversationEntry>,
}

impl Transcript {
    pub fn push(&mut self, entry: ConversationEntry) -> &ConversationEntry {
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ConversationEntry> {
        self.entries.last()
    }

    /// Display order: newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.entries.iter().rev()
    }

    /// Everything except [`Transcript::latest`], newest first. Feeds the history list.
    pub fn history(&self) -> impl Iterator<Item = &ConversationEntry> {
        self.newest_first().skip(1)
    }
}
