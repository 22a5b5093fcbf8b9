//! Conversation log
//!
//! The ordered, append-only message history threaded through both agent runs.

use crate::core::MessageItem;

/// Ordered sequence of message items for one workflow invocation.
///
/// Grows monotonically: items are appended after each run and never
/// deduplicated, reordered, or truncated. Every consumer reads the full
/// accumulated sequence.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    items: Vec<MessageItem>,
}

impl ConversationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a log with the user's request as its only item
    pub fn seed(user_text: impl Into<String>) -> Self {
        Self {
            items: vec![MessageItem::user(user_text)],
        }
    }

    /// Extend the log in order
    pub fn append(&mut self, items: Vec<MessageItem>) {
        self.items.extend(items);
    }

    /// The full accumulated sequence
    pub fn items(&self) -> &[MessageItem] {
        &self.items
    }

    /// Get item count
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;

    #[test]
    fn test_seed_single_user_item() {
        let log = ConversationLog::seed("Hello");

        assert_eq!(log.len(), 1);
        assert_eq!(log.items()[0].role, Role::User);
        assert_eq!(log.items()[0].text(), "Hello");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::seed("question");
        log.append(vec![
            MessageItem::assistant("first"),
            MessageItem::assistant("second"),
        ]);
        log.append(vec![MessageItem::assistant("third")]);

        let texts: Vec<String> = log.items().iter().map(|i| i.text()).collect();
        assert_eq!(texts, vec!["question", "first", "second", "third"]);
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut log = ConversationLog::seed("question");
        log.append(Vec::new());
        assert_eq!(log.len(), 1);
    }
}
