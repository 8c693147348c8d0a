use crate::models::{ChatMessage, MessageRole};

/// Append-only chat history of the current batch
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return the stored record
    pub fn push(&mut self, sender: MessageRole, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage::new(sender, text));
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn count(&self, sender: MessageRole) -> usize {
        self.messages.iter().filter(|m| m.sender == sender).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_arrival_order() {
        let mut log = ChatLog::new();
        log.push(MessageRole::System, "Uploading 1 document(s)...");
        log.push(MessageRole::User, "What is this?");
        let last = log.push(MessageRole::Assistant, "A report.");
        assert_eq!(last.text, "A report.");

        let senders: Vec<_> = log.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
        assert_eq!(log.count(MessageRole::User), 1);
    }

    #[test]
    fn test_clear() {
        let mut log = ChatLog::new();
        log.push(MessageRole::System, "hello");
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
