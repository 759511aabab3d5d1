use super::{Message, Sender};

/// Append-only transcript plus the "assistant is composing" flag.
///
/// Every mutation raises a scroll request so the newest entry is brought
/// into view on the next frame.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    composing: bool,
    scroll_requested: bool,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session opened by one assistant greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut store = Self::new();
        if let Ok(message) = Message::text(Sender::Assistant, greeting) {
            store.append(message);
        }
        store
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_requested = true;
    }

    pub fn set_composing(&mut self, composing: bool) {
        self.composing = composing;
        self.scroll_requested = true;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Returns whether a scroll-to-bottom is pending and clears it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}
