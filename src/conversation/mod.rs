use crate::catalog::Item;
use chrono::{DateTime, Local};
use uuid::Uuid;

pub mod store;

pub use store::ConversationStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Assistant,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Recommendation,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("text message must not be empty")]
    EmptyText,
    #[error("recommendation message must carry at least one item")]
    NoItems,
}

/// One entry in the conversation. Immutable once built; the constructors
/// enforce that text messages carry non-empty text and recommendation
/// messages carry at least one item and no text.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    sender: Sender,
    created_at: DateTime<Local>,
    kind: MessageKind,
    text: Option<String>,
    items: Vec<Item>,
}

impl Message {
    pub fn text(sender: Sender, text: impl Into<String>) -> Result<Self, MessageError> {
        let text = text.into();
        if text.is_empty() {
            return Err(MessageError::EmptyText);
        }
        Ok(Self::build(sender, MessageKind::Text, Some(text), Vec::new()))
    }

    pub fn recommendation(items: Vec<Item>) -> Result<Self, MessageError> {
        if items.is_empty() {
            return Err(MessageError::NoItems);
        }
        Ok(Self::build(
            Sender::Assistant,
            MessageKind::Recommendation,
            None,
            items,
        ))
    }

    fn build(sender: Sender, kind: MessageKind, text: Option<String>, items: Vec<Item>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            created_at: Local::now(),
            kind,
            text,
            items,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
