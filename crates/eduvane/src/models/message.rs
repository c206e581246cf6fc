use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single entry in the chat workspace
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub kind: MessageKind,
    pub content: String,
    pub is_streaming: bool,
    pub created: i64,
}

impl ChatMessage {
    fn new(role: Role, kind: MessageKind, content: String, is_streaming: bool) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            kind,
            content,
            is_streaming,
            created: Utc::now().timestamp(),
        }
    }

    /// Create a user text message with the current timestamp
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Role::User, MessageKind::Text, text.into(), false)
    }

    /// Create an empty assistant message that will be filled as the response streams in
    pub fn placeholder() -> Self {
        Self::new(Role::Assistant, MessageKind::Text, String::new(), true)
    }

    /// Create a settled assistant error message
    pub fn system_error<S: Into<String>>(text: S) -> Self {
        Self::new(Role::Assistant, MessageKind::Error, text.into(), false)
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
