/// ChatMessage entity for the wellness chat history
///
/// Every chat turn is persisted, including the assistant's safety refusals,
/// so the history replays exactly what the user saw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, UserId};

/// Unique identifier for a chat message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    pub fn to_string(&self) -> String {
        self.0.to_string()
    }
}

/// Who produced a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "user" => Ok(Sender::User),
            "assistant" => Ok(Sender::Assistant),
            other => Err(DomainError::Validation {
                message: format!("Invalid sender: {}", other),
            }),
        }
    }
}

/// One turn of the wellness chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub user_id: UserId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message timestamped now
    pub fn new(user_id: UserId, sender: Sender, text: String) -> Self {
        Self {
            id: MessageId::new(),
            user_id,
            sender,
            text,
            timestamp: Utc::now(),
        }
    }

    /// Create a message from existing data (used when loading from database)
    pub fn from_existing(
        id: MessageId,
        user_id: UserId,
        sender: Sender,
        text: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            sender,
            text,
            timestamp,
        }
    }
}
