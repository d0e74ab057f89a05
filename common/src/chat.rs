use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Author id used for automated messages.
pub const SYSTEM_USER: &str = "system";

/// Unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    System,
}

/// A message in an order's chat log.
///
/// Messages are append-only; array position is chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub user_id: UserId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatMessage {
    /// An automated message authored by the system sentinel.
    pub fn system(id: impl Into<String>, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: MessageId(id.into()),
            user_id: UserId(SYSTEM_USER.into()),
            message: message.into(),
            timestamp,
            kind: MessageKind::System,
        }
    }

    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }
}
