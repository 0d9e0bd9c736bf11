use chrono::{DateTime, Utc};
use raidchat_core_types::MessageId;
use serde::{Deserialize, Serialize};

use super::command::CommandType;
use super::raid::RaidItem;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Error,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
            MessageRole::Error => "error",
        }
    }
}

/// Command context attached to engine-produced messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<CommandType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raid_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raid_item: Option<RaidItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageMetadata {
    pub fn for_command(command: CommandType) -> Self {
        Self {
            command: Some(command),
            ..Self::default()
        }
    }

    pub fn with_raid_id(mut self, raid_id: impl Into<String>) -> Self {
        self.raid_id = Some(raid_id.into());
        self
    }

    /// Attach the backend entity (also records its id)
    pub fn with_raid_item(mut self, item: RaidItem) -> Self {
        self.raid_id = Some(item.id.clone());
        self.raid_item = Some(item);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// One entry of the session message log
///
/// Messages are immutable once built; edits are modelled as new messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    /// Create a message with a fresh id and the current timestamp
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Error, content)
    }

    pub fn with_metadata(mut self, metadata: MessageMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
