use thiserror::Error;

use crate::model::{CommandType, MessageRole, RaidField};

/// Result type alias using ChatError
pub type Result<T> = std::result::Result<T, ChatError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log lines and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Dialog
    IncompleteConversation,
    NoActiveConversation,
    InvalidStep,

    // Validation
    MissingRequiredField,
    InvalidAnswer,

    // Dispatch
    UnsupportedCommand,
    BackendRejected,
    Unexpected,

    // Setup
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::IncompleteConversation => "ERR_INCOMPLETE_CONVERSATION",
            ExErrorKind::NoActiveConversation => "ERR_NO_ACTIVE_CONVERSATION",
            ExErrorKind::InvalidStep => "ERR_INVALID_STEP",
            ExErrorKind::MissingRequiredField => "ERR_MISSING_REQUIRED_FIELD",
            ExErrorKind::InvalidAnswer => "ERR_INVALID_ANSWER",
            ExErrorKind::UnsupportedCommand => "ERR_UNSUPPORTED_COMMAND",
            ExErrorKind::BackendRejected => "ERR_BACKEND_REJECTED",
            ExErrorKind::Unexpected => "ERR_UNEXPECTED",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }

    /// Whether the user can recover by continuing the dialog
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::IncompleteConversation
                | ExErrorKind::NoActiveConversation
                | ExErrorKind::InvalidStep
                | ExErrorKind::MissingRequiredField
                | ExErrorKind::InvalidAnswer
        )
    }
}

/// Canonical structured error
///
/// Classification plus context for log lines. Built from a `ChatError`
/// via `From`, then enriched with the builder methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    project_key: Option<String>,
    raid_id: Option<String>,
    field: Option<RaidField>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            project_key: None,
            raid_id: None,
            field: None,
            message: String::new(),
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_project_key(mut self, project_key: impl Into<String>) -> Self {
        self.project_key = Some(project_key.into());
        self
    }

    pub fn with_raid_id(mut self, raid_id: impl Into<String>) -> Self {
        self.raid_id = Some(raid_id.into());
        self
    }

    pub fn with_field(mut self, field: RaidField) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn project_key(&self) -> Option<&str> {
        self.project_key.as_deref()
    }

    pub fn raid_id(&self) -> Option<&str> {
        self.raid_id.as_deref()
    }

    pub fn field(&self) -> Option<RaidField> {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(project_key) = &self.project_key {
            write!(f, " (project: {})", project_key)?;
        }
        if let Some(raid_id) = &self.raid_id {
            write!(f, " (raid_id: {})", raid_id)?;
        }
        if let Some(field) = self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the conversational command engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The user has not answered every step yet
    #[error("Conversation incomplete: {answered} of {total} steps answered")]
    IncompleteConversation { answered: usize, total: usize },

    /// An answer or navigation arrived with no conversation in progress
    #[error("No conversation in progress")]
    NoActiveConversation,

    /// An answer arrived after the last step
    #[error("Conversation already complete ({total} steps)")]
    ConversationComplete { total: usize },

    /// Seek target outside `0..=total`
    #[error("Step {step} is out of range (conversation has {total} steps)")]
    StepOutOfRange { step: usize, total: usize },

    /// A required field is absent or blank
    #[error("{} is required", .field.label())]
    MissingRequiredField { field: RaidField },

    /// The conversation is not scoped to a project
    #[error("A project key is required")]
    MissingProjectKey,

    /// An edit with nothing to change
    #[error("At least one field must be updated")]
    EmptyUpdate,

    /// A step validator rejected the answer
    #[error("'{value}' is not a valid {}", .field.label().to_lowercase())]
    InvalidAnswer { field: RaidField, value: String },

    /// A recognized command with no executor support
    #[error("{} is not yet supported", .command.label())]
    UnsupportedCommand { command: CommandType },

    /// The backend answered with `success: false`
    #[error("{message}")]
    BackendRejected { message: String },

    /// The backend call failed outright
    #[error("{message}")]
    Unexpected { message: String },

    /// Configuration could not be loaded
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl ChatError {
    /// Role of the chat message that reports this error
    ///
    /// Dialog and validation problems are assistant guidance; backend
    /// failures are shown as errors.
    pub fn message_role(&self) -> MessageRole {
        match self {
            ChatError::BackendRejected { .. } | ChatError::Unexpected { .. } => MessageRole::Error,
            ChatError::Config { .. } => MessageRole::System,
            _ => MessageRole::Assistant,
        }
    }
}

impl From<ChatError> for ExError {
    fn from(err: ChatError) -> Self {
        let message = err.to_string();
        match err {
            ChatError::IncompleteConversation { .. } => {
                ExError::new(ExErrorKind::IncompleteConversation).with_message(message)
            }
            ChatError::NoActiveConversation => {
                ExError::new(ExErrorKind::NoActiveConversation).with_message(message)
            }
            ChatError::ConversationComplete { .. } | ChatError::StepOutOfRange { .. } => {
                ExError::new(ExErrorKind::InvalidStep).with_message(message)
            }
            ChatError::MissingRequiredField { field } => {
                ExError::new(ExErrorKind::MissingRequiredField)
                    .with_field(field)
                    .with_message(message)
            }
            ChatError::MissingProjectKey | ChatError::EmptyUpdate => {
                ExError::new(ExErrorKind::MissingRequiredField).with_message(message)
            }
            ChatError::InvalidAnswer { field, .. } => ExError::new(ExErrorKind::InvalidAnswer)
                .with_field(field)
                .with_message(message),
            ChatError::UnsupportedCommand { command } => {
                ExError::new(ExErrorKind::UnsupportedCommand)
                    .with_op(command.as_str())
                    .with_message(message)
            }
            ChatError::BackendRejected { .. } => {
                ExError::new(ExErrorKind::BackendRejected).with_message(message)
            }
            ChatError::Unexpected { .. } => {
                ExError::new(ExErrorKind::Unexpected).with_message(message)
            }
            ChatError::Config { .. } => ExError::new(ExErrorKind::Config).with_message(message),
        }
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        ChatError::Config {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            ExErrorKind::MissingRequiredField.code(),
            "ERR_MISSING_REQUIRED_FIELD"
        );
        assert_eq!(ExErrorKind::BackendRejected.code(), "ERR_BACKEND_REJECTED");
        assert_eq!(ExErrorKind::UnsupportedCommand.code(), "ERR_UNSUPPORTED_COMMAND");
    }

    #[test]
    fn test_backend_errors_display_verbatim() {
        let err = ChatError::BackendRejected {
            message: "Network error".to_string(),
        };
        assert_eq!(err.to_string(), "Network error");
        assert_eq!(err.message_role(), MessageRole::Error);
    }

    #[test]
    fn test_validation_errors_are_assistant_guidance() {
        let err = ChatError::InvalidAnswer {
            field: RaidField::Priority,
            value: "urgent".to_string(),
        };
        assert_eq!(err.to_string(), "'urgent' is not a valid priority");
        assert_eq!(err.message_role(), MessageRole::Assistant);
    }

    #[test]
    fn test_conversion_keeps_field_context() {
        let ex: ExError = ChatError::MissingRequiredField {
            field: RaidField::Title,
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::MissingRequiredField);
        assert_eq!(ex.field(), Some(RaidField::Title));
        assert_eq!(ex.message(), "Title is required");
        assert!(ex.kind().is_recoverable());
    }

    #[test]
    fn test_ex_error_display_includes_context() {
        let ex = ExError::new(ExErrorKind::BackendRejected)
            .with_op("execute_command")
            .with_project_key("PRJ")
            .with_raid_id("raid-1")
            .with_message("Network error");

        let text = ex.to_string();
        assert!(text.starts_with("[ERR_BACKEND_REJECTED] in operation 'execute_command'"));
        assert!(text.contains("(project: PRJ)"));
        assert!(text.contains("(raid_id: raid-1)"));
        assert!(!ex.kind().is_recoverable());
    }
}
