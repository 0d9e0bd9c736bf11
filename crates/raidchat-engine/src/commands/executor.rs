//! Command executor with boundary logging
//!
//! Turns a completed conversation into exactly one backend call and exactly
//! one chat message. Every failure, including transport errors, is folded
//! into a `success: false` result; `execute` never returns `Err`.
//!
//! ## Logging Ownership
//!
//! The executor owns lifecycle logging for command execution:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use std::time::Instant;

use raidchat_core::conversation::{check_structure, missing_required_fields};
use raidchat_core::render::{
    format_chat_error, format_missing_fields, format_raid_created, format_raid_list,
    format_raid_updated,
};
use raidchat_core::types::RequestId;
use raidchat_core::{log_op_end, log_op_error, log_op_start};
use raidchat_core::{
    ChatError, ChatMessage, CommandType, Conversation, ExError, MessageMetadata, NewRaidItem,
    RaidField, RaidItem, RaidItemUpdate, Result,
};

use crate::api::{ApiError, ApiResponse, RaidApi};

/// Outcome of one execution attempt
#[derive(Debug, Clone, PartialEq)]
pub struct CommandExecutionResult {
    pub success: bool,

    /// The single chat message describing the outcome
    pub message: ChatMessage,

    /// Entity returned by the backend on success
    pub data: Option<RaidItem>,

    /// Error text on failure; backend errors are kept verbatim
    pub error: Option<String>,
}

enum Executed {
    Created(RaidItem),
    Updated(RaidItem),
}

/// Dispatches completed conversations to a `RaidApi`
pub struct CommandExecutor<A> {
    api: A,
}

impl<A: RaidApi> CommandExecutor<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Execute the command a conversation has collected
    ///
    /// `None` and incomplete conversations are refused without touching the
    /// backend.
    pub async fn execute(&self, state: Option<&Conversation>) -> CommandExecutionResult {
        let request_id = RequestId::new();
        let command = state.map(Conversation::command_type);
        log_op_start!(
            "execute_command",
            request_id = request_id.as_str(),
            command = command.map_or("NONE", |c| c.as_str())
        );
        let start = Instant::now();

        match self.dispatch(state).await {
            Ok(executed) => {
                log_op_end!(
                    "execute_command",
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str()
                );
                success(executed)
            }
            Err(err) => {
                log_op_error!(
                    "execute_command",
                    error_context(&err, state),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str()
                );
                failure(state, command, err)
            }
        }
    }

    async fn dispatch(&self, state: Option<&Conversation>) -> Result<Executed> {
        let conversation = state.ok_or(ChatError::NoActiveConversation)?;
        if !conversation.is_complete() {
            return Err(ChatError::IncompleteConversation {
                answered: conversation.current_step(),
                total: conversation.steps().len(),
            });
        }

        match conversation {
            Conversation::CreateRaid(create) => {
                check_structure(conversation)?;
                let payload = NewRaidItem::from_draft(&create.collected_data)?;
                let response = self
                    .api
                    .create_raid_item(&create.project_key, payload)
                    .await;
                settle(response).map(Executed::Created)
            }
            Conversation::EditRaid(edit) => {
                check_structure(conversation)?;
                let raid_id = edit
                    .raid_id
                    .as_deref()
                    .filter(|id| !id.trim().is_empty())
                    .ok_or(ChatError::MissingRequiredField {
                        field: RaidField::RaidId,
                    })?;
                let updates = RaidItemUpdate::from_draft(&edit.updates);
                if updates.is_empty() {
                    return Err(ChatError::EmptyUpdate);
                }
                let response = self
                    .api
                    .update_raid_item(&edit.project_key, raid_id, updates)
                    .await;
                settle(response).map(Executed::Updated)
            }
            Conversation::TransitionWorkflow(_) => Err(ChatError::UnsupportedCommand {
                command: CommandType::TransitionWorkflow,
            }),
        }
    }

    /// List a project's items as a single chat message
    pub async fn list(&self, project_key: &str) -> CommandExecutionResult {
        let request_id = RequestId::new();
        log_op_start!(
            "list_raid_items",
            request_id = request_id.as_str(),
            project_key = project_key
        );
        let start = Instant::now();

        let metadata = MessageMetadata::for_command(CommandType::ListRaid);
        match settle(self.api.list_raid_items(project_key).await) {
            Ok(items) => {
                log_op_end!(
                    "list_raid_items",
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str(),
                    count = items.len()
                );
                CommandExecutionResult {
                    success: true,
                    message: ChatMessage::assistant(format_raid_list(project_key, &items))
                        .with_metadata(metadata),
                    data: None,
                    error: None,
                }
            }
            Err(err) => {
                log_op_error!(
                    "list_raid_items",
                    ExError::from(err.clone()).with_project_key(project_key),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = request_id.as_str()
                );
                let error = err.to_string();
                CommandExecutionResult {
                    success: false,
                    message: ChatMessage::new(err.message_role(), format_chat_error(&err))
                        .with_metadata(metadata.with_error(error.clone())),
                    data: None,
                    error: Some(error),
                }
            }
        }
    }
}

/// Normalize both backend failure channels into `ChatError`
fn settle<T>(response: std::result::Result<ApiResponse<T>, ApiError>) -> Result<T> {
    match response {
        Ok(ApiResponse {
            success: true,
            data: Some(data),
            ..
        }) => Ok(data),
        Ok(ApiResponse { success: true, .. }) => Err(ChatError::Unexpected {
            message: "Backend reported success without data".to_string(),
        }),
        Ok(ApiResponse { error, .. }) => Err(ChatError::BackendRejected {
            message: error.unwrap_or_else(|| "Unknown error".to_string()),
        }),
        Err(err) => Err(ChatError::Unexpected {
            message: err.to_string(),
        }),
    }
}

/// Canonical error carrying the project and target item of `state`
fn error_context(err: &ChatError, state: Option<&Conversation>) -> ExError {
    let ex_err = ExError::from(err.clone());
    let Some(conversation) = state else {
        return ex_err;
    };
    let ex_err = ex_err.with_project_key(conversation.project_key());
    match conversation.raid_id() {
        Some(raid_id) => ex_err.with_raid_id(raid_id),
        None => ex_err,
    }
}

fn success(executed: Executed) -> CommandExecutionResult {
    let (command, content, item) = match executed {
        Executed::Created(item) => (CommandType::CreateRaid, format_raid_created(&item), item),
        Executed::Updated(item) => (CommandType::EditRaid, format_raid_updated(&item), item),
    };
    let metadata = MessageMetadata::for_command(command).with_raid_item(item.clone());

    CommandExecutionResult {
        success: true,
        message: ChatMessage::assistant(content).with_metadata(metadata),
        data: Some(item),
        error: None,
    }
}

fn failure(
    state: Option<&Conversation>,
    command: Option<CommandType>,
    err: ChatError,
) -> CommandExecutionResult {
    let content = match (&err, state) {
        // Report every gap at once rather than the first one found.
        (ChatError::MissingRequiredField { .. }, Some(conversation)) => {
            let missing = missing_required_fields(conversation);
            if missing.is_empty() {
                format_chat_error(&err)
            } else {
                format_missing_fields(&missing)
            }
        }
        _ => format_chat_error(&err),
    };

    let error = err.to_string();
    let mut metadata = command
        .map(MessageMetadata::for_command)
        .unwrap_or_default()
        .with_error(error.clone());
    if let Some(raid_id) = state.and_then(Conversation::raid_id) {
        metadata = metadata.with_raid_id(raid_id);
    }

    CommandExecutionResult {
        success: false,
        message: ChatMessage::new(err.message_role(), content).with_metadata(metadata),
        data: None,
        error: Some(error),
    }
}
