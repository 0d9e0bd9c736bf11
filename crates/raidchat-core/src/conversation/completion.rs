//! Completion and eligibility checks
//!
//! Pure predicates. "Complete" only looks at the cursor; "can execute" also
//! checks the payload against the required fields of the same template that
//! produced the steps, so a conversation whose cursor was moved past a gap
//! is still refused.

use super::state::Conversation;
use super::step::required_fields;
use crate::errors::{ChatError, Result};
use crate::model::{RaidField, RaidItemUpdate};

/// True when a conversation exists and every step has been answered
pub fn is_conversation_complete(state: Option<&Conversation>) -> bool {
    state.is_some_and(Conversation::is_complete)
}

/// Required fields of the conversation's template that are absent or blank
pub fn missing_required_fields(conversation: &Conversation) -> Vec<RaidField> {
    required_fields(conversation.command_type())
        .filter(|field| !conversation.has_value(*field))
        .collect()
}

/// Structural checks independent of the step cursor
///
/// # Errors
///
/// * `MissingProjectKey` - If the project key is blank
/// * `MissingRequiredField` - For the first required field without a value
/// * `EmptyUpdate` - If an edit carries no field to change
pub fn check_structure(conversation: &Conversation) -> Result<()> {
    if conversation.project_key().trim().is_empty() {
        return Err(ChatError::MissingProjectKey);
    }

    if let Some(field) = missing_required_fields(conversation).into_iter().next() {
        return Err(ChatError::MissingRequiredField { field });
    }

    if let Conversation::EditRaid(state) = conversation {
        if RaidItemUpdate::from_draft(&state.updates).is_empty() {
            return Err(ChatError::EmptyUpdate);
        }
    }

    Ok(())
}

/// True when the conversation is complete and structurally executable
pub fn can_execute_command(state: Option<&Conversation>) -> bool {
    match state {
        Some(conversation) if conversation.is_complete() => {
            check_structure(conversation).is_ok()
        }
        _ => false,
    }
}
