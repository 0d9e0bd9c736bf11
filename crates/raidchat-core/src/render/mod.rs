//! Deterministic markdown rendering of engine output
//!
//! Field order is fixed per message kind and absent optional fields are
//! skipped, never rendered empty.

pub mod response;

pub use response::{
    format_api_error, format_chat_error, format_empty_update, format_help, format_incomplete,
    format_missing_fields, format_missing_project_key, format_no_conversation,
    format_raid_created, format_raid_list, format_raid_updated, format_step_prompt,
    format_unsupported, ERROR_MARKER, SUCCESS_MARKER, WARNING_MARKER,
};
