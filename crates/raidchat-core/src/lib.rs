//! RaidChat Core - conversational command kernel
//!
//! This crate holds everything in the command engine that does no I/O:
//! - Intent, RAID item and chat message models
//! - The conversation step sequencer (a linear automaton per command type)
//! - Completion and eligibility checks shared by the sequencer and executor
//! - Deterministic markdown rendering of results and prompts
//! - The error and logging facilities, and TOML configuration
//!
//! Backend calls and session orchestration live in `raidchat-engine`.

pub mod config;
pub mod conversation;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

pub use raidchat_core_types as types;

// Re-export commonly used types
pub use config::{EngineConfig, SequencerPolicy};
pub use conversation::{
    can_execute_command, init_conversation, is_conversation_complete, Conversation,
    ConversationStep,
};
pub use errors::{ChatError, ExError, ExErrorKind, Result};
pub use model::{
    ChatMessage, CommandIntent, CommandType, MessageMetadata, MessageRole, NewRaidItem,
    RaidDraft, RaidField, RaidItem, RaidItemUpdate, RaidPriority, RaidStatus, RaidType,
};
