//! RaidChat Engine - orchestration layer
//!
//! Connects the pure conversation kernel in `raidchat-core` to the outside
//! world: the RAID backend (`RaidApi`), the upstream intent classifier
//! (`IntentClassifier`) and the per-user chat session.

pub mod api;
pub mod classifier;
pub mod commands;
pub mod memory;

pub use api::{ApiError, ApiResponse, RaidApi};
pub use classifier::IntentClassifier;
pub use commands::executor::{CommandExecutionResult, CommandExecutor};
pub use commands::session::ChatSession;
pub use memory::InMemoryRaidApi;
