//! Core types shared across RaidChat facilities
//!
//! This crate provides foundational types used by the model, the logging
//! facility and the engine:
//!
//! - **Identifiers**: MessageId, RequestId, SessionId
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{MessageId, RequestId, SessionId};
