//! Command orchestration layer.
//!
//! The executor turns a completed conversation into one backend call; the
//! session routes chat input between the classifier, the sequencer and the
//! executor.

pub mod executor;
pub mod session;
