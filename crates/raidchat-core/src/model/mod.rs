pub mod command;
pub mod field;
pub mod message;
pub mod raid;

pub use command::{CommandIntent, CommandType};
pub use field::RaidField;
pub use message::{ChatMessage, MessageMetadata, MessageRole};
pub use raid::{NewRaidItem, RaidDraft, RaidItem, RaidItemUpdate, RaidPriority, RaidStatus, RaidType};
