use serde::{Deserialize, Serialize};
use std::fmt;

/// Every field a conversation can collect
///
/// Step templates and structural checks both key off this enum, so a field
/// name is never spelled twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidField {
    Type,
    Title,
    Description,
    Priority,
    Status,
    Owner,
    RaidId,
    TargetState,
}

impl RaidField {
    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidField::Type => "type",
            RaidField::Title => "title",
            RaidField::Description => "description",
            RaidField::Priority => "priority",
            RaidField::Status => "status",
            RaidField::Owner => "owner",
            RaidField::RaidId => "raid_id",
            RaidField::TargetState => "target_state",
        }
    }

    /// Label used in chat text
    pub fn label(&self) -> &'static str {
        match self {
            RaidField::Type => "Type",
            RaidField::Title => "Title",
            RaidField::Description => "Description",
            RaidField::Priority => "Priority",
            RaidField::Status => "Status",
            RaidField::Owner => "Owner",
            RaidField::RaidId => "RAID id",
            RaidField::TargetState => "Target state",
        }
    }

    /// Intent param keys that may carry a pre-extracted value for this field
    pub fn param_keys(&self) -> &'static [&'static str] {
        match self {
            RaidField::Type => &["type", "raid_type", "raidType"],
            RaidField::Title => &["title"],
            RaidField::Description => &["description"],
            RaidField::Priority => &["priority"],
            RaidField::Status => &["status"],
            RaidField::Owner => &["owner"],
            RaidField::RaidId => &["raid_id", "raidId"],
            RaidField::TargetState => &["target_state", "targetState"],
        }
    }
}

impl fmt::Display for RaidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
