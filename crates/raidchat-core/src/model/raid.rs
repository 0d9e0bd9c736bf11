use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::RaidField;
use crate::errors::{ChatError, Result};

/// Lowercase, trim, and fold spaces/dashes into underscores
fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

fn invalid(field: RaidField, raw: &str) -> ChatError {
    ChatError::InvalidAnswer {
        field,
        value: raw.to_string(),
    }
}

/// Kind of RAID item: Risk, Assumption, Issue or Dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidType {
    Risk,
    Assumption,
    Issue,
    Dependency,
}

impl RaidType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidType::Risk => "risk",
            RaidType::Assumption => "assumption",
            RaidType::Issue => "issue",
            RaidType::Dependency => "dependency",
        }
    }

    /// Title-cased resource kind, e.g. `Risk`
    pub fn label(&self) -> &'static str {
        match self {
            RaidType::Risk => "Risk",
            RaidType::Assumption => "Assumption",
            RaidType::Issue => "Issue",
            RaidType::Dependency => "Dependency",
        }
    }
}

impl fmt::Display for RaidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaidType {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "risk" | "risks" => Ok(RaidType::Risk),
            "assumption" | "assumptions" => Ok(RaidType::Assumption),
            "issue" | "issues" => Ok(RaidType::Issue),
            "dependency" | "dependencies" => Ok(RaidType::Dependency),
            _ => Err(invalid(RaidField::Type, s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl RaidPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidPriority::Low => "low",
            RaidPriority::Medium => "medium",
            RaidPriority::High => "high",
            RaidPriority::Critical => "critical",
        }
    }
}

impl fmt::Display for RaidPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaidPriority {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "low" => Ok(RaidPriority::Low),
            "medium" | "med" => Ok(RaidPriority::Medium),
            "high" => Ok(RaidPriority::High),
            "critical" => Ok(RaidPriority::Critical),
            _ => Err(invalid(RaidField::Priority, s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaidStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl RaidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaidStatus::Open => "open",
            RaidStatus::InProgress => "in_progress",
            RaidStatus::Resolved => "resolved",
            RaidStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for RaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaidStatus {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "open" => Ok(RaidStatus::Open),
            "in_progress" => Ok(RaidStatus::InProgress),
            "resolved" => Ok(RaidStatus::Resolved),
            "closed" => Ok(RaidStatus::Closed),
            _ => Err(invalid(RaidField::Status, s)),
        }
    }
}

/// RAID item as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaidItem {
    pub id: String,
    pub project_key: String,
    #[serde(rename = "type")]
    pub raid_type: RaidType,
    pub title: String,
    pub description: String,
    pub status: RaidStatus,
    pub priority: RaidPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial RAID item accumulated over a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaidDraft {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub raid_type: Option<RaidType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<RaidPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RaidStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl RaidDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a draft field as chat text
    ///
    /// Returns `None` for fields a draft does not carry (`RaidId`,
    /// `TargetState`).
    pub fn get(&self, field: RaidField) -> Option<String> {
        match field {
            RaidField::Type => self.raid_type.map(|t| t.as_str().to_string()),
            RaidField::Title => self.title.clone(),
            RaidField::Description => self.description.clone(),
            RaidField::Priority => self.priority.map(|p| p.as_str().to_string()),
            RaidField::Status => self.status.map(|s| s.as_str().to_string()),
            RaidField::Owner => self.owner.clone(),
            RaidField::RaidId | RaidField::TargetState => None,
        }
    }

    /// Parse `raw` and store it under `field`
    ///
    /// On error the draft is left unchanged.
    ///
    /// # Errors
    ///
    /// * `InvalidAnswer` - If `raw` does not parse for an enum-valued field,
    ///   or `field` is not a draft field
    pub fn set(&mut self, field: RaidField, raw: &str) -> Result<()> {
        let value = raw.trim();
        match field {
            RaidField::Type => self.raid_type = Some(value.parse()?),
            RaidField::Title => self.title = Some(value.to_string()),
            RaidField::Description => self.description = Some(value.to_string()),
            RaidField::Priority => self.priority = Some(value.parse()?),
            RaidField::Status => self.status = Some(value.parse()?),
            RaidField::Owner => self.owner = Some(value.to_string()),
            RaidField::RaidId | RaidField::TargetState => return Err(invalid(field, raw)),
        }
        Ok(())
    }

    /// True when no field has been collected
    pub fn is_empty(&self) -> bool {
        self.raid_type.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.owner.is_none()
    }
}

/// Creation payload sent to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRaidItem {
    #[serde(rename = "type")]
    pub raid_type: RaidType,
    pub title: String,
    pub description: String,
    pub status: RaidStatus,
    pub priority: RaidPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl NewRaidItem {
    /// Build a creation payload, defaulting status to `open` and priority
    /// to `medium`
    ///
    /// # Errors
    ///
    /// * `MissingRequiredField` - If type, title or description is absent or
    ///   blank
    pub fn from_draft(draft: &RaidDraft) -> Result<Self> {
        let required = |value: &Option<String>, field: RaidField| -> Result<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or(ChatError::MissingRequiredField { field })
        };

        let raid_type = draft
            .raid_type
            .ok_or(ChatError::MissingRequiredField {
                field: RaidField::Type,
            })?;
        let title = required(&draft.title, RaidField::Title)?;
        let description = required(&draft.description, RaidField::Description)?;

        Ok(Self {
            raid_type,
            title,
            description,
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            owner: draft.owner.clone().filter(|o| !o.trim().is_empty()),
        })
    }
}

/// Partial update payload sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaidItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RaidStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<RaidPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl RaidItemUpdate {
    /// Extract the updatable fields of a draft (the type is immutable)
    pub fn from_draft(draft: &RaidDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            priority: draft.priority,
            owner: draft.owner.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.owner.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_parse_case_insensitively() {
        assert_eq!("RISK".parse::<RaidType>().unwrap(), RaidType::Risk);
        assert_eq!(
            " Dependencies ".parse::<RaidType>().unwrap(),
            RaidType::Dependency
        );
        assert_eq!("High".parse::<RaidPriority>().unwrap(), RaidPriority::High);
        assert_eq!(
            "in progress".parse::<RaidStatus>().unwrap(),
            RaidStatus::InProgress
        );
        assert_eq!(
            "In-Progress".parse::<RaidStatus>().unwrap(),
            RaidStatus::InProgress
        );
    }

    #[test]
    fn test_enum_parse_error_carries_field() {
        match "urgent".parse::<RaidPriority>() {
            Err(ChatError::InvalidAnswer { field, value }) => {
                assert_eq!(field, RaidField::Priority);
                assert_eq!(value, "urgent");
            }
            other => panic!("Expected InvalidAnswer, got {:?}", other),
        }
    }

    #[test]
    fn test_draft_set_leaves_draft_unchanged_on_error() {
        let mut draft = RaidDraft::new();
        draft.set(RaidField::Priority, "high").unwrap();

        assert!(draft.set(RaidField::Priority, "whenever").is_err());
        assert_eq!(draft.priority, Some(RaidPriority::High));
        assert!(draft.set(RaidField::RaidId, "raid-1").is_err());
    }

    #[test]
    fn test_new_raid_item_defaults() {
        let mut draft = RaidDraft::new();
        draft.set(RaidField::Type, "risk").unwrap();
        draft.set(RaidField::Title, "T").unwrap();
        draft.set(RaidField::Description, "D").unwrap();

        let item = NewRaidItem::from_draft(&draft).unwrap();
        assert_eq!(item.status, RaidStatus::Open);
        assert_eq!(item.priority, RaidPriority::Medium);
        assert_eq!(item.owner, None);
    }

    #[test]
    fn test_new_raid_item_rejects_blank_description() {
        let draft = RaidDraft {
            raid_type: Some(RaidType::Issue),
            title: Some("T".to_string()),
            description: Some("   ".to_string()),
            ..RaidDraft::default()
        };

        assert_eq!(
            NewRaidItem::from_draft(&draft),
            Err(ChatError::MissingRequiredField {
                field: RaidField::Description
            })
        );
    }

    #[test]
    fn test_update_ignores_type() {
        let draft = RaidDraft {
            raid_type: Some(RaidType::Risk),
            ..RaidDraft::default()
        };
        assert!(!draft.is_empty());
        assert!(RaidItemUpdate::from_draft(&draft).is_empty());
    }
}
