//! Command vocabulary and the intent produced by upstream classification

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of commands the engine understands
///
/// Used as the discriminant tag for intents, conversations and message
/// metadata. Serialized in SCREAMING_SNAKE_CASE (`CREATE_RAID`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    CreateRaid,
    EditRaid,
    ListRaid,
    TransitionWorkflow,
    Unknown,
}

impl CommandType {
    /// Stable wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::CreateRaid => "CREATE_RAID",
            CommandType::EditRaid => "EDIT_RAID",
            CommandType::ListRaid => "LIST_RAID",
            CommandType::TransitionWorkflow => "TRANSITION_WORKFLOW",
            CommandType::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label used in chat text
    pub fn label(&self) -> &'static str {
        match self {
            CommandType::CreateRaid => "Create RAID item",
            CommandType::EditRaid => "Edit RAID item",
            CommandType::ListRaid => "List RAID items",
            CommandType::TransitionWorkflow => "Workflow transition",
            CommandType::Unknown => "Unknown command",
        }
    }

    /// Whether an intent of this type opens a multi-turn conversation
    ///
    /// `ListRaid` executes immediately and `Unknown` is rejected, so neither
    /// ever owns conversation state.
    pub fn starts_conversation(&self) -> bool {
        !matches!(self, CommandType::ListRaid | CommandType::Unknown)
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured interpretation of one chat message
///
/// `confidence` is carried for observability only; nothing in the engine
/// gates on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandIntent {
    #[serde(rename = "type")]
    pub command_type: CommandType,

    /// Parameters already extracted by the classifier, keyed by field name
    #[serde(default)]
    pub params: BTreeMap<String, Value>,

    /// Classifier confidence in [0, 1]
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: f64,

    /// The raw text the intent was derived from
    pub original_message: String,
}

impl CommandIntent {
    /// Create an intent with no params and full confidence
    pub fn new(command_type: CommandType, original_message: impl Into<String>) -> Self {
        Self {
            command_type,
            params: BTreeMap::new(),
            confidence: 1.0,
            original_message: original_message.into(),
        }
    }

    /// Add a parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the confidence, clamped into [0, 1] (NaN becomes 0)
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    /// First scalar param found under any of `keys`, rendered as a string
    ///
    /// Strings are returned as-is, numbers and booleans via their JSON text.
    /// Arrays, objects and nulls are ignored.
    pub fn param_str(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.params.get(*key))
            .find_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_type_wire_tags() {
        let json = serde_json::to_string(&CommandType::TransitionWorkflow).unwrap();
        assert_eq!(json, "\"TRANSITION_WORKFLOW\"");

        let parsed: CommandType = serde_json::from_str("\"CREATE_RAID\"").unwrap();
        assert_eq!(parsed, CommandType::CreateRaid);
        assert_eq!(parsed.to_string(), "CREATE_RAID");
    }

    #[test]
    fn test_starts_conversation() {
        assert!(CommandType::CreateRaid.starts_conversation());
        assert!(CommandType::EditRaid.starts_conversation());
        assert!(CommandType::TransitionWorkflow.starts_conversation());
        assert!(!CommandType::ListRaid.starts_conversation());
        assert!(!CommandType::Unknown.starts_conversation());
    }

    #[test]
    fn test_confidence_is_clamped() {
        let intent = CommandIntent::new(CommandType::CreateRaid, "x").with_confidence(1.7);
        assert_eq!(intent.confidence, 1.0);

        let intent = intent.with_confidence(-0.2);
        assert_eq!(intent.confidence, 0.0);

        let intent = intent.with_confidence(f64::NAN);
        assert_eq!(intent.confidence, 0.0);
    }

    #[test]
    fn test_param_str_reads_first_matching_scalar() {
        let intent = CommandIntent::new(CommandType::EditRaid, "edit raid-7")
            .with_param("raidId", "raid-7")
            .with_param("count", 3)
            .with_param("tags", json!(["a", "b"]));

        assert_eq!(
            intent.param_str(&["raid_id", "raidId"]),
            Some("raid-7".to_string())
        );
        assert_eq!(intent.param_str(&["count"]), Some("3".to_string()));
        assert_eq!(intent.param_str(&["tags"]), None);
        assert_eq!(intent.param_str(&["missing"]), None);
    }

    #[test]
    fn test_intent_deserializes_with_type_key() {
        let intent: CommandIntent = serde_json::from_value(json!({
            "type": "LIST_RAID",
            "confidence": 0.4,
            "original_message": "show risks"
        }))
        .unwrap();

        assert_eq!(intent.command_type, CommandType::ListRaid);
        assert!(intent.params.is_empty());
    }

    #[test]
    fn test_deserialized_confidence_is_clamped() {
        let parse = |confidence: Value| -> CommandIntent {
            serde_json::from_value(json!({
                "type": "CREATE_RAID",
                "confidence": confidence,
                "original_message": "new risk"
            }))
            .unwrap()
        };

        assert_eq!(parse(json!(5.0)).confidence, 1.0);
        assert_eq!(parse(json!(-2)).confidence, 0.0);
        assert_eq!(parse(json!(0.35)).confidence, 0.35);
    }

    #[test]
    fn test_non_numeric_confidence_is_rejected() {
        let parsed = serde_json::from_value::<CommandIntent>(json!({
            "type": "CREATE_RAID",
            "confidence": "high",
            "original_message": "new risk"
        }));
        assert!(parsed.is_err());
    }
}
