//! Keyword-based intent classifier
//!
//! Deterministic stand-in for the external classifier. The first word that
//! names a command decides the intent; a `raid-N` token and a RAID type
//! word are extracted as params wherever they appear.

use raidchat_core::{CommandIntent, CommandType, RaidType};
use raidchat_engine::IntentClassifier;

const KEYWORD_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

fn command_for(word: &str) -> Option<CommandType> {
    match word {
        "create" | "add" | "new" | "raise" | "log" => Some(CommandType::CreateRaid),
        "edit" | "update" | "change" => Some(CommandType::EditRaid),
        "list" | "show" => Some(CommandType::ListRaid),
        "move" | "transition" => Some(CommandType::TransitionWorkflow),
        _ => None,
    }
}

fn is_raid_id(word: &str) -> bool {
    word.strip_prefix("raid-")
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> CommandIntent {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '-'))
            .filter(|w| !w.is_empty())
            .collect();

        let Some(command) = words.iter().find_map(|w| command_for(w)) else {
            return CommandIntent::new(CommandType::Unknown, text).with_confidence(0.0);
        };

        let mut intent = CommandIntent::new(command, text).with_confidence(KEYWORD_CONFIDENCE);
        if let Some(raid_id) = words.iter().find(|w| is_raid_id(w)) {
            intent = intent.with_param("raid_id", *raid_id);
        }
        if let Some(raid_type) = words.iter().find_map(|w| w.parse::<RaidType>().ok()) {
            intent = intent.with_param("type", raid_type.as_str());
        }
        intent
    }
}
