//! Step templates
//!
//! One static template per command type. The same table produces the step
//! list for the sequencer and the required-field list for the completion
//! checker.

use crate::config::SequencerPolicy;
use crate::model::{CommandType, RaidField, RaidPriority, RaidStatus, RaidType};

/// Predicate over a trimmed, non-empty answer
pub type Validator = fn(&str) -> bool;

/// One field-collection unit within a conversation
#[derive(Debug, Clone)]
pub struct ConversationStep {
    pub field: RaidField,
    pub prompt: String,
    pub required: bool,
    pub validate: Option<Validator>,
}

impl ConversationStep {
    /// Run the step validator; steps without one accept anything
    pub fn accepts(&self, value: &str) -> bool {
        self.validate.map_or(true, |validate| validate(value))
    }
}

/// Which sequencer policy switch, if any, controls a template entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Always,
    AskPriority,
    AskOwner,
}

impl Gate {
    fn is_open(self, policy: &SequencerPolicy) -> bool {
        match self {
            Gate::Always => true,
            Gate::AskPriority => policy.ask_priority,
            Gate::AskOwner => policy.ask_owner,
        }
    }
}

struct StepTemplate {
    field: RaidField,
    prompt: &'static str,
    required: bool,
    validate: Option<Validator>,
    gate: Gate,
}

const MAX_TITLE_LEN: usize = 200;

fn is_raid_type(value: &str) -> bool {
    value.parse::<RaidType>().is_ok()
}

fn is_priority(value: &str) -> bool {
    value.parse::<RaidPriority>().is_ok()
}

fn is_status(value: &str) -> bool {
    value.parse::<RaidStatus>().is_ok()
}

fn is_title(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().count() <= MAX_TITLE_LEN
}

fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Ids are single tokens, e.g. `raid-12`
fn is_raid_id(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

const CREATE_RAID_STEPS: &[StepTemplate] = &[
    StepTemplate {
        field: RaidField::Type,
        prompt: "What kind of RAID item is this? (risk, assumption, issue, dependency)",
        required: true,
        validate: Some(is_raid_type),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Title,
        prompt: "What's the title?",
        required: true,
        validate: Some(is_title),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Description,
        prompt: "Please describe it.",
        required: true,
        validate: Some(is_non_blank),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Priority,
        prompt: "What priority? (low, medium, high, critical)",
        required: false,
        validate: Some(is_priority),
        gate: Gate::AskPriority,
    },
    StepTemplate {
        field: RaidField::Owner,
        prompt: "Who owns it?",
        required: false,
        validate: Some(is_non_blank),
        gate: Gate::AskOwner,
    },
];

const EDIT_RAID_STEPS: &[StepTemplate] = &[
    StepTemplate {
        field: RaidField::RaidId,
        prompt: "Which RAID item should I update? (e.g. raid-12)",
        required: true,
        validate: Some(is_raid_id),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Title,
        prompt: "New title?",
        required: false,
        validate: Some(is_title),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Description,
        prompt: "New description?",
        required: false,
        validate: Some(is_non_blank),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Status,
        prompt: "New status? (open, in progress, resolved, closed)",
        required: false,
        validate: Some(is_status),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Priority,
        prompt: "New priority? (low, medium, high, critical)",
        required: false,
        validate: Some(is_priority),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::Owner,
        prompt: "New owner?",
        required: false,
        validate: Some(is_non_blank),
        gate: Gate::Always,
    },
];

const TRANSITION_WORKFLOW_STEPS: &[StepTemplate] = &[
    StepTemplate {
        field: RaidField::RaidId,
        prompt: "Which RAID item should move? (e.g. raid-12)",
        required: true,
        validate: Some(is_raid_id),
        gate: Gate::Always,
    },
    StepTemplate {
        field: RaidField::TargetState,
        prompt: "Which workflow state should it move to?",
        required: true,
        validate: Some(is_non_blank),
        gate: Gate::Always,
    },
];

fn template(command: CommandType) -> &'static [StepTemplate] {
    match command {
        CommandType::CreateRaid => CREATE_RAID_STEPS,
        CommandType::EditRaid => EDIT_RAID_STEPS,
        CommandType::TransitionWorkflow => TRANSITION_WORKFLOW_STEPS,
        CommandType::ListRaid | CommandType::Unknown => &[],
    }
}

/// Build the step list for a command, in declaration order
pub fn build_steps(command: CommandType, policy: &SequencerPolicy) -> Vec<ConversationStep> {
    template(command)
        .iter()
        .filter(|t| t.gate.is_open(policy))
        .map(|t| ConversationStep {
            field: t.field,
            prompt: t.prompt.to_string(),
            required: t.required,
            validate: t.validate,
        })
        .collect()
}

/// Fields that must be present before a command may execute
///
/// Required entries are never policy-gated, so this is independent of
/// `SequencerPolicy`.
pub fn required_fields(command: CommandType) -> impl Iterator<Item = RaidField> {
    template(command)
        .iter()
        .filter(|t| t.required)
        .map(|t| t.field)
}
