use crate::conversation::ConversationStep;
use crate::errors::ChatError;
use crate::model::{CommandType, RaidField, RaidItem};

pub const SUCCESS_MARKER: &str = "✅";
pub const ERROR_MARKER: &str = "❌";
pub const WARNING_MARKER: &str = "⚠️";

fn push_line(output: &mut String, label: &str, value: &str) {
    output.push('\n');
    output.push_str(&format!("**{}:** {}", label, value));
}

fn push_owner(output: &mut String, owner: Option<&str>) {
    if let Some(owner) = owner.filter(|o| !o.trim().is_empty()) {
        push_line(output, "Owner", owner);
    }
}

/// Confirmation for a newly created RAID item
///
/// Lines, in order: header, Title, Description, Priority, Status, then
/// Owner when present.
pub fn format_raid_created(item: &RaidItem) -> String {
    let mut output = format!(
        "{} **{} created** ({})",
        SUCCESS_MARKER,
        item.raid_type.label(),
        item.id
    );
    push_line(&mut output, "Title", &item.title);
    push_line(&mut output, "Description", &item.description);
    push_line(&mut output, "Priority", item.priority.as_str());
    push_line(&mut output, "Status", item.status.as_str());
    push_owner(&mut output, item.owner.as_deref());
    output
}

/// Confirmation for an updated RAID item
///
/// Lines, in order: header, Title, Status, Priority, then Owner when present.
pub fn format_raid_updated(item: &RaidItem) -> String {
    let mut output = format!(
        "{} **{} updated** ({})",
        SUCCESS_MARKER,
        item.raid_type.label(),
        item.id
    );
    push_line(&mut output, "Title", &item.title);
    push_line(&mut output, "Status", item.status.as_str());
    push_line(&mut output, "Priority", item.priority.as_str());
    push_owner(&mut output, item.owner.as_deref());
    output
}

/// Backend failure; the error text is passed through untouched
pub fn format_api_error(error: &str) -> String {
    format!("{} {}", ERROR_MARKER, error)
}

/// Bullet list of a project's RAID items, sorted by id
///
/// Numeric id suffixes compare as numbers, so `raid-2` precedes `raid-10`.
pub fn format_raid_list(project_key: &str, items: &[RaidItem]) -> String {
    if items.is_empty() {
        return format!("No RAID items found for project {}.", project_key);
    }

    let mut sorted: Vec<&RaidItem> = items.iter().collect();
    sorted.sort_by(|a, b| id_sort_key(&a.id).cmp(&id_sort_key(&b.id)));

    let mut output = format!("**RAID items for {}** ({})", project_key, sorted.len());
    for item in sorted {
        output.push_str(&format!(
            "\n- {} [{}] {} ({}, {})",
            item.id,
            item.raid_type.label(),
            item.title,
            item.status,
            item.priority
        ));
    }
    output
}

/// Split an id into its prefix and trailing number
///
/// The full id breaks ties, e.g. `raid-7` against `raid-007`.
fn id_sort_key(id: &str) -> (&str, Option<u64>, &str) {
    let prefix = id.trim_end_matches(|c: char| c.is_ascii_digit());
    let number = id[prefix.len()..].parse().ok();
    (prefix, number, id)
}

/// Question for step `index` (0-based) of `total`
///
/// `current` is the value already collected for the step, if any.
pub fn format_step_prompt(
    step: &ConversationStep,
    index: usize,
    total: usize,
    current: Option<&str>,
) -> String {
    let mut output = format!("**Step {}/{}:** {}", index + 1, total, step.prompt);
    match current {
        Some(value) => output.push_str(&format!(" _(current: {}, press enter to keep)_", value)),
        None if !step.required => output.push_str(" _(optional, press enter to skip)_"),
        None => {}
    }
    output
}

pub fn format_no_conversation() -> String {
    "There is no command in progress. Tell me what you'd like to do first, for example \"create a risk\".".to_string()
}

pub fn format_incomplete(answered: usize, total: usize) -> String {
    format!(
        "Please finish answering the remaining questions first ({} of {} answered).",
        answered, total
    )
}

pub fn format_missing_fields(fields: &[RaidField]) -> String {
    let labels: Vec<&str> = fields.iter().map(RaidField::label).collect();
    format!(
        "{} Missing required information: {}.",
        WARNING_MARKER,
        labels.join(", ")
    )
}

pub fn format_missing_project_key() -> String {
    format!("{} This conversation is not scoped to a project.", WARNING_MARKER)
}

pub fn format_empty_update() -> String {
    format!(
        "{} Nothing to update: change at least one field. Type \"back\" to revisit a question.",
        WARNING_MARKER
    )
}

pub fn format_unsupported(command: CommandType) -> String {
    format!("{} {} is not yet supported.", WARNING_MARKER, command.label())
}

/// Chat text for any engine error
///
/// Backend failures keep their raw text; everything else is guidance.
pub fn format_chat_error(err: &ChatError) -> String {
    match err {
        ChatError::IncompleteConversation { answered, total } => {
            format_incomplete(*answered, *total)
        }
        ChatError::NoActiveConversation => format_no_conversation(),
        ChatError::MissingRequiredField { field } => format_missing_fields(&[*field]),
        ChatError::MissingProjectKey => format_missing_project_key(),
        ChatError::EmptyUpdate => format_empty_update(),
        ChatError::UnsupportedCommand { command } => format_unsupported(*command),
        ChatError::BackendRejected { message } | ChatError::Unexpected { message } => {
            format_api_error(message)
        }
        ChatError::InvalidAnswer { .. }
        | ChatError::ConversationComplete { .. }
        | ChatError::StepOutOfRange { .. }
        | ChatError::Config { .. } => format!("{} {}", WARNING_MARKER, err),
    }
}

pub fn format_help() -> String {
    [
        "I can help you with RAID items:",
        "- create a risk, assumption, issue or dependency",
        "- edit an existing item (e.g. \"edit raid-3\")",
        "- list the project's items",
        "While answering, type \"back\" to revisit a question or \"cancel\" to stop.",
    ]
    .join("\n")
}
