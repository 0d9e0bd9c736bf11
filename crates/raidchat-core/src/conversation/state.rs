//! Conversation state and the step sequencer
//!
//! A conversation is a linear automaton: `current_step` walks the step list
//! from 0 to `steps.len()`, one accepted answer at a time. Every mutating
//! method validates first and only then writes, so a rejected answer leaves
//! the state exactly as it was.

use super::step::{build_steps, ConversationStep};
use crate::config::SequencerPolicy;
use crate::errors::{ChatError, Result};
use crate::model::{CommandIntent, CommandType, RaidDraft, RaidField};

/// Position within an immutable step list
///
/// Invariant: `0 <= current <= steps.len()`.
#[derive(Debug, Clone)]
pub struct StepCursor {
    current: usize,
    steps: Vec<ConversationStep>,
}

impl StepCursor {
    pub fn new(steps: Vec<ConversationStep>) -> Self {
        Self { current: 0, steps }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn steps(&self) -> &[ConversationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step awaiting an answer, or `None` once complete
    pub fn current_step(&self) -> Option<&ConversationStep> {
        self.steps.get(self.current)
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.steps.len()
    }

    fn advance(&mut self) {
        if self.current < self.steps.len() {
            self.current += 1;
        }
    }

    fn seek(&mut self, step: usize) -> Result<()> {
        if step > self.steps.len() {
            return Err(ChatError::StepOutOfRange {
                step,
                total: self.steps.len(),
            });
        }
        self.current = step;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreateRaidState {
    pub project_key: String,
    pub collected_data: RaidDraft,
    pub cursor: StepCursor,
}

#[derive(Debug, Clone)]
pub struct EditRaidState {
    pub project_key: String,
    pub raid_id: Option<String>,
    pub updates: RaidDraft,
    pub cursor: StepCursor,
}

#[derive(Debug, Clone)]
pub struct TransitionWorkflowState {
    pub project_key: String,
    pub raid_id: Option<String>,
    pub target_state: Option<String>,
    pub cursor: StepCursor,
}

/// In-progress conversation, one variant per conversational command
///
/// "No conversation" is `Option::<Conversation>::None`.
#[derive(Debug, Clone)]
pub enum Conversation {
    CreateRaid(CreateRaidState),
    EditRaid(EditRaidState),
    TransitionWorkflow(TransitionWorkflowState),
}

/// Start a conversation for a freshly recognized intent
///
/// Returns `None` for `ListRaid` and `Unknown`, which never collect data.
/// Recognized `intent.params` are seeded into the payload when they pass the
/// matching step's validator; seeding never moves the cursor.
pub fn init_conversation(
    intent: &CommandIntent,
    project_key: impl Into<String>,
    policy: &SequencerPolicy,
) -> Option<Conversation> {
    let project_key = project_key.into();
    let cursor = StepCursor::new(build_steps(intent.command_type, policy));

    let mut conversation = match intent.command_type {
        CommandType::CreateRaid => Conversation::CreateRaid(CreateRaidState {
            project_key,
            collected_data: RaidDraft::new(),
            cursor,
        }),
        CommandType::EditRaid => Conversation::EditRaid(EditRaidState {
            project_key,
            raid_id: None,
            updates: RaidDraft::new(),
            cursor,
        }),
        CommandType::TransitionWorkflow => {
            Conversation::TransitionWorkflow(TransitionWorkflowState {
                project_key,
                raid_id: None,
                target_state: None,
                cursor,
            })
        }
        CommandType::ListRaid | CommandType::Unknown => return None,
    };

    conversation.seed(intent);
    Some(conversation)
}

impl Conversation {
    pub fn command_type(&self) -> CommandType {
        match self {
            Conversation::CreateRaid(_) => CommandType::CreateRaid,
            Conversation::EditRaid(_) => CommandType::EditRaid,
            Conversation::TransitionWorkflow(_) => CommandType::TransitionWorkflow,
        }
    }

    pub fn project_key(&self) -> &str {
        match self {
            Conversation::CreateRaid(s) => &s.project_key,
            Conversation::EditRaid(s) => &s.project_key,
            Conversation::TransitionWorkflow(s) => &s.project_key,
        }
    }

    pub fn cursor(&self) -> &StepCursor {
        match self {
            Conversation::CreateRaid(s) => &s.cursor,
            Conversation::EditRaid(s) => &s.cursor,
            Conversation::TransitionWorkflow(s) => &s.cursor,
        }
    }

    fn cursor_mut(&mut self) -> &mut StepCursor {
        match self {
            Conversation::CreateRaid(s) => &mut s.cursor,
            Conversation::EditRaid(s) => &mut s.cursor,
            Conversation::TransitionWorkflow(s) => &mut s.cursor,
        }
    }

    pub fn current_step(&self) -> usize {
        self.cursor().current()
    }

    pub fn steps(&self) -> &[ConversationStep] {
        self.cursor().steps()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor().is_complete()
    }

    /// Prompt of the step awaiting an answer
    pub fn current_prompt(&self) -> Option<&str> {
        self.cursor().current_step().map(|s| s.prompt.as_str())
    }

    /// RAID id the conversation targets, if known
    pub fn raid_id(&self) -> Option<&str> {
        match self {
            Conversation::CreateRaid(_) => None,
            Conversation::EditRaid(s) => s.raid_id.as_deref(),
            Conversation::TransitionWorkflow(s) => s.raid_id.as_deref(),
        }
    }

    /// Current value collected for `field`
    pub fn field_value(&self, field: RaidField) -> Option<String> {
        match (self, field) {
            (Conversation::CreateRaid(s), _) => s.collected_data.get(field),
            (Conversation::EditRaid(s), RaidField::RaidId) => s.raid_id.clone(),
            (Conversation::EditRaid(s), _) => s.updates.get(field),
            (Conversation::TransitionWorkflow(s), RaidField::RaidId) => s.raid_id.clone(),
            (Conversation::TransitionWorkflow(s), RaidField::TargetState) => {
                s.target_state.clone()
            }
            (Conversation::TransitionWorkflow(_), _) => None,
        }
    }

    /// True when `field` holds a non-blank value
    pub fn has_value(&self, field: RaidField) -> bool {
        self.field_value(field)
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Merge a value into the command-specific payload
    fn set_field(&mut self, field: RaidField, value: &str) -> Result<()> {
        match (self, field) {
            (Conversation::CreateRaid(s), _) => s.collected_data.set(field, value),
            (Conversation::EditRaid(s), RaidField::RaidId) => {
                s.raid_id = Some(value.to_string());
                Ok(())
            }
            (Conversation::EditRaid(s), _) => s.updates.set(field, value),
            (Conversation::TransitionWorkflow(s), RaidField::RaidId) => {
                s.raid_id = Some(value.to_string());
                Ok(())
            }
            (Conversation::TransitionWorkflow(s), RaidField::TargetState) => {
                s.target_state = Some(value.to_string());
                Ok(())
            }
            (Conversation::TransitionWorkflow(_), _) => Err(ChatError::InvalidAnswer {
                field,
                value: value.to_string(),
            }),
        }
    }

    fn seed(&mut self, intent: &CommandIntent) {
        let candidates: Vec<(RaidField, String)> = self
            .steps()
            .iter()
            .filter_map(|step| {
                let value = intent.param_str(step.field.param_keys())?;
                let value = value.trim().to_string();
                (!value.is_empty() && step.accepts(&value)).then_some((step.field, value))
            })
            .collect();

        for (field, value) in candidates {
            if let Err(err) = self.set_field(field, &value) {
                tracing::debug!(field = field.as_str(), error = %err, "param not seeded");
            }
        }
    }

    /// Apply one user answer to the step awaiting it
    ///
    /// The answer is trimmed. Empty input skips an optional step, or keeps
    /// the value already held by a required one. On any error the
    /// conversation is unchanged and the caller should re-prompt.
    ///
    /// # Errors
    ///
    /// * `ConversationComplete` - If every step is already answered
    /// * `MissingRequiredField` - If a required step gets empty input and
    ///   has no value yet
    /// * `InvalidAnswer` - If the step validator rejects the answer
    pub fn answer_current_step(&mut self, raw: &str) -> Result<()> {
        let value = raw.trim();
        let (field, required, accepted) = match self.cursor().current_step() {
            Some(step) => (step.field, step.required, step.accepts(value)),
            None => {
                return Err(ChatError::ConversationComplete {
                    total: self.cursor().len(),
                })
            }
        };

        if value.is_empty() {
            if required && !self.has_value(field) {
                return Err(ChatError::MissingRequiredField { field });
            }
            tracing::debug!(field = field.as_str(), "step skipped");
            self.cursor_mut().advance();
            return Ok(());
        }

        if !accepted {
            return Err(ChatError::InvalidAnswer {
                field,
                value: value.to_string(),
            });
        }

        self.set_field(field, value)?;
        self.cursor_mut().advance();
        tracing::debug!(
            field = field.as_str(),
            step = self.current_step(),
            "step answered"
        );
        Ok(())
    }

    /// Step back one question, keeping what was collected
    ///
    /// Returns false when already at the first step.
    pub fn go_back(&mut self) -> bool {
        match self.current_step().checked_sub(1) {
            Some(previous) => self.seek(previous).is_ok(),
            None => false,
        }
    }

    /// Move the cursor to `step`, where `steps.len()` means complete
    ///
    /// Callers outside this crate only use it to build conversation states
    /// in tests; the session moves through `answer_current_step` and `go_back`.
    ///
    /// # Errors
    ///
    /// * `StepOutOfRange` - If `step > steps.len()`
    #[doc(hidden)]
    pub fn seek(&mut self, step: usize) -> Result<()> {
        self.cursor_mut().seek(step)
    }
}
