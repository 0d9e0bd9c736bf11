//! Conversation engine: step templates, sequencer state and completion checks

pub mod completion;
pub mod state;
pub mod step;

pub use completion::{
    can_execute_command, check_structure, is_conversation_complete, missing_required_fields,
};
pub use state::{
    init_conversation, Conversation, CreateRaidState, EditRaidState, StepCursor,
    TransitionWorkflowState,
};
pub use step::{build_steps, required_fields, ConversationStep, Validator};
