//! Per-user chat session
//!
//! Owns the conversation state and the message log for one user in one
//! project. Input is routed either to the active conversation (answers and
//! the `cancel`, `back` and `retry` keywords) or, when idle, through the
//! intent classifier.
//!
//! The session is single-owner: every mutating method takes `&mut self`
//! and at most one backend call is in flight per submitted message.

use raidchat_core::render::{
    format_chat_error, format_help, format_no_conversation, format_step_prompt,
};
use raidchat_core::types::SessionId;
use raidchat_core::{init_conversation, log_op_end, log_op_start};
use raidchat_core::{
    ChatMessage, CommandIntent, CommandType, Conversation, MessageMetadata, SequencerPolicy,
};

use crate::api::RaidApi;
use crate::classifier::IntentClassifier;
use crate::commands::executor::CommandExecutor;

const CANCEL: &str = "cancel";
const BACK: &str = "back";
const RETRY: &str = "retry";

pub struct ChatSession<A, C> {
    id: SessionId,
    project_key: String,
    policy: SequencerPolicy,
    classifier: C,
    executor: CommandExecutor<A>,
    conversation: Option<Conversation>,
    messages: Vec<ChatMessage>,
}

impl<A: RaidApi, C: IntentClassifier> ChatSession<A, C> {
    pub fn new(project_key: impl Into<String>, api: A, classifier: C) -> Self {
        Self {
            id: SessionId::new(),
            project_key: project_key.into(),
            policy: SequencerPolicy::default(),
            classifier,
            executor: CommandExecutor::new(api),
            conversation: None,
            messages: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: SequencerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn executor(&self) -> &CommandExecutor<A> {
        &self.executor
    }

    /// The full message log, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    /// True while a conversation is in progress
    pub fn is_active(&self) -> bool {
        self.conversation.is_some()
    }

    /// Handle one line of user input
    ///
    /// The user message and every reply are appended to the log; only the
    /// replies are returned.
    pub async fn submit(&mut self, text: &str) -> Vec<ChatMessage> {
        log_op_start!(
            "session_submit",
            session_id = self.id.as_str(),
            active = self.is_active()
        );
        let start = std::time::Instant::now();

        self.messages.push(ChatMessage::user(text));
        let replies = if self.is_active() {
            self.continue_conversation(text).await
        } else {
            let intent = self.classifier.classify(text);
            tracing::debug!(
                command = intent.command_type.as_str(),
                confidence = intent.confidence,
                "intent classified"
            );
            self.route(intent).await
        };
        self.messages.extend(replies.iter().cloned());

        log_op_end!(
            "session_submit",
            duration_ms = start.elapsed().as_millis() as u64,
            session_id = self.id.as_str(),
            replies = replies.len()
        );
        replies
    }

    /// Act on an already classified intent, bypassing the classifier
    pub async fn start(&mut self, intent: CommandIntent) -> Vec<ChatMessage> {
        let replies = self.route(intent).await;
        self.messages.extend(replies.iter().cloned());
        replies
    }

    /// Drop the active conversation; returns false when there was none
    pub fn cancel(&mut self) -> bool {
        self.conversation.take().is_some()
    }

    /// Move the active conversation back one step
    pub fn go_back(&mut self) -> bool {
        self.conversation.as_mut().is_some_and(Conversation::go_back)
    }

    /// Close the session, handing back its message log
    pub fn end(self) -> Vec<ChatMessage> {
        tracing::info!(
            session_id = self.id.as_str(),
            messages = self.messages.len(),
            abandoned = self.conversation.is_some(),
            "session ended"
        );
        self.messages
    }

    async fn route(&mut self, intent: CommandIntent) -> Vec<ChatMessage> {
        match intent.command_type {
            CommandType::ListRaid => vec![self.executor.list(&self.project_key).await.message],
            CommandType::Unknown => vec![ChatMessage::assistant(format_help())],
            command if self.is_active() => {
                let content = format!(
                    "Please finish or cancel the current command before starting \"{}\".",
                    command.label()
                );
                vec![ChatMessage::assistant(content)
                    .with_metadata(MessageMetadata::for_command(command))]
            }
            _ => {
                self.conversation =
                    init_conversation(&intent, self.project_key.as_str(), &self.policy);
                if !self.is_active() {
                    return vec![ChatMessage::assistant(format_help())];
                }
                if self.is_complete() {
                    self.run().await
                } else {
                    self.prompt().into_iter().collect()
                }
            }
        }
    }

    async fn continue_conversation(&mut self, text: &str) -> Vec<ChatMessage> {
        let keyword = text.trim().to_ascii_lowercase();
        match keyword.as_str() {
            CANCEL => {
                self.cancel();
                vec![ChatMessage::assistant("Cancelled.")]
            }
            BACK => {
                if self.go_back() {
                    self.prompt().into_iter().collect()
                } else {
                    let mut replies = vec![ChatMessage::assistant(
                        "You're already at the first question.",
                    )];
                    replies.extend(self.prompt());
                    replies
                }
            }
            RETRY if self.is_complete() => self.run().await,
            _ if self.is_complete() => vec![ChatMessage::assistant(
                "Type \"retry\" to try again, \"back\" to change an answer, or \"cancel\" to stop.",
            )],
            _ => self.answer(text).await,
        }
    }

    async fn answer(&mut self, text: &str) -> Vec<ChatMessage> {
        let Some(conversation) = self.conversation.as_mut() else {
            return vec![ChatMessage::assistant(format_no_conversation())];
        };

        let command = conversation.command_type();
        if let Err(err) = conversation.answer_current_step(text) {
            // One message: the reason, then the same question again.
            let mut content = format_chat_error(&err);
            if let Some(prompt) = self.prompt() {
                content.push('\n');
                content.push_str(&prompt.content);
            }
            let metadata = MessageMetadata::for_command(command).with_error(err.to_string());
            return vec![ChatMessage::new(err.message_role(), content).with_metadata(metadata)];
        }

        if self.is_complete() {
            self.run().await
        } else {
            self.prompt().into_iter().collect()
        }
    }

    /// Execute the active conversation; state is kept when execution fails
    async fn run(&mut self) -> Vec<ChatMessage> {
        let result = self.executor.execute(self.conversation.as_ref()).await;
        if result.success {
            self.conversation = None;
        }
        vec![result.message]
    }

    fn is_complete(&self) -> bool {
        self.conversation
            .as_ref()
            .is_some_and(Conversation::is_complete)
    }

    /// Question for the step awaiting an answer
    fn prompt(&self) -> Option<ChatMessage> {
        let conversation = self.conversation.as_ref()?;
        let step = conversation.cursor().current_step()?;
        let current = conversation
            .field_value(step.field)
            .filter(|value| !value.trim().is_empty());

        let content = format_step_prompt(
            step,
            conversation.current_step(),
            conversation.steps().len(),
            current.as_deref(),
        );
        Some(
            ChatMessage::assistant(content)
                .with_metadata(MessageMetadata::for_command(conversation.command_type())),
        )
    }
}
