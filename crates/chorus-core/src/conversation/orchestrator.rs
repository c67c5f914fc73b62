//! The conversation: a flat message log driven by a round loop

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::agent::ConversationAgent;
use super::context::RoundContext;
use super::message::ChatMessage;
use super::mode::ConversationMode;
use super::selector::{DelegatedSelector, RoundRobinSelector, SpeakerSelector};
use crate::config::ConversationConfig;
use crate::error::{ChorusError, ChorusResult};
use crate::ids::{SharedIdGenerator, default_id_generator};
use crate::types::MessageRole;

/// Why [`Conversation::start`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Round or message limit reached
    MaxRounds,
    /// A termination word was replied, or the speaker asked to stop
    AgentTerminated,
    /// The conversation deadline passed or the caller cancelled
    Timeout,
}

impl TerminationReason {
    /// Stable name of the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MaxRounds => "max_rounds",
            Self::AgentTerminated => "agent_terminated",
            Self::Timeout => "timeout",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a conversation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationResult {
    /// Conversation identifier
    pub conversation_id: String,
    /// Full message log, initial message included
    pub messages: Vec<ChatMessage>,
    /// Accepted replies
    pub total_rounds: usize,
    /// When `start` began
    pub started_at: DateTime<Utc>,
    /// When `start` returned
    pub ended_at: DateTime<Utc>,
    /// Why the loop stopped
    pub termination_reason: TerminationReason,
}

/// A multi-agent conversation over one flat message log
///
/// The log is independent of any [`HistoryTree`](crate::history::HistoryTree);
/// callers that want versioned history record messages into a tree themselves.
pub struct Conversation {
    id: String,
    mode: ConversationMode,
    agents: Vec<Arc<dyn ConversationAgent>>,
    messages: RwLock<Vec<ChatMessage>>,
    config: ConversationConfig,
    selector: Arc<dyn SpeakerSelector>,
    ids: SharedIdGenerator,
}

impl Conversation {
    /// Create a conversation; the mode picks the default selector
    ///
    /// [`ConversationMode::Selector`] gets a [`DelegatedSelector`] without a
    /// completion capability, every other mode a [`RoundRobinSelector`].
    pub fn new(
        mode: ConversationMode,
        agents: Vec<Arc<dyn ConversationAgent>>,
        config: ConversationConfig,
    ) -> Self {
        let selector: Arc<dyn SpeakerSelector> = match mode {
            ConversationMode::Selector => Arc::new(DelegatedSelector::new()),
            _ => Arc::new(RoundRobinSelector::new()),
        };
        let ids = default_id_generator();

        Self {
            id: ids.next_id("conv"),
            mode,
            agents,
            messages: RwLock::new(Vec::new()),
            config,
            selector,
            ids,
        }
    }

    /// Replace the speaker selector
    pub fn with_selector(mut self, selector: Arc<dyn SpeakerSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Replace the identifier source; the conversation id is re-minted from it
    pub fn with_id_generator(mut self, ids: SharedIdGenerator) -> Self {
        self.id = ids.next_id("conv");
        self.ids = ids;
        self
    }

    /// Use a fixed conversation id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Conversation identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Conversation mode
    pub fn mode(&self) -> ConversationMode {
        self.mode
    }

    /// Participating agents
    pub fn agents(&self) -> &[Arc<dyn ConversationAgent>] {
        &self.agents
    }

    /// Loop configuration
    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }

    /// Append a message, stamping a missing id or timestamp
    pub fn add_message(&self, mut message: ChatMessage) {
        if message.id.is_none() {
            message.id = Some(self.ids.next_id("msg"));
        }
        if message.timestamp.is_none() {
            message.timestamp = Some(Utc::now());
        }
        self.messages.write().push(message);
    }

    /// Copy of the message log
    pub fn get_messages(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    /// Number of messages in the log
    pub fn message_count(&self) -> usize {
        self.messages.read().len()
    }

    /// Run the round loop until a termination condition holds
    ///
    /// Speaker-selection failures and reply failures never surface here: the
    /// former stops the loop with [`TerminationReason::AgentTerminated`], the
    /// latter skips the round without counting it. Only deadline expiry and
    /// cancellation return an error, and that error carries the partial result
    /// (see [`ChorusError::partial_result`]).
    pub async fn start(
        &self,
        cancel: &CancellationToken,
        initial_message: impl Into<String>,
    ) -> ChorusResult<ConversationResult> {
        info!(
            conversation_id = %self.id,
            mode = %self.mode,
            agents = self.agents.len(),
            "conversation started"
        );

        self.add_message(ChatMessage::new(MessageRole::User, initial_message));

        let started_at = Utc::now();
        let ctx = RoundContext::new(cancel.child_token()).with_timeout(self.config.timeout);

        let mut round = 0usize;
        let mut reason = None;

        while round < self.config.max_rounds && self.message_count() < self.config.max_messages {
            if ctx.is_expired() {
                let result = self.finish(started_at, round, TerminationReason::Timeout);
                return Err(ChorusError::DeadlineExceeded {
                    timeout_secs: self.config.timeout.as_secs(),
                    result: Box::new(result),
                });
            }
            if ctx.is_cancelled() {
                let result = self.finish(started_at, round, TerminationReason::Timeout);
                return Err(ChorusError::Cancelled {
                    result: Box::new(result),
                });
            }

            let log = self.get_messages();

            let speaker = match self.selector.select_next(&ctx, &self.agents, &log).await {
                Ok(speaker) => speaker,
                Err(e) => {
                    warn!(conversation_id = %self.id, round, error = %e, "speaker selection failed");
                    reason = Some(TerminationReason::AgentTerminated);
                    break;
                }
            };

            let mut reply = match speaker.reply(&ctx, &log).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(
                        conversation_id = %self.id,
                        agent = %speaker.id(),
                        round,
                        error = %e,
                        "agent reply failed"
                    );
                    continue;
                }
            };

            if reply.sender_id.is_none() {
                reply.sender_id = Some(speaker.id().to_string());
            }
            let content = reply.content.clone();
            self.add_message(reply);
            round += 1;

            debug!(
                conversation_id = %self.id,
                agent = %speaker.id(),
                round,
                "accepted reply"
            );

            if self.config.is_termination_word(&content)
                || speaker.should_terminate(&self.get_messages())
            {
                reason = Some(TerminationReason::AgentTerminated);
                break;
            }
        }

        let result = self.finish(
            started_at,
            round,
            reason.unwrap_or(TerminationReason::MaxRounds),
        );
        info!(
            conversation_id = %self.id,
            reason = %result.termination_reason,
            rounds = result.total_rounds,
            "conversation ended"
        );
        Ok(result)
    }

    fn finish(
        &self,
        started_at: DateTime<Utc>,
        total_rounds: usize,
        termination_reason: TerminationReason,
    ) -> ConversationResult {
        ConversationResult {
            conversation_id: self.id.clone(),
            messages: self.get_messages(),
            total_rounds,
            started_at,
            ended_at: Utc::now(),
            termination_reason,
        }
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("agents", &self.agents.len())
            .field("messages", &self.message_count())
            .field("config", &self.config)
            .finish()
    }
}
