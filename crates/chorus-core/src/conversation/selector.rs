//! Speaker selection strategies

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

use super::agent::{CompletionClient, ConversationAgent};
use super::context::RoundContext;
use super::message::ChatMessage;
use crate::error::{ChorusError, ChorusResult};

/// Chooses the next speaker each round
///
/// New strategies implement this trait and are handed to
/// [`Conversation::with_selector`](super::Conversation::with_selector).
#[async_trait]
pub trait SpeakerSelector: Send + Sync {
    /// Pick the next speaker; fails with [`ChorusError::NoAgents`] on an empty list
    async fn select_next(
        &self,
        ctx: &RoundContext,
        agents: &[Arc<dyn ConversationAgent>],
        messages: &[ChatMessage],
    ) -> ChorusResult<Arc<dyn ConversationAgent>>;
}

/// Cyclic selection: `agents[counter % len]`, then advance the counter
///
/// The counter belongs to this instance. Sharing one instance between
/// conversations that run at the same time interleaves their rotations.
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    counter: AtomicUsize,
}

impl RoundRobinSelector {
    /// Create a selector starting at the first agent
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpeakerSelector for RoundRobinSelector {
    async fn select_next(
        &self,
        _ctx: &RoundContext,
        agents: &[Arc<dyn ConversationAgent>],
        _messages: &[ChatMessage],
    ) -> ChorusResult<Arc<dyn ConversationAgent>> {
        if agents.is_empty() {
            return Err(ChorusError::NoAgents);
        }
        let turn = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::clone(&agents[turn % agents.len()]))
    }
}

/// Selection delegated to a completion capability
///
/// Without a capability the choice is `agents[messages.len() % agents.len()]`,
/// keyed by the log length rather than a counter. With a capability the first
/// agent is always returned; the selection prompt is built and logged but the
/// capability is not consulted.
#[derive(Default)]
pub struct DelegatedSelector {
    client: Option<Arc<dyn CompletionClient>>,
}

impl DelegatedSelector {
    /// Create a selector without a completion capability
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector backed by a completion capability
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Whether a completion capability is attached
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Prompt asking which agent should speak next
    pub fn selection_prompt(agents: &[Arc<dyn ConversationAgent>]) -> String {
        let mut prompt = String::from("Based on the conversation, select the next speaker:\n");
        for (i, agent) in agents.iter().enumerate() {
            prompt.push_str(&format!("{}. {}: {}\n", i + 1, agent.name(), agent.system_prompt()));
        }
        prompt
    }
}

impl std::fmt::Debug for DelegatedSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedSelector")
            .field("has_client", &self.has_client())
            .finish()
    }
}

#[async_trait]
impl SpeakerSelector for DelegatedSelector {
    async fn select_next(
        &self,
        _ctx: &RoundContext,
        agents: &[Arc<dyn ConversationAgent>],
        messages: &[ChatMessage],
    ) -> ChorusResult<Arc<dyn ConversationAgent>> {
        if agents.is_empty() {
            return Err(ChorusError::NoAgents);
        }

        if self.client.is_none() {
            return Ok(Arc::clone(&agents[messages.len() % agents.len()]));
        }

        let prompt = Self::selection_prompt(agents);
        debug!(candidates = agents.len(), prompt = %prompt, "built speaker selection prompt");
        Ok(Arc::clone(&agents[0]))
    }
}
