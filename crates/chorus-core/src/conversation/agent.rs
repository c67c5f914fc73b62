//! Collaborator traits the conversation drives
//!
//! The conversation never produces replies or completions itself. Agents and
//! completion backends (LLM clients, scripted doubles, remote workers) plug in
//! through these traits.

use async_trait::async_trait;

use super::context::RoundContext;
use super::message::ChatMessage;
use crate::error::ChorusResult;

/// A participant in a conversation
#[async_trait]
pub trait ConversationAgent: Send + Sync {
    /// Stable agent identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// System prompt describing the agent's role
    fn system_prompt(&self) -> &str;

    /// Produce a reply given the full message log
    ///
    /// `sender_id`, `id` and `timestamp` may be left empty; the conversation
    /// fills them in.
    async fn reply(&self, ctx: &RoundContext, messages: &[ChatMessage]) -> ChorusResult<ChatMessage>;

    /// Whether the agent wants the conversation to end, given the full log
    fn should_terminate(&self, _messages: &[ChatMessage]) -> bool {
        false
    }
}

/// Text completion capability used by the delegated speaker selector
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a prompt
    async fn complete(&self, ctx: &RoundContext, prompt: &str) -> ChorusResult<String>;
}
