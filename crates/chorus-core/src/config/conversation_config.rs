//! Conversation loop limits and termination words

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::timeouts;
use crate::error::{ChorusError, ChorusResult};

/// Configuration for a single conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Maximum number of accepted replies
    pub max_rounds: usize,
    /// Maximum length of the message log, initial message included
    pub max_messages: usize,
    /// Deadline for the whole `start` call
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Whether collaborators may interrupt the conversation
    pub allow_interrupts: bool,
    /// Reply contents that end the conversation (exact, case-sensitive match)
    pub termination_words: Vec<String>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            max_messages: 50,
            timeout: timeouts::conversation::default_timeout(),
            allow_interrupts: true,
            termination_words: vec!["TERMINATE".into(), "DONE".into(), "EXIT".into()],
        }
    }
}

impl ConversationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum rounds
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set maximum messages
    pub fn with_max_messages(mut self, max_messages: usize) -> Self {
        self.max_messages = max_messages;
        self
    }

    /// Set the conversation deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the termination words
    pub fn with_termination_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.termination_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `content` is exactly one of the termination words
    pub fn is_termination_word(&self, content: &str) -> bool {
        self.termination_words.iter().any(|word| word == content)
    }

    /// Reject configurations that can never make progress
    pub fn validate(&self) -> ChorusResult<()> {
        if self.timeout.is_zero() {
            return Err(ChorusError::config("conversation timeout must be non-zero"));
        }
        Ok(())
    }
}
