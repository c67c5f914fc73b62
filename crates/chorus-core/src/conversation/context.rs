//! Per-conversation cancellation and deadline context

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Context handed to selectors, agents and completion clients
///
/// Carries the conversation's cancellation token and deadline. The loop polls
/// it once per round; collaborators doing slow work should watch it too, since
/// nothing preempts them.
#[derive(Debug, Clone)]
pub struct RoundContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl RoundContext {
    /// Create a context without a deadline
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set a deadline `timeout` from now
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    /// Cancellation token for this context
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether the token was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether work under this context should stop
    pub fn is_done(&self) -> bool {
        self.is_cancelled() || self.is_expired()
    }
}
