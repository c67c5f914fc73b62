//! Centralized timeout configuration
//!
//! Default timeout values; all of them can be overridden via configuration.

use std::time::Duration;

/// Default timeout values for conversations
pub mod conversation {
    use super::*;

    /// Default deadline for one `start` call (10 minutes)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

    /// Get the default conversation deadline as Duration
    pub fn default_timeout() -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }
}
