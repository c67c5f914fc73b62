//! Chorus
//!
//! Multi-agent turn-taking over a shared message log, plus a versioned,
//! branchable history tree that can be forked, rolled back, merged,
//! snapshotted and persisted.
//!
//! ```ignore
//! use chorus::{Conversation, ConversationConfig, ConversationMode};
//! use tokio_util::sync::CancellationToken;
//!
//! let conversation = Conversation::new(ConversationMode::RoundRobin, agents, ConversationConfig::default());
//! let result = conversation.start(&CancellationToken::new(), "Plan the release").await?;
//! println!("{} after {} rounds", result.termination_reason, result.total_rounds);
//! ```

pub use chorus_core::*;

/// History tree persistence
pub mod storage {
    pub use chorus_session::*;
}
