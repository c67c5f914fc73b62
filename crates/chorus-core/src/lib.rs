//! Chorus Core Library
//!
//! This crate provides the core functionality for Chorus: multi-agent
//! conversations with pluggable speaker selection, a registry of live
//! sessions, and a branchable, versioned history tree.

pub mod config;
pub mod conversation;
pub mod error;
pub mod history;
pub mod ids;
pub mod types;

// Re-export commonly used types
pub use config::{ChorusConfig, ConversationConfig, LoggingConfig};
pub use conversation::{
    ChatMessage, CompletionClient, Conversation, ConversationAgent, ConversationMode,
    ConversationResult, DelegatedSelector, RoundContext, RoundRobinSelector, SessionRegistry,
    SpeakerSelector, TerminationReason,
};
pub use error::{ChorusError, ChorusResult};
pub use history::{
    Branch, HistoryTree, MAIN_BRANCH, SharedHistoryTree, TreeMessage, TreeToolCall,
    VersionedState, create_history_tree,
};
pub use ids::{IdGenerator, SequentialIdGenerator, SharedIdGenerator, UuidIdGenerator};
pub use types::MessageRole;
