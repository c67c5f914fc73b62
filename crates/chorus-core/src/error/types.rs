//! Core error type for Chorus

use thiserror::Error;

use crate::conversation::ConversationResult;

/// Result type alias for Chorus operations
pub type ChorusResult<T> = Result<T, ChorusError>;

/// Main error type for Chorus
#[derive(Error, Debug, Clone)]
pub enum ChorusError {
    /// A speaker was requested from an empty agent list
    #[error("no agents available")]
    NoAgents,

    /// The tree has no active branch
    #[error("no active branch")]
    NoActiveBranch,

    /// A fork target name is already taken
    #[error("branch {name} already exists")]
    BranchExists { name: String },

    /// Unknown branch name
    #[error("branch {name} not found")]
    BranchNotFound { name: String },

    /// Rollback target is not part of the active branch
    #[error("state {state_id} not found in branch {branch}")]
    StateNotFound { state_id: String, branch: String },

    /// Rollback count leaves no state behind
    #[error("cannot rollback {requested} states, only {available} available")]
    RollbackOutOfRange { requested: usize, available: usize },

    /// Attempt to delete `main` or the active branch
    #[error("cannot delete {reason} branch {name}")]
    ProtectedBranch { name: String, reason: String },

    /// No state in any branch carries the label
    #[error("snapshot {label} not found")]
    SnapshotNotFound { label: String },

    /// Malformed serialized tree
    #[error("import failed: {message}")]
    Import { message: String },

    /// An agent collaborator failed to reply
    #[error("agent {agent_id} failed: {message}")]
    Agent { agent_id: String, message: String },

    /// The delegated completion capability failed
    #[error("completion failed: {message}")]
    Completion { message: String },

    /// Configuration related errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json { message: String },

    /// The conversation deadline expired; the partial result is preserved
    #[error("conversation timed out after {timeout_secs} seconds")]
    DeadlineExceeded {
        timeout_secs: u64,
        result: Box<ConversationResult>,
    },

    /// The caller cancelled the conversation; the partial result is preserved
    #[error("conversation cancelled")]
    Cancelled { result: Box<ConversationResult> },
}
