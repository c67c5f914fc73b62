//! Stable error codes for programmatic handling

use super::types::ChorusError;
use crate::conversation::ConversationResult;

impl ChorusError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoAgents => "CHORUS_NO_AGENTS",
            Self::NoActiveBranch => "CHORUS_NO_ACTIVE_BRANCH",
            Self::BranchExists { .. } => "CHORUS_BRANCH_EXISTS",
            Self::BranchNotFound { .. } => "CHORUS_BRANCH_NOT_FOUND",
            Self::StateNotFound { .. } => "CHORUS_STATE_NOT_FOUND",
            Self::RollbackOutOfRange { .. } => "CHORUS_ROLLBACK_OUT_OF_RANGE",
            Self::ProtectedBranch { .. } => "CHORUS_PROTECTED_BRANCH",
            Self::SnapshotNotFound { .. } => "CHORUS_SNAPSHOT_NOT_FOUND",
            Self::Import { .. } => "CHORUS_IMPORT",
            Self::Agent { .. } => "CHORUS_AGENT",
            Self::Completion { .. } => "CHORUS_COMPLETION",
            Self::Config { .. } => "CHORUS_CONFIG",
            Self::Io { .. } => "CHORUS_IO",
            Self::Json { .. } => "CHORUS_JSON",
            Self::DeadlineExceeded { .. } => "CHORUS_DEADLINE_EXCEEDED",
            Self::Cancelled { .. } => "CHORUS_CANCELLED",
        }
    }

    /// Partial conversation result carried by a deadline or cancellation error
    pub fn partial_result(&self) -> Option<&ConversationResult> {
        match self {
            Self::DeadlineExceeded { result, .. } | Self::Cancelled { result } => {
                Some(result.as_ref())
            }
            _ => None,
        }
    }
}
