//! Constructor methods for ChorusError

use super::types::ChorusError;

impl ChorusError {
    /// Create a branch-already-exists error
    pub fn branch_exists(name: impl Into<String>) -> Self {
        Self::BranchExists { name: name.into() }
    }

    /// Create a branch-not-found error
    pub fn branch_not_found(name: impl Into<String>) -> Self {
        Self::BranchNotFound { name: name.into() }
    }

    /// Create a state-not-found error scoped to a branch
    pub fn state_not_found(state_id: impl Into<String>, branch: impl Into<String>) -> Self {
        Self::StateNotFound {
            state_id: state_id.into(),
            branch: branch.into(),
        }
    }

    /// Create a protected-branch error
    pub fn protected_branch(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProtectedBranch {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a snapshot-not-found error
    pub fn snapshot_not_found(label: impl Into<String>) -> Self {
        Self::SnapshotNotFound {
            label: label.into(),
        }
    }

    /// Create an import error
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import {
            message: message.into(),
        }
    }

    /// Create an agent error
    pub fn agent(agent_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Agent {
            agent_id: agent_id.into(),
            message: message.into(),
        }
    }

    /// Create a completion error
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
        }
    }
}
