//! Read-only views of the tree

use super::super::types::{Branch, TreeMessage, VersionedState};
use super::core::HistoryTree;

impl HistoryTree {
    /// Tree identifier
    pub async fn id(&self) -> String {
        self.inner.read().await.id.clone()
    }

    /// The root state the tree was created with
    pub async fn root_state(&self) -> VersionedState {
        self.inner.read().await.root_state.clone()
    }

    /// Newest state of the active branch
    pub async fn current(&self) -> Option<VersionedState> {
        let data = self.inner.read().await;
        data.active().and_then(Branch::tip).cloned()
    }

    /// Messages of the active branch's newest state
    pub async fn messages(&self) -> Vec<TreeMessage> {
        self.current()
            .await
            .map(|state| state.messages)
            .unwrap_or_default()
    }

    /// All states of the active branch, oldest first
    pub async fn history(&self) -> Vec<VersionedState> {
        let data = self.inner.read().await;
        data.active()
            .map(|branch| branch.states.clone())
            .unwrap_or_default()
    }

    /// Names of all branches, in no particular order
    pub async fn list_branches(&self) -> Vec<String> {
        self.inner.read().await.branches.keys().cloned().collect()
    }

    /// Get a branch by name
    pub async fn get_branch(&self, name: &str) -> Option<Branch> {
        self.inner.read().await.branches.get(name).cloned()
    }

    /// Name of the active branch
    pub async fn active_branch_name(&self) -> String {
        self.inner.read().await.active_branch.clone()
    }

    /// Get branch count
    pub async fn branch_count(&self) -> usize {
        self.inner.read().await.branches.len()
    }

    /// Last minted state number
    pub async fn state_counter(&self) -> u64 {
        self.inner.read().await.state_counter
    }
}
