//! Labelled snapshots: create, find and restore

use chrono::Utc;
use serde_json::Value;
use tracing::info;

use super::super::types::VersionedState;
use super::core::HistoryTree;
use crate::error::{ChorusError, ChorusResult};

impl HistoryTree {
    /// Label the active branch's newest state
    ///
    /// Labels need not be unique. Returns `None` when there is no active
    /// branch or it has no states.
    pub async fn snapshot(&self, label: &str) -> Option<VersionedState> {
        let mut data = self.inner.write().await;
        let state = data.active_mut()?.states.last_mut()?;

        state.label = Some(label.to_string());
        state
            .metadata
            .insert("snapshot".to_string(), Value::Bool(true));
        state.metadata.insert(
            "snapshot_time".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        Some(state.clone())
    }

    /// First state carrying `label`, scanning every branch
    ///
    /// Branches are scanned in map order, so with a label repeated across
    /// branches any one of the matching states may be returned.
    pub async fn find_snapshot(&self, label: &str) -> Option<VersionedState> {
        let data = self.inner.read().await;
        data.branches
            .values()
            .flat_map(|branch| branch.states.iter())
            .find(|state| state.label.as_deref() == Some(label))
            .cloned()
    }

    /// Switch to the branch owning the labelled state and truncate it there
    pub async fn restore_snapshot(&self, label: &str) -> ChorusResult<VersionedState> {
        let mut data = self.inner.write().await;

        let (branch_name, index) = data
            .branches
            .iter()
            .find_map(|(name, branch)| {
                branch
                    .states
                    .iter()
                    .position(|state| state.label.as_deref() == Some(label))
                    .map(|index| (name.clone(), index))
            })
            .ok_or_else(|| ChorusError::snapshot_not_found(label))?;

        data.activate(&branch_name);
        let branch = data
            .active_mut()
            .ok_or_else(|| ChorusError::branch_not_found(branch_name.as_str()))?;
        branch.truncate_to(index + 1);
        let restored = branch.states[index].clone();

        info!(label = %label, branch = %branch_name, state_id = %restored.id, "restored snapshot");
        Ok(restored)
    }
}
