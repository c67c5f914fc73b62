//! Branch creation, navigation, truncation and merge operations

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use super::super::types::{Branch, MAIN_BRANCH, TreeMessage, VersionedState};
use super::core::HistoryTree;
use crate::error::{ChorusError, ChorusResult};

impl HistoryTree {
    /// Append a message to the active branch
    ///
    /// Returns the new state, or `None` when the tree has no active branch.
    pub async fn append(&self, message: TreeMessage) -> Option<VersionedState> {
        let mut data = self.inner.write().await;
        let active = data.active_branch.clone();
        let state = data.append_to(&active, message, None, HashMap::new())?;

        debug!(
            branch = %active,
            state_id = %state.id,
            messages = state.messages.len(),
            "appended state"
        );
        Some(state)
    }

    /// Fork a new, inactive branch from the active branch's tip
    ///
    /// The fork's first state copies the tip's messages under a fresh id. The
    /// active branch is left unchanged.
    pub async fn fork(&self, name: &str) -> ChorusResult<Branch> {
        let mut data = self.inner.write().await;

        if data.branches.contains_key(name) {
            return Err(ChorusError::branch_exists(name));
        }

        let source = data.active_branch.clone();
        let (tip_id, tip_messages) = {
            let tip = data
                .active()
                .and_then(Branch::tip)
                .ok_or(ChorusError::NoActiveBranch)?;
            (tip.id.clone(), tip.messages.clone())
        };

        let fork_state = VersionedState {
            id: data.mint_state_id(),
            parent_id: Some(tip_id.clone()),
            messages: tip_messages,
            metadata: HashMap::new(),
            created_at: Utc::now(),
            label: Some(format!("fork from {}", source)),
        };

        let branch = Branch::new(name, fork_state, false)
            .with_description(format!("Forked from {} at state {}", source, tip_id));
        data.branches.insert(name.to_string(), branch.clone());

        info!(branch = %name, source = %source, state_id = %tip_id, "forked branch");
        Ok(branch)
    }

    /// Make `name` the active branch
    pub async fn switch_branch(&self, name: &str) -> ChorusResult<()> {
        let mut data = self.inner.write().await;

        if !data.branches.contains_key(name) {
            return Err(ChorusError::branch_not_found(name));
        }

        data.activate(name);
        info!(branch = %name, "switched branch");
        Ok(())
    }

    /// Truncate the active branch so that `state_id` is its newest state
    ///
    /// Only the active branch is searched.
    pub async fn rollback(&self, state_id: &str) -> ChorusResult<()> {
        let mut data = self.inner.write().await;
        let active = data.active_branch.clone();
        let branch = data.active_mut().ok_or(ChorusError::NoActiveBranch)?;

        let index = branch
            .position_of(state_id)
            .ok_or_else(|| ChorusError::state_not_found(state_id, active.as_str()))?;
        branch.truncate_to(index + 1);

        debug!(branch = %active, state_id = %state_id, "rolled back");
        Ok(())
    }

    /// Drop the newest `n` states of the active branch
    ///
    /// At least one state always remains, so `n` must be below the branch length.
    pub async fn rollback_n(&self, n: usize) -> ChorusResult<()> {
        let mut data = self.inner.write().await;
        let branch = data.active_mut().ok_or(ChorusError::NoActiveBranch)?;

        let len = branch.len();
        if n >= len {
            return Err(ChorusError::RollbackOutOfRange {
                requested: n,
                available: len.saturating_sub(1),
            });
        }
        branch.truncate_to(len - n);
        Ok(())
    }

    /// Remove a branch; `main` and the active branch are protected
    pub async fn delete_branch(&self, name: &str) -> ChorusResult<()> {
        let mut data = self.inner.write().await;

        if name == MAIN_BRANCH {
            return Err(ChorusError::protected_branch(name, "main"));
        }
        if name == data.active_branch {
            return Err(ChorusError::protected_branch(name, "active"));
        }
        if data.branches.remove(name).is_none() {
            return Err(ChorusError::branch_not_found(name));
        }

        info!(branch = %name, "deleted branch");
        Ok(())
    }

    /// Merge `source` into the active branch by message count
    ///
    /// Every message of the source tip beyond the target tip's length is
    /// appended to the target as its own state. The source is assumed to
    /// extend the target: no common ancestor or conflict check is made, so
    /// diverged branches merge their tail positionally. A source that is not
    /// longer than the target is a no-op.
    pub async fn merge_branch(&self, source: &str) -> ChorusResult<()> {
        let mut data = self.inner.write().await;

        let source_messages = data
            .branches
            .get(source)
            .and_then(Branch::tip)
            .map(|tip| tip.messages.clone())
            .ok_or_else(|| ChorusError::branch_not_found(source))?;

        let target = data.active_branch.clone();
        let target_len = data
            .active()
            .and_then(Branch::tip)
            .map(VersionedState::message_count)
            .ok_or(ChorusError::NoActiveBranch)?;

        if source_messages.len() <= target_len {
            debug!(source = %source, target = %target, "nothing to merge");
            return Ok(());
        }

        let label = format!("merged from {}", source);
        let merged = source_messages.len() - target_len;
        for message in source_messages.into_iter().skip(target_len) {
            let metadata = HashMap::from([(
                "merged_from".to_string(),
                Value::String(source.to_string()),
            )]);
            data.append_to(&target, message, Some(label.clone()), metadata);
        }

        info!(source = %source, target = %target, merged, "merged branch");
        Ok(())
    }
}
