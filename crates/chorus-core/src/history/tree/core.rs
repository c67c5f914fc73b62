//! Core HistoryTree struct and the unlocked tree data it guards

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::super::types::{Branch, MAIN_BRANCH, TreeMessage, VersionedState};

/// Serializable tree contents
///
/// Everything a tree owns lives here; the lock around it is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct TreeData {
    /// Tree identifier
    pub(super) id: String,
    /// The state every tree starts from
    pub(super) root_state: VersionedState,
    /// Branches by name
    pub(super) branches: HashMap<String, Branch>,
    /// Name of the single active branch
    pub(super) active_branch: String,
    /// Last minted state number; only ever increases
    pub(super) state_counter: u64,
}

impl TreeData {
    pub(super) fn new(id: String) -> Self {
        let root_state = VersionedState {
            id: "state_0".to_string(),
            parent_id: None,
            messages: Vec::new(),
            metadata: HashMap::new(),
            created_at: Utc::now(),
            label: Some("root".to_string()),
        };

        let main = Branch::new(MAIN_BRANCH, root_state.clone(), true);

        Self {
            id,
            root_state,
            branches: HashMap::from([(MAIN_BRANCH.to_string(), main)]),
            active_branch: MAIN_BRANCH.to_string(),
            state_counter: 0,
        }
    }

    pub(super) fn mint_state_id(&mut self) -> String {
        self.state_counter += 1;
        format!("state_{}", self.state_counter)
    }

    pub(super) fn active(&self) -> Option<&Branch> {
        self.branches.get(&self.active_branch)
    }

    pub(super) fn active_mut(&mut self) -> Option<&mut Branch> {
        self.branches.get_mut(&self.active_branch)
    }

    /// Append one message to `branch_name` as a new state derived from its tip
    pub(super) fn append_to(
        &mut self,
        branch_name: &str,
        message: TreeMessage,
        label: Option<String>,
        metadata: HashMap<String, Value>,
    ) -> Option<VersionedState> {
        let (parent_id, mut messages) = {
            let tip = self.branches.get(branch_name)?.tip()?;
            (tip.id.clone(), tip.messages.clone())
        };
        messages.push(message);

        let state = VersionedState {
            id: self.mint_state_id(),
            parent_id: Some(parent_id),
            messages,
            metadata,
            created_at: Utc::now(),
            label,
        };

        let branch = self.branches.get_mut(branch_name)?;
        branch.states.push(state.clone());
        branch.updated_at = state.created_at;

        Some(state)
    }

    /// Make `name` the active branch, clearing the previous flag
    pub(super) fn activate(&mut self, name: &str) {
        let previous = std::mem::replace(&mut self.active_branch, name.to_string());
        if let Some(branch) = self.branches.get_mut(&previous) {
            branch.is_active = false;
        }
        if let Some(branch) = self.branches.get_mut(name) {
            branch.is_active = true;
        }
    }
}

/// Versioned, branchable history of a message sequence
///
/// A single tree-wide lock guards the branch map, the active pointer and the
/// state counter; mutating operations hold it exclusively for their whole
/// duration, so operations on different branches still serialize.
#[derive(Debug)]
pub struct HistoryTree {
    pub(super) inner: RwLock<TreeData>,
}

impl HistoryTree {
    /// Create a tree with a `root` state on an active `main` branch
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(TreeData::new(id.into())),
        }
    }

    pub(super) fn from_data(data: TreeData) -> Self {
        Self {
            inner: RwLock::new(data),
        }
    }
}
