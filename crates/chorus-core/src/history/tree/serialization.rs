//! Tree export and import

use tracing::info;

use super::super::types::MAIN_BRANCH;
use super::core::{HistoryTree, TreeData};
use crate::error::{ChorusError, ChorusResult};

impl HistoryTree {
    /// Serialize the whole tree to JSON bytes
    ///
    /// Includes every branch and state, the active branch name and the state
    /// counter.
    pub async fn export(&self) -> ChorusResult<Vec<u8>> {
        let data = self.inner.read().await;
        Ok(serde_json::to_vec(&*data)?)
    }

    /// Rebuild a tree from bytes produced by [`HistoryTree::export`]
    pub fn import(bytes: &[u8]) -> ChorusResult<Self> {
        let data: TreeData = serde_json::from_slice(bytes)
            .map_err(|e| ChorusError::import(format!("failed to parse tree: {}", e)))?;
        validate(&data)?;

        info!(tree = %data.id, branches = data.branches.len(), "imported history tree");
        Ok(Self::from_data(data))
    }
}

fn validate(data: &TreeData) -> ChorusResult<()> {
    if !data.branches.contains_key(MAIN_BRANCH) {
        return Err(ChorusError::import("missing main branch"));
    }

    if !data.branches.contains_key(&data.active_branch) {
        return Err(ChorusError::import(format!(
            "active branch {} does not exist",
            data.active_branch
        )));
    }

    for (name, branch) in &data.branches {
        if branch.name != *name {
            return Err(ChorusError::import(format!(
                "branch stored under {} is named {}",
                name, branch.name
            )));
        }
        if branch.is_empty() {
            return Err(ChorusError::import(format!("branch {} has no states", name)));
        }
        if branch.is_active != (*name == data.active_branch) {
            return Err(ChorusError::import(format!(
                "branch {} active flag disagrees with active branch {}",
                name, data.active_branch
            )));
        }
    }

    let highest = std::iter::once(&data.root_state)
        .chain(data.branches.values().flat_map(|b| b.states.iter()))
        .filter_map(|state| state_number(&state.id))
        .max()
        .unwrap_or(0);
    if data.state_counter < highest {
        return Err(ChorusError::import(format!(
            "state counter {} is below highest state id state_{}",
            data.state_counter, highest
        )));
    }

    Ok(())
}

fn state_number(id: &str) -> Option<u64> {
    id.strip_prefix("state_")?.parse().ok()
}
