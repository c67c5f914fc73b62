//! Tree storage abstraction and implementations

mod local;

pub use local::LocalTreeStorage;

use async_trait::async_trait;
use chorus_core::HistoryTree;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Tree not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid tree data: {0}")]
    InvalidData(String),

    #[error("Storage path not available")]
    PathUnavailable,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Overview of a stored tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Tree identifier
    pub id: String,
    /// Name of the active branch
    pub active_branch: String,
    /// Number of branches
    pub branch_count: usize,
    /// Messages on the active branch's tip
    pub message_count: usize,
    /// Last minted state number
    pub state_counter: u64,
}

impl TreeSummary {
    /// Summarize a tree
    pub async fn of(tree: &HistoryTree) -> Self {
        Self {
            id: tree.id().await,
            active_branch: tree.active_branch_name().await,
            branch_count: tree.branch_count().await,
            message_count: tree.messages().await.len(),
            state_counter: tree.state_counter().await,
        }
    }
}

/// Tree storage trait for different backends
#[async_trait]
pub trait TreeStorage: Send + Sync {
    /// Save a tree under its own id, replacing any previous copy
    async fn save(&self, tree: &HistoryTree) -> StorageResult<()>;

    /// Load a tree by ID
    async fn load(&self, id: &str) -> StorageResult<HistoryTree>;

    /// Delete a tree by ID
    async fn delete(&self, id: &str) -> StorageResult<()>;

    /// Summaries of every stored tree, sorted by id
    async fn list(&self) -> StorageResult<Vec<TreeSummary>>;

    /// Check if a tree exists
    async fn exists(&self, id: &str) -> StorageResult<bool>;
}
