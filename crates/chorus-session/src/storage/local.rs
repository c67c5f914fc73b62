//! Local filesystem tree storage
//!
//! Stores each exported tree as a JSON file in the user's home directory.

use super::{StorageError, StorageResult, TreeStorage, TreeSummary};
use async_trait::async_trait;
use chorus_core::HistoryTree;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Local filesystem tree storage
///
/// Trees are stored as `<id>.json` in:
/// - `~/.chorus/trees/` (default)
/// - Custom path if specified
#[derive(Debug, Clone)]
pub struct LocalTreeStorage {
    base_path: PathBuf,
}

impl LocalTreeStorage {
    /// Create storage with default path (~/.chorus/trees)
    pub fn new() -> StorageResult<Self> {
        let base_path = dirs::home_dir()
            .ok_or(StorageError::PathUnavailable)?
            .join(".chorus")
            .join("trees");

        Ok(Self { base_path })
    }

    /// Create storage with custom base path
    pub fn with_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Base directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn tree_path(&self, id: &str) -> StorageResult<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(StorageError::InvalidData(format!("invalid tree id: {:?}", id)));
        }
        Ok(self.base_path.join(format!("{}.json", id)))
    }

    async fn read_tree(path: &Path) -> StorageResult<HistoryTree> {
        let bytes = fs::read(path).await?;
        // Malformed JSON is a serialization error; well-formed but invalid trees are not
        serde_json::from_slice::<serde::de::IgnoredAny>(&bytes)?;
        HistoryTree::import(&bytes).map_err(|e| StorageError::InvalidData(e.to_string()))
    }
}

#[async_trait]
impl TreeStorage for LocalTreeStorage {
    async fn save(&self, tree: &HistoryTree) -> StorageResult<()> {
        self.ensure_dir().await?;

        let id = tree.id().await;
        let path = self.tree_path(&id)?;
        let bytes = tree
            .export()
            .await
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        fs::write(&path, bytes).await?;
        debug!(tree = %id, path = %path.display(), "saved tree");

        Ok(())
    }

    async fn load(&self, id: &str) -> StorageResult<HistoryTree> {
        let path = self.tree_path(id)?;

        if !fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let tree = Self::read_tree(&path).await?;
        debug!(tree = %id, path = %path.display(), "loaded tree");
        Ok(tree)
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.tree_path(id)?;

        if !fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(id.to_string()));
        }

        fs::remove_file(&path).await?;
        debug!(tree = %id, path = %path.display(), "deleted tree");

        Ok(())
    }

    async fn list(&self) -> StorageResult<Vec<TreeSummary>> {
        self.ensure_dir().await?;

        let mut entries = fs::read_dir(&self.base_path).await?;
        let mut trees = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match Self::read_tree(&path).await {
                Ok(tree) => trees.push(TreeSummary::of(&tree).await),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable tree file");
                }
            }
        }

        trees.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(trees)
    }

    async fn exists(&self, id: &str) -> StorageResult<bool> {
        let path = self.tree_path(id)?;
        Ok(fs::try_exists(&path).await?)
    }
}
