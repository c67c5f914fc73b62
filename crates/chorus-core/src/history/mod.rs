//! Branchable conversation history
//!
//! A [`HistoryTree`] keeps several divergent versions of one message sequence.
//! Every append creates a new immutable [`VersionedState`] holding the full
//! sequence; states are grouped into named [`Branch`]es, exactly one of which
//! is active at a time. Branches can be forked, switched, rolled back, merged,
//! labelled with snapshots and exported/imported as JSON.
//!
//! The tree is independent of any running conversation: callers decide which
//! messages to record into it.

mod tree;
mod types;


pub use tree::HistoryTree;
pub use types::{Branch, MAIN_BRANCH, TreeMessage, TreeToolCall, VersionedState};

use std::sync::Arc;

/// Thread-safe shared history tree
pub type SharedHistoryTree = Arc<HistoryTree>;

/// Create a shared history tree
pub fn create_history_tree(id: impl Into<String>) -> SharedHistoryTree {
    Arc::new(HistoryTree::new(id))
}
