//! History tree persistence for Chorus
//!
//! Exported [`HistoryTree`](chorus_core::HistoryTree)s are stored through the
//! [`TreeStorage`] trait; [`LocalTreeStorage`] keeps one JSON file per tree.

pub mod storage;

pub use storage::{LocalTreeStorage, StorageError, StorageResult, TreeStorage, TreeSummary};
