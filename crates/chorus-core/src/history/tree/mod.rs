//! History tree module

mod core;
mod operations;
mod query;
mod serialization;
mod snapshot;

pub use self::core::HistoryTree;
