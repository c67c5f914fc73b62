//! Identifier sources
//!
//! Conversations, messages and registry sessions draw their identifiers from an
//! injected [`IdGenerator`], so tests can pin exact ids and rapid calls never
//! collide.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of unique identifiers
pub trait IdGenerator: Send + Sync + std::fmt::Debug {
    /// Mint a new identifier with the given kind prefix (e.g. `msg`, `conv`)
    fn next_id(&self, prefix: &str) -> String;
}

/// Random UUID v4 identifiers: `<prefix>_<uuid>`
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, Uuid::new_v4())
    }
}

/// Deterministic identifiers: `<prefix>_1`, `<prefix>_2`, ...
///
/// A single counter is shared by every prefix, so ids stay unique across kinds.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Create a generator starting at 1
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}", prefix, n)
    }
}

/// Shared identifier source
pub type SharedIdGenerator = Arc<dyn IdGenerator>;

/// Default identifier source (random UUIDs)
pub fn default_id_generator() -> SharedIdGenerator {
    Arc::new(UuidIdGenerator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.next_id("msg"), "msg_1");
        assert_eq!(ids.next_id("conv"), "conv_2");
        assert_eq!(ids.next_id("msg"), "msg_3");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidIdGenerator;
        let a = ids.next_id("msg");
        let b = ids.next_id("msg");
        assert!(a.starts_with("msg_"));
        assert_ne!(a, b);
    }
}
