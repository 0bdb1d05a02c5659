//! Designer id generation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of designer metadata ids (`$designer.id`, card template suffixes).
pub trait IdGenerator: Send + Sync {
    fn next(&self) -> String;
}

/// Deterministic ids counting up from a seed. Used by tests and dry runs.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next(&self) -> String {
        self.counter.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
