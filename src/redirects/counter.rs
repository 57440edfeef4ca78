//! Process-wide tally of successful redirects.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

/// Counts successful redirect responses per `(from) → (to)` pair.
///
/// Observability only, never on a routing decision path. Monotonic for the
/// process lifetime, reset only by restart; never persisted.
#[derive(Clone, Default)]
pub struct RedirectCounter {
    inner: Arc<DashMap<String, u64>>,
}

impl RedirectCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tally key for one redirect pair.
    pub fn key(from_path: &str, to_url: &str) -> String {
        format!("({from_path}) → ({to_url})")
    }

    /// Record one successful redirect. Safe under concurrent calls for the
    /// same key; increments are never lost.
    pub fn increment(&self, key: String) {
        *self.inner.entry(key).or_insert(0) += 1;
    }

    /// Sorted copy for reporting.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.inner
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
