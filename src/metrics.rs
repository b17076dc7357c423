//! Per-[`crate::group::Group`] hit/miss/load counters.
//!
//! `GroupMetrics` tracks the outcome of every [`crate::group::Group::get`]
//! call: whether it hit the local cache, hit a remote peer, fell through to
//! the backend getter, or failed. Counters are independent atomics rather
//! than a single lock, so recording a metric never contends with the cache
//! or single-flight table.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss/load counters for one [`crate::group::Group`].
#[derive(Debug, Default)]
pub struct GroupMetrics {
    cache_hits: AtomicU64,
    peer_hits: AtomicU64,
    peer_failures: AtomicU64,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl GroupMetrics {
    /// Creates a zeroed counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_peer_hit(&self) {
        self.peer_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_peer_failure(&self) {
        self.peer_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_load_error(&self) {
        self.load_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns all counters as a deterministically ordered map, suitable
    /// for exporting to a metrics backend.
    #[must_use]
    pub fn to_btreemap(&self) -> BTreeMap<String, u64> {
        BTreeMap::from([
            ("cache_hits".to_string(), self.cache_hits.load(Ordering::Relaxed)),
            ("peer_hits".to_string(), self.peer_hits.load(Ordering::Relaxed)),
            (
                "peer_failures".to_string(),
                self.peer_failures.load(Ordering::Relaxed),
            ),
            ("loads".to_string(), self.loads.load(Ordering::Relaxed)),
            (
                "load_errors".to_string(),
                self.load_errors.load(Ordering::Relaxed),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let metrics = GroupMetrics::new();
        assert_eq!(metrics.to_btreemap()["cache_hits"], 0);
    }

    #[test]
    fn records_increment_independently() {
        let metrics = GroupMetrics::new();
        metrics.record_cache_hit();
        metrics.record_cache_hit();
        metrics.record_peer_hit();
        metrics.record_load_error();

        let snapshot = metrics.to_btreemap();
        assert_eq!(snapshot["cache_hits"], 2);
        assert_eq!(snapshot["peer_hits"], 1);
        assert_eq!(snapshot["load_errors"], 1);
        assert_eq!(snapshot["loads"], 0);
    }
}
