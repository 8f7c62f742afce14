//! Usage counters accumulated as a side effect of every façade call.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::ProviderId;

#[derive(Debug, Default)]
struct StatsInner {
    requests: u64,
    cache_hits: u64,
    errors: u64,
    source_usage: BTreeMap<ProviderId, u64>,
}

/// Process-lifetime counters owned by the façade.
///
/// Counters only grow; `reset` is the single explicit way back to zero.
/// Guarded by one mutex held only for the counter update itself.
#[derive(Debug, Default)]
pub struct UsageStats {
    inner: Mutex<StatsInner>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one resolution attempt that reached the adapter loop.
    /// Cache hits are counted separately and do not count as requests.
    pub fn record_request(&self) {
        self.inner.lock().unwrap().requests += 1;
    }

    pub fn record_cache_hit(&self) {
        self.inner.lock().unwrap().cache_hits += 1;
    }

    pub fn record_error(&self) {
        self.inner.lock().unwrap().errors += 1;
    }

    pub fn record_source_success(&self, source: ProviderId) {
        let mut inner = self.inner.lock().unwrap();
        *inner.source_usage.entry(source).or_insert(0) += 1;
    }

    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = StatsInner::default();
    }

    pub fn snapshot(&self, cache_size: usize) -> StatsSnapshot {
        let inner = self.inner.lock().unwrap();
        StatsSnapshot {
            requests: inner.requests,
            cache_hits: inner.cache_hits,
            errors: inner.errors,
            source_usage: inner.source_usage.clone(),
            cache_size,
            cache_hit_rate: inner.cache_hits as f64 / inner.requests.max(1) as f64,
        }
    }
}

/// Point-in-time copy of the counters plus derived figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub cache_hits: u64,
    pub errors: u64,
    pub source_usage: BTreeMap<ProviderId, u64>,
    pub cache_size: usize,
    /// Fraction in `[0, 1]`: `cache_hits / max(requests, 1)`.
    pub cache_hit_rate: f64,
}

impl StatsSnapshot {
    pub fn usage_of(&self, source: ProviderId) -> u64 {
        self.source_usage.get(&source).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = UsageStats::new();
        stats.record_request();
        stats.record_request();
        stats.record_cache_hit();
        stats.record_error();
        stats.record_source_success(ProviderId::Ashare);
        stats.record_source_success(ProviderId::Ashare);
        stats.record_source_success(ProviderId::Abu);

        let snapshot = stats.snapshot(3);
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.errors, 1);
        assert_eq!(snapshot.usage_of(ProviderId::Ashare), 2);
        assert_eq!(snapshot.usage_of(ProviderId::Abu), 1);
        assert_eq!(snapshot.cache_size, 3);
        assert_eq!(snapshot.cache_hit_rate, 0.5);
    }

    #[test]
    fn hit_rate_is_zero_before_any_request() {
        let stats = UsageStats::new();
        let snapshot = stats.snapshot(0);
        assert_eq!(snapshot.cache_hit_rate, 0.0);
    }

    #[test]
    fn reset_zeroes_everything() {
        let stats = UsageStats::new();
        stats.record_request();
        stats.record_source_success(ProviderId::Abu);
        stats.reset();

        let snapshot = stats.snapshot(0);
        assert_eq!(snapshot.requests, 0);
        assert_eq!(snapshot.usage_of(ProviderId::Abu), 0);
    }
}
