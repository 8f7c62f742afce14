//! In-memory TTL cache for resolved payloads.
//!
//! Keys concatenate the operation name, symbol, and every call parameter in
//! a stable order, so distinct argument sets can never collide. Entries are
//! evicted lazily: an expired entry found during lookup is removed and the
//! lookup reports a miss. There is no size bound; entries accumulate until
//! expiry or an explicit [`DataCache::clear`].

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::{BarSeries, RealtimeQuote};

/// Typed payloads the façade memoizes.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    Realtime(RealtimeQuote),
    History(BarSeries),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: CachedPayload,
    expires_at: Instant,
}

/// Mutex-guarded TTL map shared by all façade callers.
///
/// The lock is held only for the duration of a map read/write, never across
/// a network call, so concurrent callers may race to fill the same key; the
/// last writer wins, which is fine for idempotent market-data reads.
#[derive(Debug)]
pub struct DataCache {
    map: Mutex<HashMap<String, CacheEntry>>,
    enabled: bool,
}

impl DataCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            enabled,
        }
    }

    /// Build a cache key from the operation name and its parameters.
    pub fn key(operation: &str, parts: &[&str]) -> String {
        let mut key = String::from(operation);
        for part in parts {
            key.push('|');
            key.push_str(part);
        }
        key
    }

    /// Fetch a live entry, evicting it first if it has expired.
    pub fn get(&self, key: &str) -> Option<CachedPayload> {
        if !self.enabled {
            return None;
        }

        let mut map = self.map.lock().unwrap();
        match map.get(key) {
            Some(entry) if Instant::now() <= entry.expires_at => Some(entry.payload.clone()),
            Some(_) => {
                map.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, payload: CachedPayload, ttl: Duration) {
        if !self.enabled {
            return;
        }

        let entry = CacheEntry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        self.map.lock().unwrap().insert(key, entry);
    }

    pub fn clear(&self) {
        self.map.lock().unwrap().clear();
    }

    /// Number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.map.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Period, ProviderId, Symbol, UtcDateTime};

    fn realtime_payload() -> CachedPayload {
        let quote = RealtimeQuote::new(
            Symbol::parse("000001").expect("valid symbol"),
            "平安银行",
            12.45,
            12.22,
            12.20,
            12.50,
            12.10,
            1_000,
            10_000.0,
            UtcDateTime::now(),
            ProviderId::Ashare,
        )
        .expect("valid quote");
        CachedPayload::Realtime(quote)
    }

    fn history_payload() -> CachedPayload {
        CachedPayload::History(BarSeries::new(
            Symbol::parse("000001").expect("valid symbol"),
            Period::Daily,
            Vec::new(),
        ))
    }

    #[test]
    fn key_is_order_stable() {
        assert_eq!(
            DataCache::key("history", &["000001", "2024-01-01", "2024-02-01", "daily"]),
            "history|000001|2024-01-01|2024-02-01|daily"
        );
        assert_ne!(
            DataCache::key("history", &["000001", "2024-01-01"]),
            DataCache::key("history", &["2024-01-01", "000001"])
        );
    }

    #[test]
    fn realtime_and_history_keys_do_not_collide() {
        assert_ne!(
            DataCache::key("realtime", &["000001"]),
            DataCache::key("history", &["000001"])
        );
    }

    #[test]
    fn put_then_get_round_trips() {
        let cache = DataCache::new(true);
        let payload = realtime_payload();
        cache.put(
            DataCache::key("realtime", &["000001"]),
            payload.clone(),
            Duration::from_secs(60),
        );

        let hit = cache.get(&DataCache::key("realtime", &["000001"]));
        assert_eq!(hit, Some(payload));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_evicted_on_lookup() {
        let cache = DataCache::new(true);
        cache.put(
            String::from("realtime|000001"),
            realtime_payload(),
            Duration::ZERO,
        );
        std::thread::sleep(Duration::from_millis(5));

        assert!(cache.get("realtime|000001").is_none());
        assert_eq!(cache.len(), 0, "expired entry must be removed");
    }

    #[test]
    fn disabled_cache_never_stores() {
        let cache = DataCache::new(false);
        cache.put(
            String::from("realtime|000001"),
            history_payload(),
            Duration::from_secs(60),
        );

        assert!(cache.get("realtime|000001").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_map() {
        let cache = DataCache::new(true);
        cache.put(
            String::from("realtime|000001"),
            realtime_payload(),
            Duration::from_secs(60),
        );
        cache.put(
            String::from("realtime|600000"),
            realtime_payload(),
            Duration::from_secs(60),
        );

        cache.clear();
        assert!(cache.is_empty());
    }
}
