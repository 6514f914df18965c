//! Expiring key/value store backed by a concurrent map.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// A single cached response body with its expiry instant.
///
/// Entries are written whole and overwritten whole, never mutated in place.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-memory expiring key/value store.
///
/// `get` treats a never-set key and an expired key identically: both are a
/// miss, and both require the caller to refetch upstream. Expired entries
/// encountered by `get` are removed opportunistically; the rest are purged by
/// [`TtlCache::sweep`].
#[derive(Debug, Default)]
pub struct TtlCache {
    entries: DashMap<String, CacheEntry>,
}

impl TtlCache {
    /// Create an empty store.
    pub fn new() -> Self {
        Self { entries: DashMap::new() }
    }

    /// Look up a value. Returns `None` for both absent and expired keys.
    pub fn get(&self, key: &str) -> Option<String> {
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(Utc::now()) {
                return Some(entry.value.clone());
            }
        }
        // The read guard is released above; removing here cannot deadlock.
        self.entries.remove(key);
        tracing::trace!(key, "cache entry expired on read");
        None
    }

    /// Store a value under `key` for `ttl`. Overwrites any previous entry.
    pub fn set(&self, key: impl Into<String>, value: String, ttl: Duration) {
        let entry = CacheEntry { value, expires_at: Utc::now() + ttl };
        self.entries.insert(key.into(), entry);
    }

    /// Purge every expired entry, returning how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    /// Number of physically present entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spawn a background task that sweeps expired entries forever.
    ///
    /// The task is best-effort: a late or skipped sweep only delays memory
    /// reclamation, it never affects the correctness of `get`.
    pub fn spawn_sweeper(self: Arc<Self>, period: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let store = self;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick of `interval` fires immediately; skip it so the
            // first sweep happens one full period after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let purged = store.sweep();
                if purged > 0 {
                    tracing::debug!(purged, remaining = store.len(), "swept expired cache entries");
                }
            }
        })
    }
}

/// Sweep period for a given entry TTL: slightly longer than the TTL itself,
/// so an entry is at most one sweep late in being reclaimed.
pub fn sweep_interval(ttl: Duration) -> std::time::Duration {
    let millis = ttl.num_milliseconds().max(1_000) as u64;
    std::time::Duration::from_millis(millis * 107 / 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let cache = TtlCache::new();
        assert_eq!(cache.get("absent"), None);
    }

    #[test]
    fn test_set_then_get() {
        let cache = TtlCache::new();
        cache.set("k", "body".to_string(), Duration::seconds(300));
        assert_eq!(cache.get("k"), Some("body".to_string()));
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = TtlCache::new();
        cache.set("k", "body".to_string(), Duration::zero());
        assert_eq!(cache.get("k"), None);
        // The expired entry was also physically removed by the read.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = TtlCache::new();
        cache.set("k", "old".to_string(), Duration::seconds(300));
        cache.set("k", "new".to_string(), Duration::seconds(300));
        assert_eq!(cache.get("k"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reset_after_expiry_revives_key() {
        let cache = TtlCache::new();
        cache.set("k", "old".to_string(), Duration::zero());
        assert_eq!(cache.get("k"), None);
        cache.set("k", "new".to_string(), Duration::seconds(300));
        assert_eq!(cache.get("k"), Some("new".to_string()));
    }

    #[test]
    fn test_sweep_purges_only_expired() {
        let cache = TtlCache::new();
        cache.set("live", "a".to_string(), Duration::seconds(300));
        cache.set("dead1", "b".to_string(), Duration::zero());
        cache.set("dead2", "c".to_string(), Duration::zero());
        assert_eq!(cache.len(), 3);

        let purged = cache.sweep();
        assert_eq!(purged, 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("live"), Some("a".to_string()));
    }

    #[test]
    fn test_sweep_on_empty_store() {
        let cache = TtlCache::new();
        assert_eq!(cache.sweep(), 0);
    }

    #[test]
    fn test_sweep_interval_is_slightly_longer_than_ttl() {
        let interval = sweep_interval(Duration::seconds(300));
        assert_eq!(interval, std::time::Duration::from_millis(321_000));
        assert!(interval > std::time::Duration::from_secs(300));
    }

    #[test]
    fn test_sweep_interval_floor() {
        // Sub-second TTLs still sweep on a sane period.
        let interval = sweep_interval(Duration::milliseconds(10));
        assert_eq!(interval, std::time::Duration::from_millis(1_070));
    }

    #[tokio::test]
    async fn test_sweeper_task_purges_in_background() {
        let cache = Arc::new(TtlCache::new());
        cache.set("dead", "x".to_string(), Duration::zero());

        let handle = Arc::clone(&cache).spawn_sweeper(std::time::Duration::from_millis(20));
        tokio::time::sleep(std::time::Duration::from_millis(80)).await;
        assert!(cache.is_empty());
        handle.abort();
    }
}
