use lru::LruCache;
use std::env;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

const DEFAULT_CACHE_CAPACITY: usize = 1024;
const DEFAULT_TTL_SECS: u64 = 5;
const DEFAULT_SWEEP_SECS: u64 = 10;
const TTL_ENV: &str = "TOKENVAULT_CACHE_TTL_SECS";

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(DEFAULT_TTL_SECS);
/// Default interval for the background eviction sweep.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(DEFAULT_SWEEP_SECS);

#[derive(Clone, Debug)]
struct CacheValue {
    value: String,
    expires_at: Instant,
}

/// In-memory TTL cache for token/sde mappings.
///
/// Entries are independent key/value strings; writing both mapping
/// directions together is the vault core's discipline, not the cache's.
/// An expired entry is indistinguishable from one never set.
pub struct TokenCache {
    ttl: Duration,
    inner: LruCache<String, CacheValue>,
}

impl TokenCache {
    /// Construct a cache with the provided capacity and TTL.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let size = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            ttl,
            inner: LruCache::new(size),
        }
    }

    /// Construct a cache using environment-driven defaults.
    pub fn from_env() -> Self {
        let ttl = env::var(TTL_ENV)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL);
        Self::new(DEFAULT_CACHE_CAPACITY, ttl)
    }

    /// Entry lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fetch a value if present and not expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_with_now(key, Instant::now())
    }

    /// Insert or overwrite an entry, restarting its lifetime.
    pub fn insert(&mut self, key: String, value: String) {
        self.insert_with_now(key, value, Instant::now());
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Evict entries that have outlived their TTL.
    pub fn sweep(&mut self) {
        self.purge_expired(Instant::now());
    }

    #[cfg(test)]
    pub(crate) fn get_at(&mut self, key: &str, now: Instant) -> Option<String> {
        self.get_with_now(key, now)
    }

    #[cfg(test)]
    pub(crate) fn insert_at(&mut self, key: String, value: String, now: Instant) {
        self.insert_with_now(key, value, now);
    }

    fn insert_with_now(&mut self, key: String, value: String, now: Instant) {
        let entry = CacheValue {
            value,
            expires_at: now + self.ttl,
        };
        self.inner.put(key, entry);
    }

    fn get_with_now(&mut self, key: &str, now: Instant) -> Option<String> {
        self.purge_expired(now);
        self.inner.get(key).map(|entry| entry.value.clone())
    }

    fn purge_expired(&mut self, now: Instant) {
        let expired: Vec<String> = self
            .inner
            .iter()
            .filter_map(|(key, entry)| {
                if entry.expires_at <= now {
                    Some(key.clone())
                } else {
                    None
                }
            })
            .collect();

        for key in expired {
            self.inner.pop(&key);
        }
    }
}
