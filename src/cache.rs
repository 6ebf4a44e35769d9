//! Bounded, TTL-based in-memory cache for idempotent SIFEN queries.
//!
//! One reader/writer lock guards both the entry map and the statistics
//! block. A background task sweeps expired entries at a fixed interval; on
//! shutdown the sweeper stops and no further inserts are accepted.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::Notify;
use tracing::debug;

use crate::response::{DocumentQueryResponse, RucQueryResponse};

/// Cache tuning knobs.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL used when no sub-cache specific TTL applies.
    pub default_ttl: Duration,
    /// TTL for RUC consultations; RUC data changes rarely.
    pub ruc_ttl: Duration,
    /// TTL for document queries; a DE can still change state.
    pub de_ttl: Duration,
    /// Maximum entry count per sub-cache, 0 = unbounded.
    pub max_size: usize,
    pub enable_auto_cleanup: bool,
    pub cleanup_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            default_ttl: Duration::from_secs(5 * 60),
            ruc_ttl: Duration::from_secs(30 * 60),
            de_ttl: Duration::from_secs(10 * 60),
            max_size: 1000,
            enable_auto_cleanup: true,
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

/// Counters exposed by [`Cache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
}

struct Entry<V> {
    value: V,
    expiration: Instant,
    hit_count: u64,
}

struct State<V> {
    entries: HashMap<String, Entry<V>>,
    stats: CacheStats,
}

struct Shared<V> {
    state: RwLock<State<V>>,
    closed: AtomicBool,
    shutdown: Notify,
}

/// Generic keyed cache with TTL, bounded size and eldest-expiry eviction.
pub struct Cache<V> {
    shared: Arc<Shared<V>>,
    config: CacheConfig,
}

impl<V: Clone + Send + Sync + 'static> Cache<V> {
    /// Create the cache and, when configured and a tokio runtime is
    /// available, spawn its background sweeper.
    pub fn new(config: CacheConfig) -> Cache<V> {
        let shared = Arc::new(Shared {
            state: RwLock::new(State {
                entries: HashMap::new(),
                stats: CacheStats::default(),
            }),
            closed: AtomicBool::new(false),
            shutdown: Notify::new(),
        });

        if config.enable_auto_cleanup
            && config.cleanup_interval > Duration::ZERO
            && tokio::runtime::Handle::try_current().is_ok()
        {
            let sweeper = Arc::clone(&shared);
            let interval = config.cleanup_interval;
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(interval) => sweep(&sweeper),
                        _ = sweeper.shutdown.notified() => break,
                    }
                }
            });
        }

        Cache { shared, config }
    }

    /// Insert a value with its own TTL. Once at capacity the entry with the
    /// earliest expiration is evicted first. No-op after [`Cache::close`].
    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        if self.shared.closed.load(Ordering::Acquire) {
            return;
        }
        let mut state = self.shared.state.write();
        if self.config.max_size > 0 && state.entries.len() >= self.config.max_size {
            evict_oldest(&mut state);
        }
        state.entries.insert(
            key.to_string(),
            Entry {
                value,
                expiration: Instant::now() + ttl,
                hit_count: 0,
            },
        );
    }

    /// Look up a live entry. Expired entries are removed and count as
    /// misses.
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = {
            let state = self.shared.state.read();
            match state.entries.get(key) {
                None => None,
                Some(entry) => Some(entry.expiration <= Instant::now()),
            }
        };

        let mut state = self.shared.state.write();
        match expired {
            None => {
                state.stats.misses += 1;
                None
            }
            Some(true) => {
                state.entries.remove(key);
                state.stats.misses += 1;
                None
            }
            Some(false) => {
                state.stats.hits += 1;
                match state.entries.get_mut(key) {
                    Some(entry) => {
                        entry.hit_count += 1;
                        Some(entry.value.clone())
                    }
                    // Removed between the read and the write lock.
                    None => None,
                }
            }
        }
    }

    pub fn delete(&self, key: &str) {
        self.shared.state.write().entries.remove(key);
    }

    pub fn clear(&self) {
        self.shared.state.write().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.shared.state.read();
        let mut stats = state.stats;
        stats.size = state.entries.len();
        stats
    }

    /// Stop the sweeper and refuse further inserts.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::Release);
        self.shared.shutdown.notify_waiters();
    }
}

fn evict_oldest<V>(state: &mut State<V>) {
    let oldest = state
        .entries
        .iter()
        .min_by_key(|(_, entry)| entry.expiration)
        .map(|(key, _)| key.clone());
    if let Some(key) = oldest {
        state.entries.remove(&key);
        state.stats.evictions += 1;
    }
}

fn sweep<V>(shared: &Shared<V>) {
    let now = Instant::now();
    let mut state = shared.state.write();
    let before = state.entries.len();
    state.entries.retain(|_, entry| entry.expiration > now);
    let removed = before - state.entries.len();
    state.stats.evictions += removed as u64;
    if removed > 0 {
        debug!(removed, "cache sweep removed expired entries");
    }
}

/// RUC consultation sub-cache; keys are prefixed `ruc:`.
pub struct RucCache {
    cache: Cache<RucQueryResponse>,
    ttl: Duration,
}

impl RucCache {
    pub fn new(config: CacheConfig) -> RucCache {
        let ttl = config.ruc_ttl;
        RucCache {
            cache: Cache::new(config),
            ttl,
        }
    }

    pub fn get(&self, ruc: &str) -> Option<RucQueryResponse> {
        self.cache.get(&format!("ruc:{ruc}"))
    }

    pub fn set(&self, ruc: &str, response: RucQueryResponse) {
        self.cache.set(&format!("ruc:{ruc}"), response, self.ttl);
    }

    pub fn invalidate(&self, ruc: &str) {
        self.cache.delete(&format!("ruc:{ruc}"));
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn close(&self) {
        self.cache.close();
    }
}

/// Document query sub-cache keyed by CDC; keys are prefixed `de:`.
pub struct DeCache {
    cache: Cache<DocumentQueryResponse>,
    ttl: Duration,
}

impl DeCache {
    pub fn new(config: CacheConfig) -> DeCache {
        let ttl = config.de_ttl;
        DeCache {
            cache: Cache::new(config),
            ttl,
        }
    }

    pub fn get(&self, cdc: &str) -> Option<DocumentQueryResponse> {
        self.cache.get(&format!("de:{cdc}"))
    }

    pub fn set(&self, cdc: &str, response: DocumentQueryResponse) {
        self.cache.set(&format!("de:{cdc}"), response, self.ttl);
    }

    pub fn invalidate(&self, cdc: &str) {
        self.cache.delete(&format!("de:{cdc}"));
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn close(&self) {
        self.cache.close();
    }
}

/// The client's unified cache: one sub-cache per query service.
pub struct SifenCache {
    pub ruc: RucCache,
    pub de: DeCache,
}

/// Statistics of every sub-cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct SifenCacheStats {
    pub ruc: CacheStats,
    pub de: CacheStats,
}

impl SifenCache {
    pub fn new(config: CacheConfig) -> SifenCache {
        SifenCache {
            ruc: RucCache::new(config.clone()),
            de: DeCache::new(config),
        }
    }

    pub fn stats(&self) -> SifenCacheStats {
        SifenCacheStats {
            ruc: self.ruc.stats(),
            de: self.de.stats(),
        }
    }

    pub fn close(&self) {
        self.ruc.close();
        self.de.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_sweep_config() -> CacheConfig {
        CacheConfig {
            enable_auto_cleanup: false,
            ..CacheConfig::default()
        }
    }

    #[test]
    fn get_within_ttl_hits_and_counts() {
        let cache: Cache<String> = Cache::new(no_sweep_config());
        cache.set("k", "v".to_string(), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some("v".to_string()));
        assert_eq!(cache.get("missing"), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn expired_entry_is_removed_on_read() {
        let cache: Cache<u32> = Cache::new(no_sweep_config());
        cache.set("k", 7, Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get("k"), None);
        assert_eq!(cache.stats().size, 0);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn size_never_exceeds_max_and_earliest_expiry_goes_first() {
        let config = CacheConfig {
            max_size: 2,
            enable_auto_cleanup: false,
            ..CacheConfig::default()
        };
        let cache: Cache<u32> = Cache::new(config);
        cache.set("short", 1, Duration::from_secs(10));
        cache.set("long", 2, Duration::from_secs(1000));
        cache.set("third", 3, Duration::from_secs(100));

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(cache.get("short"), None, "earliest expiration evicted");
        assert_eq!(cache.get("long"), Some(2));
        assert_eq!(cache.get("third"), Some(3));
    }

    #[test]
    fn close_refuses_inserts() {
        let cache: Cache<u32> = Cache::new(no_sweep_config());
        cache.close();
        cache.set("k", 1, Duration::from_secs(60));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn last_writer_wins_for_a_key() {
        let cache: Cache<u32> = Cache::new(no_sweep_config());
        cache.set("k", 1, Duration::from_secs(60));
        cache.set("k", 2, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.stats().size, 1);
    }

    #[test]
    fn sub_caches_prefix_keys_independently() {
        let sifen_cache = SifenCache::new(no_sweep_config());
        let response = RucQueryResponse::default();
        sifen_cache.ruc.set("80069563", response.clone());
        assert_eq!(sifen_cache.ruc.get("80069563"), Some(response));
        assert_eq!(sifen_cache.de.get("80069563"), None);

        sifen_cache.ruc.invalidate("80069563");
        assert_eq!(sifen_cache.ruc.get("80069563"), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn sweeper_removes_expired_entries() {
        let config = CacheConfig {
            cleanup_interval: Duration::from_millis(20),
            ..CacheConfig::default()
        };
        let cache: Cache<u32> = Cache::new(config);
        cache.set("a", 1, Duration::from_millis(5));
        cache.set("b", 2, Duration::from_secs(600));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.stats().size, 1);
        assert_eq!(cache.get("b"), Some(2));
        cache.close();
    }
}
