use moka::Expiry;
use moka::future::Cache;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Default time to live for cached entries (5 min).
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Clone)]
struct CacheEntry<V> {
    data: V,
    ttl: Duration,
}

/// Expires every entry after the TTL it was stored with.
struct PerEntryTtl;

impl<K, V> Expiry<K, CacheEntry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &K,
        value: &CacheEntry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &K,
        value: &CacheEntry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Keyed in-memory cache where each entry carries its own TTL.
///
/// Expired entries are never returned; they are dropped lazily when read or
/// when moka runs its housekeeping, no background sweep is scheduled here.
#[derive(Clone)]
pub struct DataCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, CacheEntry<V>>,
    default_ttl: Duration,
}

impl<K, V> DataCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(max_capacity: u64, default_ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { inner, default_ttl }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await.map(|entry| entry.data)
    }

    pub async fn set(&self, key: K, data: V) {
        self.set_with_ttl(key, data, self.default_ttl).await;
    }

    pub async fn set_with_ttl(&self, key: K, data: V, ttl: Duration) {
        self.inner.insert(key, CacheEntry { data, ttl }).await;
    }

    pub fn has(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    pub async fn delete(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    pub fn clear(&self) {
        self.inner.invalidate_all();
    }
}
