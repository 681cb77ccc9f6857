use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Fixed lifetime of a cached parameter.
pub const PARAM_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

const PARAM_CACHE_CAPACITY: u64 = 10_000;

/// Parameter key => JSON-serialized parameter.
///
/// Entries expire `PARAM_CACHE_TTL` after they were written, whether or not
/// they were read in between.
///
/// Writes bump `epoch`. A reader that loaded a value before a write landed
/// fills the cache through `fill`, which backs the entry out again when the
/// epoch moved underneath it.
#[derive(Clone)]
pub struct ParamCache {
    inner: Cache<String, String>,
    epoch: Arc<AtomicU64>,
}

impl ParamCache {
    pub fn new() -> Self {
        Self::with_ttl(PARAM_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(PARAM_CACHE_CAPACITY)
                .time_to_live(ttl)
                .build(),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Take before reading the database on a miss; pass to `fill`.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await
    }

    /// Write-through after a successful database write.
    pub async fn set(&self, key: &str, json: String) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(key.to_string(), json).await;
    }

    /// Caches a value loaded from the database at `seen`. Returns false when a
    /// write raced the load and the entry was dropped.
    pub async fn fill(&self, key: &str, json: String, seen: u64) -> bool {
        self.inner.insert(key.to_string(), json).await;
        if self.epoch() != seen {
            self.inner.invalidate(key).await;
            return false;
        }
        true
    }

    pub async fn invalidate(&self, key: &str) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.inner.invalidate(key).await;
    }
}

impl Default for ParamCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn stores_and_evicts() {
        let cache = ParamCache::new();

        cache.set("checkin-time", "{}".to_string()).await;
        assert_eq!(cache.get("checkin-time").await.as_deref(), Some("{}"));

        cache.invalidate("checkin-time").await;
        assert_eq!(cache.get("checkin-time").await, None);
    }

    #[actix_web::test]
    async fn fill_backs_out_after_concurrent_write() {
        let cache = ParamCache::new();

        let seen = cache.epoch();
        assert!(cache.fill("checkin-time", "old".to_string(), seen).await);
        assert_eq!(cache.get("checkin-time").await.as_deref(), Some("old"));

        let seen = cache.epoch();
        cache.invalidate("checkin-time").await;
        assert!(!cache.fill("checkin-time", "stale".to_string(), seen).await);
        assert_eq!(cache.get("checkin-time").await, None);
    }

    #[actix_web::test]
    async fn entries_expire_after_ttl() {
        let cache = ParamCache::with_ttl(Duration::from_millis(50));

        cache.set("checkout-time", "{}".to_string()).await;
        actix_web::rt::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(cache.get("checkout-time").await, None);
    }
}
