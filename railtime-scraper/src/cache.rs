//! Key-value cache collaborator.
//!
//! The scraper only caches one thing: the station directory, for 24 hours.
//! Callers pick the backing store; [`MemoryCache`] suits a long-running
//! server, [`crate::stations::DiskCache`] survives restarts.

use std::future::Future;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;

use crate::railtime::ScrapeError;

/// A TTL-aware key-value store.
pub trait Cache<V> {
    /// Look up a live entry. Missing, expired and unreadable entries are all
    /// reported as `None`.
    fn get(&self, key: &str) -> impl Future<Output = Option<V>> + Send;

    /// Store `value` under `key` for `ttl`.
    fn set(
        &self,
        key: &str,
        value: V,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), ScrapeError>> + Send;
}

/// Configuration for the in-memory cache.
#[derive(Debug, Clone)]
pub struct MemoryCacheConfig {
    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self { max_capacity: 64 }
    }
}

/// A cached value together with the TTL it was stored with.
#[derive(Clone)]
struct Entry<V> {
    value: V,
    ttl: Duration,
}

/// Expires each entry after its own TTL.
struct PerEntryTtl;

impl<V> Expiry<String, Entry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process cache backed by moka.
pub struct MemoryCache<V> {
    entries: MokaCache<String, Entry<V>>,
}

impl<V: Clone + Send + Sync + 'static> MemoryCache<V> {
    /// Create a new cache with the given configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { entries }
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl<V: Clone + Send + Sync + 'static> Cache<V> for MemoryCache<V> {
    async fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).await.map(|entry| entry.value)
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> Result<(), ScrapeError> {
        self.entries
            .insert(key.to_string(), Entry { value, ttl })
            .await;
        Ok(())
    }
}
