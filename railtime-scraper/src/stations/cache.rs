//! Disk-based cache, one JSON file per key.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::Cache;
use crate::railtime::ScrapeError;

/// Cached value with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedEntry<V> {
    /// Unix timestamp when the entry was written.
    cached_at_secs: u64,
    /// How long the entry stays valid.
    ttl_secs: u64,
    /// The cached value.
    value: V,
}

/// Configuration for the disk cache.
#[derive(Debug, Clone)]
pub struct DiskCacheConfig {
    /// Directory holding the cache files.
    pub dir: PathBuf,
}

impl DiskCacheConfig {
    /// Create a new cache config rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for DiskCacheConfig {
    fn default() -> Self {
        // Default to a cache directory under the current directory
        Self::new("railtime_cache")
    }
}

/// Disk cache surviving process restarts.
#[derive(Debug, Clone)]
pub struct DiskCache {
    config: DiskCacheConfig,
}

fn now_secs() -> Option<u64> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

impl DiskCache {
    /// Create a new disk cache with the given config.
    pub fn new(config: DiskCacheConfig) -> Self {
        Self { config }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.config.dir.join(format!("{file}.json"))
    }
}

impl<V> Cache<V> for DiskCache
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    async fn get(&self, key: &str) -> Option<V> {
        let path = self.path_for(key);
        let contents = tokio::fs::read_to_string(&path).await.ok()?;
        let cached: CachedEntry<V> = match serde_json::from_str(&contents) {
            Ok(cached) => cached,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable cache file");
                return None;
            }
        };

        // Check if entry has expired
        let age_secs = now_secs()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= cached.ttl_secs {
            return None;
        }

        Some(cached.value)
    }

    async fn set(&self, key: &str, value: V, ttl: Duration) -> Result<(), ScrapeError> {
        let now = now_secs().ok_or_else(|| ScrapeError::Cache {
            message: "system time before unix epoch".to_string(),
        })?;

        let json = serde_json::to_string_pretty(&CachedEntry {
            cached_at_secs: now,
            ttl_secs: ttl.as_secs(),
            value,
        })
        .map_err(|e| ScrapeError::Cache {
            message: format!("failed to serialize cache entry: {}", e),
        })?;

        tokio::fs::create_dir_all(&self.config.dir)
            .await
            .map_err(|e| ScrapeError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;

        tokio::fs::write(self.path_for(key), json)
            .await
            .map_err(|e| ScrapeError::Cache {
                message: format!("failed to write cache file: {}", e),
            })?;

        Ok(())
    }
}
