//! Time-bounded local cache for fetched resources.
//!
//! Each key is stored as `quran_cache_<key>.json` under the cache directory:
//!
//! ```json
//! { "timestamp": 1760000000000, "data": { ... } }
//! ```
//!
//! Entries older than the TTL are treated as absent and removed on the read
//! that discovers them. Writes are best-effort: a cache that cannot be
//! written only costs a refetch next time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;

const CACHE_PREFIX: &str = "quran_cache_";
const MAX_TTL_HOURS: u64 = 24 * 365 * 100;

#[derive(Serialize)]
struct CacheItemRef<'a, T> {
    timestamp: i64,
    data: &'a T,
}

#[derive(Deserialize)]
struct CacheItem<T> {
    timestamp: i64,
    data: T,
}

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
    enabled: bool,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
            enabled: true,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            ttl: Duration::hours(config.ttl_hours.min(MAX_TTL_HOURS) as i64),
            enabled: config.enabled,
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            ttl: Duration::zero(),
            enabled: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}.json", CACHE_PREFIX, key))
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        self.save_at(key, value, Utc::now());
    }

    pub fn save_at<T: Serialize>(&self, key: &str, value: &T, now: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        let item = CacheItemRef {
            timestamp: now.timestamp_millis(),
            data: value,
        };
        let result = serde_json::to_string(&item)
            .map_err(anyhow::Error::from)
            .and_then(|json| {
                std::fs::create_dir_all(&self.dir)?;
                std::fs::write(self.entry_path(key), json)?;
                Ok(())
            });
        match result {
            Ok(()) => debug!(key, "cache entry written"),
            Err(e) => warn!(key, error = %e, "failed to save to cache"),
        }
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.load_at(key, Utc::now())
    }

    pub fn load_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let path = self.entry_path(key);
        let content = std::fs::read_to_string(&path).ok()?;
        let item: CacheItem<T> = match serde_json::from_str(&content) {
            Ok(item) => item,
            Err(e) => {
                debug!(key, error = %e, "ignoring unreadable cache entry");
                return None;
            }
        };

        let age = now.timestamp_millis().checked_sub(item.timestamp);
        if age.map_or(true, |age| age > self.ttl.num_milliseconds()) {
            info!(key, "cache entry expired");
            let _ = std::fs::remove_file(&path);
            return None;
        }

        info!(key, "cache hit");
        Some(item.data)
    }

    /// Remove every cache entry. Returns how many were removed.
    pub fn clear(&self) -> anyhow::Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(CACHE_PREFIX) && name.ends_with(".json") {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
