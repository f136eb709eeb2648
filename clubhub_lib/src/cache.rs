//! In-memory TTL cache backed by `DashMap` for concurrent access.

use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// Thread-safe response cache with time-to-live expiration.
///
/// Entries hold JSON values keyed by route (e.g. `members`,
/// `leaderboard:blitz`). Expired entries are evicted lazily on `get`.
pub struct TtlCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl TtlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key`, or `None` if missing or expired.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entry = self.store.get(key)?;
        if Instant::now() >= entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    pub fn set(&self, key: String, value: Value) {
        self.store.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops `prefix` itself and every `prefix:*` entry.
    pub fn invalidate(&self, prefix: &str) {
        let nested = format!("{}:", prefix);
        self.store
            .retain(|key, _| key != prefix && !key.starts_with(&nested));
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
