//! In-Memory TTL Cache
//!
//! A small read-through cache used by the artwork workflow: values are
//! stored with an expiry, reads past the expiry behave as misses, and
//! writers invalidate keys explicitly. There is no eviction policy beyond
//! TTL expiry.
//!
//! The cache is an injected collaborator (`Arc<MemoryCache>`), not a
//! process-wide singleton, so handlers and use cases state their
//! dependency on it explicitly.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

struct Entry {
    expires_at: Instant,
    payload: Vec<u8>,
}

/// In-memory expiring key/value map
///
/// Values are opaque byte payloads; the `*_json` helpers layer serde on
/// top for DTO caching. Expired entries are dropped lazily on read and
/// can be swept in bulk with [`MemoryCache::sweep`].
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value; a missing or expired key is a miss
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value with a TTL
    pub fn set(&self, key: impl Into<String>, payload: Vec<u8>, ttl: Duration) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.into(),
            Entry {
                expires_at: Instant::now() + ttl,
                payload,
            },
        );
    }

    /// Invalidate a key
    pub fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.remove(key);
    }

    /// Get and deserialize a cached JSON value
    ///
    /// A payload that no longer deserializes (e.g. after a DTO change) is
    /// treated as a miss and dropped.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let payload = self.get(key)?;
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(_) => {
                self.remove(key);
                None
            }
        }
    }

    /// Serialize and store a JSON value with a TTL
    pub fn set_json<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        // Serialization of our own DTOs does not fail; skip caching if it ever does.
        if let Ok(payload) = serde_json::to_vec(value) {
            self.set(key, payload, ttl);
        }
    }

    /// Drop all expired entries, returning how many were removed
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of live (possibly expired, not yet swept) entries
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let cache = MemoryCache::new();
        cache.set("k", b"v".to_vec(), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(b"v".to_vec()));

        cache.remove("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_expiry_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("k", b"v".to_vec(), Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("k"), None);
        // Lazy removal dropped the entry
        assert!(cache.is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Stats {
            total: i64,
        }

        let cache = MemoryCache::new();
        cache.set_json("stats", &Stats { total: 5 }, Duration::from_secs(60));
        assert_eq!(cache.get_json::<Stats>("stats"), Some(Stats { total: 5 }));
    }

    #[test]
    fn test_corrupt_json_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set("bad", b"not json".to_vec(), Duration::from_secs(60));
        assert_eq!(cache.get_json::<i64>("bad"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sweep() {
        let cache = MemoryCache::new();
        cache.set("old", b"x".to_vec(), Duration::from_millis(0));
        cache.set("live", b"y".to_vec(), Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("live"), Some(b"y".to_vec()));
    }

    #[test]
    fn test_overwrite_refreshes_value() {
        let cache = MemoryCache::new();
        cache.set("k", b"a".to_vec(), Duration::from_secs(60));
        cache.set("k", b"b".to_vec(), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(b"b".to_vec()));
    }
}
