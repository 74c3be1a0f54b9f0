//! Key-value store wrapper with automatic serialization.

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::trace;

use crate::backend::{CacheBackend, FileBackend, MemoryBackend};
use crate::CacheError;

/// Type-safe cache over a [`CacheBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    backend: Box<dyn CacheBackend>,
}

impl Cache {
    /// Create a cache over an arbitrary backend.
    pub fn with_backend(backend: impl CacheBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Create a cache that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open a durable cache stored under `dir`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let cache = shopfront_cache::Cache::open("/tmp/shopfront")?;
    /// # Ok::<(), shopfront_cache::CacheError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                trace!(key, bytes = bytes.len(), "cache hit");
                Ok(Some(value))
            }
            None => {
                trace!(key, "cache miss");
                Ok(None)
            }
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        trace!(key, bytes = bytes.len(), "cache write");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.backend.keys()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
        name: String,
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::in_memory();
        let value: Option<Entry> = cache.get("absent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::in_memory();
        let entries = vec![
            Entry { id: 1, name: "Headphones".to_string() },
            Entry { id: 2, name: "Watch".to_string() },
        ];

        cache.set("cart", &entries).unwrap();

        let loaded: Vec<Entry> = cache.get("cart").unwrap().unwrap();
        assert_eq!(loaded, entries);
        assert_eq!(cache.keys().unwrap(), vec!["cart".to_string()]);
    }

    #[test]
    fn test_type_mismatch_is_serialize_error() {
        let cache = Cache::in_memory();
        cache.set("cart", &"not a list").unwrap();

        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_open_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        Cache::open(dir.path())
            .unwrap()
            .set("cart", &Entry { id: 7, name: "Lamp".to_string() })
            .unwrap();

        let reopened = Cache::open(dir.path()).unwrap();
        let entry: Entry = reopened.get("cart").unwrap().unwrap();
        assert_eq!(entry.id, 7);
    }
}
