//! Key-value store wrapper with automatic serialization.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::trace;

use crate::backend::{FileBackend, KvBackend, MemoryBackend};
use crate::CacheError;

/// Type-safe cache over a [`KvBackend`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
pub struct Cache {
    backend: Box<dyn KvBackend>,
}

impl Cache {
    /// Open an unbounded in-memory store.
    ///
    /// ```rust
    /// let cache = storefront_cache::Cache::open_default();
    /// assert!(cache.keys().unwrap().is_empty());
    /// ```
    pub fn open_default() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    /// Open a directory-backed store, creating the directory if needed.
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".storefront/cache")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    /// Wrap an arbitrary backend.
    pub fn with_backend(backend: impl KvBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<CartLineItem>> = cache.get("cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// ```rust,ignore
    /// cache.set("cart", state.items())?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        trace!(key, bytes = bytes.len(), "cache set");
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

impl Default for Cache {
    fn default() -> Self {
        Self::open_default()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

/// Helper to build cache keys with namespacing.
///
/// ```rust
/// use storefront_cache::cache_key;
///
/// let key = cache_key!("cart", "guest");
/// assert_eq!(key, "cart:guest");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
        quantity: i64,
    }

    #[test]
    fn test_typed_roundtrip() {
        let cache = Cache::open_default();
        let entries = vec![Entry { id: 1, quantity: 2 }];

        cache.set("cart", &entries).unwrap();
        let restored: Option<Vec<Entry>> = cache.get("cart").unwrap();
        assert_eq!(restored, Some(entries));
    }

    #[test]
    fn test_missing_key() {
        let cache = Cache::open_default();
        let value: Option<Entry> = cache.get("nope").unwrap();
        assert!(value.is_none());
        assert!(!cache.exists("nope").unwrap());
    }

    #[test]
    fn test_type_mismatch_is_serialize_error() {
        let cache = Cache::open_default();
        cache.set("cart", "not a list").unwrap();
        let result: Result<Option<Vec<Entry>>, _> = cache.get("cart");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_quota_propagates() {
        let cache = Cache::with_backend(MemoryBackend::with_quota(4));
        let result = cache.set("cart", &vec![Entry { id: 1, quantity: 1 }]);
        assert!(matches!(result, Err(CacheError::QuotaExceeded { .. })));
    }

    #[test]
    fn test_directory_store() {
        let dir = tempfile::tempdir().unwrap();
        {
            let cache = Cache::open(dir.path()).unwrap();
            cache.set(&cache_key!("cart", "guest"), &Entry { id: 7, quantity: 3 }).unwrap();
        }

        let reopened = Cache::open(dir.path()).unwrap();
        let entry: Option<Entry> = reopened.get("cart:guest").unwrap();
        assert_eq!(entry, Some(Entry { id: 7, quantity: 3 }));
        assert_eq!(reopened.keys().unwrap(), vec!["cart:guest"]);
    }
}
