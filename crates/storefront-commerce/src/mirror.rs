//! Best-effort mirroring of cart contents to a key-value store.
//!
//! The mirror is never read by the cart itself; it exists so a later session
//! can show what was in the cart. Writes happen after a successful add and
//! their errors never reach the caller of [`CartStore`](crate::cart::CartStore).

use crate::cart::CartLineItem;
use crate::error::CommerceError;

/// Destination for cart snapshots.
pub trait CartMirror {
    /// Persist the current item list.
    fn mirror(&self, items: &[CartLineItem]) -> Result<(), CommerceError>;
}

#[cfg(feature = "storage")]
pub use cache::{read_mirrored, CacheMirror, DEFAULT_MIRROR_KEY};

#[cfg(feature = "storage")]
mod cache {
    use storefront_cache::Cache;
    use tracing::debug;

    use super::CartMirror;
    use crate::cart::CartLineItem;
    use crate::error::CommerceError;

    /// Key used when none is configured.
    pub const DEFAULT_MIRROR_KEY: &str = "cart";

    /// Mirror that writes the item list as JSON into a [`Cache`].
    #[derive(Debug)]
    pub struct CacheMirror {
        cache: Cache,
        key: String,
    }

    impl CacheMirror {
        /// Mirror into `cache` under `key`.
        pub fn new(cache: Cache, key: impl Into<String>) -> Self {
            Self {
                cache,
                key: key.into(),
            }
        }

        /// The underlying cache.
        pub fn cache(&self) -> &Cache {
            &self.cache
        }

        pub fn key(&self) -> &str {
            &self.key
        }
    }

    impl CartMirror for CacheMirror {
        fn mirror(&self, items: &[CartLineItem]) -> Result<(), CommerceError> {
            self.cache.set(&self.key, items)?;
            Ok(())
        }
    }

    /// Read a mirrored item list back for display.
    ///
    /// Any failure (missing key, unreadable store, stale format) yields an
    /// empty list.
    pub fn read_mirrored(cache: &Cache, key: &str) -> Vec<CartLineItem> {
        match cache.get::<Vec<CartLineItem>>(key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(key, error = %e, "unreadable cart mirror");
                Vec::new()
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::cart::CartStore;
        use crate::ids::ProductId;
        use crate::money::{Currency, Money};
        use storefront_cache::MemoryBackend;

        fn item(id: u32) -> CartLineItem {
            CartLineItem::new(ProductId::new(id), "Item", Money::whole(18, Currency::SAR), 1)
        }

        #[test]
        fn test_cache_mirror_roundtrip() {
            let dir = tempfile::tempdir().unwrap();
            let mut store = CartStore::new()
                .with_mirror(CacheMirror::new(Cache::open(dir.path()).unwrap(), DEFAULT_MIRROR_KEY));
            store.add_item(item(6));
            store.add_item(item(3));

            let reader = Cache::open(dir.path()).unwrap();
            let mirrored = read_mirrored(&reader, DEFAULT_MIRROR_KEY);
            assert_eq!(mirrored, store.state().items());
        }

        #[test]
        fn test_quota_failure_leaves_store_intact() {
            let cache = Cache::with_backend(MemoryBackend::with_quota(16));
            let mut store = CartStore::new().with_mirror(CacheMirror::new(cache, "cart"));

            store.add_item(item(6));
            assert_eq!(store.state().total_items(), 1);
            assert_eq!(store.state().total_price(), Money::whole(18, Currency::SAR));
        }

        #[test]
        fn test_read_mirrored_tolerates_garbage() {
            let cache = Cache::open_default();
            cache.set("cart", "definitely not items").unwrap();
            assert!(read_mirrored(&cache, "cart").is_empty());
            assert!(read_mirrored(&cache, "missing").is_empty());
        }
    }
}
