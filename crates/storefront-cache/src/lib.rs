//! Type-safe key-value cache for the storefront.
//!
//! Provides a small, ergonomic API for keeping JSON snapshots of client-side
//! state (the cart mirror) in a key-value store. Two backends ship with the
//! crate: an in-memory map with an optional byte quota, and a directory of
//! JSON files for persistence across CLI runs.
//!
//! # Example
//!
//! ```rust
//! use storefront_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Snapshot {
//!     items: Vec<u32>,
//! }
//!
//! let cache = Cache::open_default();
//! cache.set("cart", &Snapshot { items: vec![1, 2] }).unwrap();
//!
//! let restored: Option<Snapshot> = cache.get("cart").unwrap();
//! assert_eq!(restored, Some(Snapshot { items: vec![1, 2] }));
//!
//! cache.delete("cart").unwrap();
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
