//! Type-safe key-value cache for the Shopfront cart.
//!
//! Stores any `Serialize` / `DeserializeOwned` value as JSON under a string
//! key. The storage itself is pluggable through [`CacheBackend`]: an
//! in-memory map for tests and ephemeral sessions, or a directory of JSON
//! files that survives process restarts.
//!
//! # Example
//!
//! ```rust
//! use shopfront_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Selection {
//!     shipping_id: String,
//! }
//!
//! let cache = Cache::in_memory();
//!
//! let selection = Selection { shipping_id: "express".to_string() };
//! cache.set("cartSelections", &selection).unwrap();
//!
//! let loaded: Option<Selection> = cache.get("cartSelections").unwrap();
//! assert_eq!(loaded, Some(selection));
//!
//! cache.delete("cartSelections").unwrap();
//! assert!(!cache.exists("cartSelections").unwrap());
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{CacheBackend, FileBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheBackend, CacheError, FileBackend, MemoryBackend};
}
