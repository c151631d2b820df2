//! # Brewcart Store
//!
//! Storage abstraction for Brewcart. Provides a trait-based key-value
//! interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The cart and the credential registry persist through the [`Store`]
//! trait, so the engine is storage-agnostic. [`SqliteStore`] is the durable
//! backend, [`MemoryStore`] is for tests and throwaway sessions.
//!
//! ## Key Types
//!
//! - [`Store`] - get/set/delete/update by string key
//! - [`StoreExt`] - JSON helpers over any store
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brewcart_store::{SqliteStore, Store, StoreExt};
//!
//! let store = SqliteStore::open("storefront.db").unwrap();
//! store.set("DV8Cart", "[]").unwrap();
//!
//! let cart: Option<Vec<String>> = store.get_json("DV8Cart").unwrap();
//! assert_eq!(cart, Some(vec![]));
//! ```
//!
//! ## Design Notes
//!
//! - **No size limits**: values are stored as given
//! - **Missing keys**: reads return `None`, deletes are no-ops
//! - **Per-key atomicity**: [`Store::update`] serializes read-modify-write

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{decode, encode, Store, StoreExt, UpdateFn};

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
