//! In-memory implementation of the Store trait.
//!
//! Same semantics as SQLite, but everything is lost when the store is
//! dropped. Used by tests and by hosts with no durable medium.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StoreError};
use crate::traits::{Store, UpdateFn};

/// In-memory store implementation.
///
/// Thread-safe via RwLock.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-filled with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }

    fn update(&self, key: &str, f: &mut UpdateFn<'_>) -> Result<()> {
        let mut entries = self.write()?;

        let next = f(entries.get(key).map(String::as_str))?;
        if let Some(next) = next {
            entries.insert(key.to_string(), next);
        }

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.read()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();

        assert_eq!(store.get("DV8Cart").unwrap(), None);

        store.set("DV8Cart", "[]").unwrap();
        assert_eq!(store.get("DV8Cart").unwrap().as_deref(), Some("[]"));

        store.set("DV8Cart", "[1]").unwrap();
        assert_eq!(store.get("DV8Cart").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_memory_store_delete_idempotent() {
        let store = MemoryStore::with_entries([("DV8CurrentUser", "{}")]);

        store.delete("DV8CurrentUser").unwrap();
        store.delete("DV8CurrentUser").unwrap();
        assert_eq!(store.get("DV8CurrentUser").unwrap(), None);
    }

    #[test]
    fn test_update_sees_current_value() {
        let store = MemoryStore::with_entries([("n", "1")]);

        store
            .update("n", &mut |current: Option<&str>| {
                let n: u32 = current.unwrap_or("0").parse().unwrap();
                Ok(Some((n + 1).to_string()))
            })
            .unwrap();

        assert_eq!(store.get("n").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_update_error_writes_nothing() {
        let store = MemoryStore::with_entries([("n", "1")]);

        let result = store.update("n", &mut |_: Option<&str>| {
            Err(StoreError::Migration("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(store.get("n").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_update_none_leaves_missing_key_missing() {
        let store = MemoryStore::new();
        store.update("n", &mut |_: Option<&str>| Ok(None)).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_json_helpers() {
        let store = MemoryStore::new();
        store.set_json("nums", &vec![1u32, 2, 3]).unwrap();

        let nums: Vec<u32> = store.get_json("nums").unwrap().unwrap();
        assert_eq!(nums, vec![1, 2, 3]);

        store.set("nums", "{not json").unwrap();
        let err = store.get_json::<Vec<u32>>("nums").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_keys_sorted() {
        let store = MemoryStore::with_entries([("b", "2"), ("a", "1"), ("c", "3")]);
        assert_eq!(store.keys().unwrap(), vec!["a", "b", "c"]);
    }
}
