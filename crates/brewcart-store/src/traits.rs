//! Store trait: the abstract interface for key-value persistence.
//!
//! Values are opaque strings. Callers own serialization; [`StoreExt`]
//! provides the JSON encoding every Brewcart record uses.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Read-modify-write callback for [`Store::update`].
///
/// Receives the current value (or `None`) and returns the value to write,
/// or `None` to leave the key untouched. An `Err` aborts the update and
/// nothing is written.
pub type UpdateFn<'a> = dyn FnMut(Option<&str>) -> Result<Option<String>> + 'a;

/// The Store trait: synchronous key-value persistence.
///
/// # Design Notes
///
/// - **Missing keys are not errors**: `get` returns `Ok(None)`, `delete` is a no-op.
/// - **Last write wins**: there are no transactions across keys.
/// - **Per-key atomic updates**: `update` holds the backend's lock (or a
///   SQLite transaction) for the whole read-modify-write.
pub trait Store: Send + Sync {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<()>;

    /// Atomically read, transform and write back a single key.
    fn update(&self, key: &str, f: &mut UpdateFn<'_>) -> Result<()>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Extension trait for JSON-encoded records.
pub trait StoreExt: Store {
    /// Read and decode a JSON value.
    ///
    /// A value that is present but does not decode is reported as
    /// [`StoreError::Malformed`]; callers decide how to recover.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => decode(key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and write it.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = encode(key, value)?;
        self.set(key, &raw)
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// Decode a stored JSON value.
pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| StoreError::Malformed {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a value as JSON for storage.
pub fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
