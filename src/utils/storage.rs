//! Key/value persistence for session state.
//!
//! The core only sees the [`Storage`] trait. In the browser it is backed by
//! localStorage; [`MemoryStorage`] keeps everything in memory and is used in
//! tests and as a fallback. JSON helpers mirror the session cache helpers:
//! reads never fail (missing or corrupt data is `None`), writes report a
//! [`StorageError`] that callers log and swallow.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};

use super::dom;
use crate::core::error::StorageError;

/// Injected persistence interface.
pub trait Storage {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}

/// Read and deserialize a JSON document.
///
/// Returns `None` if the key doesn't exist or deserialization fails.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let json = storage.load(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring unreadable {key}: {e}");
            None
        }
    }
}

/// Serialize and store a JSON document.
pub fn save_json<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &str,
    data: &T,
) -> Result<(), StorageError> {
    let json =
        serde_json::to_string(data).map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
    storage.save(key, &json)
}

// ============================================================================
// LocalStorage
// ============================================================================

/// Browser localStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        let storage = dom::local_storage()?;
        storage.get_item(key).ok()?
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, blob)
            .map_err(|_| StorageError::WriteFailed(key.to_string()))
    }
}

// ============================================================================
// MemoryStorage
// ============================================================================

/// In-memory store. Writes can be switched off to simulate a full or
/// unavailable backend.
#[derive(Debug)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    writable: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(HashMap::new()),
            writable: Cell::new(true),
        }
    }

    pub fn set_writable(&self, writable: bool) {
        self.writable.set(writable);
    }

    /// Seed a raw value, bypassing the writable flag.
    pub fn insert(&self, key: &str, blob: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), blob.to_string());
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        if !self.writable.get() {
            return Err(StorageError::WriteFailed(key.to_string()));
        }
        self.insert(key, blob);
        Ok(())
    }
}
