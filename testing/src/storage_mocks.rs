//! In-memory storage testing utilities
//!
//! Provides fast, deterministic stand-ins for [`KeyValueStorage`]:
//! - [`InMemoryStorage`]: HashMap-based storage that records every write
//! - [`FailingStorage`]: Storage whose reads and/or writes always fail

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use pantry_core::environment::{KeyValueStorage, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory key-value storage for fast, deterministic testing.
///
/// Clones share the same data, so a test can keep one handle for assertions
/// and hand another to the environment.
///
/// # Example
///
/// ```
/// use pantry_testing::InMemoryStorage;
/// use pantry_core::environment::KeyValueStorage;
///
/// let storage = InMemoryStorage::new();
/// storage.set("items", "[]").unwrap();
///
/// assert_eq!(storage.get("items").unwrap().as_deref(), Some("[]"));
/// assert_eq!(storage.write_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<Vec<(String, String)>>>,
}

impl InMemoryStorage {
    /// Create a new empty in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `value` under `key`
    ///
    /// The seed does not count as a write.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.data.write().unwrap().insert(key.into(), value.into());
        storage
    }

    /// A shared handle for injecting into environments
    #[must_use]
    pub fn shared(&self) -> Arc<Self> {
        Arc::new(self.clone())
    }

    /// Current value under `key`
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    /// Number of `set` calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.read().unwrap().len()
    }

    /// Every `(key, value)` written, oldest first
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.read().unwrap().clone()
    }

    /// Clear all data and the write log (for test isolation)
    pub fn clear(&self) {
        self.data.write().unwrap().clear();
        self.writes.write().unwrap().clear();
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .write()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Storage that fails on demand
///
/// # Example
///
/// ```
/// use pantry_testing::FailingStorage;
/// use pantry_core::environment::KeyValueStorage;
///
/// let storage = FailingStorage::writes();
/// assert!(storage.get("items").unwrap().is_none());
/// assert!(storage.set("items", "[]").is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FailingStorage {
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStorage {
    /// Reads succeed (and find nothing), writes fail
    #[must_use]
    pub const fn writes() -> Self {
        Self {
            fail_reads: false,
            fail_writes: true,
        }
    }

    /// Reads fail, writes succeed (and are discarded)
    #[must_use]
    pub const fn reads() -> Self {
        Self {
            fail_reads: true,
            fail_writes: false,
        }
    }

    /// Everything fails
    #[must_use]
    pub const fn always() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
        }
    }

    /// A shared handle for injecting into environments
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable(format!("read of {key} refused")));
        }
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend(format!("write of {key} refused")));
        }
        Ok(())
    }
}
