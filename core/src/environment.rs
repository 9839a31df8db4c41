//! Dependency injection traits for reducers.
//!
//! All external dependencies are abstracted behind traits and injected
//! via the Environment parameter:
//!
//! - [`IdGenerator`]: opaque identifier generation
//! - [`KeyValueStorage`]: a durable string slot per key (browser
//!   `localStorage`, a file per key, an in-memory map in tests)
//!
//! Production implementations that need no I/O live here
//! ([`ShortIdGenerator`]); storage backends live next to the features that use
//! them, and deterministic mocks live in `pantry-testing`.

use rand::Rng;
use thiserror::Error;

/// Generates opaque unique identifiers
///
/// # Examples
///
/// ```
/// use pantry_core::environment::{IdGenerator, ShortIdGenerator};
///
/// let ids = ShortIdGenerator::default();
/// let a = ids.new_id();
/// let b = ids.new_id();
/// assert_ne!(a, b);
/// ```
pub trait IdGenerator: Send + Sync {
    /// Produce a new identifier
    fn new_id(&self) -> String;
}

/// Characters used by [`ShortIdGenerator`]; safe in URLs and storage keys.
const SHORT_ID_ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

/// Random, URL-safe short ids (9 characters by default)
#[derive(Debug, Clone, Copy)]
pub struct ShortIdGenerator {
    length: usize,
}

impl ShortIdGenerator {
    /// Default id length
    pub const DEFAULT_LENGTH: usize = 9;

    /// Create a generator producing ids of `length` characters
    ///
    /// A zero length is bumped to 1 so ids are never empty.
    #[must_use]
    pub const fn with_length(length: usize) -> Self {
        Self {
            length: if length == 0 { 1 } else { length },
        }
    }

    /// Length of the generated ids
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }
}

impl Default for ShortIdGenerator {
    fn default() -> Self {
        Self::with_length(Self::DEFAULT_LENGTH)
    }
}

impl IdGenerator for ShortIdGenerator {
    fn new_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| char::from(SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())]))
            .collect()
    }
}

/// Errors that can occur in a key-value storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend cannot be reached at all (no window, storage disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be used with this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A durable string slot per key
///
/// Reads and writes are whole-value: `set` overwrites whatever was stored
/// under the key. Calls are synchronous; browser `localStorage` is, and the
/// file backend writes small documents.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared with effects
/// executed by the runtime.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing is stored
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn short_ids_use_default_length() {
        let id = ShortIdGenerator::default().new_id();
        assert_eq!(id.len(), ShortIdGenerator::DEFAULT_LENGTH);
    }

    #[test]
    fn zero_length_is_bumped() {
        let ids = ShortIdGenerator::with_length(0);
        assert_eq!(ids.length(), 1);
        assert_eq!(ids.new_id().len(), 1);
    }

    #[test]
    fn short_ids_rarely_collide() {
        let ids = ShortIdGenerator::default();
        let generated: HashSet<String> = (0..1_000).map(|_| ids.new_id()).collect();
        assert_eq!(generated.len(), 1_000);
    }

    proptest! {
        #[test]
        fn short_ids_stay_in_alphabet(length in 1usize..32) {
            let id = ShortIdGenerator::with_length(length).new_id();
            prop_assert_eq!(id.chars().count(), length);
            prop_assert!(id.bytes().all(|b| SHORT_ID_ALPHABET.contains(&b)));
        }
    }
}
