//! Loading and saving the list through a [`KeyValueStorage`] slot.
//!
//! The whole list lives under one key as a JSON array. Every save overwrites
//! it; there is no partial update.

use crate::types::ShoppingList;
use pantry_core::environment::{KeyValueStorage, StorageError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading or saving the list.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not a valid list.
    #[error("Malformed shopping list under key {key:?}: {source}")]
    Decode {
        /// Storage key that was read
        key: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The list could not be serialized.
    #[error("Failed to encode shopping list: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The persistent mirror of a [`ShoppingList`]
#[derive(Clone)]
pub struct ListRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl ListRepository {
    /// Creates a repository over `storage`, using the slot named `key`
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key holding the list
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted list; an absent slot is an empty list
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Storage`] if the slot cannot be read,
    /// [`RepositoryError::Decode`] if it holds something other than a list.
    pub fn load(&self) -> Result<ShoppingList, RepositoryError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored list, starting empty");
            return Ok(ShoppingList::new());
        };

        serde_json::from_str(&raw).map_err(|source| RepositoryError::Decode {
            key: self.key.clone(),
            source,
        })
    }

    /// Reads the persisted list, falling back to an empty list on any error
    ///
    /// The error is logged; the next save overwrites whatever was stored.
    #[must_use]
    pub fn load_or_empty(&self) -> ShoppingList {
        match self.load() {
            Ok(list) => {
                tracing::debug!(key = %self.key, items = list.len(), "Loaded shopping list");
                list
            },
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Could not load shopping list, starting empty");
                ShoppingList::new()
            },
        }
    }

    /// Overwrites the slot with `list`
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Encode`] or [`RepositoryError::Storage`].
    pub fn save(&self, list: &ShoppingList) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(list).map_err(RepositoryError::Encode)?;
        self.storage.set(&self.key, &raw)?;
        tracing::trace!(key = %self.key, items = list.len(), "Persisted shopping list");
        Ok(())
    }
}

impl std::fmt::Debug for ListRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Item, ItemId};
    use pantry_testing::{FailingStorage, InMemoryStorage};

    fn sample() -> ShoppingList {
        ShoppingList::from(vec![Item::new(ItemId::new("a"), "Milk".into())])
    }

    #[test]
    fn absent_slot_loads_empty() {
        let repository = ListRepository::new(InMemoryStorage::new().shared(), "items");
        assert_eq!(repository.load().unwrap(), ShoppingList::new());
    }

    #[test]
    fn save_then_load() {
        let storage = InMemoryStorage::new();
        let repository = ListRepository::new(storage.shared(), "items");

        repository.save(&sample()).unwrap();

        assert_eq!(
            storage.value("items").as_deref(),
            Some(r#"[{"id":"a","name":"Milk","completed":false,"quantity":1}]"#)
        );
        assert_eq!(repository.load().unwrap(), sample());
    }

    #[test]
    fn save_overwrites_whole_slot() {
        let storage = InMemoryStorage::new();
        let repository = ListRepository::new(storage.shared(), "items");

        repository.save(&sample()).unwrap();
        repository.save(&ShoppingList::new()).unwrap();

        assert_eq!(storage.value("items").as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn malformed_data_is_a_decode_error() {
        let storage = InMemoryStorage::with_entry("items", "{not json");
        let repository = ListRepository::new(storage.shared(), "items");

        let error = repository.load().unwrap_err();
        assert!(matches!(error, RepositoryError::Decode { ref key, .. } if key == "items"));
        assert_eq!(repository.load_or_empty(), ShoppingList::new());
    }

    #[test]
    fn wrong_shape_is_a_decode_error() {
        let storage = InMemoryStorage::with_entry("items", r#"{"id":"a"}"#);
        let repository = ListRepository::new(storage.shared(), "items");
        assert!(matches!(repository.load(), Err(RepositoryError::Decode { .. })));
    }

    #[test]
    fn storage_failures_surface() {
        let repository = ListRepository::new(FailingStorage::always().shared(), "items");
        assert!(matches!(repository.load(), Err(RepositoryError::Storage(_))));
        assert!(matches!(repository.save(&sample()), Err(RepositoryError::Storage(_))));
        assert_eq!(repository.load_or_empty(), ShoppingList::new());
    }

    #[test]
    fn keys_are_independent() {
        let storage = InMemoryStorage::new();
        let home = ListRepository::new(storage.shared(), "home");
        let work = ListRepository::new(storage.shared(), "work");

        home.save(&sample()).unwrap();
        assert_eq!(work.load().unwrap(), ShoppingList::new());
        assert_eq!(home.key(), "home");
    }
}
