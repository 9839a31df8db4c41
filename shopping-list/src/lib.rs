//! Shopping list built on the Pantry reducer architecture.
//!
//! Items are added by name, ticked off, and have their quantity nudged up
//! or down. The whole list is mirrored to a key-value slot after every
//! change and read back on startup.
//!
//! - [`types`]: items, the list, actions and state
//! - [`list`]: pure copy-on-write list operations
//! - [`reducer`]: the reducer and its environment
//! - [`repository`]: JSON load/save through [`KeyValueStorage`](pantry_core::environment::KeyValueStorage)
//! - [`storage`]: file and browser storage backends
//! - [`view`]: what a front end draws
//!
//! # Quick Start
//!
//! ```no_run
//! use pantry_core::environment::ShortIdGenerator;
//! use shopping_list::{FileStorage, ListAction, ListEnvironment, QuantityDirection, open_store};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = ListEnvironment::new(
//!     Arc::new(ShortIdGenerator::default()),
//!     Arc::new(FileStorage::new("./data")),
//! );
//! let store = open_store(env);
//!
//! store.send(ListAction::AddItem { name: "Milk".to_string() }).await?;
//!
//! let id = store.state(|s| s.items.items()[0].id.clone()).await;
//! store.send(ListAction::AdjustQuantity { id, direction: QuantityDirection::Increment }).await?;
//!
//! println!("Total: {}", store.state(|s| s.count()).await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod list;
pub mod reducer;
pub mod repository;
pub mod storage;
pub mod types;
pub mod view;

use pantry_runtime::{Store, StoreConfig};

// Re-export commonly used types
pub use config::ListConfig;
pub use list::Unchanged;
pub use reducer::{ListEnvironment, ListReducer};
pub use repository::{ListRepository, RepositoryError};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(feature = "web")]
pub use storage::LocalStorage;
pub use types::{Item, ItemId, ListAction, ListState, QuantityDirection, ShoppingList};
pub use view::{CompletionIcon, ItemRow, ListView};

/// Store running the shopping-list reducer
pub type ListStore = Store<ListState, ListAction, ListEnvironment, ListReducer>;

/// Loads the persisted list and returns a store ready for actions
///
/// Missing or unreadable data starts an empty list (see
/// [`ListRepository::load_or_empty`]). The loaded list is then written back
/// once, so the slot holds a valid list (at least `[]`) as soon as the store
/// is open. A failed write is logged and recorded in
/// [`ListState::last_persist_error`].
#[must_use]
pub fn open_store(env: ListEnvironment) -> ListStore {
    open_store_with_config(env, StoreConfig::default())
}

/// Same as [`open_store`] with a custom runtime configuration
#[must_use]
pub fn open_store_with_config(env: ListEnvironment, config: StoreConfig) -> ListStore {
    let mut state = ListState::new(env.repository.load_or_empty());
    if let Err(error) = env.repository.save(&state.items) {
        tracing::error!(key = env.repository.key(), %error, "Failed to write shopping list on open");
        state.last_persist_error = Some(error.to_string());
    }
    tracing::info!(key = env.repository.key(), items = state.count(), "Opened shopping list");
    Store::with_config(state, ListReducer::new(), env, config)
}
