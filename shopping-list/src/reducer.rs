//! Reducer logic for the shopping list.
//!
//! Commands run the pure list operations from [`crate::list`]. When the list
//! changes, the reducer swaps in the new list and returns a single effect
//! that writes it to storage; the effect feeds back [`ListAction::Persisted`]
//! or [`ListAction::PersistFailed`]. Commands that change nothing return no
//! effects, so nothing is written.

use crate::config::ListConfig;
use crate::list::Unchanged;
use crate::repository::ListRepository;
use crate::types::{ListAction, ListState, ShoppingList};
use pantry_core::{
    SmallVec, effect::Effect, environment::IdGenerator, environment::KeyValueStorage,
    reducer::Reducer, smallvec,
};
use std::sync::Arc;

/// Environment dependencies for the shopping-list reducer
#[derive(Clone)]
pub struct ListEnvironment {
    /// Source of ids for new items
    pub ids: Arc<dyn IdGenerator>,
    /// Persistent mirror of the list
    pub repository: ListRepository,
    /// Feature settings
    pub config: ListConfig,
}

impl ListEnvironment {
    /// Creates an environment with [`ListConfig::default`]
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_config(ids, storage, ListConfig::default())
    }

    /// Creates an environment with custom settings
    #[must_use]
    pub fn with_config(
        ids: Arc<dyn IdGenerator>,
        storage: Arc<dyn KeyValueStorage>,
        config: ListConfig,
    ) -> Self {
        let repository = ListRepository::new(storage, config.storage_key.clone());
        Self {
            ids,
            repository,
            config,
        }
    }
}

impl std::fmt::Debug for ListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEnvironment")
            .field("repository", &self.repository)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Reducer for the shopping list
#[derive(Clone, Debug, Default)]
pub struct ListReducer;

impl ListReducer {
    /// Creates a new `ListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Installs a changed list and describes its write, or logs why nothing changed
    fn commit(
        state: &mut ListState,
        outcome: Result<ShoppingList, Unchanged>,
        env: &ListEnvironment,
    ) -> SmallVec<[Effect<ListAction>; 4]> {
        match outcome {
            Ok(items) => {
                state.items = items;
                smallvec![Self::persist(state.items.clone(), env)]
            },
            Err(Unchanged::IdsExhausted(attempts)) => {
                tracing::warn!(attempts, "Id generator produced only used ids, item not added");
                SmallVec::new()
            },
            Err(reason) => {
                tracing::debug!(%reason, "List unchanged");
                SmallVec::new()
            },
        }
    }

    /// Effect writing `snapshot` to the repository
    ///
    /// The write runs inline in the effect. [`KeyValueStorage`] is synchronous
    /// and the effect has to run on any executor, including wasm32 where there
    /// is no blocking pool. Each write is one small JSON value, and the store
    /// holds its dispatch turn until it finishes, so writes stay in order.
    fn persist(snapshot: ShoppingList, env: &ListEnvironment) -> Effect<ListAction> {
        let repository = env.repository.clone();
        Effect::future(async move {
            match repository.save(&snapshot) {
                Ok(()) => Some(ListAction::Persisted),
                Err(error) => {
                    tracing::error!(key = repository.key(), %error, "Failed to persist shopping list");
                    Some(ListAction::PersistFailed {
                        reason: error.to_string(),
                    })
                },
            }
        })
    }
}

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            ListAction::AddItem { name } => {
                let outcome =
                    state
                        .items
                        .try_add_item(&name, env.ids.as_ref(), env.config.max_id_attempts);
                Self::commit(state, outcome, env)
            },

            ListAction::ToggleCompleted { id } => {
                let outcome = state.items.try_toggle_completed(&id);
                Self::commit(state, outcome, env)
            },

            ListAction::AdjustQuantity { id, direction } => {
                let outcome = state.items.try_adjust_quantity(&id, direction);
                Self::commit(state, outcome, env)
            },

            // ========== Events ==========
            ListAction::Persisted => {
                state.last_persist_error = None;
                SmallVec::new()
            },

            ListAction::PersistFailed { reason } => {
                state.last_persist_error = Some(reason);
                SmallVec::new()
            },
        }
    }
}
