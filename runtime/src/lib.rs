//! # Pantry Runtime
//!
//! Runtime implementation for the Pantry reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Dispatch Turn**: One action (and every effect and feedback action it
//!   causes) completes before the next action is reduced
//!
//! ## Example
//!
//! ```ignore
//! use pantry_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; effects have finished when this returns
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use pantry_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Effects kept feeding actions back past the configured depth
        ///
        /// Usually a reducer answering its own feedback action with another
        /// effect that produces the same action.
        #[error("Effect feedback exceeded maximum depth of {0}")]
        FeedbackLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use pantry_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_depth(4);
/// assert_eq!(config.max_feedback_depth, 4);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum nesting of actions fed back by effects within one `send`
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_depth: usize) -> Self {
        Self { max_feedback_depth }
    }

    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: 16,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Effect, Mutex, Ordering, Reducer, RwLock, StoreConfig, StoreError};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::marker::PhantomData;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent reads)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Actions are processed one at a time. `send` holds the dispatch turn
    /// until the reducer has run and every effect it returned (including
    /// effects of fed-back actions) has completed, so side effects of
    /// consecutive actions never interleave.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        turn: Arc<Mutex<()>>,
        shutdown: Arc<AtomicBool>,
        actions: PhantomData<fn() -> A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                turn: Arc::new(Mutex::new(())),
                shutdown: Arc::new(AtomicBool::new(false)),
                actions: PhantomData,
            }
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then executes the returned effects in order,
        /// awaiting each one. Actions produced by `Effect::Future` are
        /// dispatched before `send` returns.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down.
        /// - [`StoreError::FeedbackLimitExceeded`] if feedback actions nest
        ///   deeper than [`StoreConfig::max_feedback_depth`]. State changes
        ///   made before the limit was hit are kept.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            let _turn = self.turn.lock().await;

            // Shutdown may have begun while waiting for the turn
            if self.shutdown.load(Ordering::Acquire) {
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            self.dispatch(action, 0).await
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let item_count = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Stop accepting actions
        ///
        /// Waits for the action currently being processed (if any) to finish
        /// its effects. Subsequent `send` calls fail with
        /// [`StoreError::ShutdownInProgress`].
        pub async fn shutdown(&self) {
            tracing::info!("Initiating shutdown");
            self.shutdown.store(true, Ordering::Release);
            let _turn = self.turn.lock().await;
            tracing::info!("Store shut down");
        }

        /// Returns true once `shutdown()` has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Reduce one action and run its effects
        fn dispatch(&self, action: A, depth: usize) -> BoxFuture<'_, Result<(), StoreError>> {
            async move {
                if depth > self.config.max_feedback_depth {
                    tracing::error!(
                        depth,
                        max = self.config.max_feedback_depth,
                        "Feedback depth exceeded, dropping action"
                    );
                    metrics::counter!("store.feedback.limit_exceeded").increment(1);
                    return Err(StoreError::FeedbackLimitExceeded(self.config.max_feedback_depth));
                }

                metrics::counter!("store.actions.total").increment(1);

                let effects = {
                    let mut state = self.state.write().await;
                    let span = tracing::debug_span!("reducer_execution", depth);
                    let _enter = span.enter();
                    self.reducer.reduce(&mut *state, action, &self.environment)
                };

                tracing::trace!(depth, "Reducer returned {} effects", effects.len());

                for effect in effects {
                    self.execute_effect(effect, depth).await?;
                }
                Ok(())
            }
            .boxed()
        }

        /// Execute an effect, feeding any produced action back through `dispatch`
        fn execute_effect(
            &self,
            effect: Effect<A>,
            depth: usize,
        ) -> BoxFuture<'_, Result<(), StoreError>> {
            async move {
                match effect {
                    Effect::None => {
                        tracing::trace!("Executing Effect::None (no-op)");
                    },
                    Effect::Sequential(effects) => {
                        tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                        for effect in effects {
                            self.execute_effect(effect, depth).await?;
                        }
                    },
                    Effect::Future(future) => {
                        tracing::trace!("Executing Effect::Future");
                        metrics::counter!("store.effects.executed").increment(1);
                        if let Some(action) = future.await {
                            tracing::trace!("Effect::Future produced an action, dispatching");
                            metrics::counter!("store.feedback.total").increment(1);
                            self.dispatch(action, depth + 1).await?;
                        }
                    },
                }
                Ok(())
            }
            .boxed()
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                config: self.config.clone(),
                turn: Arc::clone(&self.turn),
                shutdown: Arc::clone(&self.shutdown),
                actions: PhantomData,
            }
        }
    }
}

pub use store::Store;
