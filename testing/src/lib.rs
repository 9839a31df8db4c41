//! # Pantry Testing
//!
//! Testing utilities and helpers for the Pantry reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use pantry_testing::{InMemoryStorage, SequentialIdGenerator};
//! use pantry_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_add_flow() {
//!     let storage = InMemoryStorage::new();
//!     let env = ListEnvironment::new(SequentialIdGenerator::shared("item"), storage.shared());
//!     let store = Store::new(ListState::default(), ListReducer::new(), env);
//!
//!     store.send(ListAction::AddItem { name: "Milk".into() }).await?;
//!
//!     assert_eq!(storage.write_count(), 1);
//! }
//! ```

use pantry_core::environment::IdGenerator;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};


/// In-memory and failing storage backends
pub mod storage_mocks;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Arc, AtomicUsize, IdGenerator, Mutex, Ordering, VecDeque};

    /// Predictable ids: `prefix-1`, `prefix-2`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use pantry_testing::mocks::SequentialIdGenerator;
    /// use pantry_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new("item");
    /// assert_eq!(ids.new_id(), "item-1");
    /// assert_eq!(ids.new_id(), "item-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicUsize,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose ids start at `prefix-1`
        #[must_use]
        pub fn new(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicUsize::new(1),
            }
        }

        /// Same as [`new`](Self::new), already behind an `Arc` for environments
        #[must_use]
        pub fn shared(prefix: impl Into<String>) -> Arc<Self> {
            Arc::new(Self::new(prefix))
        }

        /// Number of ids handed out so far
        #[must_use]
        pub fn issued(&self) -> usize {
            self.next.load(Ordering::SeqCst) - 1
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn new_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Replays a fixed script of ids, then repeats the last one forever
    ///
    /// Useful for forcing collisions with ids that already exist.
    ///
    /// # Example
    ///
    /// ```
    /// use pantry_testing::mocks::ScriptedIdGenerator;
    /// use pantry_core::environment::IdGenerator;
    ///
    /// let ids = ScriptedIdGenerator::new(["a", "b"]);
    /// assert_eq!(ids.new_id(), "a");
    /// assert_eq!(ids.new_id(), "b");
    /// assert_eq!(ids.new_id(), "b");
    /// ```
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: Mutex<VecDeque<String>>,
        last: Mutex<String>,
    }

    impl ScriptedIdGenerator {
        /// Create a generator that replays `ids` in order
        pub fn new<I, T>(ids: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: Mutex::new(ids.into_iter().map(Into::into).collect()),
                last: Mutex::new(String::from("scripted")),
            }
        }

        /// Same as [`new`](Self::new), already behind an `Arc` for environments
        pub fn shared<I, T>(ids: I) -> Arc<Self>
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Arc::new(Self::new(ids))
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn new_id(&self) -> String {
            let next = self
                .script
                .lock()
                .ok()
                .and_then(|mut script| script.pop_front());
            let Ok(mut last) = self.last.lock() else {
                return next.unwrap_or_default();
            };
            if let Some(id) = next {
                last.clone_from(&id);
            }
            last.clone()
        }
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Honors `RUST_LOG`; defaults to `debug`. Safe to call from every test, only
/// the first call installs the subscriber.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{ScriptedIdGenerator, SequentialIdGenerator};
pub use reducer_test::{ReducerTest, assertions};
pub use storage_mocks::{FailingStorage, InMemoryStorage};
