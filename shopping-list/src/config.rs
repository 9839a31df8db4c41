//! Configuration for the shopping-list feature.

/// Settings for the shopping-list environment
///
/// # Example
///
/// ```
/// use shopping_list::ListConfig;
///
/// let config = ListConfig::default()
///     .with_storage_key("groceries")
///     .with_max_id_attempts(3);
///
/// assert_eq!(config.storage_key, "groceries");
/// assert_eq!(config.max_id_attempts, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Key of the storage slot holding the list
    pub storage_key: String,
    /// How many ids to draw before giving up on an add whose ids all collide
    pub max_id_attempts: usize,
}

impl ListConfig {
    /// Storage key used unless configured otherwise
    pub const DEFAULT_STORAGE_KEY: &'static str = "items";

    /// Id draws per add unless configured otherwise
    pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 8;

    /// Create a new configuration with custom values
    ///
    /// `max_id_attempts` is raised to at least 1.
    #[must_use]
    pub fn new(storage_key: impl Into<String>, max_id_attempts: usize) -> Self {
        Self {
            storage_key: storage_key.into(),
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    /// Set the storage key
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the id attempts per add (at least 1)
    #[must_use]
    pub fn with_max_id_attempts(mut self, attempts: usize) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STORAGE_KEY, Self::DEFAULT_MAX_ID_ATTEMPTS)
    }
}
