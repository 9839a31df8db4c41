//! Storage backends for the list's key-value slot.
//!
//! - [`FileStorage`]: one JSON file per key in a directory (native builds)
//! - `LocalStorage`: the browser's `window.localStorage` (feature `web`)
//!
//! In-memory and failing backends for tests live in `pantry-testing`.

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use pantry_core::environment::{KeyValueStorage, StorageError};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    /// Stores each key as `<dir>/<key>.json`
    ///
    /// Each write goes to its own temporary file in `dir`, which is synced and
    /// then renamed over the target. Readers see either the old or the new
    /// value, and concurrent writers to one key never share a staging file.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        dir: PathBuf,
    }

    impl FileStorage {
        /// Creates storage rooted at `dir`; the directory is created on first write
        #[must_use]
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        /// Directory holding the files
        #[must_use]
        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// File backing `key`
        ///
        /// # Errors
        ///
        /// [`StorageError::InvalidKey`] for empty keys, `.`/`..`, or keys with
        /// path separators.
        pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
            let invalid = key.is_empty()
                || key == "."
                || key == ".."
                || key.contains(['/', '\\'])
                || key.contains('\0');
            if invalid {
                return Err(StorageError::InvalidKey(key.to_string()));
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl KeyValueStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let path = self.path_for(key)?;
            match std::fs::read_to_string(&path) {
                Ok(value) => Ok(Some(value)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(error) => Err(error.into()),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let path = self.path_for(key)?;
            std::fs::create_dir_all(&self.dir)?;

            let staging = tempfile::NamedTempFile::new_in(&self.dir)?;
            let mut file = staging.as_file();
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            staging.persist(&path).map_err(|error| error.error)?;

            tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote storage file");
            Ok(())
        }
    }
}

#[cfg(feature = "web")]
pub use web::LocalStorage;

#[cfg(feature = "web")]
mod web {
    use pantry_core::environment::{KeyValueStorage, StorageError};

    /// The browser's `window.localStorage`
    ///
    /// Looks the storage object up on every call, so the type holds no JS
    /// handles and stays `Send + Sync`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            let window = web_sys::window()
                .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;
            window
                .local_storage()
                .map_err(|error| StorageError::Unavailable(format!("{error:?}")))?
                .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
        }
    }

    impl KeyValueStorage for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::storage()?
                .get_item(key)
                .map_err(|error| StorageError::Backend(format!("{error:?}")))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|error| StorageError::Backend(format!("{error:?}")))
        }
    }
}
