//! Durable key-value storage.
//!
//! The cart and visitor identity persist through a [`KeyValueStore`]
//! injected at the composition root. Environments without a usable data
//! directory get a [`NullStore`], which keeps every operation working
//! in-memory only; persistence is an optimization, not a correctness
//! requirement.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when writing to a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A durable string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be written.
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal ("visitor_id", "cart_<id>") but sanitize
        // anyway so a hostile key cannot escape the data directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value");
                None
            }
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
        }
        // Write-then-rename so a crash mid-write never leaves a truncated
        // value under the key. Sanitized keys cannot contain '.', so the
        // temp name cannot collide with another key's file.
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// No-op store for environments without durable storage.
///
/// Reads always miss and writes always succeed, so callers follow the
/// same code path as with a real store and simply never see data survive
/// a restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
