//! Key-value persistence for recipebox
//!
//! Provides a small byte-oriented storage abstraction and its two
//! implementations:
//! - `Database`: sled-backed, persisted in the user's data directory
//! - `MemoryStore`: process-local, for tests and throwaway sessions
//!
//! Callers own the encoding of values; this layer only moves bytes.

use sled::{Db, Tree};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub mod error;

pub use error::DbError;

/// Narrow interface over persistent key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DbError>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the backing store cannot be written.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), DbError>;

    /// Delete `key`, returning whether it was present
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<bool, DbError>;
}

/// Sled-backed store
///
/// All recipebox keys live in a single `prefs` tree.
pub struct Database {
    db: Db,
    prefs: Tree,
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use recipebox::db::Database;
    /// let db = Database::open("my_store").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let prefs = db.open_tree("prefs")?;
        Ok(Self { db, prefs })
    }

    /// Flush pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Remove every stored key
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the tree cannot be cleared.
    pub fn clear(&self) -> Result<(), DbError> {
        self.prefs.clear()?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DbError> {
        Ok(self.prefs.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), DbError> {
        self.prefs.insert(key.as_bytes(), value)?;
        // favorites are small and written once per click
        self.prefs.flush()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, DbError> {
        let removed = self.prefs.remove(key.as_bytes())?.is_some();
        self.prefs.flush()?;
        Ok(removed)
    }
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, DbError> {
        self.entries
            .lock()
            .map_err(|e| DbError::Unavailable(format!("memory store poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DbError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), DbError> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, DbError> {
        Ok(self.lock()?.remove(key).is_some())
    }
}
