//! String key-value persistence
//!
//! The history manager is the only writer. Values are opaque strings; callers
//! own their encoding and must treat unreadable values as absent.

use redb::{Database, ReadableTable, TableDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::AppPaths;
use crate::shared::error::{AppError, AppResult};

/// Redb table holding every persisted key
/// Key: logical key name, Value: serialized value
const STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("widget_state");

/// Storage trait for widget state persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    /// Remove the key; removing an absent key is not an error
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Redb-based storage implementation
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Io(format!("Failed to create data directory: {}", e)))?;
        }

        let db = Database::create(path)?;

        // Initialize table so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _table = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "opened state database");
        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(STATE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// In-memory storage, used by tests and as a fallback if the database fails
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| AppError::Storage(format!("Mutex poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

/// Open the on-disk store, falling back to memory if the database cannot be opened
pub fn open_store(paths: &AppPaths) -> Arc<dyn KeyValueStore> {
    match RedbStore::open(&paths.database_path()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "failed to open state database, using in-memory fallback");
            Arc::new(MemoryStore::new())
        }
    }
}
