//! Application context
//!
//! Holds the state the command layer operates on. A host creates one context
//! per process and passes it to every command.

use std::sync::Arc;

use crate::config::AppPaths;
use crate::core::history::HistoryManager;
use crate::core::storage::{self, KeyValueStore};

pub struct AppContext {
    pub history: HistoryManager,
}

impl AppContext {
    /// Build a ready context over an existing store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let mut history = HistoryManager::new(store);
        history.load();
        Self { history }
    }

    /// Open the on-disk store under `paths` and load persisted state
    pub fn open(paths: &AppPaths) -> Self {
        Self::new(storage::open_store(paths))
    }

    /// Open the store in the platform data directory
    pub fn open_default() -> Self {
        match AppPaths::from_project_dirs() {
            Ok(paths) => Self::open(&paths),
            Err(e) => {
                tracing::error!(error = %e, "no data directory, history will not persist");
                Self::new(Arc::new(storage::MemoryStore::new()))
            }
        }
    }

    pub fn precision(&self) -> u8 {
        self.history.precision()
    }
}
