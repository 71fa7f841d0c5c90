//! History command module

use crate::context::AppContext;
use crate::shared::types::HistoryEntry;

/// All entries, newest first
pub fn get_history(context: &AppContext) -> Vec<HistoryEntry> {
    context.history.list().to_vec()
}

/// Remove one entry; returns whether it existed
pub fn remove_history_entry(context: &mut AppContext, id: u64) -> bool {
    context.history.remove(id)
}

pub fn clear_history(context: &mut AppContext) {
    context.history.clear();
}
