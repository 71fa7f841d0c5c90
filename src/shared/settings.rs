use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::core::storage::KeyValueStore;
use crate::shared::error::AppResult;

pub const PRECISION_KEY: &str = "precision";
pub const DARK_MODE_KEY: &str = "darkMode";

pub const DEFAULT_PRECISION: u8 = 6;
pub const MAX_PRECISION: u8 = 10;

/// Process-wide display preferences
///
/// Precision controls rounding of newly formatted results only; entries
/// already in history keep the text they were recorded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../target/ts-bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub precision: u8,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            dark_mode: false,
        }
    }
}

impl Preferences {
    /// Clamp any integer into the accepted precision range
    pub fn clamp_precision(precision: i64) -> u8 {
        // Range is 0..=10, so the cast cannot truncate
        precision.clamp(0, i64::from(MAX_PRECISION)) as u8
    }

    /// Load preferences from the store.
    ///
    /// Missing keys fall back to defaults silently; unreadable values fall
    /// back to defaults with a warning.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            precision: load_precision(store).unwrap_or(defaults.precision),
            dark_mode: load_dark_mode(store).unwrap_or(defaults.dark_mode),
        }
    }

    pub fn save_precision(&self, store: &dyn KeyValueStore) -> AppResult<()> {
        store.set(PRECISION_KEY, &self.precision.to_string())
    }

    pub fn save_dark_mode(&self, store: &dyn KeyValueStore) -> AppResult<()> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> AppResult<()> {
        self.save_precision(store)?;
        self.save_dark_mode(store)
    }
}

fn load_precision(store: &dyn KeyValueStore) -> Option<u8> {
    let raw = read_key(store, PRECISION_KEY)?;
    match raw.trim().parse::<i64>() {
        Ok(value) => {
            let clamped = Preferences::clamp_precision(value);
            if i64::from(clamped) != value {
                tracing::warn!(value, clamped, "stored precision out of range, clamping");
            }
            Some(clamped)
        }
        Err(e) => {
            tracing::warn!(raw = %raw, error = %e, "stored precision is malformed, using default");
            None
        }
    }
}

fn load_dark_mode(store: &dyn KeyValueStore) -> Option<bool> {
    let raw = read_key(store, DARK_MODE_KEY)?;
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        other => {
            tracing::warn!(raw = %other, "stored dark mode flag is malformed, using default");
            None
        }
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read preference, using default");
            None
        }
    }
}
