//! Settings command module
//!
//! Handles precision and dark mode persistence.

use crate::context::AppContext;
use crate::shared::settings::Preferences;

pub fn get_settings(context: &AppContext) -> Preferences {
    context.history.preferences()
}

/// Set the display precision; out-of-range values are clamped to 0..=10
pub fn set_precision(context: &mut AppContext, precision: i64) -> Preferences {
    context.history.set_precision(Preferences::clamp_precision(precision));
    context.history.preferences()
}

pub fn set_dark_mode(context: &mut AppContext, enabled: bool) -> Preferences {
    context.history.set_dark_mode(enabled);
    context.history.preferences()
}

pub fn toggle_dark_mode(context: &mut AppContext) -> Preferences {
    context.history.toggle_dark_mode();
    context.history.preferences()
}
