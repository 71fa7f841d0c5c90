//! Command modules for the UI host
//!
//! Each command takes the [`AppContext`](crate::context::AppContext) and
//! plain request types, and returns serializable responses.
//!
//! ## Architecture
//!
//! - `converter`: conversions, quick comparison, category listing
//! - `history`: history queries and mutations
//! - `settings`: precision and dark mode

pub mod converter;
pub mod history;
pub mod settings;
