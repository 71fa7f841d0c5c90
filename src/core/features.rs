//! Feature modules
//!
//! Each feature exposes pure operations; persistence and presentation state
//! live in `core::history` and `shared::settings`.

pub mod unit_converter;
