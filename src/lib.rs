//! Unit conversion engine and conversion history for the converter widget.
//!
//! - [`core::features::unit_converter`]: pure conversions over fixed unit categories
//! - [`core::history`]: bounded, persisted log of successful conversions
//! - [`api::commands`]: the command surface a UI host calls
//!
//! ```no_run
//! use conversion_widgets::api::commands::converter;
//! use conversion_widgets::context::AppContext;
//! use conversion_widgets::shared::types::ConvertUnitsRequest;
//! use conversion_widgets::Category;
//!
//! let mut context = AppContext::open_default();
//! let response = converter::convert_and_record(
//!     &mut context,
//!     ConvertUnitsRequest {
//!         category: Category::Distance,
//!         value: "1".to_string(),
//!         from_unit: "km".to_string(),
//!         to_unit: "m".to_string(),
//!     },
//! )?;
//! assert_eq!(response.formatted_result, "1000");
//! # Ok::<(), conversion_widgets::AppError>(())
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod core;
pub mod logging;
pub mod shared;

pub use crate::core::features::unit_converter::{convert, format_result, Category};
pub use crate::core::history::HistoryManager;
pub use crate::shared::error::{AppError, AppResult, ConversionError};
