use serde::Serialize;
use thiserror::Error;

use crate::core::features::unit_converter::Category;

/// Conversion failures
///
/// All variants are user-correctable: the caller shows the message and does
/// not record a history entry.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConversionError {
    /// The value is outside the category's accepted range
    #[error("{message}")]
    Domain { category: Category, message: String },

    /// The unit symbol is not part of the category's unit set
    #[error("Unknown {category} unit: {unit}")]
    UnknownUnit { category: Category, unit: String },

    /// The input could not be read as a finite number
    #[error("Not a valid number: {input}")]
    InvalidNumber { input: String },

    /// The conversion overflowed to a non-finite value
    #[error("Result of converting {value} {from_unit} to {to_unit} is out of range")]
    NonFinite {
        value: f64,
        from_unit: String,
        to_unit: String,
    },
}

#[derive(Error, Debug, Serialize)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Conversion Error: {0}")]
    Conversion(#[from] ConversionError),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(err: redb::DatabaseError) -> Self {
        AppError::Storage(format!("Failed to open database: {}", err))
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(err: redb::TransactionError) -> Self {
        AppError::Storage(format!("Failed to begin transaction: {}", err))
    }
}

impl From<redb::TableError> for AppError {
    fn from(err: redb::TableError) -> Self {
        AppError::Storage(format!("Failed to open table: {}", err))
    }
}

impl From<redb::StorageError> for AppError {
    fn from(err: redb::StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(err: redb::CommitError) -> Self {
        AppError::Storage(format!("Failed to commit: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
