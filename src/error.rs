use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Everything that can go wrong between a user action and its outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("Failed to load file: {reason}")]
    Load { reason: String },

    #[error("Column {column} does not exist.")]
    ColumnNotFound { column: String },

    #[error("Column {column} is not numeric.")]
    NotNumeric { column: String },

    #[error("Select a column to analyse by clicking its header.")]
    NoColumnSelected,

    #[error("Load a data file first.")]
    NoData,

    #[error("Enter a value to filter by.")]
    EmptyFilterQuery,

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl AppError {
    pub fn load(reason: impl Into<String>) -> Self {
        AppError::Load { reason: reason.into() }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        AppError::Config { reason: reason.into() }
    }
}
