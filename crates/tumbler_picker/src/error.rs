//! Picker error types

use thiserror::Error;

/// Picker-related errors
///
/// Gesture handling and deceleration never fail; only configuration loading
/// and column addressing report errors.
#[derive(Error, Debug)]
pub enum PickerError {
    /// Configuration document could not be parsed
    #[error("Failed to parse picker config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration parsed but holds unusable values
    #[error("Invalid picker config: {0}")]
    InvalidConfig(String),

    /// No column at the given position
    #[error("Column {index} out of range (picker has {len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },
}

/// Result type for picker operations
pub type Result<T> = std::result::Result<T, PickerError>;
