//! Error types for settings

use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(String),

    /// A timing field was given text that is not a non-negative integer
    #[error("Invalid value for {field}: {input:?}")]
    InvalidNumber {
        field: &'static str,
        input: String,
    },

    /// A mode name did not match any trigger mode
    #[error("Unknown seek trigger mode: {0}")]
    UnknownMode(String),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;
