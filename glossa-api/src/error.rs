//! API error types

use glossa_core::{CoreError, LocaleError};
use std::string::FromUtf8Error;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Segmentation or message error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// An argument could not be read
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Argument name, or the raw text when no name was found
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<LocaleError> for ApiError {
    fn from(err: LocaleError) -> Self {
        ApiError::Core(CoreError::Locale(err))
    }
}

impl From<glossa_engine::EngineError> for ApiError {
    fn from(err: glossa_engine::EngineError) -> Self {
        match err {
            glossa_engine::EngineError::Core(core) => ApiError::Core(core),
            other => ApiError::Config(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
