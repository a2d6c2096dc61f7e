//! # Error Handling
//!
//! Crate-level error types for the Pressroom bootstrap, built on `thiserror`.
//! The loader returns these instead of terminating the process; the fatal
//! exit policy lives in the binary's `main`.

use crate::secrets::SecretsError;

/// Custom result type for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Pressroom bootstrap
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret retrieval errors
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    /// Configuration validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Host application hand-off errors
    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new bootstrap error
    pub fn bootstrap<S: Into<String>>(message: S) -> Self {
        Self::Bootstrap(message.into())
    }
}
