//! Error types for lorebank-storage

use thiserror::Error;

/// Result type alias for lorebank-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lorebank-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from lorebank-core
    #[error("Core error: {0}")]
    Core(#[from] lorebank_core::Error),

    /// Database error (connection loss, statement failure)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An account with this email already exists
    #[error("an account with this email already exists")]
    DuplicateEmail,
}

impl Error {
    /// Whether this error reflects bad input rather than a backend fault.
    ///
    /// Callers use this to pick between a user-facing message and a
    /// generic failure response.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Core(_) | Error::DuplicateEmail)
    }
}
