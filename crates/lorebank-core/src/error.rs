//! Error types for lorebank-core

use thiserror::Error;

/// Result type alias for lorebank-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lorebank-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required form field was missing or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the offending field
        field: &'static str,
    },
}

impl Error {
    /// Creates a missing-field validation error.
    pub fn missing_field(field: &'static str) -> Self {
        Error::MissingField { field }
    }
}
