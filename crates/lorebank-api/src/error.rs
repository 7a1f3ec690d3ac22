//! HTTP-facing error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use lorebank_auth::AuthError;

/// Errors a handler can surface as a response.
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration or credential failure that escaped the handler's
    /// own redirect branches.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Storage failure on a read path; uncaught by design.
    #[error("Storage error: {0}")]
    Storage(#[from] lorebank_storage::Error),

    /// Storage failure while persisting a fact; the one write failure
    /// the service reports in plain text.
    #[error("failed to store the fact")]
    SubmitFailed,

    /// `/read/{id}` with no such fact.
    #[error("no fact with id {0}")]
    FactNotFound(i64),

    /// `/post/{person}` for someone facts aren't kept about.
    #[error("unknown person: {0}")]
    UnknownPerson(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Auth(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SubmitFailed => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::FactNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnknownPerson(_) => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let body = match self {
            // Wording kept from the service's long-standing behavior.
            AppError::SubmitFailed => "Failed to connect to the database :(".to_string(),
            other => other.to_string(),
        };

        (status, body).into_response()
    }
}
