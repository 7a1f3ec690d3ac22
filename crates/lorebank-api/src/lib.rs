//! HTTP server for Lorebank.
//!
//! Wires the account service and fact store into an axum router. All
//! shared handles live in [`AppState`], constructed explicitly at startup
//! and passed to handlers — no process-wide singletons.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use lorebank_auth::{AccountService, SecurityGate, SessionKey, SessionLayer};
use lorebank_storage::Database;

pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
pub use error::AppError;

/// Shared request context: database handles, the account service, and
/// the session signing key.
#[derive(Clone)]
pub struct AppState {
    /// Database handle; fact and account stores hang off it.
    pub db: Database,
    /// Registration and login checks.
    pub accounts: Arc<AccountService>,
    /// Session token signing/verification.
    pub sessions: SessionKey,
}

impl AppState {
    /// Build the context from its configured parts.
    pub fn new(db: Database, gate: SecurityGate, sessions: SessionKey) -> Self {
        let accounts = Arc::new(AccountService::new(db.accounts(), gate));
        Self {
            db,
            accounts,
            sessions,
        }
    }
}

/// Build the application router over a prepared state.
///
/// The session layer runs on every route; gating is decided per handler.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionLayer::new(state.accounts.clone(), state.sessions.clone());

    Router::new()
        .route("/", get(routes::index))
        .route("/login", get(routes::login_form).post(routes::login))
        .route(
            "/register",
            get(routes::register_form).post(routes::register),
        )
        .route("/logout", get(routes::logout))
        .route(
            "/post/{person}",
            get(routes::submit_form).post(routes::submit_fact),
        )
        .route("/read", get(routes::read_form).post(routes::read))
        .route("/read/{id}", get(routes::read_one))
        .layer(session_layer)
        .with_state(state)
}
