//! Registered accounts.

use serde::Serialize;

/// A registered account, capable of authenticating and authoring facts.
///
/// The `password_hash` is a PHC-format string produced by the auth crate;
/// plaintext passwords are never stored. It is skipped during
/// serialization so it can never leak into a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Account {
    /// Storage-assigned identifier; also the session key.
    pub id: i64,
    /// Unique email address, the login identifier.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Salted one-way password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,
}
