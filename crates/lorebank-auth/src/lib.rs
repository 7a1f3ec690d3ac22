//! Account service and session primitives for Lorebank.
//!
//! Provides:
//! - [`AccountService`] — registration, login checks, session-id resolution
//! - [`PasswordHasher`] — salted one-way hashing (argon2id, PHC strings)
//! - [`SessionKey`] — signing and verifying session tokens
//! - [`SecurityGate`] — the registration-time security-question check
//! - [`SessionLayer`] / [`SessionService`] — Tower middleware resolving a
//!   signed cookie to a [`CurrentAccount`] request extension
//! - [`AuthError`] — auth-specific error types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod middleware;
mod password;
mod service;
mod session;

pub use error::AuthError;
pub use middleware::{AccountLoader, SessionLayer, SessionService};
pub use password::PasswordHasher;
pub use service::{AccountService, RegisterRequest};
pub use session::{
    account_from_parts, clear_cookie, session_cookie, token_from_cookie_header, CurrentAccount,
    SessionKey, SESSION_COOKIE,
};

/// The registration-time security-question gate.
///
/// A crude anti-spam measure: the submitted answer must exactly match
/// (case-sensitively) one of the two process-configured accepted values.
#[derive(Clone, Debug)]
pub struct SecurityGate {
    first_answer: String,
    second_answer: String,
}

impl SecurityGate {
    /// Create a gate accepting exactly these two answers.
    pub fn new(first_answer: impl Into<String>, second_answer: impl Into<String>) -> Self {
        Self {
            first_answer: first_answer.into(),
            second_answer: second_answer.into(),
        }
    }

    /// Whether `answer` is one of the accepted values.
    pub fn accepts(&self, answer: &str) -> bool {
        answer == self.first_answer || answer == self.second_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_accepts_either_answer() {
        let gate = SecurityGate::new("karpaty", "dnipro");
        assert!(gate.accepts("karpaty"));
        assert!(gate.accepts("dnipro"));
    }

    #[test]
    fn test_gate_is_case_sensitive() {
        let gate = SecurityGate::new("karpaty", "dnipro");
        assert!(!gate.accepts("Karpaty"));
        assert!(!gate.accepts("DNIPRO"));
        assert!(!gate.accepts(""));
    }
}
