//! Auth-specific error types.

/// Errors that can occur during registration and authentication.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// An account with the submitted email already exists.
    #[error("a user with this email already exists")]
    DuplicateEmail,

    /// `password` and `repeat_password` differ.
    #[error("passwords must match")]
    PasswordMismatch,

    /// The security-question answer is not one of the accepted values.
    #[error("invalid security answer")]
    InvalidSecurityAnswer,

    /// No account exists for the submitted email.
    #[error("no account with this email")]
    NotFound,

    /// The password does not verify against the stored hash.
    #[error("email or password is incorrect")]
    BadCredentials,

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Error from the storage layer.
    #[error("Storage error: {0}")]
    Storage(#[from] lorebank_storage::Error),
}

impl AuthError {
    /// Whether this error should be shown to the user (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::DuplicateEmail
                | AuthError::PasswordMismatch
                | AuthError::InvalidSecurityAnswer
                | AuthError::NotFound
                | AuthError::BadCredentials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::PasswordMismatch.to_string(),
            "passwords must match"
        );
        assert_eq!(
            AuthError::DuplicateEmail.to_string(),
            "a user with this email already exists"
        );
    }

    #[test]
    fn test_is_client_error() {
        assert!(AuthError::BadCredentials.is_client_error());
        assert!(AuthError::InvalidSecurityAnswer.is_client_error());
        // Hash failures are a server-side issue, not a client error
        assert!(!AuthError::Hash("err".into()).is_client_error());
        assert!(!AuthError::Storage(lorebank_storage::Error::DuplicateEmail).is_client_error());
    }
}
