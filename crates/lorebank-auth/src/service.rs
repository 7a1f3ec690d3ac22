//! The account service: registration, login checks, session resolution.

use lorebank_core::Account;
use lorebank_storage::AccountStore;

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::SecurityGate;

/// The fields of a registration form submission.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Login identifier; must be unused.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Confirmation copy; must equal `password`.
    pub repeat_password: String,
    /// Security-question answer for the anti-spam gate.
    pub security_answer: String,
}

/// Registration, credential checks, and session-id resolution over the
/// account store.
///
/// Constructed once at startup and carried in the request context; no
/// process-wide login-manager singleton.
#[derive(Clone)]
pub struct AccountService {
    accounts: AccountStore,
    hasher: PasswordHasher,
    gate: SecurityGate,
}

impl AccountService {
    /// Create the service over an account store and security gate.
    pub fn new(accounts: AccountStore, gate: SecurityGate) -> Self {
        Self {
            accounts,
            hasher: PasswordHasher,
            gate,
        }
    }

    /// Register a new account.
    ///
    /// Checks run in a fixed order: duplicate email, password
    /// confirmation, security answer. Only then is the password hashed
    /// and the row inserted. Registration does not establish a session.
    pub async fn register(&self, req: &RegisterRequest) -> Result<Account, AuthError> {
        if self.accounts.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }
        if req.password != req.repeat_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !self.gate.accepts(&req.security_answer) {
            return Err(AuthError::InvalidSecurityAnswer);
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let account = self
            .accounts
            .insert(&req.email, &req.username, &password_hash)
            .await
            .map_err(|e| match e {
                // Two registrations racing past the existence check land
                // on the unique constraint; same outcome either way.
                lorebank_storage::Error::DuplicateEmail => AuthError::DuplicateEmail,
                other => AuthError::Storage(other),
            })?;

        tracing::info!(id = account.id, "registered new account");
        Ok(account)
    }

    /// Check a login attempt and return the account on success.
    ///
    /// The caller establishes the session (signs and sets the cookie).
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !self.check_password(&account, password) {
            return Err(AuthError::BadCredentials);
        }
        Ok(account)
    }

    /// Verify a plaintext password against an account's stored hash.
    pub fn check_password(&self, account: &Account, password: &str) -> bool {
        self.hasher.verify(password, &account.password_hash)
    }

    /// Resolve a session-bound id back to its account.
    ///
    /// `None` (e.g. the account was deleted since the cookie was issued)
    /// means "not authenticated", not an error.
    pub async fn load_session_account(&self, id: i64) -> Result<Option<Account>, AuthError> {
        Ok(self.accounts.find_by_id(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorebank_storage::Database;

    fn request(email: &str, password: &str, repeat: &str, answer: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            username: "a".to_string(),
            password: password.to_string(),
            repeat_password: repeat.to_string(),
            security_answer: answer.to_string(),
        }
    }

    async fn service() -> AccountService {
        let db = Database::in_memory().await.unwrap();
        AccountService::new(db.accounts(), SecurityGate::new("karpaty", "dnipro"))
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service().await;

        let account = service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();
        assert_eq!(account.email, "a@x.com");
        assert!(account.password_hash.starts_with("$argon2"));

        let authed = service.authenticate("a@x.com", "p1").await.unwrap();
        assert_eq!(authed.id, account.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = service().await;
        service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();

        let err = service
            .register(&request("a@x.com", "p2", "p2", "dnipro"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_register_rejects_password_mismatch() {
        let service = service().await;
        let err = service
            .register(&request("a@x.com", "p1", "p2", "karpaty"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_register_rejects_wrong_security_answer() {
        let service = service().await;
        let err = service
            .register(&request("a@x.com", "p1", "p1", "Karpaty"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidSecurityAnswer));
    }

    #[tokio::test]
    async fn test_duplicate_check_precedes_mismatch_check() {
        let service = service().await;
        service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();

        // Same email AND mismatched passwords: duplicate wins.
        let err = service
            .register(&request("a@x.com", "p1", "p2", "karpaty"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = service().await;
        let err = service.authenticate("ghost@x.com", "p1").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = service().await;
        service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();

        let err = service.authenticate("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::BadCredentials));
    }

    #[tokio::test]
    async fn test_check_password_against_stored_hash() {
        let service = service().await;
        let account = service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();

        assert!(service.check_password(&account, "p1"));
        assert!(!service.check_password(&account, "p2"));
    }

    #[tokio::test]
    async fn test_load_session_account() {
        let service = service().await;
        let account = service
            .register(&request("a@x.com", "p1", "p1", "karpaty"))
            .await
            .unwrap();

        let loaded = service.load_session_account(account.id).await.unwrap();
        assert_eq!(loaded.unwrap().email, "a@x.com");

        let missing = service.load_session_account(9999).await.unwrap();
        assert!(missing.is_none());
    }
}
