//! The account store.

use sqlx::SqlitePool;

use lorebank_core::Account;

use crate::error::{Error, Result};

/// Access to account rows in the `users` table.
#[derive(Clone)]
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account and return it with its assigned id.
    ///
    /// `password_hash` must already be a derived hash; this layer never
    /// sees plaintext. A unique-constraint violation on `email` surfaces
    /// as [`Error::DuplicateEmail`] so racing registrations collapse to
    /// the same outcome as the up-front existence check.
    pub async fn insert(&self, email: &str, username: &str, password_hash: &str) -> Result<Account> {
        let account = sqlx::query_as::<_, Account>(
            "INSERT INTO users (email, username, password_hash) \
             VALUES (?, ?, ?) \
             RETURNING id, email, username, password_hash",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::DuplicateEmail,
            _ => Error::Database(e),
        })?;

        tracing::info!(id = account.id, "account created");
        Ok(account)
    }

    /// Look up an account by email, `None` if absent.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, username, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    /// Look up an account by id, `None` if absent.
    ///
    /// This is the session-loader query: a session whose id no longer
    /// resolves is simply anonymous.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, email, username, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let db = Database::in_memory().await.unwrap();
        let accounts = db.accounts();

        let created = accounts.insert("a@x.com", "a", "hash-a").await.unwrap();
        assert!(created.id > 0);

        let found = accounts.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found, created);

        assert!(accounts.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_without_second_row() {
        let db = Database::in_memory().await.unwrap();
        let accounts = db.accounts();

        let first = accounts.insert("a@x.com", "a", "hash-a").await.unwrap();
        let err = accounts.insert("a@x.com", "other", "hash-b").await.unwrap_err();
        assert!(matches!(err, Error::DuplicateEmail));

        // The original row is untouched and still the only one.
        let found = accounts.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.username, "a");
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.accounts().find_by_id(42).await.unwrap().is_none());
    }
}
