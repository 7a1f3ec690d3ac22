//! Connection pool and schema bootstrap.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::accounts::AccountStore;
use crate::error::Result;
use crate::facts::FactStore;

/// Schema for the two tables, applied at startup.
///
/// Mirrors the create-if-missing bootstrap the service has always done;
/// there is no migration history to replay.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT    NOT NULL UNIQUE,
    username      TEXT    NOT NULL,
    password_hash TEXT    NOT NULL
);
CREATE TABLE IF NOT EXISTS facts (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT    NOT NULL,
    text      TEXT    NOT NULL,
    author_id INTEGER NOT NULL REFERENCES users(id),
    person    TEXT    NOT NULL
);
";

/// Shared handle to the underlying database.
///
/// Cheap to clone (pool internals are reference-counted). Handlers reach
/// the stores through [`Database::facts`] and [`Database::accounts`]
/// rather than a process-wide singleton.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url` and bootstrap the schema.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(url).await?;
        let db = Self { pool };
        db.bootstrap().await?;
        Ok(db)
    }

    /// An in-memory database for tests.
    ///
    /// Pinned to a single connection: every pooled connection to
    /// `sqlite::memory:` would otherwise get its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let db = Self { pool };
        db.bootstrap().await?;
        Ok(db)
    }

    async fn bootstrap(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        tracing::debug!("schema bootstrap complete");
        Ok(())
    }

    /// Access the fact store.
    pub fn facts(&self) -> FactStore {
        FactStore::new(self.pool.clone())
    }

    /// Access the account store.
    pub fn accounts(&self) -> AccountStore {
        AccountStore::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        // Re-running the schema against a live database must be a no-op.
        db.bootstrap().await.unwrap();
    }
}
