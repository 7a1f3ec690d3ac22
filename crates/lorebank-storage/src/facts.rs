//! The fact store.
//!
//! Facts are append-only from the application's point of view: there are
//! no update or delete operations, and rows are only ever removed by
//! external administration.

use sqlx::SqlitePool;

use lorebank_core::{Fact, NewFact, PersonFilter};

use crate::error::Result;

/// Append-and-read access to the `facts` table.
#[derive(Clone)]
pub struct FactStore {
    pool: SqlitePool,
}

impl FactStore {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a validated fact and return it with its assigned id.
    pub async fn add_fact(&self, fact: &NewFact) -> Result<Fact> {
        let stored = sqlx::query_as::<_, Fact>(
            "INSERT INTO facts (title, text, author_id, person) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, title, text, author_id, person",
        )
        .bind(&fact.title)
        .bind(&fact.text)
        .bind(fact.author_id)
        .bind(&fact.person)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(id = stored.id, person = %stored.person, "fact stored");
        Ok(stored)
    }

    /// List facts, optionally filtered by person, in insertion order.
    pub async fn list_facts(&self, filter: &PersonFilter) -> Result<Vec<Fact>> {
        let facts = match filter {
            PersonFilter::All => {
                sqlx::query_as::<_, Fact>(
                    "SELECT id, title, text, author_id, person FROM facts ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
            PersonFilter::ByPerson(person) => {
                sqlx::query_as::<_, Fact>(
                    "SELECT id, title, text, author_id, person FROM facts \
                     WHERE person = ? ORDER BY id",
                )
                .bind(person)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(facts)
    }

    /// Fetch a single fact by id, `None` if absent.
    pub async fn get_fact(&self, id: i64) -> Result<Option<Fact>> {
        let fact = sqlx::query_as::<_, Fact>(
            "SELECT id, title, text, author_id, person FROM facts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fact)
    }
}
