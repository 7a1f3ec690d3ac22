//! Facts and person filtering.
//!
//! A [`Fact`] is a short biographical entry about one of the two subject
//! people, authored by a registered account. Facts are created once and
//! never updated or deleted by the application.

use serde::Serialize;

use crate::error::{Error, Result};

/// The two subject people facts can be about, in canonical spelling.
pub const SUBJECTS: [&str; 2] = ["Shavkoon", "Vasyl"];

/// Resolve a URL path segment to a canonical subject name.
///
/// Matching is case-insensitive so `/post/shavkoon` and `/post/Shavkoon`
/// address the same subject. Returns `None` for unknown people.
pub fn resolve_subject(segment: &str) -> Option<&'static str> {
    SUBJECTS
        .iter()
        .find(|s| s.eq_ignore_ascii_case(segment))
        .copied()
}

/// A persisted fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Fact {
    /// Storage-assigned identifier.
    pub id: i64,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Id of the authoring account.
    pub author_id: i64,
    /// Which subject the fact is about.
    pub person: String,
}

/// A validated, not-yet-persisted fact.
///
/// Constructed through [`NewFact::new`], which rejects empty fields, so a
/// value of this type always satisfies the non-empty invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFact {
    /// Short headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Which subject the fact is about.
    pub person: String,
    /// Id of the authoring account, resolved from the session beforehand.
    pub author_id: i64,
}

impl NewFact {
    /// Validate form fields into a `NewFact`.
    ///
    /// An empty (or whitespace-only) `title`, `text`, or `person` is
    /// rejected as a missing field.
    pub fn new(title: &str, text: &str, person: &str, author_id: i64) -> Result<Self> {
        if title.trim().is_empty() {
            return Err(Error::missing_field("title"));
        }
        if text.trim().is_empty() {
            return Err(Error::missing_field("text"));
        }
        if person.trim().is_empty() {
            return Err(Error::missing_field("person"));
        }
        Ok(Self {
            title: title.to_string(),
            text: text.to_string(),
            person: person.to_string(),
            author_id,
        })
    }
}

/// Filter for listing facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFilter {
    /// No filter; every fact matches.
    All,
    /// Only facts about the named person match.
    ByPerson(String),
}

impl PersonFilter {
    /// Parse a form value into a filter.
    ///
    /// The sentinel `"All"` (any capitalization; both `All` and `all`
    /// appear in the wild) means no filter. Anything else filters on
    /// exact `person` equality.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            PersonFilter::All
        } else {
            PersonFilter::ByPerson(value.to_string())
        }
    }

    /// Whether a fact's `person` field passes this filter.
    pub fn matches(&self, person: &str) -> bool {
        match self {
            PersonFilter::All => true,
            PersonFilter::ByPerson(p) => p == person,
        }
    }
}
