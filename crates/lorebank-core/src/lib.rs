//! Lorebank Core — shared domain types, validation, and errors.
//!
//! This crate provides the foundational types used across all Lorebank
//! crates. It has no internal Lorebank dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`fact`]: Facts and person filtering
//! - [`account`]: Registered accounts

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod account;
pub mod error;
pub mod fact;

// Re-export key types at crate root for convenience
pub use account::Account;
pub use error::{Error, Result};
pub use fact::{resolve_subject, Fact, NewFact, PersonFilter, SUBJECTS};
