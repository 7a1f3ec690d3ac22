//! # lorebank-storage
//!
//! SQL-backed persistence for Lorebank.
//!
//! This crate provides:
//! - [`Database`] — connection pool plus schema bootstrap
//! - [`FactStore`] — append-and-read access to the `facts` table
//! - [`AccountStore`] — account rows in the `users` table
//! - Storage error types
//!
//! Each request-scoped operation is a single statement against the pool;
//! there is no cross-request state held here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod accounts;
pub mod database;
pub mod error;
pub mod facts;

pub use accounts::AccountStore;
pub use database::Database;
pub use error::{Error, Result};
pub use facts::FactStore;
