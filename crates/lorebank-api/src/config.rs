//! Environment-derived server configuration.

use std::env;

use anyhow::{Context, Result};

/// Everything the binary needs from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// sqlx connection string.
    pub database_url: String,
    /// Session-signing secret.
    pub session_secret: String,
    /// First accepted security-question answer.
    pub first_answer: String,
    /// Second accepted security-question answer.
    pub second_answer: String,
    /// Listen address.
    pub bind_addr: String,
}

impl Config {
    /// Load the configuration, failing on any missing secret.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            session_secret: required("SESSION_SECRET")?,
            first_answer: required("FIRST_ANSWER")?,
            second_answer: required("SECOND_ANSWER")?,
            bind_addr: optional("BIND_ADDR", "127.0.0.1:8080"),
        })
    }
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("environment variable {key} must be set"))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
