#![forbid(unsafe_code)]

//! Lorebank server entry point.

use anyhow::Result;

use lorebank_api::{router, AppState, Config};
use lorebank_auth::{SecurityGate, SessionKey};
use lorebank_storage::Database;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lorebank=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    let gate = SecurityGate::new(&config.first_answer, &config.second_answer);
    let sessions = SessionKey::from_secret(&config.session_secret);
    let state = AppState::new(db, gate, sessions);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, router(state)).await?;

    Ok(())
}
