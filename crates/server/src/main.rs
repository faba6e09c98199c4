//! chat-agent server binary
//!
//! Wires settings, the intent catalog and the conversation log together and
//! serves the HTTP API. The catalog load is fatal: the process cannot answer
//! anything without it.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use chat_agent_agent::IntentCatalog;
use chat_agent_config::load_settings;
use chat_agent_persistence::SqliteConversationStore;
use chat_agent_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional settings file; env overrides always apply.
    let config_path = std::env::var("CHAT_AGENT_CONFIG").ok();
    let settings = load_settings(config_path.as_deref()).context("failed to load settings")?;

    let catalog = IntentCatalog::from_json_file(&settings.catalog.path)
        .context("failed to load intent catalog")?;

    let store = SqliteConversationStore::new(&settings.database.path)
        .await
        .context("failed to open conversation log")?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(settings, catalog, Arc::new(store));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("chat-agent listening on {}", addr);

    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
