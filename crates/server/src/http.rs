//! HTTP endpoints
//!
//! REST API for the chat agent.

use axum::{
    extract::{Json, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chat_agent_agent::{default_reply, respond};
use chat_agent_core::{Conversation, Language};
use chat_agent_persistence::ConversationStore;

use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        // Chat endpoint
        .route("/api/chat", post(chat))
        // Conversation log (read-only)
        .route("/api/conversations", get(list_conversations))
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (for dev)
/// - If cors_origins is empty or nothing parses, defaults to localhost:3000
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Chat request
#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Chat response
#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    pub response: String,
}

/// Chat endpoint
///
/// Matches the message against the catalog, answers in the language of the
/// winning pattern and appends a record to the conversation log. Log failures
/// are reported but do not fail the request.
pub(crate) async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServerError::EmptyMessage);
    }

    let result = state.catalog.best_match(message);

    let response = match respond(&result, &state.catalog) {
        Ok(reply) => reply,
        Err(e) => {
            // Catalog authoring inconsistency; answer with the default reply
            // and leave a trace for the catalog maintainer.
            tracing::warn!(error = %e, "Response lookup failed, using default reply");
            default_reply(Language::English).to_string()
        }
    };

    let record = Conversation::new(message, &response, result.language);
    if let Err(e) = state.store.record(&record).await {
        tracing::error!(error = %e, "Failed to persist conversation");
    }

    Ok(Json(ChatResponse { response }))
}

/// Conversation log query
#[derive(Debug, Deserialize)]
pub(crate) struct ConversationsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// List recent conversations, newest first
pub(crate) async fn list_conversations(
    State(state): State<AppState>,
    Query(query): Query<ConversationsQuery>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let conversations = state
        .store
        .recent(query.limit)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "conversations": conversations,
        "count": conversations.len(),
    })))
}

/// Health check
pub(crate) async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
pub(crate) async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ready",
            "intents": state.catalog.len(),
        })),
    )
}
