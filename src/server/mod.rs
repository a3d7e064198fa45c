//! A2A HTTP server
//!
//! Serves:
//! - `GET  /.well-known/agent-card.json` - Agent Card discovery
//! - `POST /`                            - JSON-RPC 2.0 endpoint
//! - `GET  /health`                      - Health check

pub mod card;
mod executor;
mod handler;
mod store;
mod updater;

pub use card::{advertised_url, agent_card};
pub use executor::AgentExecutor;
pub use store::{CancelError, TaskStore};
pub use updater::TaskUpdater;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::protocol::AgentCard;

/// Shared state for the A2A server
#[derive(Clone)]
pub struct AppState {
    executor: Arc<dyn AgentExecutor>,
    store: Arc<TaskStore>,
    card: Arc<AgentCard>,
}

impl AppState {
    /// Create server state around an executor and a static agent card
    pub fn new(executor: impl AgentExecutor, card: AgentCard) -> Self {
        Self {
            executor: Arc::new(executor),
            store: Arc::new(TaskStore::new()),
            card: Arc::new(card),
        }
    }

    /// The executor handling turns
    pub fn executor(&self) -> &Arc<dyn AgentExecutor> {
        &self.executor
    }

    /// The shared task store
    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    /// The static agent card
    pub fn card(&self) -> &AgentCard {
        &self.card
    }
}

/// Build the axum router for the A2A server
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/.well-known/agent-card.json", get(get_agent_card))
        .route("/", post(handler::handle_jsonrpc))
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(host: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    tracing::info!("A2A server listening on http://{}", addr);
    tracing::info!("Agent card: http://{}/.well-known/agent-card.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /.well-known/agent-card.json - Agent Card discovery
async fn get_agent_card(State(state): State<AppState>) -> Json<AgentCard> {
    Json(state.card().clone())
}

/// GET /health - Health check
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "A2A",
    }))
}
