//! Health check endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "ok" once the gateway reported ready, "starting" before that
    pub status: String,
    pub bot_username: Option<String>,
    pub backend_url: String,
    pub uptime_secs: u64,
}

/// Shared state behind the health endpoints
#[derive(Clone)]
pub struct HealthState {
    pub start_time: SystemTime,
    pub backend_url: String,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

impl HealthState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            start_time: SystemTime::now(),
            backend_url: backend_url.into(),
            bot_username: Arc::new(RwLock::new(None)),
        }
    }

    /// Called from the gateway `ready` event.
    pub async fn set_bot_username(&self, username: String) {
        let mut guard = self.bot_username.write().await;
        *guard = Some(username);
    }

    pub async fn snapshot(&self) -> HealthStatus {
        let bot_username = self.bot_username.read().await.clone();
        HealthStatus {
            status: if bot_username.is_some() { "ok" } else { "starting" }.to_string(),
            bot_username,
            backend_url: self.backend_url.clone(),
            uptime_secs: self.start_time.elapsed().unwrap_or_default().as_secs(),
        }
    }
}

async fn health_handler(State(state): State<HealthState>) -> (StatusCode, Json<HealthStatus>) {
    let status = state.snapshot().await;
    let code = if status.bot_username.is_some() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Create the health check router
pub fn create_health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Start the health check server
pub async fn start_health_server(state: HealthState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health check server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
