//! # Liveness HTTP Server
//!
//! Minimal HTTP surface for process liveness checks: hosting platforms
//! probe it to decide whether the bot process is alive. Nothing else is
//! served here.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::error::BotResult;
use crate::observability::Logger;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Build the liveness router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

/// Bind and serve the liveness endpoints until the process exits.
pub async fn serve(port: u16) -> BotResult<()> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    Logger::info("health_server_listening", &[("port", &port.to_string())]);

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn root_handler() -> impl IntoResponse {
    "ranklink is running"
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
