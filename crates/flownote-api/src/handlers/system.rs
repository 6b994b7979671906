//! Service banner and health check.

use axum::{response::IntoResponse, Json};

/// Plain-text banner at the server root.
pub async fn root() -> &'static str {
    "FlowNote API is running"
}

/// Liveness probe.
///
/// GET /health
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy")))]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
