use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "excuse-email-draft-tool";

/// Placeholder exposition; not wired to real counters.
const METRICS_TEXT: &str = "# HELP excuse_tool_requests_total Total number of requests\n\
# TYPE excuse_tool_requests_total counter\n\
excuse_tool_requests_total 0\n";

/// GET /health, /healthz, /ready, /ping
/// Healthy regardless of inference configuration.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// GET /metrics
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS_TEXT,
    )
}

/// GET /debug
/// Configuration introspection. Reports whether the token is set, never its value.
pub async fn debug_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "databricks_token_configured": config.token_configured(),
        "databricks_endpoint": config.databricks_endpoint_url,
        "port": config.port,
        "host": config.host,
        "environment": config.environment
    }))
}
