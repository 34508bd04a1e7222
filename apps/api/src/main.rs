mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use axum::http::Request;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::InferenceClient;
use crate::routes::build_router;
use crate::routes::frontend::Frontend;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(log_directives(&config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Excuse Email Draft Tool v{}", env!("CARGO_PKG_VERSION"));

    if !config.token_configured() {
        tracing::warn!("DATABRICKS_API_TOKEN is not set; generation requests will fail");
    }

    let llm = InferenceClient::new(&config)?;
    info!(
        "Inference client initialized (endpoint: {}, timeout: {:?})",
        config.databricks_endpoint_url, config.inference_timeout
    );

    let frontend = Frontend::resolve(config.public_dir.as_deref());

    let state = AppState {
        llm,
        config: config.clone(),
        frontend,
    };

    // Request/response logging; the Authorization header is never recorded.
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "http_request",
                request_id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let app = build_router(state)
        .layer(trace)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Fallback filter when `RUST_LOG` holds a bare level: this crate plus the
/// tower-http request/response events, both at that level.
fn log_directives(level: &str) -> String {
    format!("{}={level},tower_http={level}", env!("CARGO_CRATE_NAME"))
}
