//! Axum-based feedback gateway.
//!
//! Stateless: each request builds the grading instruction payload, makes one
//! provider call, and relays the parsed JSON verbatim. Ambient layers give
//! body limits and request timeouts; CORS is permissive because the editor
//! client is served from a different origin.

mod handlers;

use handlers::{handle_feedback, handle_health};

use crate::config::Config;
use crate::providers::{self, GradingProvider};
use anyhow::Result;
use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB) — prevents memory exhaustion
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s) — prevents slow-loris attacks
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub grader: Arc<dyn GradingProvider>,
    /// Fixed sampling temperature for every grading call.
    pub temperature: f64,
}

/// Builds the gateway router around a state (injectable for tests).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/feedback", post(handle_feedback))
        .route("/api/health", get(handle_health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ))
}

/// Run the feedback gateway.
pub async fn run_gateway(host: &str, port: u16, config: &Config) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, config).await
}

/// Run the feedback gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: &Config,
) -> Result<()> {
    let addr = listener.local_addr()?;

    if config.resolve_api_key().is_none() {
        tracing::warn!("OPENAI_API_KEY not set — feedback requests will fail until it is");
    }

    let state = AppState {
        grader: providers::create_grader(config),
        temperature: config.temperature,
    };

    tracing::info!(%addr, model = %config.model, "essaycoach gateway listening");
    tracing::info!("  POST /api/feedback");
    tracing::info!("  GET  /api/health");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
