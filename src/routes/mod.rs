//! HTTP surface consumed by the web backend.
//!
//! Two routes: a health probe and the analyze endpoint. Every path returns
//! HTTP 200 with best-effort content; degradation happens inside the engine.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::engine::response::AnalyzeResponse;
use crate::engine::AnalyticsEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalyticsEngine>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub window_days: Option<f64>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "cafemetrics analytics service is running (with DB + AI)",
    })
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let message = request.message.unwrap_or_default();
    Json(state.engine.analyze(message.trim(), request.window_days).await)
}

pub async fn serve(engine: AnalyticsEngine, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState {
        engine: Arc::new(engine),
    };
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[routes] listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
