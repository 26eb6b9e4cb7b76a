use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::http::app_state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<Utc>,
    /// Seconds since the process started.
    uptime: f64,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /api/health
async fn health(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        uptime: app_state.started_at.elapsed().as_secs_f64(),
    })
}
