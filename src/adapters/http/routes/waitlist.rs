use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistStats,
    use_cases::waitlist::NewWaitlistEntry,
};

/// Fields are optional so that a missing field is reported as a validation
/// error rather than a deserialization failure.
#[derive(Deserialize)]
struct JoinWaitlistPayload {
    name: Option<String>,
    email: Option<String>,
    sport: Option<String>,
    level: Option<String>,
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    success: bool,
    message: &'static str,
    data: JoinedEntry,
}

#[derive(Serialize)]
struct JoinedEntry {
    id: String,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct StatsResponse {
    success: bool,
    data: WaitlistStats,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", post(join_waitlist))
        .route("/waitlist/stats", get(waitlist_stats))
}

/// POST /api/waitlist
async fn join_waitlist(
    State(app_state): State<AppState>,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(rejection_to_error)?;

    let input = NewWaitlistEntry::validate(
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.sport.as_deref(),
        payload.level.as_deref(),
    )?;

    let entry = app_state.waitlist_use_cases.join(input).await?;

    Ok((
        StatusCode::OK,
        Json(JoinWaitlistResponse {
            success: true,
            message: "Thank you for joining our waitlist! We'll be in touch soon.",
            data: JoinedEntry {
                id: entry.id,
                timestamp: entry.created_at,
            },
        }),
    ))
}

/// GET /api/waitlist/stats
async fn waitlist_stats(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(StatsResponse {
        success: true,
        data: app_state.waitlist_use_cases.stats().await,
    })
}

/// A body that is not a JSON object of strings is treated as having no usable
/// fields. The extractor detail is logged, never returned.
fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::warn!(error = %rejection.body_text(), "Rejected waitlist request body");
    match rejection {
        JsonRejection::JsonSyntaxError(_) => AppError::Validation("Invalid request body".into()),
        _ => AppError::Validation("All fields are required".into()),
    }
}
