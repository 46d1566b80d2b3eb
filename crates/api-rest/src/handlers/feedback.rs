//! Public feedback endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{FeedbackResponse, HealthResponse, SubmitFeedbackRequest};
use crate::state::AppState;

use super::validation_error;

/// Submit one feedback record.
///
/// The record is stored first, then enriched inline; when enrichment is
/// unavailable the record is returned without the AI fields and the
/// request still succeeds.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = SubmitFeedbackRequest,
    responses(
        (status = 201, description = "Feedback stored, enriched when analysis succeeded", body = FeedbackResponse),
        (status = 422, description = "Validation failure", body = crate::error::ErrorResponse),
    ),
    tag = "feedback"
)]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    payload.validate().map_err(validation_error)?;

    let feedback = state.service.submit(payload.rating, &payload.review).await?;
    Ok((StatusCode::CREATED, Json(feedback.into())))
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.service_name.as_ref().clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
