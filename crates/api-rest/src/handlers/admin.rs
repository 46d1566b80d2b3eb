//! Admin endpoints
//!
//! All routes here sit behind the `X-API-Key` guard; handlers never see
//! unauthenticated requests.

use axum::extract::State;
use axum::Json;

use reviewpulse_feedback::ENRICH_BATCH_LIMIT;

use crate::error::ApiError;
use crate::models::{AnalyticsResponse, EnrichPendingResponse, FeedbackResponse};
use crate::state::AppState;

/// List every stored feedback record in creation order
#[utoipa::path(
    get,
    path = "/api/admin/feedbacks",
    responses(
        (status = 200, description = "All records, oldest first", body = [FeedbackResponse]),
        (status = 401, description = "Missing or wrong API key", body = crate::error::ErrorResponse),
    ),
    security(("api_key" = [])),
    tag = "admin"
)]
pub async fn list_feedbacks(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    let records = state.service.list().await?;
    Ok(Json(records.into_iter().map(FeedbackResponse::from).collect()))
}

/// Aggregate analytics over the full stored set, recomputed per call
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    responses(
        (status = 200, description = "Aggregate analytics", body = AnalyticsResponse),
        (status = 401, description = "Missing or wrong API key", body = crate::error::ErrorResponse),
    ),
    security(("api_key" = [])),
    tag = "admin"
)]
pub async fn get_analytics(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let report = state.service.analytics().await?;
    Ok(Json(report.into()))
}

/// Retry enrichment for records that still lack it
#[utoipa::path(
    post,
    path = "/api/admin/feedbacks/enrich-pending",
    responses(
        (status = 200, description = "Pass outcome", body = EnrichPendingResponse),
        (status = 401, description = "Missing or wrong API key", body = crate::error::ErrorResponse),
    ),
    security(("api_key" = [])),
    tag = "admin"
)]
pub async fn enrich_pending(
    State(state): State<AppState>,
) -> Result<Json<EnrichPendingResponse>, ApiError> {
    let pass = state.service.enrich_pending(ENRICH_BATCH_LIMIT).await?;
    Ok(Json(pass.into()))
}
