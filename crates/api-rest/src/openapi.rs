//! OpenAPI document

use axum::Json;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::ErrorResponse;
use crate::models::{
    AnalyticsResponse, EnrichPendingResponse, EnrichmentProgressResponse, FeedbackResponse,
    HealthResponse, SubmitFeedbackRequest, TrendBucketResponse,
};

/// API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ReviewPulse API",
        description = "AI-powered feedback collection and analysis service"
    ),
    paths(
        crate::handlers::feedback::submit_feedback,
        crate::handlers::feedback::health,
        crate::handlers::admin::list_feedbacks,
        crate::handlers::admin::get_analytics,
        crate::handlers::admin::enrich_pending,
    ),
    components(schemas(
        SubmitFeedbackRequest,
        FeedbackResponse,
        HealthResponse,
        AnalyticsResponse,
        TrendBucketResponse,
        EnrichmentProgressResponse,
        EnrichPendingResponse,
        ErrorResponse,
    )),
    modifiers(&ApiKeySecurity),
    tags(
        (name = "feedback", description = "Public feedback submission"),
        (name = "health", description = "Liveness probe"),
        (name = "admin", description = "Admin dashboard endpoints"),
    )
)]
pub struct ApiDoc;

struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    crate::middleware::auth::API_KEY_HEADER,
                ))),
            );
        }
    }
}

/// Serve the generated document
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        assert!(paths.contains(&"/api/feedback"));
        assert!(paths.contains(&"/api/health"));
        assert!(paths.contains(&"/api/admin/feedbacks"));
        assert!(paths.contains(&"/api/admin/analytics"));
        assert!(paths.contains(&"/api/admin/feedbacks/enrich-pending"));
    }
}
