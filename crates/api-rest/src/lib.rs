//! REST API surface for ReviewPulse
//!
//! Two route groups under `/api`: the public endpoints (submit feedback,
//! health, OpenAPI document) and the admin endpoints (listing, analytics,
//! re-enrichment) gated by the `X-API-Key` guard.

use std::time::Duration;

use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Router};

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

use middleware::rate_limit::ClientRateLimiter;

/// Router-level limits
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Per-client request budget per minute
    pub requests_per_minute: u32,
    /// Per-request handler timeout
    pub request_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the application router.
///
/// Layer order (outermost first): request id, request logging, per-client
/// rate limit, timeout. The admin guard applies only to the admin routes.
pub fn build_router(state: AppState, config: &RouterConfig) -> Router {
    let admin_routes = Router::new()
        .route("/admin/feedbacks", get(handlers::admin::list_feedbacks))
        .route("/admin/analytics", get(handlers::admin::get_analytics))
        .route(
            "/admin/feedbacks/enrich-pending",
            post(handlers::admin::enrich_pending),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin_key,
        ));

    let api_routes = Router::new()
        .route("/feedback", post(handlers::feedback::submit_feedback))
        .route("/health", get(handlers::feedback::health))
        .route("/openapi.json", get(openapi::serve_openapi))
        .merge(admin_routes);

    let limiter = ClientRateLimiter::new(config.requests_per_minute);
    let timeout = config.request_timeout;

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(move |request, next| {
            middleware::timeout::request_timeout(request, next, timeout)
        }))
        .layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit::per_client_rate_limit,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging_middleware,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_id_middleware,
        ))
        .with_state(state)
}
