//! Shared application state

use std::sync::Arc;
use std::time::Instant;

use reviewpulse_feedback::FeedbackService;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The feedback service
    pub service: FeedbackService,
    /// Service name reported by the health endpoint
    pub service_name: Arc<String>,
    /// Shared secret expected in the `X-API-Key` header on admin routes
    pub admin_api_key: Arc<String>,
    /// Process start time, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create the application state
    pub fn new(
        service: FeedbackService,
        service_name: impl Into<String>,
        admin_api_key: impl Into<String>,
    ) -> Self {
        Self {
            service,
            service_name: Arc::new(service_name.into()),
            admin_api_key: Arc::new(admin_api_key.into()),
            started_at: Instant::now(),
        }
    }
}
