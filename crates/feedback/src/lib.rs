//! Feedback domain logic for ReviewPulse
//!
//! Orchestrates validation, persistence and AI enrichment for feedback
//! submissions, and computes the aggregate analytics report.

pub mod analytics;
pub mod analyzer;
pub mod service;

pub use analyzer::ReviewAnalyzer;
pub use service::{EnrichmentPass, FeedbackService, SubmitError, ENRICH_BATCH_LIMIT};
