//! Core types and data models for ReviewPulse
//!
//! This crate provides the fundamental data structures shared across the
//! ReviewPulse service: the feedback record, its AI enrichment, and the
//! analytics report shape.

pub mod analytics;
pub mod feedback;

pub use analytics::{AnalyticsReport, EnrichmentProgress, TrendBucket};
pub use feedback::{Enrichment, Feedback, NewFeedback, Sentiment};
