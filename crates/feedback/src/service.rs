//! Feedback service
//!
//! Validation, persistence and enrichment for one submission run in
//! sequence within the submitting request. A failed enrichment never
//! fails the submission: the record is kept and returned without the
//! AI fields, and the re-enrichment pass can pick it up later.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use reviewpulse_storage::{FeedbackRepository, StorageError};
use reviewpulse_types::feedback::{RATING_MAX, RATING_MIN, REVIEW_MAX_LEN, REVIEW_MIN_LEN};
use reviewpulse_types::{AnalyticsReport, Enrichment, Feedback, NewFeedback};

use crate::analytics::compute_report;
use crate::analyzer::ReviewAnalyzer;

/// Upper bound on records processed by one re-enrichment pass
pub const ENRICH_BATCH_LIMIT: usize = 20;

/// Submission error
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Input failed validation; nothing was persisted
    #[error("{field}: {message}")]
    Validation {
        /// Offending field name
        field: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// Storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Outcome of a re-enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentPass {
    /// Records the pass attempted to enrich
    pub attempted: u64,
    /// Records that were successfully enriched and persisted
    pub enriched: u64,
}

/// Orchestrates feedback submission, listing, analytics and
/// re-enrichment over a repository and an analyzer.
#[derive(Clone)]
pub struct FeedbackService {
    repository: Arc<dyn FeedbackRepository>,
    analyzer: Arc<dyn ReviewAnalyzer>,
}

impl FeedbackService {
    /// Create a new service
    pub fn new(repository: Arc<dyn FeedbackRepository>, analyzer: Arc<dyn ReviewAnalyzer>) -> Self {
        Self {
            repository,
            analyzer,
        }
    }

    /// Accept one feedback submission.
    ///
    /// Validates, persists the bare record, then attempts enrichment
    /// inline. The returned record carries the enrichment only when both
    /// the analysis call and the follow-up write succeeded.
    pub async fn submit(&self, rating: i32, review: &str) -> Result<Feedback, SubmitError> {
        let review = validate_submission(rating, review)?;

        let mut stored = self
            .repository
            .insert(NewFeedback::new(rating, review))
            .await?;
        info!(id = %stored.id, rating, "Feedback stored");

        match self.analyzer.analyze(&stored.review, stored.rating).await {
            Ok(analysis) => {
                let enrichment = Enrichment::new(
                    analysis.sentiment,
                    analysis.summary,
                    analysis.response,
                    analysis.action_items,
                );
                match self.repository.set_enrichment(&stored.id, &enrichment).await {
                    Ok(()) => {
                        info!(id = %stored.id, sentiment = %enrichment.sentiment, "Feedback enriched");
                        stored.enrichment = Some(enrichment);
                    }
                    Err(e) => {
                        warn!(id = %stored.id, error = %e, "Enrichment write failed; returning record without it");
                    }
                }
            }
            Err(e) => {
                warn!(id = %stored.id, error = %e, "Enrichment failed; feedback kept without analysis");
            }
        }

        Ok(stored)
    }

    /// All stored records, oldest first
    pub async fn list(&self) -> Result<Vec<Feedback>, StorageError> {
        self.repository.list_all().await
    }

    /// Fetch one record by id
    pub async fn get(&self, id: &str) -> Result<Option<Feedback>, StorageError> {
        self.repository.get(id).await
    }

    /// Recompute the analytics report from the full stored set
    pub async fn analytics(&self) -> Result<AnalyticsReport, StorageError> {
        let records = self.repository.list_all().await?;
        Ok(compute_report(&records))
    }

    /// Attempt enrichment for records that still lack it.
    ///
    /// Processes at most `limit` records, oldest first. Per-record
    /// failures are logged and skipped; the pass itself only fails when
    /// the pending listing does.
    pub async fn enrich_pending(&self, limit: usize) -> Result<EnrichmentPass, StorageError> {
        let pending = self.repository.list_pending(limit).await?;
        let mut pass = EnrichmentPass {
            attempted: pending.len() as u64,
            enriched: 0,
        };

        for feedback in pending {
            match self.analyzer.analyze(&feedback.review, feedback.rating).await {
                Ok(analysis) => {
                    let enrichment = Enrichment::new(
                        analysis.sentiment,
                        analysis.summary,
                        analysis.response,
                        analysis.action_items,
                    );
                    match self.repository.set_enrichment(&feedback.id, &enrichment).await {
                        Ok(()) => pass.enriched += 1,
                        Err(e) => {
                            warn!(id = %feedback.id, error = %e, "Enrichment write failed during pass")
                        }
                    }
                }
                Err(e) => warn!(id = %feedback.id, error = %e, "Enrichment failed during pass"),
            }
        }

        info!(
            attempted = pass.attempted,
            enriched = pass.enriched,
            "Re-enrichment pass finished"
        );
        Ok(pass)
    }
}

/// Validate a submission; returns the trimmed review text.
fn validate_submission(rating: i32, review: &str) -> Result<String, SubmitError> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(SubmitError::Validation {
            field: "rating",
            message: format!("must be between {RATING_MIN} and {RATING_MAX}"),
        });
    }

    let review = review.trim();
    if review.is_empty() {
        return Err(SubmitError::Validation {
            field: "review",
            message: "cannot be empty or only whitespace".to_string(),
        });
    }
    if review.chars().count() < REVIEW_MIN_LEN {
        return Err(SubmitError::Validation {
            field: "review",
            message: format!("must be at least {REVIEW_MIN_LEN} characters"),
        });
    }
    if review.chars().count() > REVIEW_MAX_LEN {
        return Err(SubmitError::Validation {
            field: "review",
            message: format!("must be at most {REVIEW_MAX_LEN} characters"),
        });
    }

    Ok(review.to_string())
}
