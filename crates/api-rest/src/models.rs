//! Request/response models for the REST API

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

use reviewpulse_feedback::EnrichmentPass;
use reviewpulse_types::{AnalyticsReport, Feedback, Sentiment};

/// Request to submit feedback
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitFeedbackRequest {
    /// Star rating, 1 through 5
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,

    /// Free-text review
    #[validate(length(min = 10, max = 2000, message = "must be 10 to 2000 characters"))]
    pub review: String,
}

/// A feedback record as returned by the API.
///
/// The enrichment fields appear together once enrichment has succeeded
/// and are omitted entirely until then.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    /// Record identifier
    pub id: String,

    /// Star rating
    pub rating: i32,

    /// Review text
    pub review: String,

    /// Sentiment classification
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "positive")]
    pub sentiment: Option<Sentiment>,

    /// One-sentence summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Reply text for the end user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Concrete follow-up items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_items: Option<Vec<String>>,

    /// Submission time
    pub created_at: DateTime<Utc>,

    /// Enrichment completion time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enriched_at: Option<DateTime<Utc>>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        let (sentiment, summary, response, action_items, enriched_at) = match feedback.enrichment {
            Some(enrichment) => (
                Some(enrichment.sentiment),
                Some(enrichment.summary),
                Some(enrichment.response),
                Some(enrichment.action_items),
                Some(enrichment.enriched_at),
            ),
            None => (None, None, None, None, None),
        };

        Self {
            id: feedback.id,
            rating: feedback.rating,
            review: feedback.review,
            sentiment,
            summary,
            response,
            action_items,
            created_at: feedback.created_at,
            enriched_at,
        }
    }
}

/// Health probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" when the process answers
    pub status: String,
    /// Configured service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Seconds since process start
    pub uptime_seconds: u64,
}

/// One day of submissions
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendBucketResponse {
    /// UTC date
    pub date: NaiveDate,
    /// Submissions on that date
    pub count: u64,
}

/// Enrichment progress counts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrichmentProgressResponse {
    /// Records with enrichment present
    pub enriched: u64,
    /// Records still pending
    pub pending: u64,
}

/// Aggregate analytics response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    /// Total stored records
    pub total: u64,
    /// Mean rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Count per rating value
    pub rating_distribution: BTreeMap<String, u64>,
    /// Count per sentiment, including the "unanalyzed" bucket
    pub sentiment_distribution: BTreeMap<String, u64>,
    /// Submissions per UTC day, oldest first
    pub daily_trend: Vec<TrendBucketResponse>,
    /// Creation time of the newest record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_submission: Option<DateTime<Utc>>,
    /// Enriched vs. pending counts
    pub enrichment_progress: EnrichmentProgressResponse,
}

impl From<AnalyticsReport> for AnalyticsResponse {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            total: report.total,
            average_rating: report.average_rating,
            rating_distribution: report.rating_distribution,
            sentiment_distribution: report.sentiment_distribution,
            daily_trend: report
                .daily_trend
                .into_iter()
                .map(|bucket| TrendBucketResponse {
                    date: bucket.date,
                    count: bucket.count,
                })
                .collect(),
            latest_submission: report.latest_submission,
            enrichment_progress: EnrichmentProgressResponse {
                enriched: report.enrichment_progress.enriched,
                pending: report.enrichment_progress.pending,
            },
        }
    }
}

/// Result of a re-enrichment pass
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrichPendingResponse {
    /// Records the pass attempted
    pub attempted: u64,
    /// Records enriched and persisted
    pub enriched: u64,
}

impl From<EnrichmentPass> for EnrichPendingResponse {
    fn from(pass: EnrichmentPass) -> Self {
        Self {
            attempted: pass.attempted,
            enriched: pass.enriched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewpulse_types::Enrichment;

    #[test]
    fn test_submit_request_validation() {
        let valid = SubmitFeedbackRequest {
            rating: 4,
            review: "Long enough to be a real review".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_rating = SubmitFeedbackRequest {
            rating: 9,
            review: "Long enough to be a real review".to_string(),
        };
        assert!(bad_rating.validate().is_err());

        let short_review = SubmitFeedbackRequest {
            rating: 4,
            review: "meh".to_string(),
        };
        assert!(short_review.validate().is_err());
    }

    #[test]
    fn test_unenriched_response_omits_ai_fields() {
        let feedback = Feedback {
            id: "abc".to_string(),
            rating: 3,
            review: "Average experience overall".to_string(),
            enrichment: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(FeedbackResponse::from(feedback)).unwrap();
        assert!(json.get("sentiment").is_none());
        assert!(json.get("summary").is_none());
        assert!(json.get("response").is_none());
        assert!(json.get("action_items").is_none());
        assert!(json.get("enriched_at").is_none());
    }

    #[test]
    fn test_enriched_response_flattens_all_ai_fields() {
        let feedback = Feedback {
            id: "abc".to_string(),
            rating: 5,
            review: "Wonderful support experience".to_string(),
            enrichment: Some(Enrichment::new(
                Sentiment::Positive,
                "Praise for support",
                "Thank you!",
                vec!["Pass along to the support team".to_string()],
            )),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(FeedbackResponse::from(feedback)).unwrap();
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["summary"], "Praise for support");
        assert_eq!(json["action_items"][0], "Pass along to the support team");
        assert!(json.get("enriched_at").is_some());
    }
}
