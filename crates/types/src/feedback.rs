//! Feedback record and enrichment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest accepted rating value
pub const RATING_MIN: i32 = 1;
/// Highest accepted rating value
pub const RATING_MAX: i32 = 5;
/// Minimum review length after trimming
pub const REVIEW_MIN_LEN: usize = 10;
/// Maximum review length after trimming
pub const REVIEW_MAX_LEN: usize = 2000;

/// Sentiment classification of a review
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All sentiment values, in display order
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Wire representation of the sentiment
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }

    /// Parse a model- or user-supplied sentiment label.
    ///
    /// Accepts any casing, surrounding whitespace and a trailing period;
    /// anything that is not one of the three known labels yields `None`.
    pub fn parse(label: &str) -> Option<Sentiment> {
        match label.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI-derived fields attached to a feedback record.
///
/// Either the whole structure is present (enrichment succeeded) or the
/// record carries none of these fields. Partial enrichment is never
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrichment {
    /// Sentiment classification of the review
    pub sentiment: Sentiment,
    /// One-sentence summary of the review
    pub summary: String,
    /// Reply text intended for the end user
    pub response: String,
    /// Concrete follow-up items, in the order the model produced them
    pub action_items: Vec<String>,
    /// When enrichment completed
    pub enriched_at: DateTime<Utc>,
}

impl Enrichment {
    /// Create an enrichment stamped with the current time
    pub fn new(
        sentiment: Sentiment,
        summary: impl Into<String>,
        response: impl Into<String>,
        action_items: Vec<String>,
    ) -> Self {
        Self {
            sentiment,
            summary: summary.into(),
            response: response.into(),
            action_items,
            enriched_at: Utc::now(),
        }
    }
}

/// A stored feedback record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    /// Identifier assigned by the database on insert
    pub id: String,
    /// Star rating, `RATING_MIN..=RATING_MAX`
    pub rating: i32,
    /// Free-text review, trimmed
    pub review: String,
    /// AI enrichment; `None` until enrichment succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
    /// Creation time, set once on insert
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    /// Whether this record has been enriched
    pub fn is_enriched(&self) -> bool {
        self.enrichment.is_some()
    }
}

/// A feedback submission that has not been persisted yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    /// Star rating
    pub rating: i32,
    /// Trimmed review text
    pub review: String,
    /// Creation time, stamped when the submission is accepted
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    /// Create a new submission stamped with the current time
    pub fn new(rating: i32, review: impl Into<String>) -> Self {
        Self {
            rating,
            review: review.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_parse() {
        assert_eq!(Sentiment::parse("positive"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::parse("Negative."), Some(Sentiment::Negative));
        assert_eq!(Sentiment::parse("NEUTRAL"), Some(Sentiment::Neutral));
        assert_eq!(Sentiment::parse("mixed"), None);
        assert_eq!(Sentiment::parse(""), None);
    }

    #[test]
    fn test_sentiment_wire_format() {
        let json = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(json, "\"positive\"");

        let parsed: Sentiment = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(parsed, Sentiment::Negative);
    }

    #[test]
    fn test_feedback_serialization_omits_missing_enrichment() {
        let feedback = Feedback {
            id: "abc123".to_string(),
            rating: 4,
            review: "Great service overall".to_string(),
            enrichment: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&feedback).unwrap();
        assert!(json.get("enrichment").is_none());
    }

    #[test]
    fn test_enrichment_roundtrip() {
        let enrichment = Enrichment::new(
            Sentiment::Positive,
            "Customer praises the service",
            "Thank you for the kind words!",
            vec!["Share with the support team".to_string()],
        );

        let json = serde_json::to_string(&enrichment).unwrap();
        let back: Enrichment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, enrichment);
    }
}
