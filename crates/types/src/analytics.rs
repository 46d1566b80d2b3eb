//! Analytics report types
//!
//! The report is recomputed from the stored records on every request;
//! none of these values are persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentiment-distribution bucket for records that have not been enriched
pub const UNANALYZED_BUCKET: &str = "unanalyzed";

/// Feedback count for one UTC calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendBucket {
    /// UTC date of the bucket
    pub date: NaiveDate,
    /// Number of submissions on that date
    pub count: u64,
}

/// How far enrichment has progressed over the stored set
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichmentProgress {
    /// Records with all enrichment fields present
    pub enriched: u64,
    /// Records still waiting for (or failed) enrichment
    pub pending: u64,
}

/// Aggregate view over all stored feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    /// Total number of stored records
    pub total: u64,
    /// Mean rating, absent when no records exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Count per rating value, keyed "1" through "5"
    pub rating_distribution: BTreeMap<String, u64>,
    /// Count per sentiment, with un-enriched records under
    /// [`UNANALYZED_BUCKET`]
    pub sentiment_distribution: BTreeMap<String, u64>,
    /// Submissions per UTC day, oldest first
    pub daily_trend: Vec<TrendBucket>,
    /// Creation time of the most recent record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_submission: Option<DateTime<Utc>>,
    /// Enriched vs. pending counts
    pub enrichment_progress: EnrichmentProgress,
}

impl AnalyticsReport {
    /// An empty report, as returned when nothing has been stored yet
    pub fn empty() -> Self {
        Self {
            total: 0,
            average_rating: None,
            rating_distribution: BTreeMap::new(),
            sentiment_distribution: BTreeMap::new(),
            daily_trend: Vec::new(),
            latest_submission: None,
            enrichment_progress: EnrichmentProgress::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_omits_optional_fields() {
        let report = AnalyticsReport::empty();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("average_rating").is_none());
        assert!(json.get("latest_submission").is_none());
        assert_eq!(json["total"], 0);
    }

    #[test]
    fn test_trend_bucket_date_format() {
        let bucket = TrendBucket {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            count: 7,
        };

        let json = serde_json::to_value(&bucket).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["count"], 7);
    }
}
