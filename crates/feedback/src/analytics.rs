//! Aggregate analytics over stored feedback
//!
//! Pure folds over the full record set; nothing here touches storage or
//! persists derived state.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use reviewpulse_types::analytics::UNANALYZED_BUCKET;
use reviewpulse_types::feedback::{RATING_MAX, RATING_MIN};
use reviewpulse_types::{AnalyticsReport, EnrichmentProgress, Feedback, Sentiment, TrendBucket};

/// Compute the full analytics report from all stored records
pub fn compute_report(records: &[Feedback]) -> AnalyticsReport {
    if records.is_empty() {
        return AnalyticsReport::empty();
    }

    let total = records.len() as u64;

    let rating_sum: i64 = records.iter().map(|f| i64::from(f.rating)).sum();
    let average_rating = Some(round2(rating_sum as f64 / records.len() as f64));

    let mut rating_distribution: BTreeMap<String, u64> = (RATING_MIN..=RATING_MAX)
        .map(|rating| (rating.to_string(), 0))
        .collect();
    for feedback in records {
        *rating_distribution
            .entry(feedback.rating.to_string())
            .or_insert(0) += 1;
    }

    let mut sentiment_distribution: BTreeMap<String, u64> = Sentiment::ALL
        .iter()
        .map(|sentiment| (sentiment.as_str().to_string(), 0))
        .collect();
    sentiment_distribution.insert(UNANALYZED_BUCKET.to_string(), 0);
    for feedback in records {
        let bucket = match &feedback.enrichment {
            Some(enrichment) => enrichment.sentiment.as_str(),
            None => UNANALYZED_BUCKET,
        };
        *sentiment_distribution.entry(bucket.to_string()).or_insert(0) += 1;
    }

    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for feedback in records {
        *per_day.entry(feedback.created_at.date_naive()).or_insert(0) += 1;
    }
    let daily_trend = per_day
        .into_iter()
        .map(|(date, count)| TrendBucket { date, count })
        .collect();

    let latest_submission = records.iter().map(|f| f.created_at).max();

    let enriched = records.iter().filter(|f| f.is_enriched()).count() as u64;
    let enrichment_progress = EnrichmentProgress {
        enriched,
        pending: total - enriched,
    };

    AnalyticsReport {
        total,
        average_rating,
        rating_distribution,
        sentiment_distribution,
        daily_trend,
        latest_submission,
        enrichment_progress,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use reviewpulse_types::Enrichment;

    fn record(id: &str, rating: i32, day: u32) -> Feedback {
        Feedback {
            id: id.to_string(),
            rating,
            review: format!("review {id}"),
            enrichment: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn enriched(mut feedback: Feedback, sentiment: Sentiment) -> Feedback {
        feedback.enrichment = Some(Enrichment::new(sentiment, "s", "r", vec![]));
        feedback
    }

    #[test]
    fn test_empty_set() {
        let report = compute_report(&[]);
        assert_eq!(report.total, 0);
        assert!(report.average_rating.is_none());
        assert!(report.daily_trend.is_empty());
    }

    #[test]
    fn test_rating_distribution_sums_to_total() {
        let records = vec![
            record("a", 5, 1),
            record("b", 5, 1),
            record("c", 3, 2),
            record("d", 1, 3),
        ];

        let report = compute_report(&records);
        assert_eq!(report.total, 4);
        assert_eq!(report.rating_distribution.values().sum::<u64>(), 4);
        assert_eq!(report.rating_distribution["5"], 2);
        assert_eq!(report.rating_distribution["3"], 1);
        assert_eq!(report.rating_distribution["2"], 0);
        assert_eq!(report.average_rating, Some(3.5));
    }

    #[test]
    fn test_sentiment_distribution_buckets_missing_as_unanalyzed() {
        let records = vec![
            enriched(record("a", 5, 1), Sentiment::Positive),
            enriched(record("b", 2, 1), Sentiment::Negative),
            record("c", 4, 2),
        ];

        let report = compute_report(&records);
        assert_eq!(report.sentiment_distribution["positive"], 1);
        assert_eq!(report.sentiment_distribution["negative"], 1);
        assert_eq!(report.sentiment_distribution["neutral"], 0);
        assert_eq!(report.sentiment_distribution[UNANALYZED_BUCKET], 1);
        assert_eq!(report.enrichment_progress.enriched, 2);
        assert_eq!(report.enrichment_progress.pending, 1);
    }

    #[test]
    fn test_daily_trend_is_sorted_and_counted() {
        let records = vec![
            record("a", 5, 3),
            record("b", 4, 1),
            record("c", 3, 3),
            record("d", 2, 2),
        ];

        let report = compute_report(&records);
        let days: Vec<u64> = report.daily_trend.iter().map(|b| b.count).collect();
        assert_eq!(report.daily_trend.len(), 3);
        assert_eq!(days, vec![1, 1, 2]);
        assert!(report.daily_trend.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_latest_submission() {
        let records = vec![record("a", 5, 2), record("b", 4, 9), record("c", 3, 5)];
        let report = compute_report(&records);
        assert_eq!(
            report.latest_submission,
            Some(Utc.with_ymd_and_hms(2024, 6, 9, 12, 0, 0).unwrap())
        );
    }
}
