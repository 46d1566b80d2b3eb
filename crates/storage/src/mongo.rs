//! MongoDB-backed feedback store
//!
//! Connection pooling, timeouts and retryable writes are handled by the
//! driver; this module only owns the document mapping and the handful of
//! collection operations the service needs.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson};
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use reviewpulse_types::{Enrichment, Feedback, NewFeedback, Sentiment};

use crate::repository::{FeedbackRepository, StorageError, StorageResult};

/// Name of the feedback collection
const COLLECTION_NAME: &str = "feedbacks";

/// MongoDB store configuration
#[derive(Debug, Clone)]
pub struct MongoStoreConfig {
    /// Connection string
    pub url: String,
    /// Database name
    pub database: String,
    /// Server selection timeout
    pub connect_timeout: Duration,
}

impl MongoStoreConfig {
    /// Create a new configuration with the given connection string and
    /// database name
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Override the server selection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Stored enrichment sub-document
#[derive(Debug, Serialize, Deserialize)]
struct EnrichmentDocument {
    sentiment: String,
    summary: String,
    response: String,
    action_items: Vec<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    enriched_at: DateTime<Utc>,
}

impl From<&Enrichment> for EnrichmentDocument {
    fn from(enrichment: &Enrichment) -> Self {
        Self {
            sentiment: enrichment.sentiment.as_str().to_string(),
            summary: enrichment.summary.clone(),
            response: enrichment.response.clone(),
            action_items: enrichment.action_items.clone(),
            enriched_at: enrichment.enriched_at,
        }
    }
}

impl TryFrom<EnrichmentDocument> for Enrichment {
    type Error = StorageError;

    fn try_from(doc: EnrichmentDocument) -> StorageResult<Enrichment> {
        let sentiment = Sentiment::parse(&doc.sentiment)
            .ok_or_else(|| StorageError::Corrupt(format!("bad sentiment: {}", doc.sentiment)))?;
        Ok(Enrichment {
            sentiment,
            summary: doc.summary,
            response: doc.response,
            action_items: doc.action_items,
            enriched_at: doc.enriched_at,
        })
    }
}

/// Stored feedback document
#[derive(Debug, Serialize, Deserialize)]
struct FeedbackDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    rating: i32,
    review: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    enrichment: Option<EnrichmentDocument>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

impl FeedbackDocument {
    fn from_submission(submission: &NewFeedback) -> Self {
        Self {
            id: None,
            rating: submission.rating,
            review: submission.review.clone(),
            enrichment: None,
            created_at: submission.created_at,
        }
    }

    fn into_feedback(self) -> StorageResult<Feedback> {
        let id = self
            .id
            .ok_or_else(|| StorageError::Corrupt("document without _id".to_string()))?;
        let enrichment = self.enrichment.map(Enrichment::try_from).transpose()?;
        Ok(Feedback {
            id: id.to_hex(),
            rating: self.rating,
            review: self.review,
            enrichment,
            created_at: self.created_at,
        })
    }
}

/// MongoDB implementation of [`FeedbackRepository`]
#[derive(Clone)]
pub struct MongoFeedbackStore {
    collection: Collection<FeedbackDocument>,
}

impl MongoFeedbackStore {
    /// Connect to MongoDB, verify the connection with a ping and ensure
    /// the collection indexes exist.
    pub async fn connect(config: MongoStoreConfig) -> StorageResult<Self> {
        let mut options = ClientOptions::parse(&config.url).await?;
        options.server_selection_timeout = Some(config.connect_timeout);
        options.retry_writes = Some(true);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        database.run_command(doc! { "ping": 1 }).await?;
        info!(database = %config.database, "Connected to MongoDB");

        let store = Self {
            collection: database.collection(COLLECTION_NAME),
        };
        store.create_indexes(&database).await?;

        Ok(store)
    }

    async fn create_indexes(&self, database: &Database) -> StorageResult<()> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "created_at": 1 })
                .options(
                    IndexOptions::builder()
                        .name("created_at_idx".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "rating": 1 })
                .options(IndexOptions::builder().name("rating_idx".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        debug!(database = %database.name(), "Collection indexes ensured");
        Ok(())
    }

    fn parse_id(id: &str) -> StorageResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| StorageError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl FeedbackRepository for MongoFeedbackStore {
    async fn insert(&self, submission: NewFeedback) -> StorageResult<Feedback> {
        let mut document = FeedbackDocument::from_submission(&submission);
        let result = self.collection.insert_one(&document).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StorageError::Corrupt("insert returned no ObjectId".to_string()))?;
        document.id = Some(id);

        debug!(id = %id.to_hex(), rating = submission.rating, "Feedback stored");
        document.into_feedback()
    }

    async fn list_all(&self) -> StorageResult<Vec<Feedback>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?;

        let documents: Vec<FeedbackDocument> = cursor.try_collect().await?;
        documents
            .into_iter()
            .map(FeedbackDocument::into_feedback)
            .collect()
    }

    async fn get(&self, id: &str) -> StorageResult<Option<Feedback>> {
        let oid = Self::parse_id(id)?;
        let document = self.collection.find_one(doc! { "_id": oid }).await?;
        document.map(FeedbackDocument::into_feedback).transpose()
    }

    async fn set_enrichment(&self, id: &str, enrichment: &Enrichment) -> StorageResult<()> {
        let oid = Self::parse_id(id)?;
        let enrichment_bson = bson::to_bson(&EnrichmentDocument::from(enrichment))?;

        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "enrichment": enrichment_bson } },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StorageError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list_pending(&self, limit: usize) -> StorageResult<Vec<Feedback>> {
        // `null` matches both a missing field and an explicit null
        let cursor = self
            .collection
            .find(doc! { "enrichment": Bson::Null })
            .sort(doc! { "created_at": 1, "_id": 1 })
            .limit(limit as i64)
            .await?;

        let documents: Vec<FeedbackDocument> = cursor.try_collect().await?;
        documents
            .into_iter()
            .map(FeedbackDocument::into_feedback)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = MongoStoreConfig::new("mongodb://localhost:27017", "feedback_db")
            .with_connect_timeout(Duration::from_secs(2));

        assert_eq!(config.database, "feedback_db");
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_document_roundtrip() {
        let submission = NewFeedback::new(5, "Excellent support experience");
        let mut document = FeedbackDocument::from_submission(&submission);
        document.id = Some(ObjectId::new());

        let feedback = document.into_feedback().unwrap();
        assert_eq!(feedback.rating, 5);
        assert_eq!(feedback.review, "Excellent support experience");
        assert!(feedback.enrichment.is_none());
    }

    #[test]
    fn test_enrichment_document_rejects_unknown_sentiment() {
        let document = EnrichmentDocument {
            sentiment: "ecstatic".to_string(),
            summary: "s".to_string(),
            response: "r".to_string(),
            action_items: vec![],
            enriched_at: Utc::now(),
        };

        assert!(Enrichment::try_from(document).is_err());
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(MongoFeedbackStore::parse_id("not-an-oid").is_err());
        assert!(MongoFeedbackStore::parse_id(&ObjectId::new().to_hex()).is_ok());
    }
}
