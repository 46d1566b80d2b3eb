//! Repository trait for feedback persistence

use async_trait::async_trait;
use thiserror::Error;

use reviewpulse_types::{Enrichment, Feedback, NewFeedback};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying database driver error
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The supplied id is not a valid document id
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    /// No document with the given id exists
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Document could not be encoded for storage
    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// A stored document failed to decode into the domain model
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Persistence operations on the feedback collection.
///
/// Records are immutable after insert except for the one-shot enrichment
/// update; no delete operation exists.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Insert a new submission and return the stored record with its
    /// database-assigned id.
    async fn insert(&self, submission: NewFeedback) -> StorageResult<Feedback>;

    /// All stored records in creation order (oldest first).
    async fn list_all(&self) -> StorageResult<Vec<Feedback>>;

    /// Fetch a single record by id.
    async fn get(&self, id: &str) -> StorageResult<Option<Feedback>>;

    /// Attach enrichment to an existing record in a single update.
    ///
    /// Returns [`StorageError::NotFound`] when the id does not exist.
    async fn set_enrichment(&self, id: &str, enrichment: &Enrichment) -> StorageResult<()>;

    /// Records without enrichment, oldest first, at most `limit`.
    async fn list_pending(&self, limit: usize) -> StorageResult<Vec<Feedback>>;
}
