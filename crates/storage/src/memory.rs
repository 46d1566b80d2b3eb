//! In-memory feedback store
//!
//! Backs tests and ephemeral runs; no external dependencies. Records are
//! kept in insertion order so listings match the creation-order contract
//! of the MongoDB store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use reviewpulse_types::{Enrichment, Feedback, NewFeedback};

use crate::repository::{FeedbackRepository, StorageError, StorageResult};

/// In-memory implementation of [`FeedbackRepository`]
#[derive(Clone, Default)]
pub struct MemoryFeedbackStore {
    records: Arc<RwLock<Vec<Feedback>>>,
}

impl MemoryFeedbackStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().expect("store lock poisoned").len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FeedbackRepository for MemoryFeedbackStore {
    async fn insert(&self, submission: NewFeedback) -> StorageResult<Feedback> {
        let feedback = Feedback {
            id: Uuid::new_v4().simple().to_string(),
            rating: submission.rating,
            review: submission.review,
            enrichment: None,
            created_at: submission.created_at,
        };

        let mut records = self.records.write().expect("store lock poisoned");
        records.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_all(&self) -> StorageResult<Vec<Feedback>> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records.clone())
    }

    async fn get(&self, id: &str) -> StorageResult<Option<Feedback>> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records.iter().find(|f| f.id == id).cloned())
    }

    async fn set_enrichment(&self, id: &str, enrichment: &Enrichment) -> StorageResult<()> {
        let mut records = self.records.write().expect("store lock poisoned");
        let record = records
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        record.enrichment = Some(enrichment.clone());
        Ok(())
    }

    async fn list_pending(&self, limit: usize) -> StorageResult<Vec<Feedback>> {
        let records = self.records.read().expect("store lock poisoned");
        Ok(records
            .iter()
            .filter(|f| !f.is_enriched())
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewpulse_types::Sentiment;

    #[tokio::test]
    async fn test_insert_assigns_id_and_preserves_fields() {
        let store = MemoryFeedbackStore::new();
        let submission = NewFeedback::new(4, "Solid product, shipping was slow");
        let created_at = submission.created_at;

        let stored = store.insert(submission).await.unwrap();
        assert!(!stored.id.is_empty());
        assert_eq!(stored.rating, 4);
        assert_eq!(stored.created_at, created_at);
        assert!(stored.enrichment.is_none());
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let store = MemoryFeedbackStore::new();
        for rating in 1..=3 {
            store
                .insert(NewFeedback::new(rating, format!("review number {rating}")))
                .await
                .unwrap();
        }

        let all = store.list_all().await.unwrap();
        let ratings: Vec<i32> = all.iter().map(|f| f.rating).collect();
        assert_eq!(ratings, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_set_enrichment_updates_single_record() {
        let store = MemoryFeedbackStore::new();
        let first = store
            .insert(NewFeedback::new(5, "Customer support was excellent"))
            .await
            .unwrap();
        let second = store
            .insert(NewFeedback::new(2, "Delivery arrived two weeks late"))
            .await
            .unwrap();

        let enrichment = Enrichment::new(
            Sentiment::Positive,
            "Praise for support",
            "Thank you!",
            vec![],
        );
        store.set_enrichment(&first.id, &enrichment).await.unwrap();

        assert!(store.get(&first.id).await.unwrap().unwrap().is_enriched());
        assert!(!store.get(&second.id).await.unwrap().unwrap().is_enriched());
    }

    #[tokio::test]
    async fn test_set_enrichment_unknown_id() {
        let store = MemoryFeedbackStore::new();
        let enrichment = Enrichment::new(Sentiment::Neutral, "s", "r", vec![]);

        let err = store.set_enrichment("missing", &enrichment).await;
        assert!(matches!(err, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_pending_skips_enriched() {
        let store = MemoryFeedbackStore::new();
        let first = store
            .insert(NewFeedback::new(5, "Great experience overall"))
            .await
            .unwrap();
        store
            .insert(NewFeedback::new(1, "Could not reach anyone for days"))
            .await
            .unwrap();

        let enrichment = Enrichment::new(Sentiment::Positive, "s", "r", vec![]);
        store.set_enrichment(&first.id, &enrichment).await.unwrap();

        let pending = store.list_pending(10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].rating, 1);

        assert!(store.list_pending(0).await.unwrap().is_empty());
    }
}
