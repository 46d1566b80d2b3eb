//! Document-store access layer for ReviewPulse
//!
//! This crate defines the [`FeedbackRepository`] trait along with two
//! implementations: [`MongoFeedbackStore`] backed by a MongoDB
//! `feedbacks` collection, and [`MemoryFeedbackStore`] for tests and
//! ephemeral use.

pub mod memory;
pub mod mongo;
pub mod repository;

pub use memory::MemoryFeedbackStore;
pub use mongo::{MongoFeedbackStore, MongoStoreConfig};
pub use repository::{FeedbackRepository, StorageError, StorageResult};
