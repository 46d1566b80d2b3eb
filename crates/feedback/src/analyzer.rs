//! Analyzer seam between the feedback service and the LLM client

use async_trait::async_trait;

use reviewpulse_integrations::groq::GroqClient;
use reviewpulse_integrations::ReviewAnalysis;

/// Turns one review into the four enrichment fields.
///
/// The production implementation is [`GroqClient`]; tests substitute
/// their own. Implementations make at most one outbound call per
/// invocation.
#[async_trait]
pub trait ReviewAnalyzer: Send + Sync {
    /// Analyze a single review
    async fn analyze(&self, review: &str, rating: i32) -> anyhow::Result<ReviewAnalysis>;
}

#[async_trait]
impl ReviewAnalyzer for GroqClient {
    async fn analyze(&self, review: &str, rating: i32) -> anyhow::Result<ReviewAnalysis> {
        Ok(self.analyze_review(review, rating).await?)
    }
}
