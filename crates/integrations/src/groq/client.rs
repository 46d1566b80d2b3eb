//! Groq API client
//!
//! One enrichment equals one outbound request. Failures are reported to
//! the caller, who decides whether the surrounding operation degrades or
//! fails; nothing is retried here.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::analysis::ReviewAnalysis;
use super::types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Groq client error
#[derive(Debug, Error)]
pub enum GroqError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message decoded from the error body, or the raw body
        message: String,
    },

    /// The API answered without any completion choice
    #[error("Model returned no completion choices")]
    EmptyCompletion,

    /// The model's reply could not be parsed into an analysis
    #[error("Could not parse model output: {0}")]
    MalformedOutput(String),

    /// Client could not be constructed from the configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

/// Groq API configuration
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Sampling temperature for analysis calls
    pub temperature: f32,
}

impl GroqConfig {
    /// Create a configuration with default endpoint and limits
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout_secs: 30,
            max_tokens: 500,
            temperature: 0.2,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Groq API client
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    config: GroqConfig,
}

impl GroqClient {
    /// Create a new Groq client
    pub fn new(config: GroqConfig) -> Result<Self, GroqError> {
        if config.api_key.is_empty() {
            return Err(GroqError::InvalidConfig("api_key is empty".to_string()));
        }
        if config.model.is_empty() {
            return Err(GroqError::InvalidConfig("model is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("reviewpulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GroqError::Http)?;

        Ok(Self { client, config })
    }

    /// Analyze one review into sentiment, summary, response and action
    /// items with a single chat-completion call.
    pub async fn analyze_review(
        &self,
        review: &str,
        rating: i32,
    ) -> Result<ReviewAnalysis, GroqError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(build_analysis_prompt(review, rating))],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
        };

        debug!(model = %self.config.model, "Requesting review analysis");
        let response = self.execute(&request).await?;

        let content = response.first_content().ok_or(GroqError::EmptyCompletion)?;
        let analysis = ReviewAnalysis::from_model_output(content)?;

        debug!(sentiment = %analysis.sentiment, "Review analysis completed");
        Ok(analysis)
    }

    /// Issue the chat-completion request. Exactly one attempt.
    async fn execute(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GroqError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let headers = self.build_headers()?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => format!("{}: {}", err.error.error_type, err.error.message),
                Err(_) => body,
            };
            warn!(status = status.as_u16(), "Groq API returned an error");
            return Err(GroqError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ChatCompletionResponse>().await?)
    }

    fn build_headers(&self) -> Result<HeaderMap, GroqError> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let bearer = format!("Bearer {}", self.config.api_key);
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|_| GroqError::InvalidConfig("API key is not header-safe".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        Ok(headers)
    }
}

/// Fixed instruction template for the enrichment call
fn build_analysis_prompt(review: &str, rating: i32) -> String {
    format!(
        "You are analyzing customer feedback for a business.\n\
         \n\
         Rating: {rating}/5\n\
         Review: \"{review}\"\n\
         \n\
         Respond with ONLY a JSON object with exactly these keys:\n\
         - \"sentiment\": one of \"positive\", \"neutral\", \"negative\"\n\
         - \"summary\": a one-sentence summary of the review\n\
         - \"response\": a warm, professional 2-3 sentence reply to the customer. \
         Thank them if the review is positive, apologize and commit to improving \
         if it is negative.\n\
         - \"action_items\": a list of 2-3 short, concrete steps the business \
         should take. Be specific, no generic advice.\n\
         \n\
         Do not include any text outside the JSON object."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GroqConfig {
        GroqConfig::new("gsk-test-key", "llama-3.3-70b-versatile")
    }

    #[test]
    fn test_client_creation() {
        assert!(GroqClient::new(test_config()).is_ok());
    }

    #[test]
    fn test_client_rejects_empty_key() {
        let mut config = test_config();
        config.api_key.clear();
        assert!(matches!(
            GroqClient::new(config),
            Err(GroqError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_client_rejects_empty_model() {
        let mut config = test_config();
        config.model.clear();
        assert!(GroqClient::new(config).is_err());
    }

    #[test]
    fn test_prompt_includes_review_and_rating() {
        let prompt = build_analysis_prompt("Slow checkout flow", 2);
        assert!(prompt.contains("Rating: 2/5"));
        assert!(prompt.contains("Slow checkout flow"));
        assert!(prompt.contains("\"sentiment\""));
        assert!(prompt.contains("\"action_items\""));
    }

    #[test]
    fn test_headers_mark_auth_sensitive() {
        let client = GroqClient::new(test_config()).unwrap();
        let headers = client.build_headers().unwrap();
        assert!(headers[AUTHORIZATION].is_sensitive());
    }
}
