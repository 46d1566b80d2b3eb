//! # ReviewPulse - Integrations
//!
//! Outbound integrations for the ReviewPulse service.
//!
//! ## Groq Integration
//!
//! - Chat-completion endpoint wrapper
//! - Fixed enrichment instruction prompt
//! - Defensive parsing of model output into structured analysis
//!
//! Every enrichment issues exactly one outbound request: there is no
//! retry loop, no client-side rate limiting, and no caching of repeated
//! reviews.
//!
//! ## Example
//!
//! ```no_run
//! use reviewpulse_integrations::groq::{GroqClient, GroqConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GroqConfig::new("your-api-key", "llama-3.3-70b-versatile");
//! let client = GroqClient::new(config)?;
//!
//! let analysis = client
//!     .analyze_review("The new dashboard is fantastic", 5)
//!     .await?;
//!
//! println!("Sentiment: {}", analysis.sentiment);
//! # Ok(())
//! # }
//! ```

/// Groq chat-completion API integration
pub mod groq;

pub use groq::{GroqClient, GroqConfig, GroqError, ReviewAnalysis};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
