//! Configuration management for ReviewPulse

use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Document database settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// LLM enrichment settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Admin authentication settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from an optional YAML file and the environment.
    ///
    /// Environment variables are prefixed with `REVIEWPULSE_` and use `__`
    /// to separate sections, e.g. `REVIEWPULSE_DATABASE__URL`.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed("REVIEWPULSE_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Validate configuration; required secrets fail startup when absent.
    pub fn validate(&self) -> Result<()> {
        if self.service.port == 0 {
            return Err(ConfigError::ValidationError(
                "Invalid service port".to_string(),
            ));
        }

        if self.database.url.is_empty() {
            return Err(ConfigError::ValidationError(
                "Database URL required (REVIEWPULSE_DATABASE__URL)".to_string(),
            ));
        }

        if self.database.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Database name cannot be empty".to_string(),
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "LLM API key required (REVIEWPULSE_LLM__API_KEY)".to_string(),
            ));
        }

        if self.llm.model.is_empty() {
            return Err(ConfigError::ValidationError(
                "LLM model cannot be empty".to_string(),
            ));
        }

        if self.auth.admin_api_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "Admin API key required (REVIEWPULSE_AUTH__ADMIN_API_KEY)".to_string(),
            ));
        }

        if self.limits.requests_per_minute == 0 {
            return Err(ConfigError::ValidationError(
                "requests_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service name used in logs and the health endpoint
    pub name: String,

    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "reviewpulse-api".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Document database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub url: String,

    /// Database name
    pub name: String,

    /// Server selection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: "feedback_db".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// LLM enrichment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API key for the hosted chat-completion API
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens to generate per enrichment call
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout_secs: 30,
            max_tokens: 500,
        }
    }
}

/// Admin authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected in the `X-API-Key` header on admin routes
    pub admin_api_key: String,
}

/// Request limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-client request budget per minute
    pub requests_per_minute: u32,

    /// Per-request handler timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 60,
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g. "info", "reviewpulse=debug,warn")
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "mongodb://localhost:27017".to_string();
        config.llm.api_key = "gsk-test".to_string();
        config.auth.admin_api_key = "admin-secret".to_string();
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.service.port, 8000);
        assert_eq!(config.database.name, "feedback_db");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.limits.requests_per_minute, 60);
    }

    #[test]
    fn test_validation_requires_secrets() {
        // Defaults alone must not validate: the secrets are required
        assert!(AppConfig::default().validate().is_err());

        let config = valid_config();
        assert!(config.validate().is_ok());

        let mut missing_admin_key = valid_config();
        missing_admin_key.auth.admin_api_key.clear();
        assert!(missing_admin_key.validate().is_err());

        let mut missing_llm_key = valid_config();
        missing_llm_key.llm.api_key.clear();
        assert!(missing_llm_key.validate().is_err());
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = valid_config();
        config.service.port = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.limits.requests_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("REVIEWPULSE_DATABASE__URL", "mongodb://db:27017");
            jail.set_env("REVIEWPULSE_SERVICE__PORT", "9000");

            let config = AppConfig::load(None).expect("config should load");
            assert_eq!(config.database.url, "mongodb://db:27017");
            assert_eq!(config.service.port, 9000);
            assert_eq!(config.database.name, "feedback_db");
            Ok(())
        });
    }
}
