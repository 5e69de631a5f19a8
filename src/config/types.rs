//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/clientscope/) and project (.clientscope/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{llm, research, search};
use crate::types::{Result, ScopeError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Web search provider settings
    pub search: SearchConfig,

    /// Research pipeline settings
    pub research: ResearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            search: SearchConfig::default(),
            research: ResearchConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ScopeError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.llm.max_tokens == 0 {
            return Err(ScopeError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_secs == Some(0) || self.search.timeout_secs == Some(0) {
            return Err(ScopeError::Config(
                "timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        if !(1..=search::MAX_RESULTS_PER_QUERY).contains(&self.search.results_per_query) {
            return Err(ScopeError::Config(format!(
                "search results_per_query must be between 1 and {}, got {}",
                search::MAX_RESULTS_PER_QUERY,
                self.search.results_per_query
            )));
        }

        if self.research.max_concurrency == 0 {
            return Err(ScopeError::Config(
                "research max_concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently "openai")
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL (for OpenAI-compatible endpoints)
    pub api_base: String,

    /// API key; OPENAI_API_KEY is used when unset. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// HTTP request timeout. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: llm::DEFAULT_API_BASE.to_string(),
            api_key: None,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Search Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider name (currently "google")
    pub provider: String,

    /// API endpoint
    pub api_base: String,

    /// API key; GOOGLE_API_KEY is used when unset. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Programmable search engine ID; GOOGLE_CSE_ID is used when unset
    pub engine_id: Option<String>,

    /// Results requested per query (1-10)
    pub results_per_query: u8,

    /// HTTP request timeout. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("provider", &self.provider)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("engine_id", &self.engine_id)
            .field("results_per_query", &self.results_per_query)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            api_base: search::DEFAULT_API_BASE.to_string(),
            api_key: None,
            engine_id: None,
            results_per_query: search::DEFAULT_RESULTS_PER_QUERY,
            timeout_secs: None,
        }
    }
}

// =============================================================================
// Research Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Topic units running concurrently
    pub max_concurrency: usize,

    /// Cap on combined search text handed to the LLM per topic
    pub max_search_chars: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: research::DEFAULT_MAX_CONCURRENCY,
            max_search_chars: research::DEFAULT_MAX_SEARCH_CHARS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.search.provider, "google");
        assert!(config.llm.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.research.max_concurrency = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.search.results_per_query = 11;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_keys_redacted_and_not_serialized() {
        let mut config = Config::default();
        config.llm.api_key = Some("sk-secret".to_string());
        config.search.api_key = Some("g-secret".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("g-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("g-secret"));
    }
}
