//! Web Search Abstraction
//!
//! Defines the SearchProvider trait consumed by every research topic.
//! A provider turns one query into plain text; an empty string means the
//! search succeeded but found nothing.

mod google;

pub use google::GoogleSearchProvider;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::types::{Result, ScopeError};

/// Shared search provider type for concurrent access across research topics.
pub type SharedSearch = Arc<dyn SearchProvider + Send + Sync>;

/// Web search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run one query and render the hits as text
    async fn search(&self, query: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Check if the provider is reachable with the configured credentials
    async fn health_check(&self) -> Result<bool>;
}

/// Create a shared search provider from configuration
pub fn create_search_provider(config: &SearchConfig) -> Result<SharedSearch> {
    match config.provider.as_str() {
        "google" => Ok(Arc::new(GoogleSearchProvider::new(config)?)),
        _ => Err(ScopeError::Config(format!(
            "Unknown search provider: {}. Supported: google",
            config.provider
        ))),
    }
}
