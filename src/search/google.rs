//! Google Custom Search Provider
//!
//! Queries the Custom Search JSON API and renders each hit as a
//! `Title / URL / Snippet` block.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::SearchProvider;
use crate::config::SearchConfig;
use crate::types::{ErrorClassifier, Result, ScopeError};

const PROVIDER: &str = "google";

/// Google Custom Search provider with secure API key handling
pub struct GoogleSearchProvider {
    api_key: SecretString,
    engine_id: String,
    api_base: String,
    results_per_query: u8,
    client: reqwest::Client,
}

impl std::fmt::Debug for GoogleSearchProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSearchProvider")
            .field("api_key", &"[REDACTED]")
            .field("engine_id", &self.engine_id)
            .field("api_base", &self.api_base)
            .field("results_per_query", &self.results_per_query)
            .finish()
    }
}

impl GoogleSearchProvider {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or_else(|| {
                ScopeError::Config(
                    "Google API key not found. Set GOOGLE_API_KEY env var or provide in config"
                        .to_string(),
                )
            })?;

        let engine_id = config
            .engine_id
            .clone()
            .or_else(|| std::env::var("GOOGLE_CSE_ID").ok())
            .ok_or_else(|| {
                ScopeError::Config(
                    "Search engine ID not found. Set GOOGLE_CSE_ID env var or search.engine_id"
                        .to_string(),
                )
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ScopeError::Search(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            engine_id,
            api_base: config.api_base.clone(),
            results_per_query: config.results_per_query,
            client,
        })
    }

    async fn fetch(&self, query: &str, num: u8) -> Result<SearchResponse> {
        let num = num.to_string();
        let response = self
            .client
            .get(&self.api_base)
            .query(&[
                ("key", self.api_key.expose_secret()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                ScopeError::Search(ErrorClassifier::classify_transport(&e, PROVIDER).to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Custom Search API error ({}): {}", status, body),
                PROVIDER,
            );
            return Err(ScopeError::Search(err.to_string()));
        }

        response
            .json()
            .await
            .map_err(|e| ScopeError::Search(format!("Failed to parse search response: {}", e)))
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str) -> Result<String> {
        debug!("Searching: {}", query);
        let body = self.fetch(query, self.results_per_query).await?;
        let text = render_items(&body.items);
        debug!("{} results for '{}'", body.items.len(), query);
        Ok(text)
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    async fn health_check(&self) -> Result<bool> {
        match self.fetch("test", 1).await {
            Ok(_) => {
                info!("Google Custom Search API is available");
                Ok(true)
            }
            Err(e) => {
                warn!("Google Custom Search check failed: {}", e);
                Ok(false)
            }
        }
    }
}

/// Render hits as labelled blocks separated by blank lines
fn render_items(items: &[SearchItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "Title: {}\nURL: {}\nSnippet: {}",
                item.title.trim(),
                item.link.trim(),
                item.snippet.trim().replace('\n', " ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// Response types

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchItem {
    title: String,
    link: String,
    snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_items() {
        let items = vec![
            SearchItem {
                title: "Myer annual report".to_string(),
                link: "https://example.com/ar".to_string(),
                snippet: "Sales of $3.3bn\nup 2%".to_string(),
            },
            SearchItem {
                title: "Myer news".to_string(),
                link: "https://example.com/news".to_string(),
                snippet: String::new(),
            },
        ];
        let text = render_items(&items);
        assert!(text.starts_with("Title: Myer annual report\nURL: https://example.com/ar"));
        assert!(text.contains("Snippet: Sales of $3.3bn up 2%"));
        assert_eq!(text.matches("Title:").count(), 2);
    }

    #[test]
    fn test_no_items_renders_empty() {
        let body: SearchResponse = serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(body.items.is_empty());
        assert_eq!(render_items(&body.items), "");
    }

    #[test]
    fn test_missing_engine_id_rejected() {
        let config = SearchConfig {
            api_key: Some("key".to_string()),
            engine_id: None,
            ..SearchConfig::default()
        };
        // Only meaningful when the environment does not supply one
        if std::env::var("GOOGLE_CSE_ID").is_err() {
            assert!(matches!(
                GoogleSearchProvider::new(&config),
                Err(ScopeError::Config(_))
            ));
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SearchConfig {
            api_key: Some("g-secret".to_string()),
            engine_id: Some("cx1".to_string()),
            ..SearchConfig::default()
        };
        let provider = GoogleSearchProvider::new(&config).unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("g-secret"));
        assert!(debug.contains("cx1"));
    }
}
