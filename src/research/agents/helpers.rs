//! Research Agent Helper Functions
//!
//! Shared execution pattern for every topic:
//! 1. Validate request -> 2. Build queries -> 3. Search (per-query isolation)
//! -> 4. Empty-search policy -> 5. One LLM call -> 6. Parse into a slice update

use futures::future::join_all;
use tracing::{debug, warn};

use super::super::ResearchContext;
use super::super::accumulator::SliceUpdate;
use super::super::topic::{EmptySearchPolicy, Topic};
use crate::ai::provider::CompletionRequest;
use crate::types::{Result, ResearchRequest, ScopeError, capitalize_first, truncate_chars};

// =============================================================================
// Search Digest
// =============================================================================

/// Outcome of one search query
#[derive(Debug, Clone)]
pub struct SearchSection {
    pub query: String,
    pub outcome: std::result::Result<String, String>,
}

/// All search results for one topic, in query order
#[derive(Debug, Clone, Default)]
pub struct SearchDigest {
    pub sections: Vec<SearchSection>,
}

impl SearchDigest {
    /// True when at least one query returned non-blank text
    pub fn has_data(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(&s.outcome, Ok(text) if !text.trim().is_empty()))
    }

    pub fn failed_count(&self) -> usize {
        self.sections.iter().filter(|s| s.outcome.is_err()).count()
    }

    /// Labelled blob of every section, failures replaced by a placeholder
    pub fn combined(&self) -> String {
        self.sections
            .iter()
            .map(|s| {
                let body = match &s.outcome {
                    Ok(text) if text.trim().is_empty() => "No results found.".to_string(),
                    Ok(text) => text.trim().to_string(),
                    Err(e) => format!("Search failed for query \"{}\": {}", s.query, e),
                };
                format!("### Search: {}\n{}", s.query, body)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Run every query; a failing query becomes a placeholder, never an error.
pub async fn collect_search(context: &ResearchContext, queries: &[String]) -> SearchDigest {
    let outcomes = join_all(queries.iter().map(|q| context.search.search(q))).await;

    let sections = queries
        .iter()
        .zip(outcomes)
        .map(|(query, outcome)| {
            if let Err(e) = &outcome {
                warn!("Search failed for '{}': {}", query, e);
            }
            SearchSection {
                query: query.clone(),
                outcome: outcome.map_err(|e| e.to_string()),
            }
        })
        .collect();

    SearchDigest { sections }
}

// =============================================================================
// Agent Runner Abstraction
// =============================================================================

/// Research agent execution configuration.
///
/// Defines all topic-specific behavior for the generic runner.
#[allow(clippy::type_complexity)]
pub struct ResearchAgentConfig<'a> {
    pub topic: Topic,
    /// Ordered search queries for this request
    pub build_queries: Box<dyn Fn(&ResearchRequest) -> Vec<String> + Send + Sync + 'a>,
    /// System prompt describing the exact JSON shape expected
    pub system_prompt: String,
    /// User prompt builder (receives the search blob, or `None` when
    /// synthesizing without data)
    pub build_prompt: Box<dyn Fn(&ResearchRequest, Option<&str>) -> String + Send + Sync + 'a>,
    /// Turns the raw reply into this topic's update; never fails
    pub parse_result: Box<dyn Fn(&ResearchRequest, &str) -> SliceUpdate + Send + Sync + 'a>,
}

/// Generic research agent runner.
///
/// Validation, no-data and LLM failures propagate and fail the topic.
/// Search failures and parse failures do not.
pub async fn run_research_agent(
    context: &ResearchContext,
    config: ResearchAgentConfig<'_>,
) -> Result<SliceUpdate> {
    let topic = config.topic;
    let request = context.request.as_ref();
    let company = request.validate()?;

    let queries = (config.build_queries)(request);
    debug!(
        "{}: {} queries for {}",
        agent_name(topic),
        queries.len(),
        company
    );

    let digest = collect_search(context, &queries).await;
    if digest.failed_count() > 0 {
        debug!(
            "{}: {}/{} searches failed",
            agent_name(topic),
            digest.failed_count(),
            queries.len()
        );
    }

    let prompt = if digest.has_data() {
        let blob = truncate_chars(&digest.combined(), context.max_search_chars);
        (config.build_prompt)(request, Some(&blob))
    } else {
        match topic.empty_search_policy() {
            EmptySearchPolicy::Fatal => return Err(ScopeError::no_data(topic.label())),
            EmptySearchPolicy::SynthesizeWithoutData => {
                warn!(
                    "{}: no search data, synthesizing from general knowledge",
                    agent_name(topic)
                );
                (config.build_prompt)(request, None)
            }
        }
    };

    let completion = CompletionRequest::new(config.system_prompt, prompt, topic.temperature());
    let response = context.provider.complete(&completion).await?;

    let update = (config.parse_result)(request, &response.content);
    debug!("{}: wrote {:?}", agent_name(topic), update.keys());
    Ok(update)
}

fn agent_name(topic: Topic) -> String {
    format!("{} agent", capitalize_first(topic.label()))
}

// =============================================================================
// Prompt Helpers
// =============================================================================

/// Company header shared by every user prompt
pub fn company_context(request: &ResearchRequest) -> String {
    let mut out = format!("Company: {}\n", request.display_name());
    if let Some(industry) = request.industry() {
        out.push_str(&format!("Industry: {}\n", industry));
    }
    if let Some(domain) = request.website_domain() {
        out.push_str(&format!("Website: {}\n", domain));
    }
    out
}

/// Standard user prompt: company header, search results, closing instruction
pub fn standard_prompt(request: &ResearchRequest, search: Option<&str>, task: &str) -> String {
    let results = search.unwrap_or("No search results were found.");
    format!(
        "{}\n## Search Results\n{}\n\n## Task\n{}\nRespond ONLY with the JSON object described in your instructions.",
        company_context(request),
        results,
        task
    )
}

/// Query with an optional industry qualifier
pub fn with_industry(request: &ResearchRequest, query: String) -> String {
    match request.industry() {
        Some(industry) => format!("{} {}", query, industry),
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(query: &str, outcome: std::result::Result<&str, &str>) -> SearchSection {
        SearchSection {
            query: query.to_string(),
            outcome: outcome.map(String::from).map_err(String::from),
        }
    }

    #[test]
    fn test_digest_placeholder_and_labels() {
        let digest = SearchDigest {
            sections: vec![
                section("q1", Ok("result one")),
                section("q2", Err("quota exceeded")),
                section("q3", Ok("")),
            ],
        };
        let blob = digest.combined();
        assert!(blob.contains("### Search: q1\nresult one"));
        assert!(blob.contains("Search failed for query \"q2\": quota exceeded"));
        assert!(blob.contains("### Search: q3\nNo results found."));
        assert!(digest.has_data());
        assert_eq!(digest.failed_count(), 1);
    }

    #[test]
    fn test_digest_without_data() {
        let digest = SearchDigest {
            sections: vec![section("q1", Err("down")), section("q2", Ok("  \n"))],
        };
        assert!(!digest.has_data());
        assert!(!SearchDigest::default().has_data());
    }

    #[test]
    fn test_company_context() {
        let req = ResearchRequest::new("Myer")
            .with_industry("Retail")
            .with_website("https://www.myer.com.au");
        let ctx = company_context(&req);
        assert!(ctx.contains("Company: Myer"));
        assert!(ctx.contains("Industry: Retail"));
        assert!(ctx.contains("Website: myer.com.au"));

        assert_eq!(
            with_industry(&req, "Myer competitors".to_string()),
            "Myer competitors Retail"
        );
    }

    #[test]
    fn test_agent_name() {
        assert_eq!(agent_name(Topic::MarketPosition), "Market position agent");
        assert_eq!(agent_name(Topic::Esg), "ESG agent");
    }
}
