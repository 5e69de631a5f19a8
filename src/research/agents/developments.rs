//! Recent Developments Agent
//!
//! Strategic events (acquisitions, restructures, capital raisings, leadership
//! moves) rather than day-to-day press.

use super::super::accumulator::SliceUpdate;
use super::helpers::standard_prompt;
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You track corporate events that create financing needs for a commercial bank.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "recentDevelopments": [
    {"date": "YYYY-MM or null", "title": "", "description": "what happened and why it matters to a lender"}
  ]
}
</OUTPUT>

<FOCUS>
- M&A, divestments, capital raisings, refinancings, restructures, major capex
  and expansion plans.
- Up to 6 items, newest first. Only events in the search results.
</FOCUS>"#;

#[derive(Default)]
pub struct RecentDevelopmentsAgent;

#[async_trait::async_trait]
impl ResearchAgent for RecentDevelopmentsAgent {
    fn topic(&self) -> Topic {
        Topic::RecentDevelopments
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::RecentDevelopments,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(
                        request,
                        search,
                        "List the company's material recent developments.",
                    )
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::RecentDevelopments(ParsedResponse::parse(raw).developments())
                }),
            },
        )
        .await
    }
}

impl RecentDevelopmentsAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            format!("{} acquisition merger divestment", company),
            format!("{} expansion investment capital raising", company),
            format!("{} restructuring strategy update", company),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockProvider, MockSearch, context};
    use crate::types::ScopeError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_developments_parsed_from_fenced_reply() {
        let provider = Arc::new(MockProvider::replying(
            "Here you go:\n```json\n{\"recentDevelopments\": [{\"date\": \"2024-09\", \"title\": \"Apparel Brands acquisition\"}]}\n```",
        ));
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::echo()),
            provider,
        );
        let SliceUpdate::RecentDevelopments(items) = RecentDevelopmentsAgent.run(&ctx).await.unwrap()
        else {
            panic!("expected developments update");
        };
        assert_eq!(items[0].title, "Apparel Brands acquisition");
        assert_eq!(items[0].description, "");
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::echo()),
            Arc::new(MockProvider::failing("rate limited")),
        );
        let err = RecentDevelopmentsAgent.run(&ctx).await.unwrap_err();
        assert!(matches!(err, ScopeError::LlmApi(_)));
        assert_eq!(err.kind(), "LLMError");
    }
}
