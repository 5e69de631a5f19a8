//! ESG Agent

use super::super::accumulator::SliceUpdate;
use super::helpers::standard_prompt;
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You assess the environmental, social and governance profile of prospective
banking clients for sustainable finance and credit risk teams.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "esgProfile": {
    "rating": "third-party rating with provider, or null",
    "environmental": "", "social": "", "governance": "",
    "initiatives": ["sustainability commitments and targets"],
    "risks": ["material ESG risks"]
  }
}
</OUTPUT>

<FOCUS>
- Note any sustainability-linked financing or green bonds in initiatives.
- Use null for pillars the search results do not cover.
</FOCUS>"#;

#[derive(Default)]
pub struct EsgAgent;

#[async_trait::async_trait]
impl ResearchAgent for EsgAgent {
    fn topic(&self) -> Topic {
        Topic::Esg
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::Esg,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(request, search, "Summarize the company's ESG profile.")
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::Esg(ParsedResponse::parse(raw).esg_profile())
                }),
            },
        )
        .await
    }
}

impl EsgAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            format!("{} sustainability report ESG", company),
            format!("{} emissions climate targets", company),
            format!("{} governance controversy", company),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockProvider, MockSearch, context};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_esg_profile_parsed() {
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::echo()),
            Arc::new(MockProvider::replying(
                r#"{"esgProfile": {"rating": "MSCI A", "initiatives": ["Net zero by 2040"]}}"#,
            )),
        );
        let SliceUpdate::Esg(profile) = EsgAgent.run(&ctx).await.unwrap() else {
            panic!("expected ESG update");
        };
        assert_eq!(profile.rating.as_deref(), Some("MSCI A"));
        assert_eq!(profile.initiatives, vec!["Net zero by 2040"]);
        assert!(profile.social.is_none());
    }

    #[tokio::test]
    async fn test_empty_search_is_fatal() {
        let provider = Arc::new(MockProvider::replying("{}"));
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::empty()),
            provider.clone(),
        );
        let err = EsgAgent.run(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), "NoDataError");
        assert!(provider.calls().is_empty());
    }
}
