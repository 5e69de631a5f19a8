//! Banking Opportunities Agent
//!
//! Products the bank could pitch, with urgency. When the request asks for
//! banking relationships the same call also maps incumbent lenders and
//! facilities, so the slice carries both.

use super::super::accumulator::{BankingSlice, SliceUpdate};
use super::helpers::{standard_prompt, with_industry};
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You are a corporate banker identifying product opportunities at a prospective
client from public information.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "bankingOpportunities": [
    {
      "service": "e.g. syndicated loan refinancing, FX hedging, supply chain finance",
      "rationale": "the evidence in the search results that creates the need",
      "urgency": "high | medium | low",
      "competitivePosition": "how an incoming bank could win it"
    }
  ]
}
</OUTPUT>

<FOCUS>
- 3 to 6 opportunities, most urgent first.
- urgency is exactly one of high, medium or low.
</FOCUS>"#;

const RELATIONSHIPS_PROMPT: &str = r#"
<ADDITIONAL OUTPUT>
Also include this key in the same object:
  "bankingRelationships": {
    "currentBanks": ["lenders and advisers named in the results"],
    "facilities": ["existing facilities with size and maturity where known"],
    "relationshipNotes": "incumbency, recent refinancings, mandate changes"
  }
</ADDITIONAL OUTPUT>"#;

#[derive(Default)]
pub struct BankingOpportunitiesAgent;

#[async_trait::async_trait]
impl ResearchAgent for BankingOpportunitiesAgent {
    fn topic(&self) -> Topic {
        Topic::BankingOpportunities
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::BankingOpportunities,
                build_queries: Box::new(Self::queries),
                system_prompt: Self::system_prompt(&context.request),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(
                        request,
                        search,
                        "Identify banking opportunities and rate their urgency.",
                    )
                }),
                parse_result: Box::new(|request: &ResearchRequest, raw: &str| {
                    SliceUpdate::BankingOpportunities(Self::parse(request, raw))
                }),
            },
        )
        .await
    }
}

impl BankingOpportunitiesAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        let mut queries = vec![
            format!("{} debt refinancing loan facility", company),
            format!("{} expansion funding capital expenditure", company),
            with_industry(request, format!("{} treasury foreign exchange exposure", company)),
        ];
        if request.research_topics.include_banking_relationships {
            queries.push(format!("{} banking relationship lenders syndicate", company));
            queries.push(format!("{} bank facility agreement", company));
        }
        queries
    }

    fn system_prompt(request: &ResearchRequest) -> String {
        if request.research_topics.include_banking_relationships {
            format!("{}{}", SYSTEM_PROMPT, RELATIONSHIPS_PROMPT)
        } else {
            SYSTEM_PROMPT.to_string()
        }
    }

    pub fn parse(request: &ResearchRequest, raw: &str) -> BankingSlice {
        let parsed = ParsedResponse::parse(raw);
        BankingSlice {
            opportunities: parsed.banking_opportunities(),
            relationships: request
                .research_topics
                .include_banking_relationships
                .then(|| parsed.banking_relationships()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockProvider, MockSearch, context};
    use crate::types::{ResearchTopics, ScopeError, Urgency};
    use std::sync::Arc;

    const REPLY: &str = r#"{
        "bankingOpportunities": [
            {"service": "Working capital facility", "urgency": "HIGH"},
            {"service": "FX hedging", "urgency": "soon"},
            "not an object"
        ],
        "bankingRelationships": {"currentBanks": ["NAB", "Westpac"]}
    }"#;

    fn with_relationships() -> ResearchRequest {
        ResearchRequest::new("Myer").with_topics(ResearchTopics {
            include_banking_relationships: true,
            ..Default::default()
        })
    }

    #[test]
    fn test_parse_coerces_urgency() {
        let slice = BankingOpportunitiesAgent::parse(&ResearchRequest::new("Myer"), REPLY);
        assert_eq!(slice.opportunities.len(), 2);
        assert_eq!(slice.opportunities[0].urgency, Urgency::High);
        assert_eq!(slice.opportunities[1].urgency, Urgency::Medium);
        assert!(slice.relationships.is_none());
    }

    #[test]
    fn test_relationships_only_when_requested() {
        let slice = BankingOpportunitiesAgent::parse(&with_relationships(), REPLY);
        let rel = slice.relationships.unwrap();
        assert_eq!(rel.current_banks, vec!["NAB", "Westpac"]);

        assert_eq!(BankingOpportunitiesAgent::queries(&with_relationships()).len(), 5);
        assert_eq!(
            BankingOpportunitiesAgent::queries(&ResearchRequest::new("Myer")).len(),
            3
        );
        assert!(BankingOpportunitiesAgent::system_prompt(&with_relationships())
            .contains("bankingRelationships"));
    }

    #[tokio::test]
    async fn test_one_failed_query_does_not_fail_topic() {
        let second = BankingOpportunitiesAgent::queries(&ResearchRequest::new("Myer"))[1].clone();
        let failing = second.clone();
        let search = Arc::new(MockSearch::with(move |q| {
            if q == failing {
                Err(ScopeError::Search("HTTP 500".to_string()))
            } else {
                Ok(format!("Snippet: {q} results"))
            }
        }));
        let provider = Arc::new(MockProvider::replying(REPLY));
        let ctx = context(ResearchRequest::new("Myer"), search.clone(), provider.clone());

        let update = BankingOpportunitiesAgent.run(&ctx).await.unwrap();
        assert!(matches!(update, SliceUpdate::BankingOpportunities(_)));
        assert_eq!(search.queries().len(), 3);

        let user = &provider.calls()[0].user;
        assert!(user.contains(&format!("Search failed for query \"{}\"", second)));
        assert!(user.contains("debt refinancing loan facility results"));
        assert_eq!(provider.calls()[0].options.temperature, 0.2);
    }
}
