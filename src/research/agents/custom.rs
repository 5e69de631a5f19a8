//! Custom Topics Agent
//!
//! User-defined topics share one search pass and one completion. Each topic
//! contributes one query; the reply carries a finding per topic name.

use super::super::accumulator::SliceUpdate;
use super::helpers::company_context;
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You research specific questions a relationship manager has asked about a
prospective banking client.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "customTopics": [
    {"name": "topic name exactly as given", "findings": "2-4 sentence answer", "keyPoints": []}
  ]
}
</OUTPUT>

<FOCUS>
- One entry per requested topic, in the order given.
- When the search results do not cover a topic, say so in findings.
</FOCUS>"#;

#[derive(Default)]
pub struct CustomTopicsAgent;

#[async_trait::async_trait]
impl ResearchAgent for CustomTopicsAgent {
    fn topic(&self) -> Topic {
        Topic::CustomTopics
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::CustomTopics,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(Self::prompt),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::CustomTopics(ParsedResponse::parse(raw).custom_topics())
                }),
            },
        )
        .await
    }
}

impl CustomTopicsAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        request
            .research_topics
            .custom_topics
            .iter()
            .map(|topic| format!("{} {}", company, topic.query_text()))
            .collect()
    }

    fn prompt(request: &ResearchRequest, search: Option<&str>) -> String {
        let topics = request
            .research_topics
            .custom_topics
            .iter()
            .map(|topic| {
                if topic.description.trim().is_empty() {
                    format!("- {}", topic.name.trim())
                } else {
                    format!("- {}: {}", topic.name.trim(), topic.description.trim())
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n## Topics\n{}\n\n## Search Results\n{}\n\n## Task\nAnswer each topic.\nRespond ONLY with the JSON object described in your instructions.",
            company_context(request),
            topics,
            search.unwrap_or("No search results were found.")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockProvider, MockSearch, context};
    use crate::types::{CustomTopic, ResearchTopics};
    use std::sync::Arc;

    fn request() -> ResearchRequest {
        ResearchRequest::new("Myer").with_topics(ResearchTopics {
            custom_topics: vec![
                CustomTopic {
                    name: "Store leases".to_string(),
                    search_query: "store lease renewals".to_string(),
                    description: "Upcoming lease expiries".to_string(),
                },
                CustomTopic {
                    name: "Loyalty program".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
    }

    #[test]
    fn test_queries_fall_back_to_name() {
        assert_eq!(
            CustomTopicsAgent::queries(&request()),
            vec!["Myer store lease renewals", "Myer Loyalty program"]
        );
    }

    #[tokio::test]
    async fn test_single_call_for_all_topics() {
        let provider = Arc::new(MockProvider::replying(
            r#"{"customTopics": [
                {"name": "Store leases", "findings": "Several CBD leases expire in 2026.", "keyPoints": ["Melbourne flagship"]},
                {"name": "Loyalty program", "findings": "MYER one has 8m members."}
            ]}"#,
        ));
        let search = Arc::new(MockSearch::echo());
        let ctx = context(request(), search.clone(), provider.clone());

        let SliceUpdate::CustomTopics(found) = CustomTopicsAgent.run(&ctx).await.unwrap() else {
            panic!("expected custom topics update");
        };
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key_points, vec!["Melbourne flagship"]);
        assert!(found[1].key_points.is_empty());

        assert_eq!(search.queries().len(), 2);
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].user.contains("- Store leases: Upcoming lease expiries"));
        assert!(calls[0].user.contains("- Loyalty program\n"));
    }
}
