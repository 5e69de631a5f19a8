//! Decision Makers Agent
//!
//! Deeper profile of who approves banking mandates: individual priorities,
//! board make-up, turnover and how to engage. Also writes the free-text
//! decision-making process when the model provides one.

use super::super::accumulator::SliceUpdate;
use super::helpers::{standard_prompt, with_industry};
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You map the decision-making unit for corporate banking mandates at a
prospective client.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "enhancedExecutiveData": {
    "executiveProfiles": [
      {"name": "", "title": "", "tenure": "", "background": "", "priorities": [], "bankingInfluence": "high | medium | low"}
    ],
    "organizationalStructure": "how finance and treasury report",
    "boardComposition": [{"name": "", "role": "", "otherAffiliations": []}],
    "turnover": [{"date": "", "description": "appointment or departure"}],
    "engagementStrategy": ["how a banker should approach these people"]
  },
  "decisionMakingProcess": "who initiates, evaluates and approves banking decisions"
}
</OUTPUT>

<FOCUS>
- Prioritise CFO, Treasurer and board members with finance committee roles.
- Only people named in the search results.
</FOCUS>"#;

#[derive(Default)]
pub struct DecisionMakersAgent;

#[async_trait::async_trait]
impl ResearchAgent for DecisionMakersAgent {
    fn topic(&self) -> Topic {
        Topic::DecisionMakers
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::DecisionMakers,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(
                        request,
                        search,
                        "Profile the people who make banking decisions and describe how they decide.",
                    )
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    let parsed = ParsedResponse::parse(raw);
                    SliceUpdate::DecisionMakers {
                        enhanced: parsed.enhanced_decision_makers(),
                        process: parsed.string_field("decisionMakingProcess"),
                    }
                }),
            },
        )
        .await
    }
}

impl DecisionMakersAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            format!("{} CFO treasurer profile interview", company),
            format!("{} board directors finance committee", company),
            format!("{} executive appointment resignation", company),
            with_industry(request, format!("{} organisational structure", company)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockProvider, MockSearch, context};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_enhanced_profile_and_process() {
        let provider = Arc::new(MockProvider::replying(
            r#"{
                "enhancedExecutiveData": {
                    "executiveProfiles": [{"name": "Matt Keen", "title": "CFO", "bankingInfluence": "high"}],
                    "engagementStrategy": ["Lead with working capital"]
                },
                "decisionMakingProcess": "CFO recommends, board approves"
            }"#,
        ));
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::echo()),
            provider,
        );
        let update = DecisionMakersAgent.run(&ctx).await.unwrap();
        let SliceUpdate::DecisionMakers { enhanced, process } = update else {
            panic!("expected decision makers update");
        };
        assert_eq!(enhanced.executive_profiles[0].name, "Matt Keen");
        assert_eq!(enhanced.engagement_strategy, vec!["Lead with working capital"]);
        assert_eq!(process.as_deref(), Some("CFO recommends, board approves"));
    }

    #[tokio::test]
    async fn test_missing_process_writes_one_key() {
        let ctx = context(
            ResearchRequest::new("Myer"),
            Arc::new(MockSearch::echo()),
            Arc::new(MockProvider::replying("not json")),
        );
        let update = DecisionMakersAgent.run(&ctx).await.unwrap();
        assert_eq!(update.keys().len(), 1);
    }
}
