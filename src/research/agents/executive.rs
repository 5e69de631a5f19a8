//! Executive Agent

use super::super::accumulator::SliceUpdate;
use super::helpers::standard_prompt;
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{Executive, ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You identify the senior leadership of prospective banking clients.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "keyExecutives": [
    {"name": "", "title": "", "background": "one sentence or null"}
  ]
}
</OUTPUT>

<FOCUS>
- CEO, CFO, Treasurer, Chair and other executives relevant to banking.
- Current office holders only, as named in the search results.
</FOCUS>"#;

#[derive(Default)]
pub struct ExecutiveAgent;

#[async_trait::async_trait]
impl ResearchAgent for ExecutiveAgent {
    fn topic(&self) -> Topic {
        Topic::Executive
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::Executive,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(request, search, "List the company's key executives.")
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::Executive(Self::parse(raw))
                }),
            },
        )
        .await
    }
}

impl ExecutiveAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            format!("{} CEO CFO leadership team", company),
            format!("{} board of directors chair", company),
            format!("{} treasurer head of treasury", company),
        ]
    }

    /// `keyExecutives`, falling back to a plain `executives` list
    pub fn parse(raw: &str) -> Vec<Executive> {
        let parsed = ParsedResponse::parse(raw);
        let primary = parsed.executives("keyExecutives");
        if primary.is_empty() {
            parsed.executives("executives")
        } else {
            primary
        }
    }
}
