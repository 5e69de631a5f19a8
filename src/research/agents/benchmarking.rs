//! Peer Benchmarking Agent

use super::super::accumulator::SliceUpdate;
use super::helpers::{standard_prompt, with_industry};
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You benchmark prospective banking clients against their listed peers.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "peerComparison": {
    "peers": [{"name": "", "comparison": "how the company compares on scale, growth and margins"}],
    "relativePosition": "one sentence overall verdict",
    "keyDifferentiators": []
  }
}
</OUTPUT>

<FOCUS>
- 3 to 5 direct peers in the same industry and geography.
- Quote comparative figures from the search results where available.
</FOCUS>"#;

#[derive(Default)]
pub struct BenchmarkingAgent;

#[async_trait::async_trait]
impl ResearchAgent for BenchmarkingAgent {
    fn topic(&self) -> Topic {
        Topic::Benchmarking
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::Benchmarking,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(request, search, "Compare the company with its closest peers.")
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::Benchmarking(ParsedResponse::parse(raw).peer_comparison())
                }),
            },
        )
        .await
    }
}

impl BenchmarkingAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            with_industry(request, format!("{} peers comparison", company)),
            format!("{} vs competitors revenue margin", company),
        ]
    }
}
