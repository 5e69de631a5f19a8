//! Market Position Agent
//!
//! Competitive landscape and SWOT. The only topic that still answers when
//! every search comes back empty, falling back to the model's general
//! knowledge.

use super::super::accumulator::{MarketPositionSlice, SliceUpdate};
use super::helpers::{company_context, standard_prompt, with_industry};
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You are an industry analyst assessing a company's competitive position for a
commercial bank's coverage team.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "marketAnalysis": {
    "position": "leader | challenger | niche player, with one sentence of context",
    "marketShare": "",
    "competitors": ["main competitors"],
    "trends": ["industry trends affecting the company"]
  },
  "swotAnalysis": {
    "strengths": [], "weaknesses": [], "opportunities": [], "threats": []
  }
}
</OUTPUT>

<FOCUS>
- 3 to 5 entries per SWOT list, each one short sentence.
- Prefer facts from the search results. When none are provided, state only
  widely known facts and keep marketShare null.
</FOCUS>"#;

const TASK: &str = "Assess the company's market position and produce a SWOT analysis.";

const NO_DATA_TASK: &str = "No search results were found. Use general knowledge of the company \
and its industry to assess its market position and produce a SWOT analysis. \
Do not invent figures.";

#[derive(Default)]
pub struct MarketPositionAgent;

#[async_trait::async_trait]
impl ResearchAgent for MarketPositionAgent {
    fn topic(&self) -> Topic {
        Topic::MarketPosition
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::MarketPosition,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(Self::prompt),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    let parsed = ParsedResponse::parse(raw);
                    SliceUpdate::MarketPosition(MarketPositionSlice {
                        market_analysis: parsed.market_analysis(),
                        swot_analysis: parsed.swot(),
                    })
                }),
            },
        )
        .await
    }
}

impl MarketPositionAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        vec![
            with_industry(request, format!("{} market share competitors", company)),
            format!("{} competitive position strategy", company),
            format!("{} industry outlook trends", company),
        ]
    }

    fn prompt(request: &ResearchRequest, search: Option<&str>) -> String {
        match search {
            Some(_) => standard_prompt(request, search, TASK),
            None => format!(
                "{}\n## Task\n{}\nRespond ONLY with the JSON object described in your instructions.",
                company_context(request),
                NO_DATA_TASK
            ),
        }
    }
}
