//! News Agent

use super::super::accumulator::SliceUpdate;
use super::helpers::standard_prompt;
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{ResearchRequest, Result};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You monitor press coverage of prospective banking clients.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "news": [
    {"date": "YYYY-MM-DD or null", "headline": "", "summary": "one or two sentences", "source": "publication"}
  ]
}
</OUTPUT>

<FOCUS>
- Up to 8 items, newest first, from the last 12 months.
- Only items present in the search results. Skip duplicates of the same story.
</FOCUS>"#;

#[derive(Default)]
pub struct NewsAgent;

#[async_trait::async_trait]
impl ResearchAgent for NewsAgent {
    fn topic(&self) -> Topic {
        Topic::News
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::News,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(request, search, "List the most relevant recent news items.")
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::News(ParsedResponse::parse(raw).news_items())
                }),
            },
        )
        .await
    }
}

impl NewsAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        let mut queries = vec![
            format!("{} latest news", company),
            format!("{} announcement press release", company),
        ];
        if let Some(domain) = request.website_domain() {
            queries.push(format!("site:{} {} news", domain, company));
        }
        queries
    }
}
