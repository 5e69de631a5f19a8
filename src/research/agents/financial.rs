//! Financial Agent
//!
//! Revenue, profitability, credit and dividend profile. Unlike other topics,
//! an unparseable reply is not wasted: the overview is recovered from the
//! raw text between the `"financialOverview"` and `"keyMetrics"` markers.

use super::super::accumulator::{FinancialSlice, SliceUpdate};
use super::{ResearchAgent, ResearchAgentConfig, ResearchContext, run_research_agent};
use super::helpers::{standard_prompt, with_industry};
use crate::ai::validation::ParsedResponse;
use crate::research::topic::Topic;
use crate::types::{KeyMetrics, ResearchRequest, Result};

const OVERVIEW_MARKER: &str = "\"financialOverview\"";
const METRICS_MARKER: &str = "\"keyMetrics\"";

const SYSTEM_PROMPT: &str = r#"<ROLE>
You are a credit analyst at a commercial bank preparing the financial section
of a prospective client profile.
</ROLE>

<OUTPUT>
Respond with ONE JSON object of exactly this shape:
{
  "financialOverview": "3-5 sentence narrative of scale, growth, profitability and balance sheet",
  "keyMetrics": {
    "financial": {"revenue": "", "revenueGrowth": "", "netIncome": "", "ebitda": "", "profitMargin": "", "marketCap": ""},
    "credit": {"creditRating": "", "totalDebt": "", "debtToEquity": "", "interestCoverage": ""},
    "dividend": {"dividendYield": "", "payoutRatio": "", "dividendHistory": ""},
    "risk": {"beta": "", "riskFactors": []}
  }
}
</OUTPUT>

<FOCUS>
- Use figures from the search results only, with currency and period (e.g. "$3.36bn FY24").
- Use null for any metric the results do not support. Do NOT estimate.
</FOCUS>"#;

#[derive(Default)]
pub struct FinancialAgent;

#[async_trait::async_trait]
impl ResearchAgent for FinancialAgent {
    fn topic(&self) -> Topic {
        Topic::Financial
    }

    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate> {
        run_research_agent(
            context,
            ResearchAgentConfig {
                topic: Topic::Financial,
                build_queries: Box::new(Self::queries),
                system_prompt: SYSTEM_PROMPT.to_string(),
                build_prompt: Box::new(|request: &ResearchRequest, search: Option<&str>| {
                    standard_prompt(
                        request,
                        search,
                        "Summarize the company's financial position and key metrics.",
                    )
                }),
                parse_result: Box::new(|_: &ResearchRequest, raw: &str| {
                    SliceUpdate::Financial(Self::parse(raw))
                }),
            },
        )
        .await
    }
}

impl FinancialAgent {
    pub fn queries(request: &ResearchRequest) -> Vec<String> {
        let company = request.display_name();
        let mut queries = vec![
            format!("{} annual report financial results", company),
            format!("{} revenue net profit earnings", company),
            format!("{} credit rating debt", company),
            format!("{} dividend share price market capitalisation", company),
        ];
        if request.industry().is_some() {
            queries.push(with_industry(
                request,
                format!("{} financial performance", company),
            ));
        }
        queries
    }

    /// Parse the reply, falling back to marker extraction when it is not JSON
    pub fn parse(raw: &str) -> FinancialSlice {
        let parsed = ParsedResponse::parse(raw);
        if parsed.is_ok() {
            return FinancialSlice {
                overview: parsed.string_field("financialOverview").unwrap_or_default(),
                key_metrics: parsed.key_metrics(),
            };
        }

        tracing::warn!(
            "Financial agent: unparseable reply ({}), using heuristic overview",
            parsed.error().unwrap_or("unknown")
        );
        FinancialSlice {
            overview: heuristic_overview(raw),
            key_metrics: KeyMetrics::default(),
        }
    }
}

/// Text between the overview and metrics markers, cleaned of JSON syntax.
/// Without both markers (or with nothing between them) the trimmed reply is used.
fn heuristic_overview(raw: &str) -> String {
    let between = raw.find(OVERVIEW_MARKER).and_then(|start| {
        let from = start + OVERVIEW_MARKER.len();
        let end = raw[from..].find(METRICS_MARKER)? + from;
        Some(&raw[from..end])
    });

    between
        .map(|text| {
            text.trim_start_matches(|c: char| c == ':' || c == '"' || c.is_whitespace())
                .trim_end_matches(|c: char| {
                    c == ',' || c == '"' || c == '{' || c.is_whitespace()
                })
                .replace("\\\"", "\"")
                .replace("\\n", " ")
        })
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| raw.trim().to_string())
}
