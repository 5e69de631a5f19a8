//! Summarizer
//!
//! Terminal step of a run. Reads every slice, asks the model for an
//! executive summary and merges it into the output without clobbering
//! fields the topics already populated. Only `summary` is always replaced.

use tracing::{debug, info};

use super::accumulator::{Accumulator, SliceKey};
use crate::ai::provider::{CompletionRequest, SharedProvider};
use crate::ai::validation::ParsedResponse;
use crate::constants::{research, temperature};
use crate::types::{DecisionMakers, Executive, ResearchRequest, Result, ScopeError};

const SYSTEM_PROMPT: &str = r#"<ROLE>
You are a senior relationship manager at a commercial bank writing an executive
summary of a prospective client for the coverage and credit teams.
</ROLE>

<OBJECTIVES>
Using ONLY the research notes provided:
1. Summarize the company's business, scale and financial condition
2. Describe its market position and the most material recent events
3. Identify who makes banking decisions and how
4. Highlight the most promising banking opportunities and how to approach them
</OBJECTIVES>

<FOCUS>
- Sections marked "No data available" were not researched successfully. Say so
  briefly; do NOT invent facts to fill them.
- Write 3 to 5 short paragraphs of plain prose. No headings, no bullet lists,
  no JSON.
</FOCUS>"#;

/// Terminal synthesis unit
pub struct Summarizer {
    provider: SharedProvider,
}

impl Summarizer {
    pub fn new(provider: SharedProvider) -> Self {
        Self { provider }
    }

    /// Write the summary into `acc.output`. Failure here fails the run.
    pub async fn summarize(&self, request: &ResearchRequest, acc: &mut Accumulator) -> Result<()> {
        let payload = build_payload(acc);
        debug!("Summarizer: payload of {} chars", payload.len());

        let user = format!(
            "Company: {}\n\n## Research Notes\n{}\n\nWrite the executive summary.",
            request.display_name(),
            payload
        );
        let completion = CompletionRequest::new(SYSTEM_PROMPT, user, temperature::SUMMARIZER);

        let response = self
            .provider
            .complete(&completion)
            .await
            .map_err(|e| ScopeError::Summarizer(e.to_string()))?;

        let summary = extract_summary(&response.content);
        if summary.is_empty() {
            return Err(ScopeError::Summarizer("model returned an empty summary".to_string()));
        }

        info!("Summarizer: summary of {} chars", summary.len());
        merge_summary(acc, summary);
        Ok(())
    }
}

/// One labelled line per slice. Empty slots become the no-data sentinel,
/// strings are inlined and everything else is compact JSON.
pub fn build_payload(acc: &Accumulator) -> String {
    let mut lines: Vec<String> = SliceKey::ALL
        .iter()
        .map(|key| {
            let text = match acc.slice_value(*key) {
                None | Some(serde_json::Value::Null) => research::NO_DATA_SENTINEL.to_string(),
                Some(serde_json::Value::String(s)) => s,
                Some(other) => other.to_string(),
            };
            format!("{}: {}", key, text)
        })
        .collect();

    if let Some(error) = acc.error() {
        lines.push(format!("researchErrors: {}", error));
    }
    lines.join("\n")
}

/// Prose reply, or the `summary` field when the model answered in JSON.
/// A JSON reply without a non-blank `summary` yields an empty string.
fn extract_summary(content: &str) -> String {
    let parsed = ParsedResponse::parse(content);
    if parsed.is_ok() {
        return parsed.string_field("summary").unwrap_or_default();
    }
    content.trim().to_string()
}

/// Non-destructive merge: populated output fields win, missing ones are
/// filled from raw slices, then from defaults. `summary` is always replaced.
pub fn merge_summary(acc: &mut Accumulator, summary: String) {
    let out = &mut acc.output;
    out.summary = Some(summary);

    let overview_missing = out
        .financial_overview
        .as_deref()
        .is_none_or(|s| s.trim().is_empty());
    if overview_missing {
        let from_slice = acc
            .financial_data
            .as_ref()
            .map(|f| f.overview.trim())
            .filter(|s| !s.is_empty())
            .map(String::from);
        out.financial_overview = Some(
            from_slice.unwrap_or_else(|| research::FINANCIAL_OVERVIEW_FALLBACK.to_string()),
        );
    }

    if out.key_decision_makers.is_empty() {
        out.key_decision_makers = match (&acc.executive_data, &acc.enhanced_executive_data) {
            (Some(people), _) if !people.is_empty() => people.clone(),
            (_, Some(enhanced)) => enhanced
                .executive_profiles
                .iter()
                .map(|p| Executive {
                    name: p.name.clone(),
                    title: p.title.clone(),
                    background: p.background.clone(),
                })
                .collect(),
            _ => Vec::new(),
        };
    }

    let dm = out.decision_makers.get_or_insert_with(DecisionMakers::default);
    if dm.key_people.is_empty() {
        dm.key_people = out.key_decision_makers.clone();
    }
    if dm.decision_making_process.is_none() {
        dm.decision_making_process = acc.decision_making_process.clone();
    }
    if dm.enhanced.is_none() {
        dm.enhanced = acc
            .enhanced_executive_data
            .as_ref()
            .filter(|e| !e.is_empty())
            .cloned();
    }
}
