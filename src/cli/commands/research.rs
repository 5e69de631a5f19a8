//! Research Command
//!
//! Runs one research pipeline for a company and prints the result.
//!
//! Usage:
//!   clientscope research --company "Myer" [--industry Retail] [--esg] ...
//!   clientscope research --request request.json [--output result.json]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::info;

use crate::cli::progress::ConsoleProgress;
use crate::cli::util::CommandContext;
use crate::research::ResearchPipeline;
use crate::types::{CustomTopic, ResearchRequest, ResearchResult, Result};

/// Output rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!("Invalid format '{}'. Valid values: json, text", s)),
        }
    }
}

/// Research run options (consolidated parameters)
#[derive(Debug, Clone, Default)]
pub struct ResearchOptions {
    /// JSON request file; flags below override or extend it
    pub request_file: Option<PathBuf>,
    pub company: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub esg: bool,
    pub benchmarking: bool,
    pub banking_relationships: bool,
    pub decision_makers: bool,
    pub custom_topics: Vec<CustomTopic>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    /// Suppress progress lines
    pub quiet: bool,
}

impl ResearchOptions {
    /// Merge the request file (if any) with command-line flags
    pub fn build_request(&self) -> Result<ResearchRequest> {
        let mut request = match &self.request_file {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => ResearchRequest::default(),
        };

        if let Some(company) = &self.company {
            request.company_name = company.clone();
        }
        if let Some(industry) = &self.industry {
            request.industry = Some(industry.clone());
        }
        if let Some(website) = &self.website {
            request.website = Some(website.clone());
        }

        let topics = &mut request.research_topics;
        topics.include_esg |= self.esg;
        topics.include_benchmarking |= self.benchmarking;
        topics.include_banking_relationships |= self.banking_relationships;
        topics.include_decision_makers |= self.decision_makers;
        topics.custom_topics.extend(self.custom_topics.iter().cloned());

        Ok(request)
    }
}

/// Run research and write the result. A run failure is written as
/// `{"error": ...}` before the error is returned.
pub fn run(options: ResearchOptions, config_path: Option<&Path>) -> Result<()> {
    let request = options.build_request()?;
    let ctx = CommandContext::load(config_path)?;
    info!(
        "Using LLM provider: {} ({}), search: {}",
        ctx.provider.name(),
        ctx.provider.model(),
        ctx.search.name()
    );

    let mut pipeline = ResearchPipeline::new(ctx.provider, ctx.search, ctx.config.research);
    if !options.quiet {
        pipeline = pipeline.with_progress(Arc::new(ConsoleProgress::new()));
    }

    let rt = Runtime::new()?;
    match rt.block_on(pipeline.run(request)) {
        Ok(result) => {
            let rendered = match options.format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => render_text(&result),
            };
            write_output(options.output.as_deref(), &rendered)
        }
        Err(e) => {
            let failure = serde_json::to_string_pretty(&ResearchResult::failure(e.to_string()))?;
            write_output(options.output.as_deref(), &failure)?;
            Err(e)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            info!("Wrote result to {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

// =============================================================================
// Text Rendering
// =============================================================================

/// Plain-text briefing of a result; absent sections are skipped
pub fn render_text(result: &ResearchResult) -> String {
    let mut out = format!("# {}\n", result.company_name);
    if let Some(at) = result.generated_at {
        out.push_str(&format!("Generated {}\n", at.format("%Y-%m-%d %H:%M UTC")));
    }

    let mut section = |title: &str, body: String| {
        if !body.trim().is_empty() {
            out.push_str(&format!("\n## {}\n{}\n", title, body.trim_end()));
        }
    };

    section("Summary", result.summary.clone().unwrap_or_default());
    section(
        "Financial Overview",
        result.financial_overview.clone().unwrap_or_default(),
    );
    section(
        "Market Position",
        result
            .market_analysis
            .as_ref()
            .and_then(|m| m.position.clone())
            .unwrap_or_default(),
    );
    section(
        "News",
        bullets(result.news.iter().map(|n| match &n.date {
            Some(date) => format!("{} ({})", n.headline, date),
            None => n.headline.clone(),
        })),
    );
    section(
        "Recent Developments",
        bullets(result.recent_developments.iter().map(|d| d.title.clone())),
    );
    section(
        "Key Decision Makers",
        bullets(
            result
                .key_decision_makers
                .iter()
                .map(|e| format!("{}, {}", e.name, e.title)),
        ),
    );
    section(
        "Banking Opportunities",
        bullets(
            result
                .banking_opportunities
                .iter()
                .map(|o| format!("[{}] {}", o.urgency, o.service)),
        ),
    );
    section(
        "Custom Topics",
        bullets(
            result
                .custom_topics
                .iter()
                .map(|t| format!("{}: {}", t.name, t.findings)),
        ),
    );
    section("Research Errors", result.error.clone().unwrap_or_default());

    out
}

fn bullets(items: impl Iterator<Item = String>) -> String {
    items.map(|item| format!("- {}\n", item)).collect()
}
