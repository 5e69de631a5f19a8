//! Client Research Pipeline
//!
//! Scatters one agent per selected topic, gathers their slice updates in a
//! single coordinator loop, then runs the summarizer once every topic has
//! settled.
//!
//! ## Run phases
//!
//! `Pending -> Collecting -> Summarizing -> Done | Failed`
//!
//! Topic failures are recorded in the accumulator's error slot and never stop
//! the run. Only a summarizer failure reaches `Failed`.
//!
//! There is no cancellation, retry or core timeout: a hung search or
//! completion hangs its topic, and the run waits for it. HTTP timeouts can be
//! set per provider in configuration.

pub mod accumulator;
pub mod agents;
pub mod progress;
pub mod summarizer;
pub mod topic;

pub use accumulator::{
    Accumulator, BankingSlice, FinancialSlice, MarketPositionSlice, SliceKey, SliceUpdate,
};
pub use agents::{ResearchAgent, select_agents};
pub use progress::{Progress, ProgressEvent, ProgressSink, SharedProgress};
pub use summarizer::Summarizer;
pub use topic::{EmptySearchPolicy, Topic};

use chrono::Utc;
use futures::StreamExt;
use futures::stream;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::provider::SharedProvider;
use crate::config::ResearchConfig;
use crate::search::SharedSearch;
use crate::types::{ResearchRequest, ResearchResult, Result, RunId};

// =============================================================================
// Run Phase
// =============================================================================

/// Lifecycle of one research run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Pending,
    Collecting,
    Summarizing,
    Done,
    Failed,
}

impl RunPhase {
    pub fn can_advance_to(self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Pending, RunPhase::Collecting)
                | (RunPhase::Collecting, RunPhase::Summarizing)
                | (RunPhase::Summarizing, RunPhase::Done)
                | (RunPhase::Summarizing, RunPhase::Failed)
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Pending => "pending",
            RunPhase::Collecting => "collecting",
            RunPhase::Summarizing => "summarizing",
            RunPhase::Done => "done",
            RunPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

struct RunState {
    run_id: RunId,
    phase: RunPhase,
}

impl RunState {
    fn new() -> Self {
        Self {
            run_id: RunId::generate(),
            phase: RunPhase::Pending,
        }
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid run transition {} -> {}",
            self.phase,
            next
        );
        info!("Run {}: {} -> {}", self.run_id, self.phase, next);
        self.phase = next;
    }
}

// =============================================================================
// Context
// =============================================================================

/// Read-only state shared by every agent in a run
pub struct ResearchContext {
    pub request: Arc<ResearchRequest>,
    pub provider: SharedProvider,
    pub search: SharedSearch,
    /// Cap on combined search text per topic
    pub max_search_chars: usize,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Entry point for client research
pub struct ResearchPipeline {
    provider: SharedProvider,
    search: SharedSearch,
    config: ResearchConfig,
    progress: Progress,
}

impl ResearchPipeline {
    pub fn new(provider: SharedProvider, search: SharedSearch, config: ResearchConfig) -> Self {
        Self {
            provider,
            search,
            config,
            progress: Progress::default(),
        }
    }

    /// Attach a progress sink
    pub fn with_progress(mut self, sink: SharedProgress) -> Self {
        self.progress = Progress::new(sink);
        self
    }

    /// Research one company.
    ///
    /// Returns `Err` only when the summarizer fails; topic failures are
    /// reported through `ResearchResult::error`.
    pub async fn run(&self, request: ResearchRequest) -> Result<ResearchResult> {
        let mut state = RunState::new();
        let request = Arc::new(request);
        let agents = select_agents(&request);

        info!(
            "Run {}: researching '{}' across {} topics",
            state.run_id,
            request.display_name(),
            agents.len()
        );
        self.progress.emit(ProgressEvent::Started {
            company: request.display_name().to_string(),
            topics: agents.len(),
        });

        let context = Arc::new(ResearchContext {
            request: request.clone(),
            provider: self.provider.clone(),
            search: self.search.clone(),
            max_search_chars: self.config.max_search_chars,
        });

        // Scatter: agents run concurrently; this loop is the only writer
        state.advance(RunPhase::Collecting);
        let mut acc = Accumulator::new();
        let mut results = stream::iter(agents)
            .map(|agent| {
                let context = context.clone();
                async move {
                    let topic = agent.topic();
                    (topic, agent.run(&context).await)
                }
            })
            .buffer_unordered(self.config.max_concurrency.max(1));

        while let Some((topic, result)) = results.next().await {
            let outcome = result.and_then(|update| acc.apply(update));
            match outcome {
                Ok(()) => {
                    info!("Run {}: {} research complete", state.run_id, topic);
                    self.progress.emit(ProgressEvent::TopicCompleted { topic });
                }
                Err(e) => {
                    warn!("Run {}: {} research failed: {}", state.run_id, topic, e);
                    acc.record_error(topic, &e);
                    self.progress.emit(ProgressEvent::TopicFailed {
                        topic,
                        error: e.to_string(),
                    });
                }
            }
        }
        drop(results);

        // Join barrier passed: every topic has settled
        state.advance(RunPhase::Summarizing);
        self.progress.emit(ProgressEvent::Summarizing);

        let summarizer = Summarizer::new(self.provider.clone());
        if let Err(e) = summarizer.summarize(&request, &mut acc).await {
            state.advance(RunPhase::Failed);
            self.progress.emit(ProgressEvent::Failed {
                error: e.to_string(),
            });
            return Err(e);
        }

        state.advance(RunPhase::Done);
        let failed_topics = acc.errors().len();
        self.progress.emit(ProgressEvent::Finished { failed_topics });

        let mut output = acc.output;
        output.run_id = Some(state.run_id);
        output.company_name = request.company_name.trim().to_string();
        output.generated_at = Some(Utc::now());
        Ok(output)
    }
}

// =============================================================================
// Test Support
// =============================================================================


#[cfg(test)]
mod tests {
    use super::testing::{MockProvider, MockSearch};
    use super::*;
    use crate::types::{ResearchTopics, ScopeError, Urgency};
    use std::sync::Mutex;

    const MYER_REPLY: &str = r#"```json
{
  "financialOverview": "Myer reported sales of $3.3bn with stable margins.",
  "keyMetrics": {"financial": {"revenue": "$3.3bn"}},
  "marketAnalysis": {"position": "Largest Australian department store"},
  "swotAnalysis": {"strengths": ["Brand"], "weaknesses": [], "opportunities": ["Online"], "threats": []},
  "news": [{"headline": "Myer merges with Premier apparel brands", "summary": "Deal approved"}],
  "recentDevelopments": [{"title": "Premier merger", "description": "Apparel brands acquired"}],
  "keyExecutives": [{"name": "Olivia Wirth", "title": "Executive Chair"}],
  "executiveProfiles": [{"name": "Olivia Wirth", "title": "Executive Chair"}],
  "decisionMakingProcess": "Board approves major facilities",
  "bankingOpportunities": [
    {"service": "Working capital facility", "urgency": "HIGH"},
    {"service": "FX hedging", "urgency": "soon"}
  ],
  "bankingRelationships": {"currentBanks": ["ANZ"]},
  "esgProfile": {"rating": "BBB"},
  "peerComparison": {"peers": [{"name": "David Jones", "comparison": "Smaller footprint"}]}
}
```"#;

    const SUMMARY: &str = "Myer is Australia's largest department store group with stable earnings \
        and a recent merger that expands its apparel portfolio. Working capital and FX needs \
        present near-term opportunities.";

    /// Agents get the JSON reply; the summarizer gets prose
    fn scripted_provider() -> Arc<MockProvider> {
        Arc::new(MockProvider::with(|req| {
            if req.system.contains("senior relationship manager") {
                Ok(SUMMARY.to_string())
            } else {
                Ok(MYER_REPLY.to_string())
            }
        }))
    }

    fn pipeline(search: Arc<MockSearch>, provider: Arc<MockProvider>) -> ResearchPipeline {
        ResearchPipeline::new(provider, search, ResearchConfig::default())
    }

    #[test]
    fn test_run_phase_transitions() {
        use RunPhase::*;
        assert!(Pending.can_advance_to(Collecting));
        assert!(Collecting.can_advance_to(Summarizing));
        assert!(Summarizing.can_advance_to(Done));
        assert!(Summarizing.can_advance_to(Failed));

        assert!(!Pending.can_advance_to(Summarizing));
        assert!(!Collecting.can_advance_to(Failed));
        assert!(!Collecting.can_advance_to(Done));
        assert!(!Done.can_advance_to(Collecting));
        assert!(!Failed.can_advance_to(Done));
    }

    #[tokio::test]
    async fn test_full_myer_run() {
        let request = ResearchRequest::new("Myer")
            .with_industry("Retail")
            .with_topics(ResearchTopics::all());

        let result = pipeline(Arc::new(MockSearch::echo()), scripted_provider())
            .run(request)
            .await
            .unwrap();

        assert_eq!(result.company_name, "Myer");
        assert!(result.run_id.is_some());
        assert!(result.generated_at.is_some());
        assert!(
            result
                .financial_overview
                .as_deref()
                .is_some_and(|s| !s.is_empty())
        );

        let swot = result.swot_analysis.as_ref().unwrap();
        assert_eq!(swot.strengths, vec!["Brand"]);
        assert!(swot.weaknesses.is_empty());

        assert_eq!(result.banking_opportunities.len(), 2);
        assert_eq!(result.banking_opportunities[0].urgency, Urgency::High);
        assert_eq!(result.banking_opportunities[1].urgency, Urgency::Medium);
        assert!(result.banking_relationships.is_some());
        assert!(result.esg_profile.is_some());
        assert!(result.peer_comparison.is_some());
        assert_eq!(result.recent_developments.len(), 1);
        assert_eq!(result.news.len(), 1);

        let dm = result.decision_makers.as_ref().unwrap();
        assert_eq!(
            dm.decision_making_process.as_deref(),
            Some("Board approves major facilities")
        );
        assert_eq!(dm.key_people[0].name, "Olivia Wirth");

        assert!(result.summary.as_deref().unwrap().len() > 100);
        assert!(result.error.is_none());

        // Serialized shape keeps all four SWOT arrays
        let json = serde_json::to_value(&result).unwrap();
        for key in ["strengths", "weaknesses", "opportunities", "threats"] {
            assert!(json["swotAnalysis"][key].is_array());
        }
    }

    #[tokio::test]
    async fn test_missing_company_name_still_summarizes() {
        let request = ResearchRequest::default().with_topics(ResearchTopics::all());
        let search = Arc::new(MockSearch::echo());
        let provider = Arc::new(MockProvider::replying(
            "No research data was available for this company.",
        ));

        let result = pipeline(search.clone(), provider.clone())
            .run(request)
            .await
            .unwrap();

        // No topic searched or called the model; only the summarizer ran
        assert!(search.queries().is_empty());
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].user.matches("No data available").count(),
            SliceKey::ALL.len()
        );

        let error = result.error.unwrap();
        assert_eq!(error.matches("ValidationError").count(), 9);
        assert!(result.summary.is_some());
        assert_eq!(
            result.financial_overview.as_deref(),
            Some(crate::constants::research::FINANCIAL_OVERVIEW_FALLBACK)
        );
    }

    #[tokio::test]
    async fn test_topic_failures_are_isolated() {
        // Market position synthesizes; every other topic has no data
        let provider = scripted_provider();
        let result = pipeline(Arc::new(MockSearch::failing()), provider.clone())
            .run(ResearchRequest::new("Myer"))
            .await
            .unwrap();

        assert!(result.market_analysis.is_some());
        let error = result.error.unwrap();
        assert_eq!(error.matches("NoDataError").count(), 5);
        assert!(!error.contains("Market position"));
        assert!(result.summary.is_some());

        // Market position + summarizer
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_llm_failure_fails_only_topics() {
        let provider = Arc::new(MockProvider::with(|req| {
            if req.system.contains("senior relationship manager") {
                Ok(SUMMARY.to_string())
            } else {
                Err(ScopeError::LlmApi("model overloaded".to_string()))
            }
        }));
        let result = pipeline(Arc::new(MockSearch::echo()), provider)
            .run(ResearchRequest::new("Myer"))
            .await
            .unwrap();

        assert_eq!(result.error.unwrap().matches("LLMError").count(), 6);
        assert!(result.banking_opportunities.is_empty());
        assert_eq!(result.summary.as_deref(), Some(SUMMARY));
    }

    #[tokio::test]
    async fn test_summarizer_failure_fails_run() {
        let provider = Arc::new(MockProvider::with(|req| {
            if req.system.contains("senior relationship manager") {
                Err(ScopeError::LlmApi("timeout".to_string()))
            } else {
                Ok(MYER_REPLY.to_string())
            }
        }));

        let messages = Arc::new(Mutex::new(Vec::<String>::new()));
        let captured = messages.clone();
        let err = pipeline(Arc::new(MockSearch::echo()), provider)
            .with_progress(Arc::new(move |m: &str| {
                captured.lock().unwrap().push(m.to_string())
            }))
            .run(ResearchRequest::new("Myer"))
            .await
            .unwrap_err();

        assert!(matches!(err, ScopeError::Summarizer(_)));
        let messages = messages.lock().unwrap();
        assert!(messages[0].starts_with("Starting research on Myer"));
        assert!(messages.last().unwrap().starts_with("Research failed"));
    }

    #[tokio::test]
    async fn test_progress_reports_each_topic() {
        let messages = Arc::new(Mutex::new(Vec::<String>::new()));
        let captured = messages.clone();
        pipeline(Arc::new(MockSearch::echo()), scripted_provider())
            .with_progress(Arc::new(move |m: &str| {
                captured.lock().unwrap().push(m.to_string())
            }))
            .run(ResearchRequest::new("Myer"))
            .await
            .unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(
            messages.iter().filter(|m| m.ends_with("research complete")).count(),
            6
        );
        assert_eq!(messages.last().map(String::as_str), Some("Research complete"));
    }
}
