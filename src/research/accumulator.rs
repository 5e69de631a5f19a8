//! Per-run accumulator.
//!
//! Each topic owns a fixed set of slices (see [`Topic::owned_keys`]). Topics
//! never touch the accumulator directly: they return a [`SliceUpdate`] and
//! the coordinator applies it. Every slot is written at most once per run;
//! a second write is rejected with `SliceConflict` instead of silently
//! replacing the first.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::topic::Topic;
use crate::types::{
    BankingOpportunity, BankingRelationships, CustomTopicFinding, DecisionMakers, Development,
    EnhancedDecisionMakers, EsgProfile, Executive, KeyMetrics, MarketAnalysis, NewsItem,
    PeerComparison, ResearchResult, Result, ScopeError, SwotAnalysis,
};

// =============================================================================
// Slice Keys
// =============================================================================

/// Named accumulator slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    FinancialData,
    MarketPositionData,
    NewsData,
    RecentDevelopmentsData,
    ExecutiveData,
    EnhancedExecutiveData,
    BankingOpportunitiesData,
    EsgData,
    BenchmarkingData,
    DecisionMakingProcess,
    CustomTopicsData,
}

impl SliceKey {
    pub const ALL: [SliceKey; 11] = [
        SliceKey::FinancialData,
        SliceKey::MarketPositionData,
        SliceKey::NewsData,
        SliceKey::RecentDevelopmentsData,
        SliceKey::ExecutiveData,
        SliceKey::EnhancedExecutiveData,
        SliceKey::BankingOpportunitiesData,
        SliceKey::EsgData,
        SliceKey::BenchmarkingData,
        SliceKey::DecisionMakingProcess,
        SliceKey::CustomTopicsData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SliceKey::FinancialData => "financialData",
            SliceKey::MarketPositionData => "marketPositionData",
            SliceKey::NewsData => "newsData",
            SliceKey::RecentDevelopmentsData => "recentDevelopmentsData",
            SliceKey::ExecutiveData => "executiveData",
            SliceKey::EnhancedExecutiveData => "enhancedExecutiveData",
            SliceKey::BankingOpportunitiesData => "bankingOpportunitiesData",
            SliceKey::EsgData => "esgData",
            SliceKey::BenchmarkingData => "benchmarkingData",
            SliceKey::DecisionMakingProcess => "decisionMakingProcess",
            SliceKey::CustomTopicsData => "customTopicsData",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Slices
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSlice {
    /// Narrative overview; may come from the heuristic fallback
    pub overview: String,
    pub key_metrics: KeyMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPositionSlice {
    pub market_analysis: MarketAnalysis,
    pub swot_analysis: SwotAnalysis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingSlice {
    pub opportunities: Vec<BankingOpportunity>,
    /// Present only when banking relationships were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BankingRelationships>,
}

/// Everything one topic produces, tagged by topic
#[derive(Debug, Clone, PartialEq)]
pub enum SliceUpdate {
    Financial(FinancialSlice),
    MarketPosition(MarketPositionSlice),
    News(Vec<NewsItem>),
    RecentDevelopments(Vec<Development>),
    Executive(Vec<Executive>),
    DecisionMakers {
        enhanced: EnhancedDecisionMakers,
        process: Option<String>,
    },
    BankingOpportunities(BankingSlice),
    Esg(EsgProfile),
    Benchmarking(PeerComparison),
    CustomTopics(Vec<CustomTopicFinding>),
}

impl SliceUpdate {
    pub fn topic(&self) -> Topic {
        match self {
            SliceUpdate::Financial(_) => Topic::Financial,
            SliceUpdate::MarketPosition(_) => Topic::MarketPosition,
            SliceUpdate::News(_) => Topic::News,
            SliceUpdate::RecentDevelopments(_) => Topic::RecentDevelopments,
            SliceUpdate::Executive(_) => Topic::Executive,
            SliceUpdate::DecisionMakers { .. } => Topic::DecisionMakers,
            SliceUpdate::BankingOpportunities(_) => Topic::BankingOpportunities,
            SliceUpdate::Esg(_) => Topic::Esg,
            SliceUpdate::Benchmarking(_) => Topic::Benchmarking,
            SliceUpdate::CustomTopics(_) => Topic::CustomTopics,
        }
    }

    /// Slots this update will fill
    pub fn keys(&self) -> Vec<SliceKey> {
        match self {
            SliceUpdate::DecisionMakers { process, .. } => {
                let mut keys = vec![SliceKey::EnhancedExecutiveData];
                if process.is_some() {
                    keys.push(SliceKey::DecisionMakingProcess);
                }
                keys
            }
            other => other.topic().owned_keys().to_vec(),
        }
    }
}

// =============================================================================
// Accumulator
// =============================================================================

/// In-flight state of one research run. Only the coordinator writes it.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pub financial_data: Option<FinancialSlice>,
    pub market_position_data: Option<MarketPositionSlice>,
    pub news_data: Option<Vec<NewsItem>>,
    pub recent_developments_data: Option<Vec<Development>>,
    pub executive_data: Option<Vec<Executive>>,
    pub enhanced_executive_data: Option<EnhancedDecisionMakers>,
    pub banking_opportunities_data: Option<BankingSlice>,
    pub esg_data: Option<EsgProfile>,
    pub benchmarking_data: Option<PeerComparison>,
    pub decision_making_process: Option<String>,
    pub custom_topics_data: Option<Vec<CustomTopicFinding>>,
    errors: Vec<String>,
    pub output: ResearchResult,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filled(&self, key: SliceKey) -> bool {
        match key {
            SliceKey::FinancialData => self.financial_data.is_some(),
            SliceKey::MarketPositionData => self.market_position_data.is_some(),
            SliceKey::NewsData => self.news_data.is_some(),
            SliceKey::RecentDevelopmentsData => self.recent_developments_data.is_some(),
            SliceKey::ExecutiveData => self.executive_data.is_some(),
            SliceKey::EnhancedExecutiveData => self.enhanced_executive_data.is_some(),
            SliceKey::BankingOpportunitiesData => self.banking_opportunities_data.is_some(),
            SliceKey::EsgData => self.esg_data.is_some(),
            SliceKey::BenchmarkingData => self.benchmarking_data.is_some(),
            SliceKey::DecisionMakingProcess => self.decision_making_process.is_some(),
            SliceKey::CustomTopicsData => self.custom_topics_data.is_some(),
        }
    }

    /// Apply one topic's result. All-or-nothing: nothing is written when any
    /// target slot is already filled.
    pub fn apply(&mut self, update: SliceUpdate) -> Result<()> {
        if let Some(key) = update.keys().into_iter().find(|k| self.is_filled(*k)) {
            return Err(ScopeError::SliceConflict {
                key: key.to_string(),
            });
        }

        let out = &mut self.output;
        match update {
            SliceUpdate::Financial(slice) => {
                if !slice.overview.trim().is_empty() {
                    out.financial_overview = Some(slice.overview.clone());
                }
                out.key_metrics = Some(slice.key_metrics.clone());
                self.financial_data = Some(slice);
            }
            SliceUpdate::MarketPosition(slice) => {
                out.market_analysis = Some(slice.market_analysis.clone());
                out.swot_analysis = Some(slice.swot_analysis.clone());
                self.market_position_data = Some(slice);
            }
            SliceUpdate::News(items) => {
                out.news = items.clone();
                self.news_data = Some(items);
            }
            SliceUpdate::RecentDevelopments(items) => {
                out.recent_developments = items.clone();
                self.recent_developments_data = Some(items);
            }
            SliceUpdate::Executive(people) => {
                out.key_decision_makers = people.clone();
                self.executive_data = Some(people);
            }
            SliceUpdate::DecisionMakers { enhanced, process } => {
                out.decision_makers = Some(DecisionMakers {
                    key_people: Vec::new(),
                    decision_making_process: process.clone(),
                    enhanced: (!enhanced.is_empty()).then(|| enhanced.clone()),
                });
                self.enhanced_executive_data = Some(enhanced);
                self.decision_making_process = process;
            }
            SliceUpdate::BankingOpportunities(slice) => {
                out.banking_opportunities = slice.opportunities.clone();
                out.banking_relationships = slice.relationships.clone();
                self.banking_opportunities_data = Some(slice);
            }
            SliceUpdate::Esg(profile) => {
                out.esg_profile = Some(profile.clone());
                self.esg_data = Some(profile);
            }
            SliceUpdate::Benchmarking(comparison) => {
                out.peer_comparison = Some(comparison.clone());
                self.benchmarking_data = Some(comparison);
            }
            SliceUpdate::CustomTopics(findings) => {
                out.custom_topics = findings.clone();
                self.custom_topics_data = Some(findings);
            }
        }
        Ok(())
    }

    /// Record a topic failure. Messages are kept in arrival order.
    pub fn record_error(&mut self, topic: Topic, err: &ScopeError) {
        self.errors.push(format!(
            "{} research failed ({}): {}",
            crate::types::capitalize_first(topic.label()),
            err.kind(),
            err
        ));
        self.output.error = self.error();
    }

    /// All topic errors joined with "; ", or `None` when every topic succeeded
    pub fn error(&self) -> Option<String> {
        (!self.errors.is_empty()).then(|| self.errors.join("; "))
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Raw slice as JSON; `None` when the slot is empty
    pub fn slice_value(&self, key: SliceKey) -> Option<Value> {
        fn to_value<T: Serialize>(slot: &Option<T>) -> Option<Value> {
            slot.as_ref().and_then(|v| serde_json::to_value(v).ok())
        }
        match key {
            SliceKey::FinancialData => to_value(&self.financial_data),
            SliceKey::MarketPositionData => to_value(&self.market_position_data),
            SliceKey::NewsData => to_value(&self.news_data),
            SliceKey::RecentDevelopmentsData => to_value(&self.recent_developments_data),
            SliceKey::ExecutiveData => to_value(&self.executive_data),
            SliceKey::EnhancedExecutiveData => to_value(&self.enhanced_executive_data),
            SliceKey::BankingOpportunitiesData => to_value(&self.banking_opportunities_data),
            SliceKey::EsgData => to_value(&self.esg_data),
            SliceKey::BenchmarkingData => to_value(&self.benchmarking_data),
            SliceKey::DecisionMakingProcess => to_value(&self.decision_making_process),
            SliceKey::CustomTopicsData => to_value(&self.custom_topics_data),
        }
    }
}
