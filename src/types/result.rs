//! Research result types.
//!
//! `ResearchResult` is a best-effort aggregation: every field is optional or
//! defaulted, and consumers must treat each section as possibly absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RunId;

/// Final output of a research run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<RunId>,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,

    /// Narrative synthesis written by the summarizer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_metrics: Option<KeyMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_analysis: Option<MarketAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swot_analysis: Option<SwotAnalysis>,
    pub news: Vec<NewsItem>,
    pub recent_developments: Vec<Development>,
    pub banking_opportunities: Vec<BankingOpportunity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub esg_profile: Option<EsgProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_comparison: Option<PeerComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banking_relationships: Option<BankingRelationships>,
    pub key_decision_makers: Vec<Executive>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_makers: Option<DecisionMakers>,
    pub custom_topics: Vec<CustomTopicFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResearchResult {
    /// Shape returned to callers when the run itself failed
    pub fn failure(message: impl Into<String>) -> serde_json::Value {
        serde_json::json!({ "error": message.into() })
    }
}

// =============================================================================
// Financial
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyMetrics {
    pub financial: FinancialMetrics,
    pub credit: CreditMetrics,
    pub dividend: DividendMetrics,
    pub risk: RiskMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialMetrics {
    pub revenue: Option<String>,
    pub revenue_growth: Option<String>,
    pub net_income: Option<String>,
    pub ebitda: Option<String>,
    pub profit_margin: Option<String>,
    pub market_cap: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditMetrics {
    pub credit_rating: Option<String>,
    pub total_debt: Option<String>,
    pub debt_to_equity: Option<String>,
    pub interest_coverage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividendMetrics {
    pub dividend_yield: Option<String>,
    pub payout_ratio: Option<String>,
    pub dividend_history: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskMetrics {
    pub beta: Option<String>,
    pub risk_factors: Vec<String>,
}

// =============================================================================
// Market
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysis {
    pub position: Option<String>,
    pub market_share: Option<String>,
    pub competitors: Vec<String>,
    pub trends: Vec<String>,
}

/// SWOT arrays are always present, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

impl SwotAnalysis {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.opportunities.is_empty()
            && self.threats.is_empty()
    }
}

// =============================================================================
// News & Developments
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    pub date: Option<String>,
    pub headline: String,
    pub summary: String,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Development {
    pub date: Option<String>,
    pub title: String,
    pub description: String,
}

// =============================================================================
// Banking
// =============================================================================

/// Urgency of a banking opportunity. Unrecognised values become `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    #[default]
    Medium,
    Low,
}

impl Urgency {
    /// Case-insensitive coercion; anything outside high/medium/low is medium
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => Urgency::High,
            "low" => Urgency::Low,
            _ => Urgency::Medium,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::High => write!(f, "high"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankingOpportunity {
    pub service: String,
    pub rationale: String,
    pub urgency: Urgency,
    pub competitive_position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankingRelationships {
    pub current_banks: Vec<String>,
    pub facilities: Vec<String>,
    pub relationship_notes: Option<String>,
}

// =============================================================================
// ESG & Benchmarking
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EsgProfile {
    pub rating: Option<String>,
    pub environmental: Option<String>,
    pub social: Option<String>,
    pub governance: Option<String>,
    pub initiatives: Vec<String>,
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerComparison {
    pub peers: Vec<PeerEntry>,
    pub relative_position: Option<String>,
    pub key_differentiators: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerEntry {
    pub name: String,
    pub comparison: String,
}

// =============================================================================
// People
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Executive {
    pub name: String,
    pub title: String,
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecisionMakers {
    pub key_people: Vec<Executive>,
    pub decision_making_process: Option<String>,
    pub enhanced: Option<EnhancedDecisionMakers>,
}

/// Deep executive research produced when decision-maker research is enabled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancedDecisionMakers {
    pub executive_profiles: Vec<ExecutiveProfile>,
    pub organizational_structure: Option<String>,
    pub board_composition: Vec<BoardMember>,
    pub turnover: Vec<LeadershipChange>,
    pub engagement_strategy: Vec<String>,
}

impl EnhancedDecisionMakers {
    pub fn is_empty(&self) -> bool {
        self.executive_profiles.is_empty()
            && self.organizational_structure.is_none()
            && self.board_composition.is_empty()
            && self.turnover.is_empty()
            && self.engagement_strategy.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecutiveProfile {
    pub name: String,
    pub title: String,
    pub tenure: Option<String>,
    pub background: Option<String>,
    pub priorities: Vec<String>,
    pub banking_influence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardMember {
    pub name: String,
    pub role: String,
    pub other_affiliations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipChange {
    pub date: Option<String>,
    pub description: String,
}

// =============================================================================
// Custom topics
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomTopicFinding {
    pub name: String,
    pub findings: String,
    pub key_points: Vec<String>,
}
