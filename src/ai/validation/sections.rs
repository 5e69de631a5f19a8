//! Typed section extraction over a parsed LLM reply.
//!
//! `ParsedResponse::parse` never fails. When extraction or parsing fails the
//! error is kept and every extractor returns its empty default, so callers
//! always receive well-typed values.

use serde_json::Value;

use super::extract::extract_json_from_response;
use crate::types::{
    BankingOpportunity, BankingRelationships, BoardMember, CreditMetrics, CustomTopicFinding,
    Development, DividendMetrics, EnhancedDecisionMakers, EsgProfile, Executive,
    ExecutiveProfile, FinancialMetrics, KeyMetrics, LeadershipChange, MarketAnalysis, NewsItem,
    PeerComparison, PeerEntry, RiskMetrics, SwotAnalysis, Urgency, json_array, json_object,
    json_string_array, json_text,
};

/// Result of running the response parser over one reply
#[derive(Debug, Clone)]
pub struct ParsedResponse {
    root: Option<Value>,
    error: Option<String>,
}

impl ParsedResponse {
    pub fn parse(content: &str) -> Self {
        match extract_json_from_response(content) {
            Ok(root) => Self {
                root: Some(root),
                error: None,
            },
            Err(e) => Self {
                root: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self.root.is_some()
    }

    /// Parse failure message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Object under `key`, or the root itself when the reply is flat.
    ///
    /// Topics often answer with their fields at the top level instead of
    /// nested under the section name, so a missing key reads the root object.
    /// Fields absent from the root still come back as defaults.
    fn section(&self, key: &str) -> Option<&Value> {
        let root = self.root.as_ref()?;
        json_object(root, key).or_else(|| root.is_object().then_some(root))
    }

    fn items(&self, keys: &[&str]) -> &[Value] {
        let Some(root) = self.root.as_ref() else {
            return &[];
        };
        keys.iter()
            .map(|key| json_array(root, key))
            .find(|arr| !arr.is_empty())
            .unwrap_or_default()
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    /// Top-level scalar rendered as text
    pub fn string_field(&self, key: &str) -> Option<String> {
        self.root.as_ref().and_then(|root| json_text(root, key))
    }

    // =========================================================================
    // Financial & Market
    // =========================================================================

    pub fn key_metrics(&self) -> KeyMetrics {
        let Some(m) = self.section("keyMetrics") else {
            return KeyMetrics::default();
        };
        let part = |key: &str| json_object(m, key).cloned().unwrap_or(Value::Null);

        let financial = part("financial");
        let credit = part("credit");
        let dividend = part("dividend");
        let risk = part("risk");

        KeyMetrics {
            financial: FinancialMetrics {
                revenue: json_text(&financial, "revenue"),
                revenue_growth: json_text(&financial, "revenueGrowth"),
                net_income: json_text(&financial, "netIncome"),
                ebitda: json_text(&financial, "ebitda"),
                profit_margin: json_text(&financial, "profitMargin"),
                market_cap: json_text(&financial, "marketCap"),
            },
            credit: CreditMetrics {
                credit_rating: json_text(&credit, "creditRating"),
                total_debt: json_text(&credit, "totalDebt"),
                debt_to_equity: json_text(&credit, "debtToEquity"),
                interest_coverage: json_text(&credit, "interestCoverage"),
            },
            dividend: DividendMetrics {
                dividend_yield: json_text(&dividend, "dividendYield"),
                payout_ratio: json_text(&dividend, "payoutRatio"),
                dividend_history: json_text(&dividend, "dividendHistory"),
            },
            risk: RiskMetrics {
                beta: json_text(&risk, "beta"),
                risk_factors: json_string_array(&risk, "riskFactors"),
            },
        }
    }

    pub fn market_analysis(&self) -> MarketAnalysis {
        let Some(m) = self.section("marketAnalysis") else {
            return MarketAnalysis::default();
        };
        MarketAnalysis {
            position: json_text(m, "position"),
            market_share: json_text(m, "marketShare"),
            competitors: json_string_array(m, "competitors"),
            trends: json_string_array(m, "trends"),
        }
    }

    pub fn swot(&self) -> SwotAnalysis {
        let Some(s) = self.section("swotAnalysis") else {
            return SwotAnalysis::default();
        };
        SwotAnalysis {
            strengths: json_string_array(s, "strengths"),
            weaknesses: json_string_array(s, "weaknesses"),
            opportunities: json_string_array(s, "opportunities"),
            threats: json_string_array(s, "threats"),
        }
    }

    // =========================================================================
    // News & Developments
    // =========================================================================

    pub fn news_items(&self) -> Vec<NewsItem> {
        self.items(&["news", "newsItems"])
            .iter()
            .filter_map(|item| {
                let headline = json_text(item, "headline").or_else(|| json_text(item, "title"))?;
                Some(NewsItem {
                    date: json_text(item, "date"),
                    headline,
                    summary: json_text(item, "summary").unwrap_or_default(),
                    source: json_text(item, "source"),
                })
            })
            .collect()
    }

    pub fn developments(&self) -> Vec<Development> {
        self.items(&["recentDevelopments", "developments"])
            .iter()
            .filter_map(|item| {
                let title = json_text(item, "title")?;
                Some(Development {
                    date: json_text(item, "date"),
                    title,
                    description: json_text(item, "description").unwrap_or_default(),
                })
            })
            .collect()
    }

    // =========================================================================
    // Banking
    // =========================================================================

    /// Opportunities with urgency coerced into high/medium/low
    pub fn banking_opportunities(&self) -> Vec<BankingOpportunity> {
        self.items(&["bankingOpportunities", "opportunities"])
            .iter()
            .filter(|item| item.is_object())
            .map(|item| BankingOpportunity {
                service: json_text(item, "service").unwrap_or_default(),
                rationale: json_text(item, "rationale").unwrap_or_default(),
                urgency: json_text(item, "urgency")
                    .map(|u| Urgency::coerce(&u))
                    .unwrap_or_default(),
                competitive_position: json_text(item, "competitivePosition").unwrap_or_default(),
            })
            .collect()
    }

    pub fn banking_relationships(&self) -> BankingRelationships {
        let Some(b) = self.section("bankingRelationships") else {
            return BankingRelationships::default();
        };
        BankingRelationships {
            current_banks: json_string_array(b, "currentBanks"),
            facilities: json_string_array(b, "facilities"),
            relationship_notes: json_text(b, "relationshipNotes"),
        }
    }

    // =========================================================================
    // ESG & Benchmarking
    // =========================================================================

    pub fn esg_profile(&self) -> EsgProfile {
        let Some(e) = self.section("esgProfile") else {
            return EsgProfile::default();
        };
        EsgProfile {
            rating: json_text(e, "rating"),
            environmental: json_text(e, "environmental"),
            social: json_text(e, "social"),
            governance: json_text(e, "governance"),
            initiatives: json_string_array(e, "initiatives"),
            risks: json_string_array(e, "risks"),
        }
    }

    pub fn peer_comparison(&self) -> PeerComparison {
        let Some(p) = self.section("peerComparison") else {
            return PeerComparison::default();
        };
        PeerComparison {
            peers: json_array(p, "peers")
                .iter()
                .filter_map(|peer| {
                    Some(PeerEntry {
                        name: json_text(peer, "name")?,
                        comparison: json_text(peer, "comparison").unwrap_or_default(),
                    })
                })
                .collect(),
            relative_position: json_text(p, "relativePosition"),
            key_differentiators: json_string_array(p, "keyDifferentiators"),
        }
    }

    // =========================================================================
    // People
    // =========================================================================

    /// Executives listed under `key` (entries without a name are dropped)
    pub fn executives(&self, key: &str) -> Vec<Executive> {
        self.items(&[key]).iter().filter_map(executive).collect()
    }

    pub fn enhanced_decision_makers(&self) -> EnhancedDecisionMakers {
        let Some(e) = self.section("enhancedExecutiveData") else {
            return EnhancedDecisionMakers::default();
        };
        EnhancedDecisionMakers {
            executive_profiles: json_array(e, "executiveProfiles")
                .iter()
                .filter_map(|p| {
                    Some(ExecutiveProfile {
                        name: json_text(p, "name")?,
                        title: json_text(p, "title").unwrap_or_default(),
                        tenure: json_text(p, "tenure"),
                        background: json_text(p, "background"),
                        priorities: json_string_array(p, "priorities"),
                        banking_influence: json_text(p, "bankingInfluence"),
                    })
                })
                .collect(),
            organizational_structure: json_text(e, "organizationalStructure"),
            board_composition: json_array(e, "boardComposition")
                .iter()
                .filter_map(|m| {
                    Some(BoardMember {
                        name: json_text(m, "name")?,
                        role: json_text(m, "role").unwrap_or_default(),
                        other_affiliations: json_string_array(m, "otherAffiliations"),
                    })
                })
                .collect(),
            turnover: json_array(e, "turnover")
                .iter()
                .filter_map(|t| {
                    Some(LeadershipChange {
                        date: json_text(t, "date"),
                        description: json_text(t, "description")?,
                    })
                })
                .collect(),
            engagement_strategy: json_string_array(e, "engagementStrategy"),
        }
    }

    // =========================================================================
    // Custom topics
    // =========================================================================

    /// Findings for user-defined topics (entries without a name are dropped)
    pub fn custom_topics(&self) -> Vec<CustomTopicFinding> {
        self.items(&["customTopics", "topics"])
            .iter()
            .filter_map(|item| {
                Some(CustomTopicFinding {
                    name: json_text(item, "name")?,
                    findings: json_text(item, "findings").unwrap_or_default(),
                    key_points: json_string_array(item, "keyPoints"),
                })
            })
            .collect()
    }
}

fn executive(item: &Value) -> Option<Executive> {
    Some(Executive {
        name: json_text(item, "name")?,
        title: json_text(item, "title").unwrap_or_default(),
        background: json_text(item, "background"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn assert_all_defaults(parsed: &ParsedResponse) {
        assert_eq!(parsed.swot(), SwotAnalysis::default());
        assert_eq!(parsed.key_metrics(), KeyMetrics::default());
        assert_eq!(parsed.market_analysis(), MarketAnalysis::default());
        assert!(parsed.developments().is_empty());
        assert!(parsed.news_items().is_empty());
        assert!(parsed.banking_opportunities().is_empty());
        assert_eq!(parsed.esg_profile(), EsgProfile::default());
        assert_eq!(parsed.peer_comparison(), PeerComparison::default());
        assert_eq!(parsed.banking_relationships(), BankingRelationships::default());
        assert_eq!(
            parsed.enhanced_decision_makers(),
            EnhancedDecisionMakers::default()
        );
        assert!(parsed.executives("keyExecutives").is_empty());
        assert!(parsed.custom_topics().is_empty());
        assert_eq!(parsed.string_field("financialOverview"), None);
    }

    fn full_reply() -> String {
        json!({
            "financialOverview": "Revenue of $3.3bn, stable margins.",
            "keyMetrics": {
                "financial": {"revenue": "$3.3bn", "netIncome": 63.7, "marketCap": null},
                "credit": {"creditRating": "BBB"},
                "dividend": {"dividendYield": "4.1%"},
                "risk": {"beta": 1.2, "riskFactors": ["Discretionary spend", 7]}
            },
            "marketAnalysis": {"position": "Leading department store", "competitors": ["David Jones"]},
            "swotAnalysis": {"strengths": ["Brand"], "threats": ["Online"]},
            "recentDevelopments": [{"date": "2024-01", "title": "CEO change", "description": "New CEO"}, {"description": "untitled"}],
            "bankingOpportunities": [
                {"service": "Trade finance", "urgency": "HIGH"},
                {"service": "FX hedging", "urgency": "urgent"},
                "not an object"
            ],
            "keyExecutives": [{"name": "Olivia Wirth", "title": "CEO"}, {"title": "nameless"}]
        })
        .to_string()
    }

    #[test]
    fn test_full_reply_extraction() {
        let parsed = ParsedResponse::parse(&full_reply());
        assert!(parsed.is_ok());

        let metrics = parsed.key_metrics();
        assert_eq!(metrics.financial.revenue.as_deref(), Some("$3.3bn"));
        assert_eq!(metrics.financial.net_income.as_deref(), Some("63.7"));
        assert_eq!(metrics.financial.market_cap, None);
        assert_eq!(metrics.credit.credit_rating.as_deref(), Some("BBB"));
        assert_eq!(metrics.risk.risk_factors, vec!["Discretionary spend", "7"]);

        let swot = parsed.swot();
        assert_eq!(swot.strengths, vec!["Brand"]);
        assert!(swot.weaknesses.is_empty());

        let devs = parsed.developments();
        assert_eq!(devs.len(), 1);
        assert_eq!(devs[0].title, "CEO change");

        let opps = parsed.banking_opportunities();
        assert_eq!(opps.len(), 2);
        assert_eq!(opps[0].urgency, Urgency::High);
        assert_eq!(opps[1].urgency, Urgency::Medium);

        let execs = parsed.executives("keyExecutives");
        assert_eq!(execs.len(), 1);
        assert_eq!(execs[0].name, "Olivia Wirth");
    }

    #[test]
    fn test_flat_reply_uses_root_as_section() {
        let parsed = ParsedResponse::parse(r#"{"rating": "AA", "initiatives": ["Net zero 2040"]}"#);
        let esg = parsed.esg_profile();
        assert_eq!(esg.rating.as_deref(), Some("AA"));
        assert_eq!(esg.initiatives, vec!["Net zero 2040"]);

        let flat = ParsedResponse::parse(r#"{"currentBanks": ["ANZ"], "facilities": []}"#);
        assert_eq!(flat.banking_relationships().current_banks, vec!["ANZ"]);

        let unrelated = ParsedResponse::parse(r#"{"bankingOpportunities": []}"#);
        assert_eq!(unrelated.banking_relationships(), BankingRelationships::default());
    }

    #[test]
    fn test_fixture_corpus_yields_defaults() {
        let corpus = [
            "",
            "I'm sorry, I could not find information about this company.",
            "```json\n{\"swotAnalysis\": {\"strengths\": [\"x\"\n```",
            "{\"swotAnalysis\": {\"strengths\": [\"x\"]",
            "{ not: json }",
            "[1, 2, 3]",
        ];
        for reply in corpus {
            let parsed = ParsedResponse::parse(reply);
            assert_all_defaults(&parsed);
        }
    }

    #[test]
    fn test_error_retained() {
        let parsed = ParsedResponse::parse("no braces here");
        assert!(!parsed.is_ok());
        assert_eq!(parsed.error(), Some("Parse error: no JSON found"));
    }

    proptest! {
        #[test]
        fn prop_prose_without_braces_yields_defaults(text in "[^{}]{0,200}") {
            let parsed = ParsedResponse::parse(&text);
            prop_assert!(!parsed.is_ok());
            assert_all_defaults(&parsed);
        }

        #[test]
        fn prop_truncated_reply_yields_defaults(cut in 0usize..10_000) {
            let reply = full_reply();
            let cut = cut % reply.len();
            let truncated: String = reply.chars().take(cut).collect();
            let parsed = ParsedResponse::parse(&truncated);
            prop_assert!(!parsed.is_ok());
            assert_all_defaults(&parsed);
        }

        #[test]
        fn prop_unknown_urgency_coerced_to_medium(urgency in "[A-Za-z ]{0,12}") {
            let lowered = urgency.trim().to_lowercase();
            prop_assume!(!["high", "medium", "low"].contains(&lowered.as_str()));

            let reply = json!({
                "bankingOpportunities": [{"service": "Cash management", "urgency": urgency}]
            })
            .to_string();
            let opps = ParsedResponse::parse(&reply).banking_opportunities();
            prop_assert_eq!(opps.len(), 1);
            prop_assert_eq!(opps[0].urgency, Urgency::Medium);
        }

        #[test]
        fn prop_known_urgency_any_case(idx in 0usize..3, upper in any::<bool>()) {
            let (raw, expected) = [("high", Urgency::High), ("medium", Urgency::Medium), ("low", Urgency::Low)][idx];
            let raw = if upper { raw.to_uppercase() } else { raw.to_string() };
            let reply = json!({"bankingOpportunities": [{"service": "x", "urgency": raw}]}).to_string();
            let opps = ParsedResponse::parse(&reply).banking_opportunities();
            prop_assert_eq!(opps[0].urgency, expected);
        }
    }
}
