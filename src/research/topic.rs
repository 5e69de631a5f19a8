//! Research topics and their fixed per-topic policy.

use std::fmt;

use super::accumulator::SliceKey;
use crate::constants::temperature;
use crate::types::ResearchRequest;

/// What a topic does when every search comes back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySearchPolicy {
    /// Fail the topic with `NoData`
    Fatal,
    /// Ask the model to synthesize from general knowledge
    SynthesizeWithoutData,
}

/// One independently researched aspect of a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Financial,
    MarketPosition,
    News,
    RecentDevelopments,
    Executive,
    DecisionMakers,
    BankingOpportunities,
    Esg,
    Benchmarking,
    CustomTopics,
}

impl Topic {
    pub const ALL: [Topic; 10] = [
        Topic::Financial,
        Topic::MarketPosition,
        Topic::News,
        Topic::RecentDevelopments,
        Topic::Executive,
        Topic::DecisionMakers,
        Topic::BankingOpportunities,
        Topic::Esg,
        Topic::Benchmarking,
        Topic::CustomTopics,
    ];

    /// Accumulator slices this topic alone may write
    pub fn owned_keys(self) -> &'static [SliceKey] {
        match self {
            Topic::Financial => &[SliceKey::FinancialData],
            Topic::MarketPosition => &[SliceKey::MarketPositionData],
            Topic::News => &[SliceKey::NewsData],
            Topic::RecentDevelopments => &[SliceKey::RecentDevelopmentsData],
            Topic::Executive => &[SliceKey::ExecutiveData],
            Topic::DecisionMakers => &[
                SliceKey::EnhancedExecutiveData,
                SliceKey::DecisionMakingProcess,
            ],
            Topic::BankingOpportunities => &[SliceKey::BankingOpportunitiesData],
            Topic::Esg => &[SliceKey::EsgData],
            Topic::Benchmarking => &[SliceKey::BenchmarkingData],
            Topic::CustomTopics => &[SliceKey::CustomTopicsData],
        }
    }

    pub fn empty_search_policy(self) -> EmptySearchPolicy {
        match self {
            Topic::MarketPosition => EmptySearchPolicy::SynthesizeWithoutData,
            _ => EmptySearchPolicy::Fatal,
        }
    }

    pub fn temperature(self) -> f32 {
        match self {
            Topic::Financial => temperature::FINANCIAL,
            Topic::MarketPosition => temperature::MARKET_POSITION,
            Topic::News => temperature::NEWS,
            Topic::RecentDevelopments => temperature::RECENT_DEVELOPMENTS,
            Topic::Executive => temperature::EXECUTIVE,
            Topic::DecisionMakers => temperature::DECISION_MAKERS,
            Topic::BankingOpportunities => temperature::BANKING_OPPORTUNITIES,
            Topic::Esg => temperature::ESG,
            Topic::Benchmarking => temperature::BENCHMARKING,
            Topic::CustomTopics => temperature::CUSTOM_TOPICS,
        }
    }

    /// Whether the request selects this topic
    pub fn enabled_for(self, request: &ResearchRequest) -> bool {
        let topics = &request.research_topics;
        match self {
            Topic::DecisionMakers => topics.include_decision_makers,
            Topic::Esg => topics.include_esg,
            Topic::Benchmarking => topics.include_benchmarking,
            Topic::CustomTopics => !topics.custom_topics.is_empty(),
            _ => true,
        }
    }

    /// Human label used in logs, errors and progress messages
    pub fn label(self) -> &'static str {
        match self {
            Topic::Financial => "financial",
            Topic::MarketPosition => "market position",
            Topic::News => "news",
            Topic::RecentDevelopments => "recent developments",
            Topic::Executive => "executive",
            Topic::DecisionMakers => "decision maker",
            Topic::BankingOpportunities => "banking opportunity",
            Topic::Esg => "ESG",
            Topic::Benchmarking => "peer benchmarking",
            Topic::CustomTopics => "custom topic",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomTopic, ResearchTopics};
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #[test]
        fn prop_owned_keys_are_disjoint(a in 0usize..Topic::ALL.len(), b in 0usize..Topic::ALL.len()) {
            prop_assume!(a != b);
            let left: HashSet<_> = Topic::ALL[a].owned_keys().iter().collect();
            let right: HashSet<_> = Topic::ALL[b].owned_keys().iter().collect();
            prop_assert!(left.is_disjoint(&right), "{} and {} share a slice", Topic::ALL[a], Topic::ALL[b]);
        }
    }

    #[test]
    fn test_every_slice_has_exactly_one_owner() {
        for key in SliceKey::ALL {
            let owners: Vec<_> = Topic::ALL
                .iter()
                .filter(|t| t.owned_keys().contains(&key))
                .collect();
            assert_eq!(owners.len(), 1, "{} owners: {:?}", key, owners);
        }
    }

    #[test]
    fn test_only_market_position_synthesizes() {
        for topic in Topic::ALL {
            let expected = if topic == Topic::MarketPosition {
                EmptySearchPolicy::SynthesizeWithoutData
            } else {
                EmptySearchPolicy::Fatal
            };
            assert_eq!(topic.empty_search_policy(), expected);
        }
    }

    #[test]
    fn test_enabled_topics() {
        let minimal = ResearchRequest::new("Myer");
        let enabled: Vec<_> = Topic::ALL
            .into_iter()
            .filter(|t| t.enabled_for(&minimal))
            .collect();
        assert_eq!(
            enabled,
            vec![
                Topic::Financial,
                Topic::MarketPosition,
                Topic::News,
                Topic::RecentDevelopments,
                Topic::Executive,
                Topic::BankingOpportunities,
            ]
        );

        let mut topics = ResearchTopics::all();
        topics.custom_topics.push(CustomTopic {
            name: "Leases".to_string(),
            ..Default::default()
        });
        let full = ResearchRequest::new("Myer").with_topics(topics);
        assert!(Topic::ALL.iter().all(|t| t.enabled_for(&full)));
    }

    #[test]
    fn test_temperatures_match_topic_kind() {
        assert_eq!(Topic::Financial.temperature(), 0.0);
        assert_eq!(Topic::BankingOpportunities.temperature(), 0.2);
        assert!(Topic::MarketPosition.temperature() > 0.0);
    }
}
