//! Research Agents
//!
//! One agent per topic. Each searches, asks the model for a JSON analysis and
//! returns a [`SliceUpdate`] for the coordinator to apply.

pub mod banking;
pub mod benchmarking;
pub mod custom;
pub mod decision_makers;
pub mod developments;
pub mod esg;
pub mod executive;
pub mod financial;
pub mod helpers;
pub mod market;
pub mod news;

pub use banking::BankingOpportunitiesAgent;
pub use benchmarking::BenchmarkingAgent;
pub use custom::CustomTopicsAgent;
pub use decision_makers::DecisionMakersAgent;
pub use developments::RecentDevelopmentsAgent;
pub use esg::EsgAgent;
pub use executive::ExecutiveAgent;
pub use financial::FinancialAgent;
pub use helpers::{
    ResearchAgentConfig, SearchDigest, SearchSection, collect_search, run_research_agent,
};
pub use market::MarketPositionAgent;
pub use news::NewsAgent;

use super::ResearchContext;
use super::accumulator::SliceUpdate;
use super::topic::Topic;
use crate::types::{ResearchRequest, Result};

/// Trait for research agents
#[async_trait::async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Topic this agent researches
    fn topic(&self) -> Topic;

    /// Research the topic and return its slice update
    async fn run(&self, context: &ResearchContext) -> Result<SliceUpdate>;
}

/// Agent for a topic
pub fn agent_for(topic: Topic) -> Box<dyn ResearchAgent> {
    match topic {
        Topic::Financial => Box::new(FinancialAgent),
        Topic::MarketPosition => Box::new(MarketPositionAgent),
        Topic::News => Box::new(NewsAgent),
        Topic::RecentDevelopments => Box::new(RecentDevelopmentsAgent),
        Topic::Executive => Box::new(ExecutiveAgent),
        Topic::DecisionMakers => Box::new(DecisionMakersAgent),
        Topic::BankingOpportunities => Box::new(BankingOpportunitiesAgent),
        Topic::Esg => Box::new(EsgAgent),
        Topic::Benchmarking => Box::new(BenchmarkingAgent),
        Topic::CustomTopics => Box::new(CustomTopicsAgent),
    }
}

/// Agents for every topic the request selects, in topic order
pub fn select_agents(request: &ResearchRequest) -> Vec<Box<dyn ResearchAgent>> {
    Topic::ALL
        .into_iter()
        .filter(|t| t.enabled_for(request))
        .map(agent_for)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomTopic, ResearchTopics};

    fn queries_for(topic: Topic, request: &ResearchRequest) -> Vec<String> {
        match topic {
            Topic::Financial => FinancialAgent::queries(request),
            Topic::MarketPosition => MarketPositionAgent::queries(request),
            Topic::News => NewsAgent::queries(request),
            Topic::RecentDevelopments => RecentDevelopmentsAgent::queries(request),
            Topic::Executive => ExecutiveAgent::queries(request),
            Topic::DecisionMakers => DecisionMakersAgent::queries(request),
            Topic::BankingOpportunities => BankingOpportunitiesAgent::queries(request),
            Topic::Esg => EsgAgent::queries(request),
            Topic::Benchmarking => BenchmarkingAgent::queries(request),
            Topic::CustomTopics => CustomTopicsAgent::queries(request),
        }
    }

    #[test]
    fn test_agent_for_matches_topic() {
        for topic in Topic::ALL {
            assert_eq!(agent_for(topic).topic(), topic);
        }
    }

    #[test]
    fn test_select_agents() {
        let minimal = ResearchRequest::new("Myer");
        assert_eq!(select_agents(&minimal).len(), 6);

        let full = ResearchRequest::new("Myer").with_topics(ResearchTopics::all());
        assert_eq!(select_agents(&full).len(), 9);
    }

    #[test]
    fn test_every_query_names_company() {
        let mut topics = ResearchTopics::all();
        topics.custom_topics = vec![CustomTopic {
            name: "Store leases".to_string(),
            ..Default::default()
        }];
        let request = ResearchRequest::new("Myer")
            .with_industry("Retail")
            .with_website("https://www.myer.com.au/")
            .with_topics(topics);

        for topic in Topic::ALL {
            let queries = queries_for(topic, &request);
            assert!(!queries.is_empty(), "{} has no queries", topic);
            let missing: Vec<_> = queries
                .iter()
                .filter(|q| !q.contains(request.display_name()))
                .collect();
            assert!(missing.is_empty(), "{} queries without company: {:?}", topic, missing);
        }
    }
}
