//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// LLM provider constants
pub mod llm {
    /// Default OpenAI-compatible API base
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Default chat model
    pub const DEFAULT_MODEL: &str = "gpt-4o";

    /// Default completion token cap
    pub const DEFAULT_MAX_TOKENS: usize = 4096;
}

/// Web search constants
pub mod search {
    /// Google Custom Search JSON API endpoint
    pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/customsearch/v1";

    /// Results requested per query (API maximum is 10)
    pub const DEFAULT_RESULTS_PER_QUERY: u8 = 5;

    /// Upper bound accepted by the Custom Search API
    pub const MAX_RESULTS_PER_QUERY: u8 = 10;
}

/// Research pipeline constants
pub mod research {
    /// Default number of topic units running at once
    pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

    /// Combined search text passed to the LLM per topic
    pub const DEFAULT_MAX_SEARCH_CHARS: usize = 24_000;

    /// Sentinel for slices the summarizer finds empty
    pub const NO_DATA_SENTINEL: &str = "No data available";

    /// Fallback written when no financial overview could be produced
    pub const FINANCIAL_OVERVIEW_FALLBACK: &str = "Financial overview not available.";
}

/// Sampling temperatures per research topic.
///
/// Factual extraction runs at 0; narrative synthesis at 0.1-0.2.
pub mod temperature {
    pub const FINANCIAL: f32 = 0.0;
    pub const MARKET_POSITION: f32 = 0.1;
    pub const NEWS: f32 = 0.0;
    pub const RECENT_DEVELOPMENTS: f32 = 0.0;
    pub const EXECUTIVE: f32 = 0.0;
    pub const DECISION_MAKERS: f32 = 0.0;
    pub const BANKING_OPPORTUNITIES: f32 = 0.2;
    pub const ESG: f32 = 0.0;
    pub const BENCHMARKING: f32 = 0.1;
    pub const CUSTOM_TOPICS: f32 = 0.1;
    pub const SUMMARIZER: f32 = 0.2;
}
