//! clientscope - Prospective Client Research for Banking Teams
//!
//! Given a company name, runs independent topic researchers (financials,
//! market position, news, people, banking opportunities and optional extras)
//! concurrently, merges their findings into one typed accumulator and writes
//! an executive summary over everything gathered.
//!
//! ## Core Features
//!
//! - **Best-effort aggregation**: a failing topic records an error and leaves
//!   its section empty; only the summarizer can fail a run
//! - **Disjoint ownership**: every result slot has exactly one writing topic
//! - **Lenient parsing**: LLM replies are mined for JSON, and malformed
//!   replies degrade to empty sections rather than errors
//!
//! ## Quick Start
//!
//! ```ignore
//! use clientscope::{ResearchPipeline, ResearchRequest, ConfigLoader};
//! use clientscope::ai::create_provider;
//! use clientscope::search::create_search_provider;
//!
//! let config = ConfigLoader::load()?;
//! let pipeline = ResearchPipeline::new(
//!     create_provider(&config.llm)?,
//!     create_search_provider(&config.search)?,
//!     config.research,
//! );
//! let result = pipeline.run(ResearchRequest::new("Myer")).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: LLM provider abstraction and response parsing
//! - [`search`]: web search provider abstraction
//! - [`research`]: topic agents, accumulator, summarizer and pipeline
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod research;
pub mod search;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, LlmConfig, ResearchConfig, SearchConfig};

// Error Types
pub use types::error::{ErrorCategory, Result, ScopeError};

// Request / Result
pub use types::{CustomTopic, ResearchRequest, ResearchResult, ResearchTopics, RunId};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use research::{ProgressSink, ResearchPipeline, RunPhase, Topic};

// =============================================================================
// Provider Re-exports
// =============================================================================

pub use ai::{LlmProvider, LlmResponse, SharedProvider};
pub use search::{SearchProvider, SharedSearch};
