//! AI Integration Layer
//!
//! LLM completion providers and lenient parsing of their replies.

pub mod provider;
pub mod validation;

pub use provider::{
    CompletionOptions, CompletionRequest, ErrorCategory, ErrorClassifier, LlmError, LlmProvider,
    LlmResponse, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use validation::{ParsedResponse, extract_json_from_response};
