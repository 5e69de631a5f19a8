//! LLM Response Parsing
//!
//! Every research topic asks the model for a JSON object, but replies arrive
//! fenced, wrapped in prose, truncated, or not as JSON at all. This layer
//! extracts the object with a fixed grammar and exposes typed sections that
//! degrade to empty defaults instead of failing.

mod extract;
mod sections;

pub use extract::{extract_json_from_response, extract_json_text};
pub use sections::ParsedResponse;
