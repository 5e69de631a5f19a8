//! JSON Extraction
//!
//! Pulls one JSON document out of a free-form LLM reply.
//!
//! Accepted shapes, tried in order:
//! 1. A fenced block: ```` ```json ... ``` ```` (inner text captured)
//! 2. Bare object: first `{` through the last `}` (greedy)
//! 3. Anything else fails with `ScopeError::Parse("no JSON found")`
//!
//! The captured text is then parsed strictly. No repair is attempted.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::{Result, ScopeError};

/// Matches a ```json fenced block, capturing its body.
static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced json regex"));

/// Matches the widest `{ ... }` span.
static BARE_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("bare object regex"));

/// Locate the JSON text inside a reply without parsing it.
pub fn extract_json_text(content: &str) -> Result<&str> {
    if let Some(body) = FENCED_JSON_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
    {
        return Ok(body.as_str());
    }

    if let Some(span) = BARE_OBJECT_RE.find(content) {
        return Ok(span.as_str());
    }

    Err(ScopeError::Parse("no JSON found".to_string()))
}

/// Extract and strictly parse JSON from an LLM response
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    let text = extract_json_text(content)?;
    serde_json::from_str::<Value>(text).map_err(|e| {
        debug!(
            "JSON parse failed: {}. Preview: {}",
            e,
            text.chars().take(120).collect::<String>()
        );
        ScopeError::Parse(format!("invalid JSON: {}", e))
    })
}
