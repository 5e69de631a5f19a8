pub mod error;
pub mod request;
pub mod result;
pub mod utils;

pub use error::{
    ErrorCategory, ErrorClassifier, LlmError, Result, ScopeError, ValidationError,
    ValidationErrorKind,
};
pub use request::{CustomTopic, ResearchRequest, ResearchTopics};
pub use result::*;
pub use utils::{
    capitalize_first, json_array, json_object, json_string_array, json_text, scalar_text,
    truncate_chars,
};

// =============================================================================
// Domain Newtypes
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for research run IDs
///
/// Prevents accidental mixing of run IDs with other string types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Fresh random run ID
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RunId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
