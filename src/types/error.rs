//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Taxonomy
//!
//! - **Validation**: required request input missing (fatal to one topic)
//! - **Search**: a single web search query failed (recovered per query)
//! - **NoData**: every search for a topic came back empty (fatal to one topic)
//! - **Llm / LlmApi**: completion call failed (fatal to one topic, no retry)
//! - **Parse**: no JSON object in an LLM response (recovered with defaults)
//! - **Summarizer**: terminal synthesis failed (fatal to the whole run)
//!
//! Topic-level errors never escape the pipeline; they are recorded in the
//! accumulator's error slot. Only `Summarizer` reaches the caller.

use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories for provider failures, used for logging and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues
    Network,
    /// Provider unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// LLM error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps HTTP failures from external collaborators onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an HTTP status code
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 | 422 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_timeout() || err.is_connect() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::BadRequest
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Shortcut for a required field that is absent or blank
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self {
            kind: ValidationErrorKind::MissingField,
            field: Some(field.into()),
            message: "required value is missing".to_string(),
        }
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or blank
    MissingField,
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ScopeError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Collaborator Errors
    // -------------------------------------------------------------------------
    /// Structured LLM error with category
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Simple LLM API error
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// Web search failure for a single query
    #[error("Search error: {0}")]
    Search(String),

    // -------------------------------------------------------------------------
    // Research Errors
    // -------------------------------------------------------------------------
    #[error("{0}")]
    Validation(ValidationError),

    /// Every search for a topic returned nothing usable
    #[error("No search data available for {topic} research")]
    NoData { topic: String },

    /// No JSON object could be extracted or parsed from an LLM response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal synthesis failed; the only run-fatal error
    #[error("Summarizer failed: {0}")]
    Summarizer(String),

    /// A slice was written twice within one run
    #[error("Accumulator slice '{key}' already written")]
    SliceConflict { key: String },
}

impl From<LlmError> for ScopeError {
    fn from(err: LlmError) -> Self {
        ScopeError::Llm(err)
    }
}

impl From<ValidationError> for ScopeError {
    fn from(err: ValidationError) -> Self {
        ScopeError::Validation(err)
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;

impl ScopeError {
    /// Create a no-data error for a topic
    pub fn no_data(topic: impl Into<String>) -> Self {
        Self::NoData {
            topic: topic.into(),
        }
    }

    /// Short machine-friendly kind label, used in progress messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) | Self::Config(_) => "SystemError",
            Self::Llm(_) | Self::LlmApi(_) => "LLMError",
            Self::Search(_) => "SearchError",
            Self::Validation(_) => "ValidationError",
            Self::NoData { .. } => "NoDataError",
            Self::Parse(_) => "ParseError",
            Self::Summarizer(_) => "SummarizerError",
            Self::SliceConflict { .. } => "SliceConflict",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
        assert_eq!(ErrorCategory::Transient.to_string(), "TRANSIENT");
    }

    #[test]
    fn test_classify_http_status() {
        let rate_limit = ErrorClassifier::classify_http_status(429, "Rate limited", "test");
        assert_eq!(rate_limit.category, ErrorCategory::RateLimit);
        assert_eq!(rate_limit.provider.as_deref(), Some("test"));

        let auth = ErrorClassifier::classify_http_status(401, "Unauthorized", "test");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let server_error = ErrorClassifier::classify_http_status(500, "Server error", "test");
        assert_eq!(server_error.category, ErrorCategory::Transient);

        let odd = ErrorClassifier::classify_http_status(418, "Teapot", "test");
        assert_eq!(odd.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::with_provider(ErrorCategory::RateLimit, "Too many requests", "openai");
        assert_eq!(err.to_string(), "[openai:RATE_LIMIT] Too many requests");

        let err_no_provider = LlmError::new(ErrorCategory::Network, "Connection failed");
        assert_eq!(err_no_provider.to_string(), "[NETWORK] Connection failed");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::missing_field("companyName");
        assert_eq!(
            err.to_string(),
            "Validation failed for 'companyName': required value is missing"
        );
        assert_eq!(err.kind, ValidationErrorKind::MissingField);
    }

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(ScopeError::no_data("financial").kind(), "NoDataError");
        assert_eq!(
            ScopeError::from(ValidationError::missing_field("companyName")).kind(),
            "ValidationError"
        );
        assert_eq!(ScopeError::Summarizer("x".into()).kind(), "SummarizerError");
        assert_eq!(
            ScopeError::no_data("news").to_string(),
            "No search data available for news research"
        );
    }
}
