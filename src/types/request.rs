//! Research request types.
//!
//! The JSON shape mirrors what the web front-end submits
//! (`companyName`, `researchTopics.includeESG`, ...), so requests can be
//! loaded from a file unchanged.

use serde::{Deserialize, Serialize};

use super::error::{Result, ValidationError};

/// Input to one research run. Immutable once the run starts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    /// Target company; required, validated by each task unit
    #[serde(default)]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub research_topics: ResearchTopics,
}

impl ResearchRequest {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            ..Self::default()
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_topics(mut self, topics: ResearchTopics) -> Self {
        self.research_topics = topics;
        self
    }

    /// Ensure the company name is present. Returns the trimmed name.
    pub fn validate(&self) -> Result<&str> {
        let name = self.company_name.trim();
        if name.is_empty() {
            return Err(ValidationError::missing_field("companyName").into());
        }
        Ok(name)
    }

    /// Trimmed, non-empty industry
    pub fn industry(&self) -> Option<&str> {
        self.industry
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Bare host of the website (`https://www.myer.com.au/x` -> `myer.com.au`)
    pub fn website_domain(&self) -> Option<String> {
        let raw = self.website.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let with_scheme = if raw.contains("://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };
        let parsed = url::Url::parse(&with_scheme).ok()?;
        parsed
            .host_str()
            .map(|h| h.trim_start_matches("www.").to_string())
    }

    /// Company label for prompts; falls back when the name is blank
    pub fn display_name(&self) -> &str {
        match self.company_name.trim() {
            "" => "Unknown company",
            name => name,
        }
    }
}

/// Optional topic selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResearchTopics {
    #[serde(rename = "includeESG")]
    pub include_esg: bool,
    pub include_benchmarking: bool,
    pub include_banking_relationships: bool,
    pub include_decision_makers: bool,
    pub custom_topics: Vec<CustomTopic>,
}

impl ResearchTopics {
    /// Every optional topic switched on
    pub fn all() -> Self {
        Self {
            include_esg: true,
            include_benchmarking: true,
            include_banking_relationships: true,
            include_decision_makers: true,
            custom_topics: Vec::new(),
        }
    }
}

/// A user-defined research topic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomTopic {
    pub name: String,
    pub search_query: String,
    pub description: String,
}

impl CustomTopic {
    /// Search phrase; the topic name stands in when no query was given
    pub fn query_text(&self) -> &str {
        match self.search_query.trim() {
            "" => self.name.trim(),
            q => q,
        }
    }
}

impl std::str::FromStr for CustomTopic {
    type Err = String;

    /// Parse `name|search query|description`; query and description optional
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '|').map(str::trim);
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(format!(
                "Invalid custom topic '{}'. Expected name|search query|description",
                s
            ));
        }
        Ok(Self {
            name: name.to_string(),
            search_query: parts.next().unwrap_or_default().to_string(),
            description: parts.next().unwrap_or_default().to_string(),
        })
    }
}
