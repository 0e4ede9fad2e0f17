//! Configuration types
//!
//! Two layers of configuration:
//!
//! - [`Settings`]: process-level settings (endpoints, page caps, HTTP
//!   options), loaded from YAML. Every field has a default.
//! - Per-request config params entered by the report author on the
//!   config screen, parsed into [`GithubConfig`] and [`JiraConfig`].

use crate::error::{Error, Result, ResultExt};
use crate::pagination::PageLimit;
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Settings
// ============================================================================

/// Process-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// GitHub connector settings
    pub github: GithubSettings,

    /// Jira connector settings
    pub jira: JiraSettings,

    /// HTTP client settings shared by both connectors
    pub http: HttpSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::invalid_value(
                "settings",
                format!("file not found: {}", path.display()),
            ));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.github.max_pages == 0 {
            return Err(Error::invalid_value(
                "github.max_pages",
                "must be at least 1",
            ));
        }
        if self.jira.page_size == 0 {
            return Err(Error::invalid_value("jira.page_size", "must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "http.timeout_secs",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// GitHub connector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubSettings {
    /// GraphQL endpoint
    pub endpoint: String,

    /// Maximum number of GraphQL requests per fetch
    pub max_pages: usize,

    /// Check field mappings up front instead of when a row is built
    pub strict_fields: bool,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.github.com/graphql".to_string(),
            max_pages: PageLimit::DEFAULT_MAX_PAGES,
            strict_fields: false,
        }
    }
}

impl GithubSettings {
    pub fn page_limit(&self) -> PageLimit {
        PageLimit::new(self.max_pages)
    }
}

/// Jira connector settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JiraSettings {
    /// Override for `https://{host}`
    pub base_url: Option<String>,

    /// Requested `maxResults` per search page
    pub page_size: u32,
}

impl Default for JiraSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            page_size: 100,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ============================================================================
// Config Params
// ============================================================================

fn param<'a>(params: &'a StringMap, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// GitHub config params
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// Organization (or user) that owns the repository
    pub organization: String,
    /// Repository name
    pub repository: String,
}

impl GithubConfig {
    /// Parse and validate config params
    pub fn from_params(params: &StringMap) -> Result<Self> {
        let organization = param(params, "organization")
            .ok_or_else(|| Error::config("Organization cannot be left blank."))?;
        let repository = param(params, "repository")
            .ok_or_else(|| Error::config("Repository cannot be left blank."))?;

        Ok(Self {
            organization: organization.to_string(),
            repository: repository.to_string(),
        })
    }
}

/// Jira config params
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Jira site host, e.g. `example.atlassian.net`
    pub host: String,
    /// Comma-separated project keys
    pub projects: Option<String>,
    /// Extra JQL appended to the query
    pub additional_query: Option<String>,
    /// Date field the report's date range filters on; `None` disables it
    pub date_for_query: Option<String>,
}

impl JiraConfig {
    /// Value of `dateForQuery` that disables date filtering
    pub const NO_DATE_FILTER: &'static str = "none";

    /// Parse and validate config params
    pub fn from_params(params: &StringMap) -> Result<Self> {
        let host = param(params, "host")
            .ok_or_else(|| Error::config("Host cannot be left blank."))?
            .trim_start_matches("https://")
            .trim_end_matches('/')
            .to_string();

        let date_for_query = param(params, "dateForQuery")
            .filter(|d| *d != Self::NO_DATE_FILTER)
            .map(String::from);

        Ok(Self {
            host,
            projects: param(params, "projects").map(String::from),
            additional_query: param(params, "additionalQuery").map(String::from),
            date_for_query,
        })
    }

    /// Link to an issue in the Jira UI
    pub fn browse_url(&self, key: &str) -> String {
        format!("https://{}/browse/{}", self.host, key)
    }
}
