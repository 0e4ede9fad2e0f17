//! Built-in connectors
//!
//! - [`github`]: issues, pull requests and stargazers of a GitHub repository
//! - [`jira`]: issues of a Jira Cloud site

pub mod github;
pub mod jira;

pub use github::GithubConnector;
pub use jira::JiraConnector;

use crate::auth::AuthConfig;
use crate::config::Settings;
use crate::connector::CommunityConnector;
use crate::error::{Error, Result};

/// Name and description of a built-in connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorInfo {
    pub name: &'static str,
    pub description: &'static str,
}

const BUILTIN: &[ConnectorInfo] = &[
    ConnectorInfo {
        name: "github",
        description: "Issues, pull requests and stargazers of a GitHub repository",
    },
    ConnectorInfo {
        name: "jira",
        description: "Issues of a Jira Cloud site, filtered with JQL",
    },
];

/// All built-in connectors
pub fn list() -> &'static [ConnectorInfo] {
    BUILTIN
}

/// Credentials handed to a connector by the host
#[derive(Clone, Default)]
pub struct Credentials {
    /// OAuth2 access token (GitHub)
    pub token: Option<String>,
    /// Account name (Jira)
    pub username: Option<String>,
    /// API token (Jira)
    pub api_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    /// Credentials for a GitHub connector; anonymous without a token
    pub fn github_auth(&self) -> AuthConfig {
        self.token
            .as_ref()
            .map_or(AuthConfig::None, |token| AuthConfig::bearer(token))
    }

    /// Credentials for a Jira connector; anonymous when neither part is set
    pub fn jira_auth(&self) -> Result<AuthConfig> {
        match (&self.username, &self.api_token) {
            (Some(username), Some(api_token)) => Ok(AuthConfig::basic(username, api_token)),
            (None, None) => Ok(AuthConfig::None),
            (Some(_), None) => Err(Error::missing_field("api_token")),
            (None, Some(_)) => Err(Error::missing_field("username")),
        }
    }
}

/// Construct a built-in connector by name
///
/// Missing credentials are not an error here: `auth-type` and `config`
/// never reach the remote API.
pub fn build(
    name: &str,
    settings: &Settings,
    credentials: &Credentials,
) -> Result<Box<dyn CommunityConnector>> {
    match name {
        "github" => Ok(Box::new(GithubConnector::new(
            settings,
            credentials.github_auth(),
        )?)),
        "jira" => Ok(Box::new(JiraConnector::new(
            settings,
            credentials.jira_auth()?,
        )?)),
        other => Err(Error::invalid_value(
            "connector",
            format!(
                "unknown connector '{other}' (available: {})",
                BUILTIN
                    .iter()
                    .map(|c| c.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}
