//! GitHub GraphQL client

use super::pager::PageSource;
use super::query::{QueryVariables, REPOSITORY_QUERY};
use super::types::{GraphqlResponse, QueryData, RepositoryPage};
use crate::auth::AuthConfig;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use serde_json::json;

/// Media type GitHub expects for star timestamps
const ACCEPT: &str = "application/vnd.github.v3.star+json";

/// Sends the repository query to the GraphQL endpoint
#[derive(Debug)]
pub struct GithubClient {
    http: HttpClient,
    endpoint: String,
}

impl GithubClient {
    pub fn new(settings: &Settings, auth: AuthConfig) -> Result<Self> {
        let mut config = HttpClientConfig::builder()
            .timeout(settings.http.timeout())
            .header("Accept", ACCEPT);
        if let Some(agent) = &settings.http.user_agent {
            config = config.user_agent(agent);
        }

        Ok(Self {
            http: HttpClient::with_auth(config.build(), auth)?,
            endpoint: settings.github.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PageSource for GithubClient {
    async fn fetch_page(&self, variables: &QueryVariables) -> Result<RepositoryPage> {
        let body = json!({
            "query": REPOSITORY_QUERY,
            "variables": variables.to_graphql(),
        });

        let response: GraphqlResponse<QueryData> = self
            .http
            .post_json_with_config(&self.endpoint, RequestConfig::new().json(body))
            .await?;

        response
            .into_data()?
            .organization
            .ok_or_else(|| {
                Error::graphql(format!(
                    "Could not resolve organization '{}'",
                    variables.organization
                ))
            })?
            .repository
            .ok_or_else(|| {
                Error::graphql(format!(
                    "Could not resolve repository '{}/{}'",
                    variables.organization, variables.repository
                ))
            })
    }
}
