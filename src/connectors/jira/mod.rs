//! Jira connector
//!
//! Reports on the issues of a Jira Cloud site through its REST API. The
//! field catalog is derived from the site's field list on every request;
//! issues are found with a JQL search paged by `startAt`/`maxResults`.

mod fields;
mod jql;
mod rows;
mod types;

pub use fields::catalog_from;
pub use jql::build_jql;
pub use rows::{format_datetime, issue_row, render_value, to_rows};
pub use types::{JiraField, JiraFieldSchema, JiraIssue, SearchResponse};

use crate::auth::{AuthConfig, AuthType};
use crate::config::{JiraConfig, Settings};
use crate::connector::{
    AuthTypeResponse, CommunityConnector, ConfigInput, ConfigResponse, DataRequest, DataResponse,
    SchemaRequest, SchemaResponse, SelectOption,
};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{NextPage, OffsetPaginator, PaginationState, Paginator};
use crate::schema::Fields;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

const FIELD_PATH: &str = "rest/api/3/field";
const SEARCH_PATH: &str = "rest/api/3/search";

/// Jira community connector
#[derive(Debug)]
pub struct JiraConnector {
    http: HttpClient,
    base_url: Option<String>,
    page_size: u32,
}

impl JiraConnector {
    /// Create a connector using HTTP Basic credentials (username and API token)
    pub fn new(settings: &Settings, auth: AuthConfig) -> Result<Self> {
        let mut config = HttpClientConfig::builder()
            .timeout(settings.http.timeout())
            .header("Accept", "application/json");
        if let Some(agent) = &settings.http.user_agent {
            config = config.user_agent(agent);
        }

        Ok(Self {
            http: HttpClient::with_auth(config.build(), auth)?,
            base_url: settings.jira.base_url.clone(),
            page_size: settings.jira.page_size,
        })
    }

    /// Root of the site's REST API, with a trailing slash
    fn base(&self, config: &JiraConfig) -> Result<Url> {
        let raw = match &self.base_url {
            Some(base) => base.clone(),
            None => format!("https://{}", config.host),
        };
        let mut base = Url::parse(&raw)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base)
    }

    /// Fetch the site's field list
    pub async fn fetch_fields(&self, config: &JiraConfig) -> Result<Vec<JiraField>> {
        let url = self.base(config)?.join(FIELD_PATH)?;
        self.http
            .get_json_with_config(url.as_str(), RequestConfig::new())
            .await
    }

    /// The field catalog for a site
    pub async fn fields(&self, config: &JiraConfig) -> Result<Fields> {
        let remote = self.fetch_fields(config).await?;
        debug!("Loaded {} fields from {}", remote.len(), config.host);
        Ok(catalog_from(&remote))
    }

    /// Run a JQL search and collect every page of issues
    pub async fn search(&self, config: &JiraConfig, jql: &str) -> Result<Vec<JiraIssue>> {
        let url = self.base(config)?.join(SEARCH_PATH)?;
        let paginator = OffsetPaginator::jira(self.page_size);
        let mut state = PaginationState::new();
        let mut params = paginator.initial_params(&state);
        let mut issues = Vec::new();

        loop {
            let mut request = RequestConfig::new().query("jql", jql);
            request.query.extend(params);

            let body: JsonValue = self
                .http
                .get_json_with_config(url.as_str(), request)
                .await?;
            let page = SearchResponse::deserialize(&body)?;
            debug!(
                "Search page at {}: {} issues of {}",
                page.start_at,
                page.issues.len(),
                page.total
            );
            issues.extend(page.issues);

            match paginator.process_response(&body, &mut state) {
                NextPage::Continue { query_params } => params = query_params,
                NextPage::Done => break,
            }
        }

        Ok(issues)
    }
}

#[async_trait]
impl CommunityConnector for JiraConnector {
    fn name(&self) -> &str {
        "jira"
    }

    fn auth_type(&self) -> AuthTypeResponse {
        AuthTypeResponse::new(AuthType::UserToken)
            .help_url("https://id.atlassian.com/manage-profile/security/api-tokens")
    }

    fn config(&self) -> ConfigResponse {
        ConfigResponse {
            config_params: vec![
                ConfigInput::text("host", "Jira Host")
                    .help_text("The host of your Jira site.")
                    .placeholder("example.atlassian.net"),
                ConfigInput::text("projects", "Projects")
                    .help_text("Comma separated list of project keys. Leave blank for all projects.")
                    .placeholder("ABC,DEF")
                    .allow_override(true),
                ConfigInput::text_area("additionalQuery", "Additional JQL")
                    .help_text("JQL appended to the search, e.g. status = Done.")
                    .allow_override(true),
                ConfigInput::select(
                    "dateForQuery",
                    "Date Range Field",
                    vec![
                        SelectOption::new("None", JiraConfig::NO_DATE_FILTER),
                        SelectOption::new("Created", "created"),
                        SelectOption::new("Updated", "updated"),
                        SelectOption::new("Resolved", "resolved"),
                    ],
                )
                .help_text("The issue date the report's date range filters on."),
            ],
            date_range_required: true,
        }
    }

    async fn schema(&self, request: &SchemaRequest) -> Result<SchemaResponse> {
        let config = JiraConfig::from_params(&request.config_params)?;
        let fields = self.fields(&config).await?;
        Ok(SchemaResponse::from(fields))
    }

    async fn data(&self, request: &DataRequest) -> Result<DataResponse> {
        let config = JiraConfig::from_params(&request.config_params)?;
        let jql = build_jql(&config, request.date_range.as_ref())?;

        let requested = self.fields(&config).await?.for_ids(&request.field_ids())?;
        let issues = self.search(&config, &jql).await?;
        let rows = to_rows(&issues, &requested, &config)?;

        info!(
            "Fetched {} Jira rows from {} (jql: {})",
            rows.len(),
            config.host,
            jql
        );

        Ok(DataResponse {
            schema: requested.into_vec(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests;
