//! GitHub connector
//!
//! Reports on a repository's issues, pull requests and stargazers through
//! the GitHub GraphQL API.
//!
//! # Flow
//!
//! 1. Validate `organization` / `repository`
//! 2. Resolve the requested fields against the static catalog
//! 3. Check that they share one group and build the query variables
//! 4. Page through the query (capped, see [`GraphqlPager`])
//! 5. Map nodes to rows

mod client;
mod fields;
mod pager;
mod query;
mod rows;
mod types;

pub use client::GithubClient;
pub use fields::catalog;
pub use pager::{GraphqlPager, PageSource};
pub use query::{
    build_variables, graphql_variable, resolve_group, Cursors, Group, QueryVariables, Resource,
    ISSUES, REPOSITORY_QUERY, STARGAZERS,
};
pub use rows::{format_date, issue_row, is_mapped, star_row, to_rows, unmapped_fields};
pub use types::{
    Actor, Connection, IssueNode, Label, LabelConnection, Milestone, RepositoryPage, StarNode,
    TotalCount,
};

use crate::auth::{AuthConfig, AuthType};
use crate::config::{GithubConfig, Settings};
use crate::connector::{
    AuthTypeResponse, CommunityConnector, ConfigInput, ConfigResponse, DataRequest, DataResponse,
    SchemaRequest, SchemaResponse,
};
use crate::error::{Error, Result};
use crate::schema::Fields;
use async_trait::async_trait;
use tracing::info;

/// GitHub community connector
#[derive(Debug)]
pub struct GithubConnector {
    client: GithubClient,
    fields: Fields,
    pager: GraphqlPager,
    strict_fields: bool,
}

impl GithubConnector {
    /// Create a connector using an OAuth2 access token supplied by the host
    pub fn new(settings: &Settings, auth: AuthConfig) -> Result<Self> {
        let fields = catalog();
        let strict_fields = settings.github.strict_fields;

        if strict_fields {
            let unmapped = unmapped_fields(&fields);
            if !unmapped.is_empty() {
                return Err(Error::config(format!(
                    "Fields without a row mapping: {}",
                    unmapped.join(", ")
                )));
            }
        }

        Ok(Self {
            client: GithubClient::new(settings, auth)?,
            fields,
            pager: GraphqlPager::new(settings.github.page_limit()),
            strict_fields,
        })
    }

    /// The field catalog
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Serve a data request from the given page source
    pub async fn data_from(
        &self,
        source: &dyn PageSource,
        request: &DataRequest,
    ) -> Result<DataResponse> {
        let config = GithubConfig::from_params(&request.config_params)?;
        let requested = self.fields.for_ids(&request.field_ids())?;
        let group = resolve_group(&requested)?;

        if self.strict_fields {
            if let Some(id) = unmapped_fields(&requested).into_iter().next() {
                return Err(Error::unsupported_field(id));
            }
        }

        let variables = build_variables(group, &config, &requested);
        let pages = self.pager.fetch_all(source, variables).await?;
        let rows = to_rows(&pages, &requested)?;

        info!(
            "Fetched {} {} rows for {}/{} in {} pages",
            rows.len(),
            group,
            config.organization,
            config.repository,
            pages.len()
        );

        Ok(DataResponse {
            schema: requested.into_vec(),
            rows,
        })
    }
}

#[async_trait]
impl CommunityConnector for GithubConnector {
    fn name(&self) -> &str {
        "github"
    }

    fn auth_type(&self) -> AuthTypeResponse {
        AuthTypeResponse::new(AuthType::Oauth2)
    }

    fn config(&self) -> ConfigResponse {
        ConfigResponse {
            config_params: vec![
                ConfigInput::text("organization", "Organization")
                    .help_text("The name of the organization (or user) that owns the repository.")
                    .placeholder("googledatastudio")
                    .allow_override(true),
                ConfigInput::text("repository", "Repository")
                    .help_text("The name of the repository.")
                    .placeholder("community-connectors")
                    .allow_override(true),
            ],
            date_range_required: false,
        }
    }

    async fn schema(&self, request: &SchemaRequest) -> Result<SchemaResponse> {
        GithubConfig::from_params(&request.config_params)?;
        Ok(SchemaResponse::from(self.fields.clone()))
    }

    async fn data(&self, request: &DataRequest) -> Result<DataResponse> {
        self.data_from(&self.client, request).await
    }
}

#[cfg(test)]
mod tests;
