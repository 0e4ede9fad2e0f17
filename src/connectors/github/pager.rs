//! Multi-collection GraphQL pager
//!
//! Issues one request per iteration and advances each returned
//! collection's cursor from the response. The loop stops when the
//! continuation flag goes false or the page limit is reached.

use super::query::{QueryVariables, Resource, ISSUES, STARGAZERS};
use super::types::{Connection, IssueNode, RepositoryPage};
use crate::error::Result;
use crate::pagination::{PageInfo, PageLimit};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Something that can execute one repository query
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, variables: &QueryVariables) -> Result<RepositoryPage>;
}

/// Drives a [`PageSource`] through the repository query's cursors
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphqlPager {
    limit: PageLimit,
}

impl GraphqlPager {
    pub fn new(limit: PageLimit) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> PageLimit {
        self.limit
    }

    /// Fetch pages until the server reports no next page or the limit is hit
    ///
    /// Collections are processed in the order stargazers, issues, pull
    /// requests, and the last one present decides whether to continue.
    /// The fetch also ends once every collection is switched off or a
    /// response carries none. Any request failure aborts the fetch and
    /// discards collected pages.
    pub async fn fetch_all(
        &self,
        source: &dyn PageSource,
        mut variables: QueryVariables,
    ) -> Result<Vec<RepositoryPage>> {
        let mut has_next_page = true;
        let mut pages = Vec::new();

        while has_next_page && !self.limit.reached(pages.len()) {
            let mut page = source.fetch_page(&variables).await?;
            let carries_collection = page.stargazers.is_some()
                || page.issues.is_some()
                || page.pull_requests.is_some();

            if let Some(stars) = &page.stargazers {
                has_next_page = advance(&mut variables, Resource::Stargazers, &stars.page_info);
                if variables.cursors.stargazers.is_none() {
                    variables.disable(Resource::Stargazers);
                }
            }

            if let Some(issues) = &page.issues {
                has_next_page = advance(&mut variables, Resource::Issues, &issues.page_info);
                if variables.cursors.issues.is_none() {
                    variables.disable(Resource::Issues);
                }
            }

            if let Some(pull_requests) = &mut page.pull_requests {
                mark_pull_requests(pull_requests);
                has_next_page = advance(
                    &mut variables,
                    Resource::PullRequests,
                    &pull_requests.page_info,
                );
                // Gated on the issues cursor: a null pull request cursor alone
                // keeps the shared toggle on.
                if variables.cursors.issues.is_none() {
                    variables.disable(Resource::PullRequests);
                }
            }

            if !carries_collection || !any_collection_enabled(&variables) {
                has_next_page = false;
            }

            pages.push(page);
            debug!(
                "Fetched page {}/{} (has_next_page: {})",
                pages.len(),
                self.limit.max_pages(),
                has_next_page
            );
        }

        if has_next_page {
            warn!(
                "Stopped after {} pages; remaining results were not fetched",
                pages.len()
            );
        }

        Ok(pages)
    }
}

fn any_collection_enabled(variables: &QueryVariables) -> bool {
    variables.is_enabled(ISSUES) || variables.is_enabled(STARGAZERS)
}

/// Move a collection's cursor forward and return its continuation flag
fn advance(variables: &mut QueryVariables, resource: Resource, page_info: &PageInfo) -> bool {
    variables
        .cursors
        .set(resource, page_info.end_cursor.clone());
    page_info.has_next_page
}

fn mark_pull_requests(connection: &mut Connection<IssueNode>) {
    for node in &mut connection.nodes {
        node.is_pull_request = true;
    }
}
