//! GitHub GraphQL response types

use crate::error::{Error, Result};
use crate::pagination::PageInfo;
use serde::{Deserialize, Serialize};

/// Top-level GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

/// One entry of the GraphQL `errors` array
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

impl<T> GraphqlResponse<T> {
    /// Unwrap the data, failing on any reported error
    pub fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(Error::graphql(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| Error::graphql("response contained no data"))
    }
}

/// `data` of the repository query
#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    pub organization: Option<Organization>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub repository: Option<RepositoryPage>,
}

/// One page of repository data; each collection is present only when its
/// include toggle was set on the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPage {
    #[serde(default)]
    pub issues: Option<Connection<IssueNode>>,
    #[serde(default)]
    pub pull_requests: Option<Connection<IssueNode>>,
    #[serde(default)]
    pub stargazers: Option<Connection<StarNode>>,
}

/// A paginated GraphQL collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default)]
    pub total_count: u64,
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

/// An issue or pull request
///
/// Every property is optional on the wire because the query only selects
/// the ones whose toggles were set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueNode {
    pub number: Option<i64>,
    pub title: Option<String>,
    pub closed: Option<bool>,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub closed_at: Option<String>,
    pub author: Option<Actor>,
    pub labels: Option<LabelConnection>,
    pub milestone: Option<Milestone>,
    pub locked: Option<bool>,
    pub comments: Option<TotalCount>,
    /// Set by the pager on nodes from the `pullRequests` collection
    #[serde(skip)]
    pub is_pull_request: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub login: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Vec<Label>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: i64,
}

/// A stargazer edge; only the star time is selected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarNode {
    pub created_at: Option<String>,
}
