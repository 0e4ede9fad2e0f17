//! GitHub repository query and its variables
//!
//! One GraphQL document serves every request. Boolean variables switch
//! whole collections and individual node properties on and off through
//! `@include(if:)`, and one cursor per collection drives pagination.

use crate::config::GithubConfig;
use crate::error::{Error, Result};
use crate::schema::Fields;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Group holding issue and pull request fields
pub const ISSUES: &str = "issues";

/// Group holding stargazer fields
pub const STARGAZERS: &str = "stargazers";

/// The repository query
pub const REPOSITORY_QUERY: &str = r"
query (
  $organization: String!,
  $repository: String!,
  $stars: Boolean = false,
  $issues: Boolean = false,
  $star_gazer_pointer: String,
  $issues_pointer: String,
  $pull_requests_pointer: String,
  $title: Boolean = false,
  $url: Boolean = false,
  $closed: Boolean = false,
  $author: Boolean = false,
  $number: Boolean = false,
  $labels: Boolean = false,
  $milestone: Boolean = false,
  $locked: Boolean = false,
  $comments: Boolean = false,
  $created_at: Boolean = false,
  $closed_at: Boolean = false
) {
  organization(login: $organization) {
    repository(name: $repository) {
      issues(first: 1, after: $issues_pointer) @include(if: $issues) {
        totalCount
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          number @include(if: $number)
          title @include(if: $title)
          closed @include(if: $closed)
          url @include(if: $url)
          createdAt @include(if: $created_at)
          closedAt @include(if: $closed_at)
          author @include(if: $author) {
            login
          }
          labels(first: 100) @include(if: $labels) {
            nodes {
              name
            }
          }
          milestone @include(if: $milestone) {
            title
          }
          locked @include(if: $locked)
          comments @include(if: $comments) {
            totalCount
          }
        }
      }
      pullRequests(first: 1, after: $pull_requests_pointer) @include(if: $issues) {
        totalCount
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          number @include(if: $number)
          title @include(if: $title)
          closed @include(if: $closed)
          url @include(if: $url)
          createdAt @include(if: $created_at)
          closedAt @include(if: $closed_at)
          author @include(if: $author) {
            login
          }
          labels(first: 100) @include(if: $labels) {
            nodes {
              name
            }
          }
          milestone @include(if: $milestone) {
            title
          }
          locked @include(if: $locked)
          comments @include(if: $comments) {
            totalCount
          }
        }
      }
      stargazers(first: 100, after: $star_gazer_pointer) @include(if: $stars) {
        totalCount
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          createdAt
        }
      }
    }
  }
}
";

/// Field group selected for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Issues,
    Stargazers,
}

impl Group {
    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Issues => ISSUES,
            Group::Stargazers => STARGAZERS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ISSUES => Some(Group::Issues),
            STARGAZERS => Some(Group::Stargazers),
            _ => None,
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paginated collections of the repository query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Issues,
    PullRequests,
    Stargazers,
}

impl Resource {
    /// Toggle that includes this collection in the response
    pub fn include_toggle(&self) -> &'static str {
        match self {
            // Pull requests ride on the issues toggle
            Resource::Issues | Resource::PullRequests => ISSUES,
            Resource::Stargazers => STARGAZERS,
        }
    }
}

/// Pagination cursors, one per collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursors {
    pub issues: Option<String>,
    pub pull_requests: Option<String>,
    pub stargazers: Option<String>,
}

impl Cursors {
    pub fn get(&self, resource: Resource) -> Option<&str> {
        match resource {
            Resource::Issues => self.issues.as_deref(),
            Resource::PullRequests => self.pull_requests.as_deref(),
            Resource::Stargazers => self.stargazers.as_deref(),
        }
    }

    pub fn set(&mut self, resource: Resource, cursor: Option<String>) {
        match resource {
            Resource::Issues => self.issues = cursor,
            Resource::PullRequests => self.pull_requests = cursor,
            Resource::Stargazers => self.stargazers = cursor,
        }
    }
}

/// Variables for one repository query
///
/// Toggles are keyed by group name and field id. [`QueryVariables::to_graphql`]
/// translates them into the variables the query document declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVariables {
    pub organization: String,
    pub repository: String,
    toggles: BTreeMap<String, bool>,
    pub cursors: Cursors,
}

impl QueryVariables {
    /// Variables with no toggles and no cursors
    pub fn new(config: &GithubConfig) -> Self {
        Self {
            organization: config.organization.clone(),
            repository: config.repository.clone(),
            toggles: BTreeMap::new(),
            cursors: Cursors::default(),
        }
    }

    pub fn toggles(&self) -> &BTreeMap<String, bool> {
        &self.toggles
    }

    /// Whether a toggle is present and true
    pub fn is_enabled(&self, key: &str) -> bool {
        self.toggles.get(key).copied().unwrap_or(false)
    }

    pub fn set_toggle(&mut self, key: impl Into<String>, value: bool) {
        self.toggles.insert(key.into(), value);
    }

    /// Stop requesting a collection
    pub fn disable(&mut self, resource: Resource) {
        self.set_toggle(resource.include_toggle(), false);
    }

    /// Encode as the GraphQL `variables` object
    pub fn to_graphql(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("organization".to_string(), json!(self.organization));
        vars.insert("repository".to_string(), json!(self.repository));
        vars.insert("issues_pointer".to_string(), json!(self.cursors.issues));
        vars.insert(
            "pull_requests_pointer".to_string(),
            json!(self.cursors.pull_requests),
        );
        vars.insert(
            "star_gazer_pointer".to_string(),
            json!(self.cursors.stargazers),
        );

        for (key, enabled) in &self.toggles {
            let Some(name) = graphql_variable(key) else {
                continue;
            };
            let current = vars.get(name).and_then(Value::as_bool).unwrap_or(false);
            vars.insert(name.to_string(), Value::Bool(current || *enabled));
        }

        Value::Object(vars)
    }
}

/// Query variable a toggle drives, if any
///
/// `is_pull_request`, `stars` and `starred_at` are derived from data the
/// query always selects, so they have no variable.
pub fn graphql_variable(toggle: &str) -> Option<&'static str> {
    match toggle {
        ISSUES => Some("issues"),
        STARGAZERS => Some("stars"),
        "number" => Some("number"),
        "title" => Some("title"),
        "url" => Some("url"),
        "open" => Some("closed"),
        "reporter" => Some("author"),
        "label" => Some("labels"),
        "milestone" => Some("milestone"),
        "locked" => Some("locked"),
        "num_comments" => Some("comments"),
        "created_at" => Some("created_at"),
        "closed_at" => Some("closed_at"),
        _ => None,
    }
}

/// The single group shared by all requested fields
pub fn resolve_group(fields: &Fields) -> Result<Group> {
    let mut group: Option<&str> = None;
    for field in fields.as_slice() {
        let field_group = field.group.as_deref().unwrap_or_default();
        match group {
            None => group = Some(field_group),
            Some(current) if current != field_group => {
                return Err(Error::config(format!(
                    "You can only choose fields in the same group. You chose fields from \"{current}\" and \"{field_group}\""
                )));
            }
            Some(_) => {}
        }
    }

    let group = group.ok_or_else(|| Error::config("Choose at least one field."))?;
    Group::from_name(group)
        .ok_or_else(|| Error::config(format!("Group: {group} is not supported")))
}

/// Toggle the selected group and every requested field on
pub fn build_variables(group: Group, config: &GithubConfig, fields: &Fields) -> QueryVariables {
    let mut variables = QueryVariables::new(config);
    variables.set_toggle(group.as_str(), true);
    for id in fields.ids() {
        variables.set_toggle(id, true);
    }
    variables
}
