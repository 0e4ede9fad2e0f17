//! Tests for the GitHub connector

use super::*;
use crate::config::GithubSettings;
use crate::connector::DataRequest;
use crate::pagination::{PageInfo, PageLimit};
use crate::types::{Row, RowValue, StringMap};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use test_case::test_case;

// ============================================================================
// Helpers
// ============================================================================

/// Replays canned pages and records the variables of every request
struct ScriptedSource {
    pages: Mutex<VecDeque<RepositoryPage>>,
    requests: Mutex<Vec<QueryVariables>>,
}

impl ScriptedSource {
    fn new(pages: Vec<RepositoryPage>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<QueryVariables> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, variables: &QueryVariables) -> Result<RepositoryPage> {
        self.requests.lock().unwrap().push(variables.clone());
        Ok(self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Always answers with another page of stargazers
struct EndlessStars;

#[async_trait]
impl PageSource for EndlessStars {
    async fn fetch_page(&self, _variables: &QueryVariables) -> Result<RepositoryPage> {
        Ok(star_page(Some("next"), true, &["2020-12-01T09:05:33Z"]))
    }
}

fn github_config() -> GithubConfig {
    GithubConfig {
        organization: "googledatastudio".to_string(),
        repository: "community-connectors".to_string(),
    }
}

fn config_params() -> StringMap {
    [
        ("organization", "googledatastudio"),
        ("repository", "community-connectors"),
    ]
    .iter()
    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
    .collect()
}

fn connector(settings: &Settings) -> GithubConnector {
    GithubConnector::new(settings, AuthConfig::bearer("token")).unwrap()
}

fn issue(number: i64) -> IssueNode {
    IssueNode {
        number: Some(number),
        ..IssueNode::default()
    }
}

fn issue_connection(cursor: Option<&str>, has_next: bool, nodes: Vec<IssueNode>) -> Connection<IssueNode> {
    Connection {
        total_count: 0,
        page_info: PageInfo::new(cursor, has_next),
        nodes,
    }
}

fn star_page(cursor: Option<&str>, has_next: bool, starred: &[&str]) -> RepositoryPage {
    RepositoryPage {
        stargazers: Some(Connection {
            total_count: 0,
            page_info: PageInfo::new(cursor, has_next),
            nodes: starred
                .iter()
                .map(|s| StarNode {
                    created_at: Some((*s).to_string()),
                })
                .collect(),
        }),
        ..RepositoryPage::default()
    }
}

fn issues_page(
    issues: Connection<IssueNode>,
    pull_requests: Connection<IssueNode>,
) -> RepositoryPage {
    RepositoryPage {
        issues: Some(issues),
        pull_requests: Some(pull_requests),
        stargazers: None,
    }
}

fn requested(ids: &[&str]) -> Fields {
    catalog().for_ids(ids).unwrap()
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_groups() {
    let fields = catalog();
    assert_eq!(fields.len(), 14);
    assert_eq!(fields.default_dimension(), Some("number"));
    assert_eq!(fields.default_metric(), Some("num_comments"));

    let stars: Vec<&str> = fields
        .as_slice()
        .iter()
        .filter(|f| f.group.as_deref() == Some(STARGAZERS))
        .map(|f| f.id.as_str())
        .collect();
    assert_eq!(stars, vec!["starred_at", "stars"]);
}

#[test]
fn test_every_catalog_field_is_mapped() {
    assert!(unmapped_fields(&catalog()).is_empty());
}

// ============================================================================
// Variable builder
// ============================================================================

#[test]
fn test_build_variables_single_group() {
    let fields = requested(&["number", "title", "open"]);
    let group = resolve_group(&fields).unwrap();
    assert_eq!(group, Group::Issues);

    let variables = build_variables(group, &github_config(), &fields);
    let toggles: Vec<(&str, bool)> = variables
        .toggles()
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(
        toggles,
        vec![
            ("issues", true),
            ("number", true),
            ("open", true),
            ("title", true)
        ]
    );
    assert_eq!(variables.cursors, Cursors::default());
}

#[test]
fn test_build_variables_stargazers() {
    let fields = requested(&["starred_at", "stars"]);
    let group = resolve_group(&fields).unwrap();
    let variables = build_variables(group, &github_config(), &fields);

    assert_eq!(variables.toggles().len(), 3);
    assert!(variables.is_enabled("stargazers"));
    assert!(variables.is_enabled("starred_at"));
    assert!(variables.is_enabled("stars"));
    assert!(!variables.is_enabled("issues"));
}

#[test]
fn test_resolve_group_rejects_mixed_groups() {
    let fields = requested(&["number", "stars"]);
    let err = resolve_group(&fields).unwrap_err();
    assert!(err.is_user_facing());
    assert_eq!(
        err.to_string(),
        "You can only choose fields in the same group. You chose fields from \"issues\" and \"stargazers\""
    );
}

#[test]
fn test_resolve_group_unknown_group() {
    let fields = Fields::new().with(crate::schema::Field::dimension("x", "X").group("forks"));
    let err = resolve_group(&fields).unwrap_err();
    assert_eq!(err.to_string(), "Group: forks is not supported");
}

#[test]
fn test_resolve_group_requires_a_field() {
    assert!(resolve_group(&Fields::new()).is_err());
}

#[test]
fn test_to_graphql_translates_toggles() {
    let fields = requested(&["open", "reporter", "label", "num_comments", "is_pull_request"]);
    let mut variables = build_variables(Group::Issues, &github_config(), &fields);
    variables.cursors.issues = Some("abc".to_string());

    assert_eq!(
        variables.to_graphql(),
        json!({
            "organization": "googledatastudio",
            "repository": "community-connectors",
            "issues_pointer": "abc",
            "pull_requests_pointer": null,
            "star_gazer_pointer": null,
            "issues": true,
            "closed": true,
            "author": true,
            "labels": true,
            "comments": true
        })
    );
}

#[test]
fn test_to_graphql_stargazers_use_stars_variable() {
    let fields = requested(&["stars"]);
    let mut variables = build_variables(Group::Stargazers, &github_config(), &fields);
    assert_eq!(variables.to_graphql()["stars"], json!(true));

    variables.disable(Resource::Stargazers);
    assert_eq!(variables.to_graphql()["stars"], json!(false));
}

#[test_case("issues", Some("issues"))]
#[test_case("stargazers", Some("stars"))]
#[test_case("open", Some("closed"))]
#[test_case("reporter", Some("author"))]
#[test_case("created_at", Some("created_at"))]
#[test_case("is_pull_request", None)]
#[test_case("starred_at", None)]
fn test_graphql_variable(toggle: &str, expected: Option<&str>) {
    assert_eq!(graphql_variable(toggle), expected);
}

#[test]
fn test_query_declares_every_translated_variable() {
    for id in catalog().ids().chain([ISSUES, STARGAZERS]) {
        if let Some(name) = graphql_variable(id) {
            assert!(
                REPOSITORY_QUERY.contains(&format!("${name}: Boolean")),
                "query does not declare ${name}"
            );
        }
    }
}

// ============================================================================
// Pager
// ============================================================================

#[tokio::test]
async fn test_pager_stops_at_limit() {
    let pager = GraphqlPager::new(PageLimit::default());
    let variables = build_variables(Group::Stargazers, &github_config(), &requested(&["stars"]));

    let pages = pager.fetch_all(&EndlessStars, variables).await.unwrap();
    assert_eq!(pages.len(), 10);
}

#[tokio::test]
async fn test_pager_respects_configured_limit() {
    let pager = GraphqlPager::new(PageLimit::new(3));
    let variables = build_variables(Group::Stargazers, &github_config(), &requested(&["stars"]));

    let pages = pager.fetch_all(&EndlessStars, variables).await.unwrap();
    assert_eq!(pages.len(), 3);
}

#[tokio::test]
async fn test_pager_stops_when_no_next_page() {
    let source = ScriptedSource::new(vec![
        star_page(Some("c1"), true, &["2020-01-01T00:00:00Z"]),
        star_page(Some("c2"), false, &["2020-01-02T00:00:00Z"]),
    ]);
    let pager = GraphqlPager::default();
    let variables = build_variables(Group::Stargazers, &github_config(), &requested(&["stars"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();
    assert_eq!(pages.len(), 2);

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].cursors.stargazers, None);
    assert_eq!(requests[1].cursors.stargazers.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_pager_disables_toggle_after_null_cursor() {
    let source = ScriptedSource::new(vec![
        issues_page(
            issue_connection(None, true, vec![]),
            issue_connection(Some("p1"), true, vec![issue(2)]),
        ),
        RepositoryPage::default(),
        RepositoryPage::default(),
    ]);
    let pager = GraphqlPager::new(PageLimit::new(3));
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(pages.len(), 1);
    assert!(requests[0].is_enabled("issues"));
}

#[tokio::test]
async fn test_pager_stops_once_every_collection_is_off() {
    let source = ScriptedSource::new(vec![
        issues_page(
            issue_connection(None, false, vec![issue(1)]),
            issue_connection(Some("p1"), true, vec![issue(2)]),
        ),
        RepositoryPage::default(),
        RepositoryPage::default(),
    ]);
    let pager = GraphqlPager::new(PageLimit::default());
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();

    assert_eq!(pages.len(), 1);
    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    for request in &requests {
        assert!(request.is_enabled("issues") || request.is_enabled("stargazers"));
    }
}

#[tokio::test]
async fn test_pager_stops_on_response_without_collections() {
    let source = ScriptedSource::new(vec![
        issues_page(
            issue_connection(Some("i1"), true, vec![issue(1)]),
            issue_connection(Some("p1"), true, vec![issue(2)]),
        ),
        RepositoryPage::default(),
        issues_page(
            issue_connection(Some("i2"), true, vec![issue(3)]),
            issue_connection(Some("p2"), true, vec![]),
        ),
    ]);
    let pager = GraphqlPager::new(PageLimit::default());
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn test_pager_disables_stargazers_after_null_cursor() {
    let source = ScriptedSource::new(vec![star_page(None, true, &[]), RepositoryPage::default()]);
    let pager = GraphqlPager::new(PageLimit::new(2));
    let variables = build_variables(Group::Stargazers, &github_config(), &requested(&["stars"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();

    assert_eq!(pages.len(), 1);
    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is_enabled("stargazers"));
}

#[tokio::test]
async fn test_pager_tags_pull_requests() {
    let source = ScriptedSource::new(vec![issues_page(
        issue_connection(Some("i1"), false, vec![issue(1)]),
        issue_connection(Some("p1"), false, vec![issue(2)]),
    )]);
    let pager = GraphqlPager::default();
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();
    assert_eq!(pages.len(), 1);
    let page = &pages[0];
    assert!(!page.issues.as_ref().unwrap().nodes[0].is_pull_request);
    assert!(page.pull_requests.as_ref().unwrap().nodes[0].is_pull_request);
}

#[tokio::test]
async fn test_pager_last_collection_decides_continuation() {
    // Issues report more pages, pull requests do not: the fetch ends
    let source = ScriptedSource::new(vec![issues_page(
        issue_connection(Some("i1"), true, vec![issue(1)]),
        issue_connection(Some("p1"), false, vec![issue(2)]),
    )]);
    let pager = GraphqlPager::default();
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    let pages = pager.fetch_all(&source, variables).await.unwrap();
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_pager_pull_request_null_cursor_keeps_shared_toggle() {
    // A null pull request cursor does not disable the shared toggle while
    // the issues cursor is still set
    let source = ScriptedSource::new(vec![
        issues_page(
            issue_connection(Some("i1"), true, vec![issue(1)]),
            issue_connection(None, true, vec![]),
        ),
        issues_page(
            issue_connection(Some("i2"), false, vec![issue(3)]),
            issue_connection(None, false, vec![]),
        ),
    ]);
    let pager = GraphqlPager::default();
    let variables = build_variables(Group::Issues, &github_config(), &requested(&["number"]));

    pager.fetch_all(&source, variables).await.unwrap();

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].is_enabled("issues"));
    assert_eq!(requests[1].cursors.issues.as_deref(), Some("i1"));
    assert_eq!(requests[1].cursors.pull_requests, None);
}

// ============================================================================
// Row mapper
// ============================================================================

#[test]
fn test_issue_row_scenario() {
    let node = IssueNode {
        number: Some(42),
        title: Some("Bug".to_string()),
        closed: Some(false),
        ..IssueNode::default()
    };
    let row = issue_row(&node, &requested(&["number", "title", "open"])).unwrap();
    assert_eq!(
        row,
        Row::new(vec![
            RowValue::text("42"),
            RowValue::text("Bug"),
            RowValue::Bool(true)
        ])
    );
}

#[test]
fn test_unknown_field_fails_when_reached() {
    let fields = Fields::new()
        .with(crate::schema::Field::dimension("number", "Number").group(ISSUES))
        .with(crate::schema::Field::dimension("foo", "Foo").group(ISSUES));

    let err = issue_row(&issue(1), &fields).unwrap_err();
    assert!(matches!(err, Error::UnsupportedField { ref field } if field == "foo"));
    assert!(err.debug_text().unwrap().contains("\"foo\""));
}

#[test]
fn test_unknown_field_not_reached_without_rows() {
    let fields = Fields::new().with(crate::schema::Field::dimension("foo", "Foo").group(ISSUES));
    let pages = vec![issues_page(
        issue_connection(None, false, vec![]),
        issue_connection(None, false, vec![]),
    )];
    assert_eq!(to_rows(&pages, &fields).unwrap(), Vec::<Row>::new());
}

#[test]
fn test_issue_row_all_fields() {
    let node: IssueNode = serde_json::from_value(json!({
        "number": 7,
        "title": "Add docs",
        "closed": true,
        "url": "https://github.com/o/r/issues/7",
        "createdAt": "2021-03-05T14:22:00Z",
        "closedAt": "2021-03-06T01:00:00Z",
        "author": {"login": "octocat"},
        "labels": {"nodes": [{"name": "docs"}, {"name": "good first issue"}]},
        "milestone": {"title": "v1"},
        "locked": false,
        "comments": {"totalCount": 3}
    }))
    .unwrap();

    let row = issue_row(
        &node,
        &requested(&[
            "number",
            "title",
            "open",
            "url",
            "reporter",
            "label",
            "milestone",
            "locked",
            "num_comments",
            "is_pull_request",
            "created_at",
            "closed_at",
        ]),
    )
    .unwrap();

    assert_eq!(
        row.values,
        vec![
            RowValue::text("7"),
            RowValue::text("Add docs"),
            RowValue::Bool(false),
            RowValue::text("https://github.com/o/r/issues/7"),
            RowValue::text("octocat"),
            RowValue::text("docs, good first issue"),
            RowValue::text("v1"),
            RowValue::Bool(false),
            RowValue::Integer(3),
            RowValue::Bool(false),
            RowValue::text("2021030514"),
            RowValue::text("2021030601"),
        ]
    );
}

#[test]
fn test_nullable_columns() {
    let node = IssueNode {
        milestone: None,
        closed_at: None,
        ..IssueNode::default()
    };
    let row = issue_row(&node, &requested(&["milestone", "closed_at"])).unwrap();
    assert_eq!(row.values, vec![RowValue::Null, RowValue::Null]);
}

#[test]
fn test_missing_author_is_contract_violation() {
    let err = issue_row(&issue(1), &requested(&["reporter"])).unwrap_err();
    assert!(matches!(err, Error::MissingData { ref field, .. } if field == "reporter"));
    assert!(!err.is_user_facing());
}

#[test]
fn test_star_rows() {
    let row = star_row(
        &StarNode {
            created_at: Some("2020-12-01T09:05:33Z".to_string()),
        },
        &requested(&["starred_at", "stars"]),
    )
    .unwrap();
    assert_eq!(
        row.values,
        vec![RowValue::text("2020120109"), RowValue::Integer(1)]
    );
}

#[test]
fn test_to_rows_issues_then_pull_requests_per_page() {
    let mut pr = issue(2);
    pr.is_pull_request = true;
    let pages = vec![
        issues_page(
            issue_connection(Some("i1"), true, vec![issue(1)]),
            issue_connection(Some("p1"), true, vec![pr]),
        ),
        issues_page(
            issue_connection(Some("i2"), false, vec![issue(3)]),
            issue_connection(None, false, vec![]),
        ),
    ];

    let rows = to_rows(&pages, &requested(&["number", "is_pull_request"])).unwrap();
    let values: Vec<Vec<RowValue>> = rows.into_iter().map(|r| r.values).collect();
    assert_eq!(
        values,
        vec![
            vec![RowValue::text("1"), RowValue::Bool(false)],
            vec![RowValue::text("2"), RowValue::Bool(true)],
            vec![RowValue::text("3"), RowValue::Bool(false)],
        ]
    );
}

#[test]
fn test_to_rows_skips_pages_without_collections() {
    let pages = vec![
        issues_page(
            issue_connection(None, true, vec![issue(1)]),
            issue_connection(None, true, vec![]),
        ),
        RepositoryPage::default(),
    ];
    let rows = to_rows(&pages, &requested(&["number"])).unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn test_to_rows_empty() {
    assert!(to_rows(&[], &requested(&["number"])).unwrap().is_empty());
    assert!(to_rows(&[RepositoryPage::default()], &requested(&["number"]))
        .unwrap()
        .is_empty());
}

#[test_case("2021-03-05T14:22:00Z", "2021030514")]
#[test_case("2020-12-01T09:05:33Z", "2020120109")]
#[test_case("2020-12-01", "20201201")]
#[test_case("2020", "2020")]
#[test_case("", "")]
#[test_case("２０２１-03-05T14:22:00Z", "２０２１030514"; "wide year digits")]
#[test_case("2021-0é-05T14:22:00Z", "20210é0514"; "accented month")]
fn test_format_date(input: &str, expected: &str) {
    assert_eq!(format_date(input), expected);
}

// ============================================================================
// Connector
// ============================================================================

#[tokio::test]
async fn test_mixed_groups_fail_before_any_request() {
    let connector = connector(&Settings::default());
    let source = ScriptedSource::new(vec![]);
    let request = DataRequest::new(config_params(), ["number", "stars"]);

    let err = connector.data_from(&source, &request).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_blank_config_fails_before_any_request() {
    let connector = connector(&Settings::default());
    let source = ScriptedSource::new(vec![]);
    let request = DataRequest::new(StringMap::new(), ["number"]);

    let err = connector.data_from(&source, &request).await.unwrap_err();
    assert_eq!(err.to_string(), "Organization cannot be left blank.");
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn test_data_from_scripted_source() {
    let connector = connector(&Settings::default());
    let source = ScriptedSource::new(vec![star_page(
        None,
        false,
        &["2020-12-01T09:05:33Z", "2021-03-05T14:22:00Z"],
    )]);
    let request = DataRequest::new(config_params(), ["stars", "starred_at"]);

    let response = connector.data_from(&source, &request).await.unwrap();
    let ids: Vec<&str> = response.schema.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["stars", "starred_at"]);
    assert_eq!(response.rows.len(), 2);
    assert_eq!(
        response.rows[1].values,
        vec![RowValue::Integer(1), RowValue::text("2021030514")]
    );
}

#[tokio::test]
async fn test_unknown_requested_field_fails_before_any_request() {
    let connector = connector(&Settings::default());
    let source = ScriptedSource::new(vec![]);
    let request = DataRequest::new(config_params(), ["number", "foo"]);

    let err = connector.data_from(&source, &request).await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedField { ref field } if field == "foo"));
    assert_eq!(err.to_string(), "You cannot use foo yet.");
    assert!(source.requests().is_empty());
}

#[test]
fn test_strict_mode_accepts_fully_mapped_catalog() {
    let settings = Settings {
        github: GithubSettings {
            strict_fields: true,
            ..GithubSettings::default()
        },
        ..Settings::default()
    };
    assert!(GithubConnector::new(&settings, AuthConfig::bearer("token")).is_ok());
}

#[tokio::test]
async fn test_schema_validates_config() {
    let connector = connector(&Settings::default());
    let err = connector
        .schema(&SchemaRequest::default())
        .await
        .unwrap_err();
    assert!(err.is_user_facing());

    let response = connector
        .schema(&SchemaRequest {
            config_params: config_params(),
        })
        .await
        .unwrap();
    assert_eq!(response.schema.len(), 14);
    assert_eq!(response.default_dimension.as_deref(), Some("number"));
    assert_eq!(response.default_metric.as_deref(), Some("num_comments"));
}

#[test]
fn test_auth_type_and_config() {
    let connector = connector(&Settings::default());
    assert_eq!(connector.auth_type().auth_type, AuthType::Oauth2);
    assert!(!connector.is_admin_user());

    let config = connector.config();
    assert!(config.input("organization").is_some());
    assert!(config.input("repository").unwrap().allow_override);
    assert!(!config.date_range_required);
}
