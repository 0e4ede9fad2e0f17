//! Tests for the Jira connector

use super::*;
use crate::config::JiraSettings;
use crate::error::Error;
use crate::schema::{FieldConcept, FieldType};
use crate::types::{DateRange, RowValue, StringMap};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn params(pairs: &[(&str, &str)]) -> StringMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn jira_config(pairs: &[(&str, &str)]) -> JiraConfig {
    let mut all = vec![("host", "example.atlassian.net")];
    all.extend_from_slice(pairs);
    JiraConfig::from_params(&params(&all)).unwrap()
}

fn remote_fields() -> Vec<JiraField> {
    serde_json::from_value(json!([
        {"id": "summary", "key": "summary", "name": "Summary", "schema": {"type": "string"}},
        {"id": "created", "key": "created", "name": "Created", "schema": {"type": "datetime"}},
        {"id": "customfield_10016", "key": "customfield_10016", "name": "Story Points", "schema": {"type": "number"}},
        {"id": "issuekey", "key": "issuekey", "name": "Key"},
        {"id": "labels", "name": "Labels", "schema": {"type": "array"}}
    ]))
    .unwrap()
}

fn issue(fields: serde_json::Value) -> JiraIssue {
    serde_json::from_value(json!({"id": "10001", "key": "ABC-1", "fields": fields})).unwrap()
}

fn requested(ids: &[&str]) -> Fields {
    catalog_from(&remote_fields()).for_ids(ids).unwrap()
}

async fn connector_for(server: &MockServer, page_size: u32) -> JiraConnector {
    let settings = Settings {
        jira: JiraSettings {
            base_url: Some(server.uri()),
            page_size,
        },
        ..Settings::default()
    };
    JiraConnector::new(&settings, AuthConfig::basic("me@example.com", "api-token")).unwrap()
}

fn search_page(start_at: u64, max_results: u64, total: u64, keys: &[&str]) -> serde_json::Value {
    let issues: Vec<_> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            json!({
                "id": format!("{}", 10_000 + start_at + i as u64),
                "key": key,
                "fields": {"summary": format!("Summary of {key}")}
            })
        })
        .collect();
    json!({
        "startAt": start_at,
        "maxResults": max_results,
        "total": total,
        "issues": issues
    })
}

// ============================================================================
// JQL
// ============================================================================

#[test]
fn test_jql_full_scenario() {
    let config = jira_config(&[
        ("dateForQuery", "created"),
        ("projects", "ABC,DEF"),
        ("additionalQuery", "status = Done"),
    ]);
    let range = DateRange::new("2021-01-01", "2021-01-31");

    assert_eq!(
        build_jql(&config, Some(&range)).unwrap(),
        "created >= 2021-01-01 AND created <= 2021-01-31 AND project in (ABC,DEF) AND status = Done"
    );
}

#[test_case(&[("dateForQuery", "none")], "" ; "nothing configured")]
#[test_case(&[("projects", "ABC")], "project in (ABC)" ; "projects only")]
#[test_case(&[("additionalQuery", "status = Done")], "status = Done" ; "query only")]
#[test_case(
    &[("projects", "ABC"), ("additionalQuery", "assignee = currentUser()")],
    "project in (ABC) AND assignee = currentUser()" ;
    "projects and query"
)]
#[test_case(
    &[("dateForQuery", "updated")],
    "updated >= 2021-01-01 AND updated <= 2021-01-31" ;
    "date only"
)]
#[test_case(
    &[("dateForQuery", "resolved"), ("additionalQuery", "type = Bug")],
    "resolved >= 2021-01-01 AND resolved <= 2021-01-31 AND type = Bug" ;
    "date and query"
)]
fn test_jql_clauses(pairs: &[(&str, &str)], expected: &str) {
    let config = jira_config(pairs);
    let range = DateRange::new("2021-01-01", "2021-01-31");
    assert_eq!(build_jql(&config, Some(&range)).unwrap(), expected);
}

#[test]
fn test_jql_date_filter_requires_range() {
    let config = jira_config(&[("dateForQuery", "created")]);
    let err = build_jql(&config, None).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(err.is_user_facing());
}

#[test]
fn test_jql_without_date_filter_ignores_range() {
    let config = jira_config(&[("projects", "ABC")]);
    assert_eq!(build_jql(&config, None).unwrap(), "project in (ABC)");
}

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_catalog_prepends_fixed_fields() {
    let fields = catalog_from(&remote_fields());
    let ids: Vec<&str> = fields.ids().collect();
    assert_eq!(
        ids,
        vec![
            "id",
            "url",
            "summary",
            "created",
            "customfield_10016",
            "issuekey",
            "labels"
        ]
    );

    assert_eq!(fields.get("url").unwrap().field_type, FieldType::Url);
    assert_eq!(fields.get("created").unwrap().field_type, FieldType::Datetime);

    let points = fields.get("customfield_10016").unwrap();
    assert_eq!(points.concept, FieldConcept::Metric);
    assert_eq!(points.field_type, FieldType::Number);
    assert_eq!(points.name, "Story Points");
    assert_eq!(points.description.as_deref(), Some("customfield_10016"));

    let key = fields.get("issuekey").unwrap();
    assert_eq!(key.concept, FieldConcept::Dimension);
    assert_eq!(key.field_type, FieldType::Text);
}

#[test]
fn test_catalog_empty_remote() {
    assert_eq!(catalog_from(&[]).len(), 2);
}

// ============================================================================
// Rows
// ============================================================================

#[test_case(json!(null), RowValue::text("") ; "null")]
#[test_case(json!(false), RowValue::text("") ; "false")]
#[test_case(json!(""), RowValue::text("") ; "empty string")]
#[test_case(json!(0), RowValue::text("") ; "zero")]
#[test_case(json!(true), RowValue::Bool(true) ; "true")]
#[test_case(json!(5), RowValue::Integer(5) ; "integer")]
#[test_case(json!(2.5), RowValue::Float(2.5) ; "float")]
#[test_case(json!("Fix it"), RowValue::text("Fix it") ; "string")]
#[test_case(json!({"displayName": "Ada", "name": "ada"}), RowValue::text("Ada") ; "display name")]
#[test_case(json!({"value": "High"}), RowValue::text("High") ; "option value")]
#[test_case(json!({"name": "Done", "id": "3"}), RowValue::text("Done") ; "named object")]
#[test_case(json!({"self": "x"}), RowValue::text("{\"self\":\"x\"}") ; "json fallback")]
#[test_case(json!(["ui", "backend"]), RowValue::text("ui, backend") ; "string array")]
#[test_case(json!([{"name": "v1"}, {"name": "v2"}]), RowValue::text("v1, v2") ; "object array")]
#[test_case(json!([]), RowValue::text("") ; "empty array")]
fn test_render_value(value: serde_json::Value, expected: RowValue) {
    assert_eq!(render_value(Some(&value)), expected);
}

#[test]
fn test_render_missing_value() {
    assert_eq!(render_value(None), RowValue::text(""));
}

#[test_case("2021-01-05T10:20:30.000+0100", "2021010509" ; "jira offset")]
#[test_case("2021-01-05T23:59:59.123-0200", "2021010601" ; "day rollover")]
#[test_case("2020-12-01T09:05:33Z", "2020120109" ; "rfc3339 utc")]
#[test_case("2020-12-01T09:05:33+05:30", "2020120103" ; "rfc3339 offset")]
fn test_format_datetime(raw: &str, expected: &str) {
    assert_eq!(format_datetime(raw).as_deref(), Some(expected));
}

#[test]
fn test_format_datetime_rejects_garbage() {
    assert_eq!(format_datetime("yesterday"), None);
}

#[test]
fn test_issue_row_fixed_fields() {
    let config = jira_config(&[]);
    let row = issue_row(
        &issue(json!({"summary": "Crash on save"})),
        &requested(&["id", "url", "issuekey", "summary"]),
        &config,
    )
    .unwrap();

    assert_eq!(
        row.values,
        vec![
            RowValue::text("10001"),
            RowValue::text("https://example.atlassian.net/browse/ABC-1"),
            RowValue::text("ABC-1"),
            RowValue::text("Crash on save"),
        ]
    );
}

#[test]
fn test_issue_row_datetime_and_metric() {
    let config = jira_config(&[]);
    let fields = requested(&["created", "customfield_10016", "labels"]);

    let row = issue_row(
        &issue(json!({
            "created": "2021-03-05T14:22:00.000+0000",
            "customfield_10016": 3,
            "labels": ["ui", "regression"]
        })),
        &fields,
        &config,
    )
    .unwrap();
    assert_eq!(
        row.values,
        vec![
            RowValue::text("2021030514"),
            RowValue::Integer(3),
            RowValue::text("ui, regression"),
        ]
    );

    let row = issue_row(&issue(json!({"created": null})), &fields, &config).unwrap();
    assert_eq!(
        row.values,
        vec![RowValue::Null, RowValue::text(""), RowValue::text("")]
    );
}

#[test]
fn test_issue_row_unparsable_datetime() {
    let config = jira_config(&[]);
    let err = issue_row(
        &issue(json!({"created": "not a date"})),
        &requested(&["created"]),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingData { ref field, .. } if field == "created"));
}

// ============================================================================
// Connector
// ============================================================================

#[tokio::test]
async fn test_config_and_auth_type() {
    let server = MockServer::start().await;
    let connector = connector_for(&server, 100).await;

    assert_eq!(connector.name(), "jira");
    assert_eq!(connector.auth_type().auth_type, AuthType::UserToken);

    let config = connector.config();
    assert!(config.date_range_required);
    let ids: Vec<&str> = config.config_params.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["host", "projects", "additionalQuery", "dateForQuery"]);
}

#[tokio::test]
async fn test_schema_fetches_field_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/field"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "summary", "key": "summary", "name": "Summary", "schema": {"type": "string"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, 100).await;
    let response = connector
        .schema(&SchemaRequest {
            config_params: params(&[("host", "example.atlassian.net")]),
        })
        .await
        .unwrap();

    let ids: Vec<&str> = response.schema.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["id", "url", "summary"]);
}

#[tokio::test]
async fn test_search_pages_until_past_total() {
    let server = MockServer::start().await;
    let jql = "project in (ABC)";

    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .and(query_param("jql", jql))
        .and(query_param("maxResults", "2"))
        .and(query_param("startAt", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            0,
            2,
            4,
            &["ABC-1", "ABC-2"],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .and(query_param("startAt", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            2,
            2,
            4,
            &["ABC-3", "ABC-4"],
        )))
        .expect(1)
        .mount(&server)
        .await;
    // total is a multiple of the page size: one trailing empty page
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .and(query_param("startAt", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(4, 2, 4, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, 2).await;
    let issues = connector
        .search(&jira_config(&[("projects", "ABC")]), jql)
        .await
        .unwrap();

    let keys: Vec<&str> = issues.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, vec!["ABC-1", "ABC-2", "ABC-3", "ABC-4"]);
}

#[tokio::test]
async fn test_search_stops_on_zero_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(0, 0, 50, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector_for(&server, 100).await;
    let issues = connector.search(&jira_config(&[]), "").await.unwrap();
    assert!(issues.is_empty());
}

#[tokio::test]
async fn test_search_http_error_aborts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/api/3/search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad jql"))
        .mount(&server)
        .await;

    let connector = connector_for(&server, 100).await;
    let err = connector
        .search(&jira_config(&[]), "nonsense =")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 400, .. }));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_data_missing_range_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let connector = connector_for(&server, 100).await;
    let request = DataRequest::new(
        params(&[("host", "example.atlassian.net"), ("dateForQuery", "created")]),
        ["id"],
    );
    let err = connector.data(&request).await.unwrap_err();
    assert!(err.is_user_facing());
}
