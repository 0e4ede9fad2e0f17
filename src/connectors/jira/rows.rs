//! Jira row mapping
//!
//! `id`, `url` and `issuekey` come from the issue itself. Every other field
//! is looked up in the issue's `fields` object and flattened to a single
//! cell value.

use super::types::JiraIssue;
use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::schema::{Field, FieldType, Fields};
use crate::types::{JsonValue, Row, RowValue};
use chrono::{DateTime, FixedOffset, Utc};

/// Jira's timestamp format, e.g. `2021-01-05T10:20:30.000+0100`
const JIRA_DATETIME: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Output format for hour-resolution timestamps
const HOUR_FORMAT: &str = "%Y%m%d%H";

/// Turn search results into rows for the requested fields
pub fn to_rows(issues: &[JiraIssue], fields: &Fields, config: &JiraConfig) -> Result<Vec<Row>> {
    issues
        .iter()
        .map(|issue| issue_row(issue, fields, config))
        .collect()
}

/// Build one issue row
pub fn issue_row(issue: &JiraIssue, fields: &Fields, config: &JiraConfig) -> Result<Row> {
    let values = fields
        .as_slice()
        .iter()
        .map(|field| cell(issue, field, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(Row::new(values))
}

fn cell(issue: &JiraIssue, field: &Field, config: &JiraConfig) -> Result<RowValue> {
    match field.id.as_str() {
        "id" => Ok(RowValue::text(&issue.id)),
        "url" => Ok(RowValue::Text(config.browse_url(&issue.key))),
        "issuekey" => Ok(RowValue::text(&issue.key)),
        id if field.field_type == FieldType::Datetime => match issue.field(id) {
            None | Some(JsonValue::Null) => Ok(RowValue::Null),
            Some(JsonValue::String(raw)) => format_datetime(raw)
                .map(RowValue::Text)
                .ok_or_else(|| Error::missing_data(id, format!("unparsable datetime '{raw}'"))),
            Some(other) => Err(Error::missing_data(
                id,
                format!("expected a datetime string, got {other}"),
            )),
        },
        id => Ok(render_value(issue.field(id))),
    }
}

/// Flatten a Jira field value into a cell
///
/// Missing and falsy values become an empty string, objects their display
/// name, value or name, and arrays the rendering of each element joined
/// with `, `.
pub fn render_value(value: Option<&JsonValue>) -> RowValue {
    match value {
        None | Some(JsonValue::Null | JsonValue::Bool(false)) => RowValue::text(""),
        Some(JsonValue::Bool(true)) => RowValue::Bool(true),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                if i == 0 {
                    RowValue::text("")
                } else {
                    RowValue::Integer(i)
                }
            } else {
                match n.as_f64() {
                    Some(f) if f != 0.0 => RowValue::Float(f),
                    _ => RowValue::text(""),
                }
            }
        }
        Some(other) => RowValue::Text(display_text(other)),
    }
}

fn display_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => String::new(),
        JsonValue::Bool(true) => "true".to_string(),
        JsonValue::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(display_text)
            .collect::<Vec<_>>()
            .join(", "),
        JsonValue::Object(map) => ["displayName", "value", "name"]
            .iter()
            .find_map(|key| {
                map.get(*key)
                    .and_then(JsonValue::as_str)
                    .filter(|s| !s.is_empty())
            })
            .map_or_else(|| value.to_string(), String::from),
    }
}

/// Parse a Jira or RFC 3339 timestamp and render it as UTC `yyyyMMddHH`
pub fn format_datetime(raw: &str) -> Option<String> {
    DateTime::<FixedOffset>::parse_from_str(raw, JIRA_DATETIME)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc).format(HOUR_FORMAT).to_string())
}
