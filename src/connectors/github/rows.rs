//! GitHub row mapping
//!
//! Each field id maps to an extraction function through a lookup table.
//! An id without an entry fails when the first row reaches it.

use super::types::{IssueNode, RepositoryPage, StarNode};
use crate::error::{Error, Result};
use crate::schema::Fields;
use crate::types::{Row, RowValue};

type Extractor<T> = fn(&T) -> Result<RowValue>;

const ISSUE_COLUMNS: &[(&str, Extractor<IssueNode>)] = &[
    ("number", issue_number),
    ("title", issue_title),
    ("open", issue_open),
    ("url", issue_url),
    ("reporter", issue_reporter),
    ("label", issue_labels),
    ("milestone", issue_milestone),
    ("locked", issue_locked),
    ("num_comments", issue_comments),
    ("is_pull_request", issue_is_pull_request),
    ("created_at", issue_created_at),
    ("closed_at", issue_closed_at),
];

const STAR_COLUMNS: &[(&str, Extractor<StarNode>)] =
    &[("stars", star_count), ("starred_at", star_starred_at)];

fn lookup<T>(table: &[(&str, Extractor<T>)], id: &str) -> Option<Extractor<T>> {
    table
        .iter()
        .find(|(column, _)| *column == id)
        .map(|(_, extract)| *extract)
}

/// Whether a field id has an extraction rule
pub fn is_mapped(id: &str) -> bool {
    lookup(ISSUE_COLUMNS, id).is_some() || lookup(STAR_COLUMNS, id).is_some()
}

/// Field ids in `fields` that have no extraction rule
pub fn unmapped_fields(fields: &Fields) -> Vec<String> {
    fields
        .ids()
        .filter(|id| !is_mapped(id))
        .map(String::from)
        .collect()
}

/// Turn fetched pages into rows for the requested fields
pub fn to_rows(pages: &[RepositoryPage], fields: &Fields) -> Result<Vec<Row>> {
    let Some(first) = pages.first() else {
        return Ok(Vec::new());
    };

    if first.stargazers.is_some() {
        return pages
            .iter()
            .filter_map(|page| page.stargazers.as_ref())
            .flat_map(|stars| stars.nodes.iter())
            .map(|star| map_row(STAR_COLUMNS, star, fields))
            .collect();
    }

    if first.issues.is_some() || first.pull_requests.is_some() {
        return pages
            .iter()
            .flat_map(|page| {
                page.issues
                    .iter()
                    .chain(page.pull_requests.iter())
                    .flat_map(|connection| connection.nodes.iter())
            })
            .map(|issue| map_row(ISSUE_COLUMNS, issue, fields))
            .collect();
    }

    Ok(Vec::new())
}

/// Build one issue row
pub fn issue_row(issue: &IssueNode, fields: &Fields) -> Result<Row> {
    map_row(ISSUE_COLUMNS, issue, fields)
}

/// Build one stargazer row
pub fn star_row(star: &StarNode, fields: &Fields) -> Result<Row> {
    map_row(STAR_COLUMNS, star, fields)
}

fn map_row<T>(table: &[(&str, Extractor<T>)], node: &T, fields: &Fields) -> Result<Row> {
    let values = fields
        .ids()
        .map(|id| {
            let extract = lookup(table, id).ok_or_else(|| Error::unsupported_field(id))?;
            extract(node)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Row::new(values))
}

/// Concatenate the year, month, day and hour characters of an ISO-8601
/// timestamp: `2021-03-05T14:22:00Z` becomes `2021030514`
///
/// No parsing and no timezone conversion. Positions count characters, not
/// bytes. Short input yields a short result.
pub fn format_date(date: &str) -> String {
    [(0, 4), (5, 7), (8, 10), (11, 13)]
        .iter()
        .flat_map(|&(start, end)| date.chars().skip(start).take(end - start))
        .collect()
}

fn required<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T> {
    value.ok_or_else(|| Error::missing_data(field, "not present in response"))
}

// ============================================================================
// Issue columns
// ============================================================================

fn issue_number(issue: &IssueNode) -> Result<RowValue> {
    let number = required(issue.number.as_ref(), "number")?;
    Ok(RowValue::Text(number.to_string()))
}

fn issue_title(issue: &IssueNode) -> Result<RowValue> {
    Ok(required(issue.title.as_ref(), "title")?.as_str().into())
}

fn issue_open(issue: &IssueNode) -> Result<RowValue> {
    Ok(RowValue::Bool(!*required(issue.closed.as_ref(), "open")?))
}

fn issue_url(issue: &IssueNode) -> Result<RowValue> {
    Ok(required(issue.url.as_ref(), "url")?.as_str().into())
}

fn issue_reporter(issue: &IssueNode) -> Result<RowValue> {
    let author = required(issue.author.as_ref(), "reporter")?;
    Ok(author.login.as_str().into())
}

fn issue_labels(issue: &IssueNode) -> Result<RowValue> {
    let labels = required(issue.labels.as_ref(), "label")?;
    let names: Vec<&str> = labels.nodes.iter().map(|l| l.name.as_str()).collect();
    Ok(RowValue::Text(names.join(", ")))
}

fn issue_milestone(issue: &IssueNode) -> Result<RowValue> {
    Ok(issue.milestone.as_ref().map(|m| m.title.as_str()).into())
}

fn issue_locked(issue: &IssueNode) -> Result<RowValue> {
    Ok(RowValue::Bool(*required(issue.locked.as_ref(), "locked")?))
}

fn issue_comments(issue: &IssueNode) -> Result<RowValue> {
    let comments = required(issue.comments.as_ref(), "num_comments")?;
    Ok(RowValue::Integer(comments.total_count))
}

fn issue_is_pull_request(issue: &IssueNode) -> Result<RowValue> {
    Ok(RowValue::Bool(issue.is_pull_request))
}

fn issue_created_at(issue: &IssueNode) -> Result<RowValue> {
    let created_at = required(issue.created_at.as_ref(), "created_at")?;
    Ok(RowValue::Text(format_date(created_at)))
}

fn issue_closed_at(issue: &IssueNode) -> Result<RowValue> {
    Ok(issue.closed_at.as_deref().map(format_date).into())
}

// ============================================================================
// Stargazer columns
// ============================================================================

fn star_count(_star: &StarNode) -> Result<RowValue> {
    Ok(RowValue::Integer(1))
}

fn star_starred_at(star: &StarNode) -> Result<RowValue> {
    let created_at = required(star.created_at.as_ref(), "starred_at")?;
    Ok(RowValue::Text(format_date(created_at)))
}
