//! JQL assembly

use crate::config::JiraConfig;
use crate::error::{Error, Result};
use crate::types::DateRange;

/// Build the search JQL for a request
///
/// Clauses, in order, each only when configured: the date range on the
/// configured date field, the project list, and the additional query.
/// Non-empty clauses are joined with `AND`.
pub fn build_jql(config: &JiraConfig, date_range: Option<&DateRange>) -> Result<String> {
    let mut clauses = Vec::new();

    if let Some(date_field) = &config.date_for_query {
        let range = date_range.ok_or_else(|| {
            Error::config(format!(
                "A date range is required to filter on \"{date_field}\"."
            ))
        })?;
        clauses.push(format!(
            "{date_field} >= {} AND {date_field} <= {}",
            range.start_date, range.end_date
        ));
    }

    if let Some(projects) = &config.projects {
        clauses.push(format!("project in ({projects})"));
    }

    if let Some(query) = &config.additional_query {
        clauses.push(query.clone());
    }

    Ok(clauses.join(" AND "))
}
