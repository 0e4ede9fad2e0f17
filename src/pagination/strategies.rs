//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, PaginationState, Paginator};
use serde_json::Value;

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination with a server-reported total (e.g., Jira search)
///
/// The offset advances by the page size the server reports, not the one
/// requested. Pagination continues while `offset <= total`, so a total
/// that is an exact multiple of the page size costs one trailing empty
/// request.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for page size
    pub limit_param: String,
    /// Requested page size
    pub limit_value: u32,
    /// Response key holding the total
    pub total_key: String,
}

impl OffsetPaginator {
    /// Create a new offset paginator
    pub fn new(
        offset_param: impl Into<String>,
        limit_param: impl Into<String>,
        limit_value: u32,
        total_key: impl Into<String>,
    ) -> Self {
        Self {
            offset_param: offset_param.into(),
            limit_param: limit_param.into(),
            limit_value,
            total_key: total_key.into(),
        }
    }

    /// Jira's `startAt`/`maxResults`/`total` scheme
    pub fn jira(page_size: u32) -> Self {
        Self::new("startAt", "maxResults", page_size, "total")
    }

    fn params(&self, offset: u64) -> Vec<(String, String)> {
        vec![
            (self.limit_param.clone(), self.limit_value.to_string()),
            (self.offset_param.clone(), offset.to_string()),
        ]
    }
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> Vec<(String, String)> {
        self.params(state.offset)
    }

    fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage {
        state.next_page();

        let page_size = body.get(&self.limit_param).and_then(Value::as_u64);
        let total = body.get(&self.total_key).and_then(Value::as_u64);
        state.total = total;

        let (Some(page_size), Some(total)) = (page_size, total) else {
            state.mark_done();
            return NextPage::Done;
        };

        if page_size == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        state.add_offset(page_size);
        if state.offset > total {
            state.mark_done();
            return NextPage::Done;
        }

        NextPage::with_params(self.params(state.offset))
    }
}
