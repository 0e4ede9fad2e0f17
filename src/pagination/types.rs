//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: Vec<(String, String)>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with query parameters
    pub fn with_params(params: Vec<(String, String)>) -> Self {
        Self::Continue {
            query_params: params,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Relay-style page info returned with every GraphQL connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor of the last node on the page; null when the page is empty
    #[serde(default)]
    pub end_cursor: Option<String>,
    /// Whether the server has more nodes after this page
    pub has_next_page: bool,
}

impl PageInfo {
    pub fn new(end_cursor: Option<&str>, has_next_page: bool) -> Self {
        Self {
            end_cursor: end_cursor.map(String::from),
            has_next_page,
        }
    }
}

/// Hard bound on the number of requests a single fetch may issue
///
/// Reaching the bound silently truncates the result; it is a safety valve
/// against unbounded remote fetches, not a completeness guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit {
    max_pages: usize,
}

impl PageLimit {
    /// Default number of pages per fetch
    pub const DEFAULT_MAX_PAGES: usize = 10;

    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Whether `fetched` pages exhaust the limit
    pub fn reached(&self, fetched: usize) -> bool {
        fetched >= self.max_pages
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_PAGES)
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Number of responses processed
    pub pages: u32,
    /// Current offset (for offset-based pagination)
    pub offset: u64,
    /// Total reported by the server, if any
    pub total: Option<u64>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count a processed response
    pub fn next_page(&mut self) {
        self.pages += 1;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u64) {
        self.offset += amount;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Get query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> Vec<(String, String)>;

    /// Process a response and determine if there's a next page
    fn process_response(&self, body: &Value, state: &mut PaginationState) -> NextPage;
}
