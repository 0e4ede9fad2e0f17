//! Pagination module
//!
//! Supports: Offset (`startAt`/`maxResults`/`total`) and the shared pieces
//! of GraphQL cursor pagination (page info, page caps)
//!
//! # Overview
//!
//! REST pagination is driven by a [`Paginator`] that turns each response
//! into the parameters for the next request. GraphQL cursor pagination is
//! connector-specific and lives with the GitHub connector; it reuses
//! [`PageInfo`] and [`PageLimit`] from here.

mod strategies;
mod types;

pub use strategies::OffsetPaginator;
pub use types::{NextPage, PageInfo, PageLimit, PaginationState, Paginator};
