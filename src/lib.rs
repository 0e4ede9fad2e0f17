// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Community Connectors
//!
//! GitHub and Jira data-source connectors for a BI reporting platform.
//! The host calls four entry points on a connector (auth type, config,
//! schema, data); the connector answers with field declarations and rows.
//!
//! ## Features
//!
//! - **GitHub**: issues, pull requests and stargazers through one GraphQL
//!   query, paged by cursor and capped at a fixed number of requests
//! - **Jira**: site fields as the catalog, issues through a JQL search
//!   paged by offset
//! - **Typed host contract**: serde request/response types mirroring the
//!   host's JSON
//! - **User-facing errors**: configuration and field problems carry the
//!   message the report author sees
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use community_connectors::connectors::{self, Credentials};
//! use community_connectors::{DataRequest, Settings};
//!
//! #[tokio::main]
//! async fn main() -> community_connectors::Result<()> {
//!     let credentials = Credentials {
//!         token: Some("gho_...".to_string()),
//!         ..Credentials::default()
//!     };
//!     let connector = connectors::build("github", &Settings::default(), &credentials)?;
//!
//!     let params = [("organization", "googledatastudio"), ("repository", "community-connectors")]
//!         .into_iter()
//!         .map(|(k, v)| (k.to_string(), v.to_string()))
//!         .collect();
//!     let response = connector
//!         .data(&DataRequest::new(params, ["number", "title", "open"]))
//!         .await?;
//!
//!     for row in response.rows {
//!         println!("{:?}", row.values);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    CommunityConnector trait                     │
//! │  auth_type()   config()   schema(request)   data(request)       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!          ┌─────────────────────┴─────────────────────┐
//!          │ GitHub                                    │ Jira
//! ┌────────┴────────┬──────────────┐      ┌───────────┴──┬──────────────┐
//! │ Field catalog   │ GraphQL pager│      │ Field catalog│ JQL + offset │
//! │ Query variables │ Row mapper   │      │ (remote)     │ pager, rows  │
//! └─────────────────┴──────────────┘      └──────────────┴──────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Schema   │
//! ├──────────┼───────────┼───────────────┼───────────┤
//! │ Basic    │ GET/POST  │ Offset        │ Fields    │
//! │ Bearer   │ Timeout   │ Page caps     │ Types     │
//! └──────────┴───────────┴───────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Field declarations
pub mod schema;

/// Settings and config params
pub mod config;

/// Connector trait and host contract types
pub mod connector;

/// GitHub and Jira connectors
pub mod connectors;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{GithubConfig, JiraConfig, Settings};
pub use connector::{
    CommunityConnector, DataRequest, DataResponse, SchemaRequest, SchemaResponse,
};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
