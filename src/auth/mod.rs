//! Authentication module
//!
//! Supports: Basic (Jira username + API token), Bearer (GitHub OAuth2 access token)
//!
//! Credentials are handed to the connector when it is constructed. The
//! host owns the OAuth2 flow; this crate only applies the resulting token.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, AuthType};
