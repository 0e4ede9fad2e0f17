//! CLI module
//!
//! Local stand-in for the host platform: invokes a connector's entry
//! points and prints the responses as JSON messages.
//!
//! # Commands
//!
//! - `auth-type` - Authentication scheme
//! - `config` - Config screen inputs
//! - `schema` - Field catalog
//! - `data` - Rows for the requested fields
//! - `list` - Built-in connectors

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
