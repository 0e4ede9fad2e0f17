//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run the GitHub and Jira community connectors locally
#[derive(Parser, Debug)]
#[command(name = "community-connectors")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connector to run (github, jira)
    #[arg(short, long, global = true)]
    pub connector: Option<String>,

    /// Config params file (JSON object of strings)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config params JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// Settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// GitHub OAuth2 access token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Jira account name
    #[arg(long, global = true, env = "JIRA_USERNAME")]
    pub username: Option<String>,

    /// Jira API token
    #[arg(long, global = true, env = "JIRA_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the authentication scheme
    AuthType,

    /// Show the config screen inputs
    Config,

    /// Show the field catalog
    Schema,

    /// Fetch rows
    Data {
        /// Field ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        fields: Vec<String>,

        /// Start of the report date range (YYYY-MM-DD)
        #[arg(long, requires = "end_date")]
        start_date: Option<String>,

        /// End of the report date range (YYYY-MM-DD)
        #[arg(long, requires = "start_date")]
        end_date: Option<String>,
    },

    /// List built-in connectors
    List,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
