//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::connector::{CommunityConnector, DataRequest, SchemaRequest};
use crate::connectors::{self, Credentials};
use crate::error::{Error, Result};
use crate::types::{DateRange, StringMap};
use serde_json::{json, Value};
use std::fs;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::AuthType => self.auth_type(),
            Commands::Config => self.config(),
            Commands::Schema => self.schema().await,
            Commands::Data {
                fields,
                start_date,
                end_date,
            } => {
                let date_range = match (start_date, end_date) {
                    (Some(start), Some(end)) => Some(DateRange::new(start, end)),
                    _ => None,
                };
                self.data(fields, date_range).await
            }
            Commands::List => self.list_connectors(),
        }
    }

    /// Load process settings, or defaults when no file is given
    fn load_settings(&self) -> Result<Settings> {
        match &self.cli.settings {
            Some(path) => Settings::from_file(path),
            None => Ok(Settings::default()),
        }
    }

    /// Load config params
    fn load_config_params(&self) -> Result<StringMap> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return serde_json::from_str(json_str)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        if let Some(path) = &self.cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
            return serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid config JSON: {e}")));
        }

        Ok(StringMap::new())
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            token: self.cli.token.clone(),
            username: self.cli.username.clone(),
            api_token: self.cli.api_token.clone(),
        }
    }

    /// Build the selected connector
    fn connector(&self) -> Result<Box<dyn CommunityConnector>> {
        let name = self
            .cli
            .connector
            .as_deref()
            .ok_or_else(|| Error::config("Connector not specified (use --connector)"))?;
        let settings = self.load_settings()?;
        debug!("Building connector {name} with {settings:?}");
        connectors::build(name, &settings, &self.credentials())
    }

    fn auth_type(&self) -> Result<()> {
        let connector = self.connector()?;
        self.output_message(&json!({
            "type": "AUTH_TYPE",
            "authType": connector.auth_type()
        }));
        Ok(())
    }

    fn config(&self) -> Result<()> {
        let connector = self.connector()?;
        self.output_message(&json!({
            "type": "CONFIG",
            "config": connector.config()
        }));
        Ok(())
    }

    async fn schema(&self) -> Result<()> {
        let connector = self.connector()?;
        let request = SchemaRequest {
            config_params: self.load_config_params()?,
        };
        let response = connector.schema(&request).await?;
        self.output_message(&json!({
            "type": "SCHEMA",
            "schema": response.schema,
            "defaultDimension": response.default_dimension,
            "defaultMetric": response.default_metric
        }));
        Ok(())
    }

    async fn data(&self, fields: &[String], date_range: Option<DateRange>) -> Result<()> {
        let connector = self.connector()?;
        let mut request = DataRequest::new(self.load_config_params()?, fields.iter().cloned());
        if let Some(range) = date_range {
            request = request.date_range(range);
        }

        let response = connector.data(&request).await?;
        self.output_message(&json!({
            "type": "DATA",
            "schema": response.schema,
            "rows": response.rows
        }));
        Ok(())
    }

    fn list_connectors(&self) -> Result<()> {
        let connectors: Vec<Value> = connectors::list()
            .iter()
            .map(|info| {
                json!({
                    "name": info.name,
                    "description": info.description
                })
            })
            .collect();

        self.output_message(&json!({
            "type": "CONNECTORS",
            "connectors": connectors
        }));

        Ok(())
    }

    /// Report a failed command the way the host would show it
    pub fn output_error(&self, error: &Error) {
        let message = match error.user_message() {
            Some(text) => {
                let debug = error.debug_text().filter(|_| self.cli.verbose);
                json!({
                    "type": "USER_ERROR",
                    "message": text,
                    "debug": debug
                })
            }
            None => json!({
                "type": "ERROR",
                "message": error.to_string()
            }),
        };
        self.output_message(&message);
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
