//! Connector trait and host contract types
//!
//! Defines the entry points the host platform invokes on a community
//! connector, and the request/response shapes exchanged with it. Field
//! names follow the host's JSON (`configParams`, `dateRange`, ...).

use crate::auth::AuthType;
use crate::error::Result;
use crate::schema::{Field, Fields};
use crate::types::{DateRange, Row, StringMap};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Type
// ============================================================================

/// Response of `getAuthType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTypeResponse {
    #[serde(rename = "type")]
    pub auth_type: AuthType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
}

impl AuthTypeResponse {
    pub fn new(auth_type: AuthType) -> Self {
        Self {
            auth_type,
            help_url: None,
        }
    }

    #[must_use]
    pub fn help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }
}

// ============================================================================
// Config Screen
// ============================================================================

/// Kind of config input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "type")]
pub enum ConfigInputKind {
    TextInput,
    TextArea,
    SelectSingle { options: Vec<SelectOption> },
}

/// One option of a select input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single input on the config screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInput {
    #[serde(flatten)]
    pub kind: ConfigInputKind,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub allow_override: bool,
}

impl ConfigInput {
    fn new(kind: ConfigInputKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            help_text: None,
            placeholder: None,
            allow_override: false,
        }
    }

    /// Create a single-line text input
    pub fn text(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ConfigInputKind::TextInput, id, name)
    }

    /// Create a multi-line text input
    pub fn text_area(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ConfigInputKind::TextArea, id, name)
    }

    /// Create a single-choice select
    pub fn select(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(ConfigInputKind::SelectSingle { options }, id, name)
    }

    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    #[must_use]
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.allow_override = allow;
        self
    }
}

/// Response of `getConfig`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub config_params: Vec<ConfigInput>,
    #[serde(default)]
    pub date_range_required: bool,
}

impl ConfigResponse {
    /// Look up an input by id
    pub fn input(&self, id: &str) -> Option<&ConfigInput> {
        self.config_params.iter().find(|c| c.id == id)
    }
}

// ============================================================================
// Schema / Data Requests
// ============================================================================

/// Request passed to `getSchema`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaRequest {
    #[serde(default)]
    pub config_params: StringMap,
}

/// Response of `getSchema`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaResponse {
    pub schema: Vec<Field>,
    /// Field the report builder starts with as its dimension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_dimension: Option<String>,
    /// Field the report builder starts with as its metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_metric: Option<String>,
}

impl From<Fields> for SchemaResponse {
    fn from(fields: Fields) -> Self {
        Self {
            default_dimension: fields.default_dimension().map(str::to_string),
            default_metric: fields.default_metric().map(str::to_string),
            schema: fields.into_vec(),
        }
    }
}

/// A requested field reference in a data request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRequest {
    pub name: String,
}

/// Request passed to `getData`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    #[serde(default)]
    pub config_params: StringMap,
    pub fields: Vec<FieldRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl DataRequest {
    /// Create a request for the given field ids
    pub fn new<S: Into<String>>(
        config_params: StringMap,
        field_ids: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            config_params,
            fields: field_ids
                .into_iter()
                .map(|name| FieldRequest { name: name.into() })
                .collect(),
            date_range: None,
        }
    }

    /// Set the date range
    #[must_use]
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Requested field ids in request order
    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Response of `getData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub schema: Vec<Field>,
    pub rows: Vec<Row>,
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Entry points the host invokes on a community connector
///
/// Each call is independent; implementations hold no per-request state.
#[async_trait]
pub trait CommunityConnector: Send + Sync {
    /// Short connector name (e.g. "github")
    fn name(&self) -> &str;

    /// Authentication scheme the host must run before other calls
    fn auth_type(&self) -> AuthTypeResponse;

    /// Inputs shown on the config screen
    fn config(&self) -> ConfigResponse;

    /// Whether the current user gets debug output from the host
    fn is_admin_user(&self) -> bool {
        false
    }

    /// Field catalog for the given config
    async fn schema(&self, request: &SchemaRequest) -> Result<SchemaResponse>;

    /// Rows for the requested fields
    async fn data(&self, request: &DataRequest) -> Result<DataResponse>;
}
