//! Jira REST response types

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// One entry of `GET /rest/api/3/field`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraField {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub schema: Option<JiraFieldSchema>,
}

impl JiraField {
    /// Id the field is exposed under; the remote key, or the id when absent
    pub fn field_id(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.id)
    }

    /// Remote schema type (`number`, `datetime`, `string`, ...)
    pub fn schema_type(&self) -> Option<&str> {
        self.schema.as_ref().map(|s| s.field_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraFieldSchema {
    #[serde(rename = "type")]
    pub field_type: String,
}

/// One page of `GET /rest/api/3/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub start_at: u64,
    #[serde(default)]
    pub max_results: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// A Jira issue; `fields` holds whatever the search returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JiraIssue {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: JsonObject,
}

impl JiraIssue {
    pub fn field(&self, id: &str) -> Option<&JsonValue> {
        self.fields.get(id)
    }
}
