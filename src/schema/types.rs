//! Schema types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Semantic type of a field as understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Boolean,
    Url,
    /// Hour-resolution timestamp, rendered as `yyyyMMddHH`
    #[serde(rename = "YEAR_MONTH_DAY_HOUR")]
    Datetime,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Text => write!(f, "TEXT"),
            FieldType::Number => write!(f, "NUMBER"),
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Url => write!(f, "URL"),
            FieldType::Datetime => write!(f, "YEAR_MONTH_DAY_HOUR"),
        }
    }
}

/// Whether a field is a dimension or a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldConcept {
    Dimension,
    Metric,
}

/// A single field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub concept: FieldConcept,
}

impl Field {
    /// Create a dimension field
    pub fn dimension(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldConcept::Dimension)
    }

    /// Create a metric field
    pub fn metric(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, FieldConcept::Metric)
    }

    fn new(id: impl Into<String>, name: impl Into<String>, concept: FieldConcept) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            group: None,
            field_type: FieldType::default(),
            concept,
        }
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the group
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the field type
    #[must_use]
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Check if this is a metric
    pub fn is_metric(&self) -> bool {
        self.concept == FieldConcept::Metric
    }
}

/// Ordered field catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_metric: Option<String>,
}

impl Fields {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Append a field (builder style)
    #[must_use]
    pub fn with(mut self, field: Field) -> Self {
        self.push(field);
        self
    }

    /// Set the default dimension
    pub fn set_default_dimension(&mut self, id: impl Into<String>) {
        self.default_dimension = Some(id.into());
    }

    /// Set the default metric
    pub fn set_default_metric(&mut self, id: impl Into<String>) {
        self.default_metric = Some(id.into());
    }

    pub fn default_dimension(&self) -> Option<&str> {
        self.default_dimension.as_deref()
    }

    pub fn default_metric(&self) -> Option<&str> {
        self.default_metric.as_deref()
    }

    /// Look up a field by id
    pub fn get(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// All fields in declaration order
    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    /// All field ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolve requested ids against this catalog, keeping request order
    ///
    /// An id the catalog does not declare is an unsupported field.
    pub fn for_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<Fields> {
        let fields = ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id)
                    .cloned()
                    .ok_or_else(|| Error::unsupported_field(id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Fields {
            fields,
            default_dimension: None,
            default_metric: None,
        })
    }

    /// Consume the catalog into its fields
    pub fn into_vec(self) -> Vec<Field> {
        self.fields
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
            default_dimension: None,
            default_metric: None,
        }
    }
}
