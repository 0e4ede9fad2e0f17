//! Jira field catalog, derived from the site's field list

use super::types::JiraField;
use crate::schema::{Field, FieldType, Fields};

/// Build the catalog: `id` and `url` first, then every remote field
pub fn catalog_from(remote: &[JiraField]) -> Fields {
    let mut fields = Fields::new()
        .with(Field::dimension("id", "ID").field_type(FieldType::Text))
        .with(Field::dimension("url", "Url").field_type(FieldType::Url));

    for field in remote {
        let declared = match field.schema_type() {
            Some("number") => Field::metric(field.field_id(), &field.name)
                .field_type(FieldType::Number),
            Some("datetime") => Field::dimension(field.field_id(), &field.name)
                .field_type(FieldType::Datetime),
            _ => Field::dimension(field.field_id(), &field.name).field_type(FieldType::Text),
        };
        fields.push(declared.description(&field.id));
    }

    fields
}
