//! GitHub field catalog

use super::query::{ISSUES, STARGAZERS};
use crate::schema::{Field, FieldType, Fields};

/// The fixed GitHub field catalog
pub fn catalog() -> Fields {
    let mut fields = Fields::new()
        // Issues
        .with(
            Field::dimension("number", "Number")
                .description("The issue number.")
                .group(ISSUES)
                .field_type(FieldType::Text),
        )
        .with(
            Field::dimension("title", "Title")
                .description("The title of the issue.")
                .group(ISSUES)
                .field_type(FieldType::Text),
        )
        .with(
            Field::dimension("open", "Is Open")
                .description("True if the issue is open, false otherwise.")
                .group(ISSUES)
                .field_type(FieldType::Boolean),
        )
        .with(
            Field::dimension("url", "Issue URL")
                .description("The URL of the issue.")
                .group(ISSUES)
                .field_type(FieldType::Url),
        )
        .with(
            Field::dimension("reporter", "Reporter")
                .description("Issue reporter username.")
                .group(ISSUES)
                .field_type(FieldType::Text),
        )
        .with(
            Field::dimension("label", "Label")
                .description("Issue has this label.")
                .group(ISSUES)
                .field_type(FieldType::Text),
        )
        .with(
            Field::dimension("milestone", "Milestone")
                .description("Issue added to this milestone.")
                .group(ISSUES)
                .field_type(FieldType::Text),
        )
        .with(
            Field::dimension("locked", "Is Locked")
                .description("True if the issue is locked, false otherwise.")
                .group(ISSUES)
                .field_type(FieldType::Boolean),
        )
        .with(
            Field::metric("num_comments", "Number of Comments")
                .description("Number of comments on the issue.")
                .group(ISSUES)
                .field_type(FieldType::Number),
        )
        .with(
            Field::dimension("is_pull_request", "Is Pull Request")
                .description("True if this issue is a Pull Request, false otherwise.")
                .group(ISSUES)
                .field_type(FieldType::Boolean),
        )
        .with(
            Field::dimension("created_at", "Creation Time")
                .description("The time this issue was created.")
                .group(ISSUES)
                .field_type(FieldType::Datetime),
        )
        .with(
            Field::dimension("closed_at", "Close Time")
                .description("The time this issue was closed.")
                .group(ISSUES)
                .field_type(FieldType::Datetime),
        )
        // Stars
        .with(
            Field::dimension("starred_at", "Starred Date")
                .description("The date the star was given.")
                .group(STARGAZERS)
                .field_type(FieldType::Datetime),
        )
        .with(
            Field::metric("stars", "Stars")
                .description("The number of stars")
                .group(STARGAZERS)
                .field_type(FieldType::Number),
        );

    fields.set_default_dimension("number");
    fields.set_default_metric("num_comments");
    fields
}
