//! Plain list renderers.

use newsdesk_core::{EditField, Section};

use super::{item_rows, Row};

fn list(section: &Section, fields: &[EditField]) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| item_rows(section.id, i, item, fields))
        .collect()
}

pub fn sidebar(section: &Section) -> Vec<Row> {
    list(section, &[EditField::Title, EditField::Date])
}

pub fn headlines(section: &Section) -> Vec<Row> {
    list(
        section,
        &[EditField::Title, EditField::Summary, EditField::Date],
    )
}

/// Custom blocks show whatever the item carries.
pub fn custom(section: &Section) -> Vec<Row> {
    list(
        section,
        &[
            EditField::Title,
            EditField::Summary,
            EditField::Image,
            EditField::Category,
            EditField::Date,
            EditField::ReadTime,
            EditField::Duration,
            EditField::Link,
        ],
    )
}
