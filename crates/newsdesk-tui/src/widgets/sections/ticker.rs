//! Breaking ticker and trending list.

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use newsdesk_core::{EditField, Section};

use super::{item_rows, with_prefix, Row};
use crate::theme::{palette, styles};

pub fn breaking(section: &Section) -> Vec<Row> {
    let bullet = Style::default()
        .fg(palette::BREAKING)
        .add_modifier(Modifier::BOLD);
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(section.id, i, item, &[EditField::Title, EditField::Link]);
            with_prefix(rows, Span::styled("● ", bullet))
        })
        .collect()
}

/// Numbered, most-read first as the server orders them.
pub fn trending(section: &Section) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(section.id, i, item, &[EditField::Title, EditField::Category]);
            with_prefix(rows, Span::styled(format!("{:>2} ", i + 1), styles::accent_bold()))
        })
        .collect()
}
