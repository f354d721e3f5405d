//! Advertisement slots (every ad size shares this renderer).

use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use newsdesk_core::{EditField, Section};

use super::{item_rows, with_prefix, Row};
use crate::theme::palette;

pub fn ad_slot(section: &Section) -> Vec<Row> {
    let label = Style::default()
        .fg(palette::AD_LABEL)
        .add_modifier(Modifier::BOLD);
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(
                section.id,
                i,
                item,
                &[EditField::Title, EditField::Image, EditField::Link],
            );
            with_prefix(rows, Span::styled("AD ", label))
        })
        .collect()
}
