//! Card-based renderers. These honor the size and orientation hints.

use ratatui::text::Span;

use newsdesk_core::{CardSize, ContentItem, EditField, Orientation, Section};

use super::{item_rows, with_prefix, Row};
use crate::theme::styles;

/// Fields a card shows, in draw order.
///
/// Bigger cards show more. Vertical cards put the image above the title,
/// horizontal ones beside (here: right after) it.
pub fn card_fields(item: &ContentItem) -> Vec<EditField> {
    use EditField::*;
    let mut fields = match item.size() {
        Some(CardSize::Small) => vec![Title, Category],
        Some(CardSize::Medium) | None => vec![Title, Image, Category, Date],
        Some(CardSize::Large) => vec![Title, Image, Summary, Category, Date, ReadTime],
        Some(CardSize::ExtraLarge) => {
            vec![Title, Image, Summary, Category, Date, ReadTime, Link]
        }
    };
    let vertical = item.orientation().unwrap_or_default() == Orientation::Vertical;
    if vertical && item.image_url.is_some() {
        if let Some(pos) = fields.iter().position(|f| *f == Image) {
            fields.remove(pos);
            fields.insert(0, Image);
        }
    }
    fields
}

fn size_badge(item: &ContentItem) -> &'static str {
    match item.size() {
        Some(CardSize::Small) => "S",
        Some(CardSize::Medium) | None => "M",
        Some(CardSize::Large) => "L",
        Some(CardSize::ExtraLarge) => "XL",
    }
}

pub fn featured(section: &Section) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let rows = item_rows(section.id, i, item, &card_fields(item));
            with_prefix(
                rows,
                Span::styled(format!("[{}] ", size_badge(item)), styles::text_muted()),
            )
        })
        .collect()
}

/// Tiles: a bar whose width follows the card size.
pub fn mosaic(section: &Section) -> Vec<Row> {
    section
        .items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| {
            let bar = match item.size() {
                Some(CardSize::Small) => "▌ ",
                Some(CardSize::Medium) | None => "▌▌ ",
                Some(CardSize::Large) => "▌▌▌ ",
                Some(CardSize::ExtraLarge) => "▌▌▌▌ ",
            };
            let rows = item_rows(section.id, i, item, &card_fields(item));
            with_prefix(rows, Span::styled(bar, styles::accent()))
        })
        .collect()
}

/// The main column feed; a blank line separates stories.
pub fn main_feed(section: &Section) -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, item) in section.items.iter().enumerate() {
        if i > 0 {
            rows.push(Row::plain(Vec::new()));
        }
        rows.extend(item_rows(section.id, i, item, &card_fields(item)));
    }
    rows
}
