//! Section renderers.
//!
//! Every section type is drawn by the renderer [`widget_for`] picks for it.
//! A renderer turns a section into [`Row`]s; [`SectionView`] lays the rows
//! out inside the section's block, decorates editable nodes while edit
//! mode is on and reports where each node landed so the view can mount it
//! into the binding registry. Sections without a renderer draw nothing.

mod ad_slot;
mod cards;
mod lists;
mod media;
mod ticker;

pub use media::progress_bar;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{StatefulWidget, Widget};

use newsdesk_app::audio::NowPlaying;
use newsdesk_app::bindings::BindingRegistry;
use newsdesk_core::{
    format_duration, widget_for, ContentItem, EditField, EditTarget, Section, SectionId,
    WidgetKind,
};

use crate::theme::styles;

/// Where each editable node was drawn this frame
pub type Mounts = Vec<(EditTarget, Rect)>;

/// One line of a section
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub spans: Vec<Span<'static>>,
    pub target: Option<EditTarget>,
    /// Set on the first row of an item; drives the selection marker
    pub item: Option<usize>,
    pub indent: bool,
}

impl Row {
    pub fn plain(spans: Vec<Span<'static>>) -> Self {
        Self {
            spans,
            target: None,
            item: None,
            indent: false,
        }
    }

    fn muted(text: impl Into<String>) -> Self {
        Self::plain(vec![Span::styled(text.into(), styles::text_muted())])
    }

    pub fn with_target(mut self, target: EditTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn indented(mut self) -> Self {
        self.indent = true;
        self
    }
}

/// Per-frame facts a renderer needs besides the section itself
#[derive(Clone, Copy, Default)]
pub struct SectionContext<'a> {
    /// Present while edit mode is on
    pub bindings: Option<&'a BindingRegistry>,
    /// Selected item index, when this section holds the cursor
    pub selected_item: Option<usize>,
    pub section_selected: bool,
    pub playing: Option<&'a NowPlaying>,
}

impl SectionContext<'_> {
    fn is_editable(&self, target: &EditTarget) -> bool {
        self.bindings.is_some_and(|b| b.is_bound(target))
    }

    fn is_focused(&self, target: &EditTarget) -> bool {
        self.bindings.is_some_and(|b| b.is_focused(target))
    }
}

/// Text for one field of `item`, or `None` when the item does not carry it.
pub fn field_spans(item: &ContentItem, field: EditField) -> Option<Vec<Span<'static>>> {
    let spans = match field {
        EditField::Title => vec![Span::styled(item.title.clone(), styles::title())],
        EditField::Summary => vec![Span::styled(
            item.summary.as_deref()?.lines().next().unwrap_or_default().to_string(),
            styles::text_secondary(),
        )],
        EditField::Image => {
            let url = item.image_url.as_deref()?;
            let label = item.image_alt.as_deref().filter(|a| !a.is_empty()).unwrap_or(url);
            vec![Span::styled(format!("[image] {label}"), styles::text_muted())]
        }
        EditField::Category => vec![Span::styled(
            format!("#{}", item.category.as_deref().unwrap_or("-")),
            styles::category_tag(),
        )],
        EditField::Date => vec![Span::styled(item.date.clone()?, styles::text_muted())],
        EditField::ReadTime => vec![Span::styled(
            format!("{} read", item.read_time.as_deref()?),
            styles::text_muted(),
        )],
        EditField::Duration => {
            let text = match item.duration {
                Some(d) => format_duration(d),
                None if item.audio_url.is_some() => "--:--".to_string(),
                None => return None,
            };
            vec![Span::styled(format!("♪ {text}"), styles::text_muted())]
        }
        EditField::Link => vec![Span::styled(
            format!("→ {}", item.link_url.as_deref()?),
            styles::accent(),
        )],
    };
    Some(spans)
}

/// Rows for `fields` of one item. The first shown field carries the item
/// marker; the rest are indented under it.
pub fn item_rows(
    section_id: SectionId,
    index: usize,
    item: &ContentItem,
    fields: &[EditField],
) -> Vec<Row> {
    let mut rows = Vec::new();
    for field in fields {
        let Some(spans) = field_spans(item, *field) else {
            continue;
        };
        let mut row =
            Row::plain(spans).with_target(EditTarget::item(section_id, item.id, *field));
        if rows.is_empty() {
            row.item = Some(index);
        } else {
            row = row.indented();
        }
        rows.push(row);
    }
    rows
}

/// Prepend `prefix` to the first span of the item's first row.
pub fn with_prefix(mut rows: Vec<Row>, prefix: Span<'static>) -> Vec<Row> {
    if let Some(first) = rows.first_mut() {
        first.spans.insert(0, prefix);
    }
    rows
}

fn section_title_row(section: &Section) -> Row {
    let mut style = styles::accent_bold();
    if let Some(color) = hex_color(section.style.text_color.as_deref()) {
        style = style.fg(color);
    }
    Row::plain(vec![Span::styled(section.display_title(), style)])
        .with_target(EditTarget::section_title(section.id))
}

/// `#rrggbb` to a terminal color.
pub fn hex_color(value: Option<&str>) -> Option<Color> {
    value
        .filter(|v| newsdesk_core::is_hex_color(v))
        .and_then(|v| v.parse::<Color>().ok())
}

/// Rows for `section` as drawn by `kind`.
pub fn section_rows(kind: WidgetKind, section: &Section, ctx: &SectionContext) -> Vec<Row> {
    let mut rows = vec![section_title_row(section)];
    if section.items.is_empty() {
        rows.push(Row::muted("Nothing here yet"));
        return rows;
    }
    let body = match kind {
        WidgetKind::BreakingTicker => ticker::breaking(section),
        WidgetKind::TrendingList => ticker::trending(section),
        WidgetKind::FeaturedGrid => cards::featured(section),
        WidgetKind::Mosaic => cards::mosaic(section),
        WidgetKind::MainFeed => cards::main_feed(section),
        WidgetKind::AdSlot => ad_slot::ad_slot(section),
        WidgetKind::SidebarList => lists::sidebar(section),
        WidgetKind::HeadlineList => lists::headlines(section),
        WidgetKind::CustomBlock => lists::custom(section),
        WidgetKind::AudioList => media::audio(section, ctx.playing),
        WidgetKind::VideoStrip => media::video(section),
        WidgetKind::ShortsStrip => media::shorts(section),
    };
    rows.extend(body);
    rows
}

/// A section in its block, or nothing for types without a renderer
pub struct SectionView<'a> {
    section: &'a Section,
    kind: WidgetKind,
    rows: Vec<Row>,
    ctx: SectionContext<'a>,
}

impl<'a> SectionView<'a> {
    pub fn new(section: &'a Section, ctx: SectionContext<'a>) -> Option<Self> {
        let kind = widget_for(&section.section_type)?;
        let rows = section_rows(kind, section, &ctx);
        Some(Self {
            section,
            kind,
            rows,
            ctx,
        })
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Rows plus borders
    pub fn height(&self) -> u16 {
        (self.rows.len() as u16).saturating_add(2)
    }
}

fn decorate(ctx: &SectionContext, row: Row) -> Line<'static> {
    let editable = row.target.filter(|t| ctx.is_editable(t));
    let focused = editable.is_some_and(|t| ctx.is_focused(&t));
    let selected = row.item.is_some() && row.item == ctx.selected_item;

    let marker = if editable.is_some() {
        Span::styled("✎ ", styles::edit_marker())
    } else if selected {
        Span::styled("▸ ", styles::selected())
    } else {
        Span::raw("  ")
    };
    let mut spans = vec![marker];
    if row.indent {
        spans.push(Span::raw("  "));
    }
    spans.extend(row.spans);

    let line = Line::from(spans);
    if focused {
        line.style(styles::edit_focus())
    } else if selected {
        line.style(styles::selected())
    } else {
        line
    }
}

impl StatefulWidget for SectionView<'_> {
    type State = Mounts;

    fn render(self, area: Rect, buf: &mut Buffer, mounts: &mut Mounts) {
        let mut block = styles::glass_block(self.ctx.section_selected)
            .title(format!(" {} ", self.section.section_type.label()));
        if let Some(bg) = hex_color(self.section.style.background_color.as_deref()) {
            block = block.style(Style::default().bg(bg));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let ctx = self.ctx;
        for (offset, row) in self.rows.into_iter().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            if offset >= inner.height {
                break;
            }
            let y = inner.y + offset;
            let target = row.target;
            let line = decorate(&ctx, row);
            buf.set_line(inner.x, y, &line, inner.width);
            if let Some(target) = target {
                mounts.push((target, Rect::new(inner.x, y, inner.width, 1)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use newsdesk_core::{ItemId, SectionType};

    fn story(id: ItemId, title: &str) -> ContentItem {
        let mut item = ContentItem::new(id, title).with_category("politics");
        item.date = Some("2024-03-01".into());
        item
    }

    fn render(section: &Section, ctx: SectionContext) -> (TestTerminal, Mounts) {
        let mut term = TestTerminal::with_size(60, 16);
        let mut mounts = Mounts::new();
        if let Some(view) = SectionView::new(section, ctx) {
            term.render_stateful_widget(view, term.area(), &mut mounts);
        }
        (term, mounts)
    }

    #[test]
    fn test_unknown_type_renders_nothing() {
        let section = Section::new(1, SectionType::parse("hologram"), 1)
            .with_items(vec![story(1, "Invisible")]);
        assert!(SectionView::new(&section, SectionContext::default()).is_none());
        let (term, mounts) = render(&section, SectionContext::default());
        assert!(!term.buffer_contains("Invisible"));
        assert!(mounts.is_empty());
    }

    #[test]
    fn test_every_known_type_draws_its_items() {
        for section_type in SectionType::KNOWN.iter() {
            let section = Section::new(1, section_type.clone(), 1)
                .with_title("Desk")
                .with_items(vec![story(5, "Harbour reopens")]);
            let (term, _) = render(&section, SectionContext::default());
            assert!(
                term.buffer_contains("Harbour reopens"),
                "{section_type} did not draw its item"
            );
        }
    }

    #[test]
    fn test_rows_report_mounts_for_fields() {
        let section =
            Section::new(3, SectionType::List, 1).with_items(vec![story(7, "Budget passes")]);
        let (_, mounts) = render(&section, SectionContext::default());
        let targets: Vec<EditTarget> = mounts.iter().map(|(t, _)| *t).collect();
        assert!(targets.contains(&EditTarget::section_title(3)));
        assert!(targets.contains(&EditTarget::item(3, 7, EditField::Title)));
        assert!(targets.contains(&EditTarget::item(3, 7, EditField::Date)));
    }

    #[test]
    fn test_edit_marker_only_for_bound_nodes() {
        let section =
            Section::new(3, SectionType::List, 1).with_items(vec![story(7, "Budget passes")]);
        let (term, _) = render(&section, SectionContext::default());
        assert!(!term.buffer_contains("✎"));

        let mut bindings = BindingRegistry::new();
        bindings.bind_sections(std::slice::from_ref(&section));
        let ctx = SectionContext {
            bindings: Some(&bindings),
            ..Default::default()
        };
        let (term, _) = render(&section, ctx);
        assert!(term.buffer_contains("✎ Budget passes"));
    }

    #[test]
    fn test_selected_item_marker() {
        let section = Section::new(3, SectionType::List, 1)
            .with_items(vec![story(7, "First"), story(8, "Second")]);
        let ctx = SectionContext {
            selected_item: Some(1),
            section_selected: true,
            ..Default::default()
        };
        let (term, _) = render(&section, ctx);
        assert!(term.buffer_contains("▸ Second"));
        assert!(!term.buffer_contains("▸ First"));
    }

    #[test]
    fn test_rows_clipped_to_area_are_not_mounted() {
        let items = (1..=20).map(|i| story(i, &format!("Story {i}"))).collect();
        let section = Section::new(3, SectionType::Sidebar, 1).with_items(items);
        let mut term = TestTerminal::with_size(40, 6);
        let mut mounts = Mounts::new();
        let view = SectionView::new(&section, SectionContext::default()).unwrap();
        assert!(view.height() > 6);
        term.render_stateful_widget(view, term.area(), &mut mounts);
        assert!(mounts.iter().all(|(_, r)| r.y < 5));
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(hex_color(Some("#ff0000")), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(hex_color(Some("red")), None);
        assert_eq!(hex_color(None), None);
    }
}
