//! The shared edit modal.
//!
//! Draws the open [`EditSession`] over a dimmed page and reports the rect it
//! used, so clicks outside it can dismiss the session.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use newsdesk_app::edit_modal::EditSession;
use newsdesk_core::EditType;

use super::modal_overlay::open_modal;
use super::truncate;
use crate::theme::styles;

const MODAL_WIDTH: u16 = 64;

fn key_label(key: &str) -> &'static str {
    match key {
        "src" => "Image URL",
        "alt" => "Alt text",
        "category" => "Category",
        "date" => "Date",
        "read_time" => "Read time",
        "duration" => "Duration",
        "url" => "Link",
        _ => "Text",
    }
}

pub struct EditModalView<'a> {
    session: &'a EditSession,
}

impl<'a> EditModalView<'a> {
    pub fn new(session: &'a EditSession) -> Self {
        Self { session }
    }

    fn field_lines(&self, width: usize) -> Vec<Line<'static>> {
        let session = self.session;
        let focused = session.focused_key();
        let mut lines = Vec::new();

        for key in session.keys() {
            let is_focused = focused == Some(key);
            let label_style = if is_focused {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            };
            lines.push(Line::from(Span::styled(key_label(key), label_style)));

            if session.edit_type == EditType::Category {
                lines.extend(self.category_lines());
                continue;
            }

            let value = session.value(key);
            let marker = if is_focused { "> " } else { "  " };
            let value_style = if is_focused {
                styles::text_primary()
            } else {
                styles::text_muted()
            };
            let mut value_lines: Vec<&str> = value.split('\n').collect();
            if value_lines.is_empty() {
                value_lines.push("");
            }
            let last = value_lines.len() - 1;
            for (i, part) in value_lines.into_iter().enumerate() {
                let mut spans = vec![
                    Span::styled(if i == 0 { marker } else { "  " }, styles::accent()),
                    Span::styled(truncate(part, width.saturating_sub(3)), value_style),
                ];
                if is_focused && i == last {
                    spans.push(Span::styled("▏", styles::accent()));
                }
                lines.push(Line::from(spans));
            }
        }
        lines
    }

    fn category_lines(&self) -> Vec<Line<'static>> {
        let session = self.session;
        let current = session.value("category");
        if session.options.categories.is_empty() {
            return vec![Line::from(Span::styled(
                "  No categories available",
                styles::text_muted(),
            ))];
        }
        session
            .options
            .categories
            .iter()
            .map(|choice| {
                if choice.eq_ignore_ascii_case(current) {
                    Line::from(Span::styled(format!("  ● {choice}"), styles::focused_selected()))
                } else {
                    Line::from(Span::styled(format!("  ○ {choice}"), styles::text_secondary()))
                }
            })
            .collect()
    }

    fn pick_line(choices: &[String]) -> Line<'static> {
        let mut spans = vec![Span::raw("  ")];
        for (i, choice) in choices.iter().enumerate().take(12) {
            spans.push(Span::styled(format!("F{}", i + 1), styles::keybinding()));
            spans.push(Span::styled(format!(" {choice}  "), styles::text_secondary()));
        }
        Line::from(spans)
    }

    fn extras(&self, width: usize) -> Vec<Line<'static>> {
        let session = self.session;
        let mut lines = Vec::new();
        match session.edit_type {
            EditType::Image => {
                if session.keys().contains(&"src") && !session.options.image_presets.is_empty() {
                    lines.push(Line::from(Span::styled("Presets", styles::text_secondary())));
                    lines.push(Self::pick_line(&session.options.image_presets));
                }
                let src = session.value("src");
                if !src.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled("Preview: ", styles::text_muted()),
                        Span::styled(truncate(src, width.saturating_sub(9)), styles::accent()),
                    ]));
                }
            }
            t if t.has_quick_picks() && !session.options.quick_dates.is_empty() => {
                lines.push(Line::from(Span::styled("Quick picks", styles::text_secondary())));
                lines.push(Self::pick_line(&session.options.quick_dates));
            }
            _ => {}
        }

        if session.values_refreshed {
            lines.push(Line::from(Span::styled(
                "Content changed on the server; your edits were replaced",
                styles::warning(),
            )));
        }
        if let Some(error) = &session.error {
            lines.push(Line::from(Span::styled(
                truncate(error, width),
                styles::error(),
            )));
        }
        lines
    }

    fn footer(&self) -> Line<'static> {
        if self.session.saving {
            return Line::from(Span::styled("Saving…", styles::warning()));
        }
        let mut spans = vec![
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" save  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" cancel", styles::text_muted()),
        ];
        if self.session.edit_type == EditType::Text {
            spans.push(Span::styled("  Alt+Enter", styles::keybinding()));
            spans.push(Span::styled(" newline", styles::text_muted()));
        }
        Line::from(spans)
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = self.field_lines(width);
        let extras = self.extras(width);
        if !extras.is_empty() {
            lines.push(Line::default());
            lines.extend(extras);
        }
        lines.push(Line::default());
        lines.push(self.footer());
        lines
    }
}

impl StatefulWidget for EditModalView<'_> {
    /// Rect the modal occupied
    type State = Rect;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Rect) {
        let width = MODAL_WIDTH.min(area.width.saturating_sub(4)).max(20);
        let inner_width = width.saturating_sub(4) as usize;
        let lines = self.lines(inner_width);
        let height = (lines.len() as u16 + 2).min(area.height);

        let modal = open_modal(buf, area, width, height);
        *state = modal;

        let title = format!("Edit {}", self.session.edit_type.as_str());
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let content = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        Paragraph::new(lines).render(content, buf);
    }
}
