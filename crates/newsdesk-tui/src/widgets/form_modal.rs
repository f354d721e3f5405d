//! Create/edit form overlay

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use newsdesk_app::forms::{FieldKind, FormField, FormState};

use super::modal_overlay::open_modal;
use super::truncate;
use crate::theme::styles;

const FORM_WIDTH: u16 = 70;

pub struct FormModal<'a> {
    form: &'a FormState,
}

impl<'a> FormModal<'a> {
    pub fn new(form: &'a FormState) -> Self {
        Self { form }
    }

    fn value_spans(field: &FormField, focused: bool, width: usize) -> Vec<Span<'static>> {
        let style = if focused {
            styles::text_primary()
        } else {
            styles::text_secondary()
        };
        let display = field.display_value();
        let mut spans = match &field.kind {
            FieldKind::Choice { .. } => {
                let shown = if display.is_empty() { "none" } else { display.as_str() };
                vec![Span::styled(format!("‹ {shown} ›"), style)]
            }
            FieldKind::Multiline => {
                let first = display.lines().next().unwrap_or_default();
                let more = display.lines().count().saturating_sub(1);
                let mut spans = vec![Span::styled(truncate(first, width.saturating_sub(12)), style)];
                if more > 0 {
                    spans.push(Span::styled(format!(" (+{more} lines)"), styles::text_muted()));
                }
                spans
            }
            _ => vec![Span::styled(truncate(&display, width), style)],
        };
        if focused && !matches!(field.kind, FieldKind::Choice { .. } | FieldKind::Toggle) {
            spans.push(Span::styled("▏", styles::accent()));
        }
        spans
    }

    /// Lines, plus the index of the line holding the focused field.
    fn lines(&self, width: usize) -> (Vec<Line<'static>>, usize) {
        let form = self.form;
        let mut lines = Vec::new();
        let mut focus_line = 0;

        for (i, field) in form.fields.iter().enumerate() {
            let focused = i == form.focus;
            if focused {
                focus_line = lines.len();
            }
            let (marker, label_style) = if focused {
                ("▸ ", styles::accent_bold())
            } else {
                ("  ", styles::text_muted())
            };
            let mut spans = vec![
                Span::styled(marker, styles::accent()),
                Span::styled(format!("{}: ", field.label), label_style),
            ];
            let used = 4 + field.label.len();
            spans.extend(Self::value_spans(field, focused, width.saturating_sub(used)));
            lines.push(Line::from(spans));

            if let Some(error) = form.field_error(field.key) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", truncate(&error, width.saturating_sub(4))),
                    styles::error(),
                )));
            }
        }

        lines.push(Line::default());
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(truncate(error, width), styles::error())));
        }
        if form.submitting {
            lines.push(Line::from(Span::styled("Saving…", styles::warning())));
        } else {
            lines.push(Line::from(vec![
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" submit  ", styles::text_muted()),
                Span::styled("Tab", styles::keybinding()),
                Span::styled(" next field  ", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(" cancel", styles::text_muted()),
            ]));
        }
        (lines, focus_line)
    }
}

impl Widget for FormModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = FORM_WIDTH.min(area.width.saturating_sub(4)).max(20);
        let (lines, focus_line) = self.lines(width.saturating_sub(4) as usize);
        let height = (lines.len() as u16 + 2).min(area.height);

        let modal = open_modal(buf, area, width, height);
        let block = styles::modal_block(self.form.kind.title());
        let inner = block.inner(modal);
        block.render(modal, buf);

        let content = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        // Keep the focused field on screen in short terminals
        let scroll = (focus_line as u16).saturating_sub(content.height.saturating_sub(3));
        Paragraph::new(lines)
            .scroll((scroll, 0))
            .render(content, buf);
    }
}
