//! Delete confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use newsdesk_app::confirm_dialog::ConfirmDialogState;

use super::modal_overlay::open_modal;
use crate::theme::styles;

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }

    fn options_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (label, _)) in self.state.options.iter().enumerate() {
            let style = if i == self.state.selected {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw("   "));
        }
        spans.pop();
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = open_modal(buf, area, 52, 8);
        let block = styles::modal_block(&self.state.title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height < 3 {
            return;
        }
        let message = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            height: inner.height - 2,
            ..inner
        };
        Paragraph::new(Span::styled(self.state.message.clone(), styles::text_primary()))
            .wrap(Wrap { trim: true })
            .render(message, buf);

        let buttons = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        Paragraph::new(self.options_line())
            .alignment(Alignment::Center)
            .render(buttons, buf);
    }
}
