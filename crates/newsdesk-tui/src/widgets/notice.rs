//! Full-page notices: the initial loading screen and the sign-in prompt.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay::centered_rect;
use crate::theme::styles;

pub struct Notice {
    title: &'static str,
    lines: Vec<Line<'static>>,
}

impl Notice {
    pub fn loading() -> Self {
        Self {
            title: "Newsdesk",
            lines: vec![Line::from(Span::styled("Loading sections…", styles::text_secondary()))],
        }
    }

    /// Shown after the backend rejected our credentials.
    pub fn sign_in(reason: Option<&str>) -> Self {
        let reason = reason.unwrap_or("Your session has expired.");
        Self {
            title: "Sign in required",
            lines: vec![
                Line::from(Span::styled(reason.to_string(), styles::warning())),
                Line::default(),
                Line::from(Span::styled(
                    "Set a valid API token, then retry.",
                    styles::text_secondary(),
                )),
                Line::default(),
                Line::from(vec![
                    Span::styled("r", styles::keybinding()),
                    Span::styled(" retry   ", styles::text_muted()),
                    Span::styled("q", styles::keybinding()),
                    Span::styled(" quit", styles::text_muted()),
                ]),
            ],
        }
    }
}

impl Widget for Notice {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.lines.len() as u16 + 4;
        let rect = centered_rect(50, height, area);
        let block = styles::modal_block(self.title);
        let inner = block.inner(rect);
        block.render(rect, buf);

        let content = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        Paragraph::new(self.lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(content, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_loading_notice() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(Notice::loading(), area);
        assert!(term.buffer_contains("Loading sections…"));
    }

    #[test]
    fn test_sign_in_notice_uses_reason() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(Notice::sign_in(Some("Token rejected")), area);
        assert!(term.buffer_contains("Sign in required"));
        assert!(term.buffer_contains("Token rejected"));
        assert!(term.buffer_contains("r retry"));
    }

    #[test]
    fn test_sign_in_notice_default_reason() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(Notice::sign_in(None), area);
        assert!(term.buffer_contains("Your session has expired."));
    }
}
