//! Header bar
//!
//! Title row with the current route and the signed-in user, then the
//! category tabs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use newsdesk_app::state::AppState;
use newsdesk_core::Route;

use crate::theme::{palette, styles};

/// Main header showing app title, route, user and category tabs
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn user_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.state.permissions.edit_mode() {
            spans.push(Span::styled(
                " EDIT ",
                Style::default()
                    .fg(palette::CONTRAST_FG)
                    .bg(palette::EDIT_MARKER)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        match &self.state.user {
            Some(user) => {
                let roles: Vec<&str> = user.roles.iter().map(|r| r.as_str()).collect();
                spans.push(Span::styled(user.name.clone(), styles::text_secondary()));
                if !roles.is_empty() {
                    spans.push(Span::styled(
                        format!(" ({})", roles.join(", ")),
                        styles::text_muted(),
                    ));
                }
            }
            None => spans.push(Span::styled("guest", styles::text_muted())),
        }
        spans.push(Span::raw(" "));
        Line::from(spans)
    }

    fn title_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "Newsdesk",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" / ", styles::text_muted()),
            Span::styled(self.state.route.title(), styles::text_secondary()),
        ])
    }

    /// Home plus every category; the active one highlighted.
    fn tabs_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        let mut tab = |label: String, active: bool| {
            let style = if active {
                styles::focused_selected()
            } else {
                styles::text_muted()
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        };
        tab("Home".to_string(), self.state.route == Route::Home);
        for category in &self.state.categories {
            let active = self.state.route.category_filter() == Some(category.slug.as_str());
            tab(category.name.clone(), active);
        }
        Line::from(spans)
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = self.title_line();
        let user = self.user_line();
        buf.set_line(inner.x, inner.y, &title, inner.width);

        let title_width = title.width() as u16;
        let user_width = user.width() as u16;
        if title_width + user_width + 2 <= inner.width {
            let x = inner.x + inner.width - user_width;
            buf.set_line(x, inner.y, &user, user_width);
        }

        if inner.height >= 2 {
            buf.set_line(inner.x, inner.y + 1, &self.tabs_line(), inner.width);
        }
    }
}
