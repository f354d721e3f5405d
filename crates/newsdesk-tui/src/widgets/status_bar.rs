//! Status bar widget
//!
//! One row: the latest toast (or the mode), the audio player, and key hints
//! for the current mode on the right.

use newsdesk_app::state::{AppState, UiMode};
use newsdesk_core::{format_duration, Capability, Route};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use super::sections::progress_bar;
use super::truncate;
use crate::theme::{palette, styles};

const MAX_TOAST_WIDTH: usize = 48;
const PLAYER_BAR_WIDTH: usize = 10;

/// Status bar widget showing toasts, playback and key hints
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn mode_indicator(&self) -> Span<'static> {
        let label = match self.state.ui_mode {
            UiMode::Loading => "Loading",
            UiMode::AuthRequired => "Signed out",
            UiMode::Admin => "Admin",
            _ if self.state.permissions.edit_mode() => "Editing",
            _ => "Reading",
        };
        Span::styled(format!("● {label}"), styles::accent())
    }

    fn toast(&self) -> Option<Span<'static>> {
        let toast = self.state.toasts.latest()?;
        Some(Span::styled(
            truncate(&toast.message, MAX_TOAST_WIDTH),
            styles::toast(toast.level),
        ))
    }

    fn player(&self) -> Option<Vec<Span<'static>>> {
        let now = self.state.audio.now_playing()?;
        let icon = if now.paused { "❚❚" } else { "▶" };
        let mut spans = vec![
            Span::styled(format!("{icon} "), styles::accent_bold()),
            Span::styled(truncate(&now.title, 24), styles::text_primary()),
            Span::raw(" "),
        ];
        let elapsed = format_duration(now.elapsed_secs());
        match (now.progress(), now.duration) {
            (Some(progress), Some(total)) => {
                spans.push(Span::styled(
                    progress_bar(progress, PLAYER_BAR_WIDTH),
                    styles::accent(),
                ));
                spans.push(Span::styled(
                    format!(" {elapsed} / {}", format_duration(total)),
                    styles::text_secondary(),
                ));
            }
            _ => spans.push(Span::styled(elapsed, styles::text_secondary())),
        }
        Some(spans)
    }

    /// Hints for the keys that do something in the current mode.
    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        let state = self.state;
        match state.ui_mode {
            UiMode::Loading => vec![("q", "quit")],
            UiMode::AuthRequired => vec![("r", "retry"), ("q", "quit")],
            UiMode::EditModal => vec![("Enter", "save"), ("Esc", "cancel")],
            UiMode::Form => vec![("Tab", "next"), ("Enter", "submit"), ("Esc", "cancel")],
            UiMode::ConfirmDialog => vec![("y", "delete"), ("n", "keep")],
            UiMode::Admin => vec![("Tab", "tab"), ("n", "new"), ("Esc", "back")],
            UiMode::Browse if state.permissions.can_edit() => vec![
                ("f", "next field"),
                ("Enter", "edit"),
                ("a", "add"),
                ("e", "done"),
            ],
            UiMode::Browse => {
                let mut hints = vec![("j/k", "move"), ("[ ]", "category")];
                if matches!(state.route, Route::Article(_)) {
                    hints.push(("Esc", "back"));
                } else {
                    hints.push(("Enter", "open"));
                }
                if state.permissions.can(Capability::EditContent) {
                    hints.push(("e", "edit"));
                }
                hints.push(("q", "quit"));
                hints
            }
        }
    }

    fn hints_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (key, label) in self.hints() {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {label}  "), styles::text_muted()));
        }
        Line::from(spans)
    }

    fn build_segments(&self) -> Vec<Span<'static>> {
        let separator = Span::styled(" │ ", Style::default().fg(palette::BORDER_DIM));
        let mut segments = vec![Span::raw(" ")];

        match self.toast() {
            Some(toast) => segments.push(toast),
            None => segments.push(self.mode_indicator()),
        }

        if let Some(player) = self.player() {
            segments.push(separator);
            segments.extend(player);
        }
        segments
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let left = Line::from(self.build_segments());
        buf.set_line(area.x, area.y, &left, area.width);

        let hints = self.hints_line();
        let left_width = left.width() as u16;
        let hints_width = hints.width() as u16;
        if left_width + hints_width + 2 <= area.width {
            let x = area.x + area.width - hints_width;
            buf.set_line(x, area.y, &hints, hints_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use newsdesk_core::{ContentItem, Role};

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::new();
        let area = Rect::new(0, 0, term.area().width, 1);
        term.render_widget(StatusBar::new(state), area);
        term
    }

    #[test]
    fn test_shows_mode_without_toast() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        let term = render(&state);
        assert!(term.line_contains(0, "Reading"));
        assert!(term.line_contains(0, "quit"));
    }

    #[test]
    fn test_narrow_bar_keeps_mode() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        let mut term = TestTerminal::compact();
        let area = Rect::new(0, 0, term.area().width, 1);
        term.render_widget(StatusBar::new(&state), area);
        assert!(term.line_contains(0, "Reading"));
        // Hints that do not fit are dropped whole
        assert!(!term.line_contains(0, "quit"));
    }

    #[test]
    fn test_latest_toast_replaces_mode() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        state.toasts.error("Could not save section");
        let term = render(&state);
        assert!(term.buffer_contains("Could not save section"));
        assert!(!term.buffer_contains("Reading"));
    }

    #[test]
    fn test_now_playing_shown() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        let mut item = ContentItem::new(3, "Morning briefing");
        item.audio_url = Some("https://cdn.example.com/a.mp3".into());
        item.duration = Some(120);
        state.audio.play(1, &item);
        for _ in 0..300 {
            state.audio.tick();
        }

        let term = render(&state);
        assert!(term.buffer_contains("▶ Morning briefing"));
        assert!(term.buffer_contains("0:30 / 2:00"));
    }

    #[test]
    fn test_edit_hint_requires_capability() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        assert!(!render(&state).buffer_contains("e edit"));

        state.permissions.set_roles(vec![Role::Editor]);
        assert!(render(&state).buffer_contains("e edit"));
    }

    #[test]
    fn test_editing_hints() {
        let mut state = AppState::new();
        state.ui_mode = UiMode::Browse;
        state.permissions.set_roles(vec![Role::Admin]);
        state.permissions.set_edit_mode(true);
        let term = render(&state);
        assert!(term.buffer_contains("Editing"));
        assert!(term.buffer_contains("next field"));
    }
}
