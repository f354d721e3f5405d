//! Semantic style builders.

use newsdesk_app::toast::ToastLevel;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn title() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn category_tag() -> Style {
    Style::default().fg(palette::CATEGORY_TAG)
}

pub fn error() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn warning() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Black on cyan, used for focused+selected rows across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn selected() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// The pencil marker in front of editable nodes
pub fn edit_marker() -> Style {
    Style::default().fg(palette::EDIT_MARKER)
}

/// Focus ring around the focused editable node
pub fn edit_focus() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::EDIT_MARKER)
        .add_modifier(Modifier::BOLD)
}

pub fn toast(level: ToastLevel) -> Style {
    let color = match level {
        ToastLevel::Info => palette::STATUS_BLUE,
        ToastLevel::Success => palette::STATUS_GREEN,
        ToastLevel::Error => palette::STATUS_RED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}
