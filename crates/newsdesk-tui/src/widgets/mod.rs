//! Widget components for the TUI

mod admin_panel;
mod article_view;
mod confirm_dialog;
mod edit_modal;
mod form_modal;
mod header;
pub mod modal_overlay;
mod notice;
pub mod sections;
mod status_bar;

pub use admin_panel::AdminPanel;
pub use article_view::ArticleView;
pub use confirm_dialog::ConfirmDialog;
pub use edit_modal::EditModalView;
pub use form_modal::FormModal;
pub use header::MainHeader;
pub use notice::Notice;
pub use sections::{Mounts, SectionContext, SectionView};
pub use status_bar::StatusBar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}
