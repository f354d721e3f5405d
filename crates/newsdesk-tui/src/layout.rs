//! Screen layout definitions for the TUI
//!
//! Header on top, status bar at the bottom, and the page in between. The
//! page splits into a main column and a sidebar column when the composed
//! layout is two-column and the terminal is wide enough.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: top border + title row + category tabs + bottom border
pub const HEADER_HEIGHT: u16 = 4;

/// Sidebar column width, in cells
pub const SIDEBAR_WIDTH: u16 = 32;

/// Narrower terminals stack everything in one column.
pub const MIN_TWO_COLUMN_WIDTH: u16 = 72;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    /// Main column (full width when there is no sidebar)
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub status: Rect,
}

/// Create the main screen layout
pub fn create(area: Rect, two_column: bool) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let page = chunks[1];
    let (main, sidebar) = if two_column && page.width >= MIN_TWO_COLUMN_WIDTH {
        let columns =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(SIDEBAR_WIDTH)]).split(page);
        (columns[0], Some(columns[1]))
    } else {
        (page, None)
    };

    ScreenAreas {
        header: chunks[0],
        main,
        sidebar,
        status: chunks[2],
    }
}
