//! Main render/view function (View in TEA pattern)
//!
//! Drawing only reads the state, with two exceptions: the binding registry
//! learns where each editable node landed this frame, and the edit modal
//! learns its own rect. Both feed mouse hit-testing on the next click.

#[cfg(test)]
mod tests;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use newsdesk_app::bindings::Area;
use newsdesk_app::state::{AppState, UiMode};
use newsdesk_core::{PageLayout, Route, Section};

use crate::layout;
use crate::theme::{palette, styles};
use crate::widgets::{
    AdminPanel, ArticleView, ConfirmDialog, EditModalView, FormModal, MainHeader, Mounts, Notice,
    SectionContext, SectionView, StatusBar,
};

/// A section paired with its index in `AppState::page_sections` order
type Placed<'a> = (usize, &'a Section);

/// Render the complete UI (View function in TEA)
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    state.bindings.unmount_all();

    let page = state.layout();
    let two_column = match state.route {
        Route::Article(_) => !page.sidebar.is_empty(),
        _ => page.is_two_column(),
    };
    let areas = layout::create(area, two_column);

    frame.render_widget(MainHeader::new(state), areas.header);
    frame.render_widget(StatusBar::new(state), areas.status);

    let page_area = areas
        .sidebar
        .map_or(areas.main, |sidebar| areas.main.union(sidebar));

    let mounts = match (state.ui_mode, &state.route) {
        (UiMode::Loading, _) => {
            frame.render_widget(Notice::loading(), page_area);
            Mounts::new()
        }
        (UiMode::AuthRequired, _) => {
            frame.render_widget(Notice::sign_in(state.auth_message.as_deref()), page_area);
            Mounts::new()
        }
        (_, Route::Admin) => {
            frame.render_widget(AdminPanel::new(state), page_area);
            Mounts::new()
        }
        _ => render_page(frame, state, &page, areas.main, areas.sidebar),
    };

    for (target, rect) in mounts {
        state
            .bindings
            .mount(target, Area::new(rect.x, rect.y, rect.width, rect.height));
    }

    render_overlays(frame, state, area);
}

/// Sections of the page (or the article plus sidebar) into their columns.
fn render_page(
    frame: &mut Frame,
    state: &AppState,
    page: &PageLayout,
    main: Rect,
    sidebar: Option<Rect>,
) -> Mounts {
    let mut mounts = Mounts::new();

    let mut main_sections: Vec<Placed> = page
        .before
        .iter()
        .chain(page.main.iter())
        .chain(page.after.iter())
        .enumerate()
        .collect();
    let offset = main_sections.len();
    let side_sections: Vec<Placed> = page
        .sidebar
        .iter()
        .enumerate()
        .map(|(i, section)| (offset + i, section))
        .collect();
    let nothing_to_show = main_sections.is_empty() && side_sections.is_empty();

    let main_area = if let Route::Article(id) = state.route {
        frame.render_widget(ArticleView::new(id, state.article.as_ref()), main);
        None
    } else {
        Some(main)
    };

    match (main_area, sidebar) {
        (Some(main), Some(sidebar)) => {
            render_column(frame, state, &main_sections, main, &mut mounts);
            render_column(frame, state, &side_sections, sidebar, &mut mounts);
        }
        (Some(main), None) => {
            // Narrow terminal: the sidebar pool follows the main column
            main_sections.extend(side_sections);
            render_column(frame, state, &main_sections, main, &mut mounts);
        }
        (None, Some(sidebar)) => {
            render_column(frame, state, &side_sections, sidebar, &mut mounts);
        }
        (None, None) => {}
    }

    if nothing_to_show && main_area.is_some() {
        frame.render_widget(
            Paragraph::new("  Nothing to show on this page").style(styles::text_muted()),
            main,
        );
    }
    mounts
}

/// Stack section views top to bottom, scrolled so the selected one shows.
fn render_column(
    frame: &mut Frame,
    state: &AppState,
    sections: &[Placed],
    area: Rect,
    mounts: &mut Mounts,
) {
    let bindings = state.permissions.can_edit().then_some(&state.bindings);
    let playing = state.audio.now_playing();

    let views: Vec<(usize, SectionView)> = sections
        .iter()
        .filter_map(|(index, section)| {
            let selected = *index == state.selection.section;
            let ctx = SectionContext {
                bindings,
                selected_item: selected.then_some(state.selection.item),
                section_selected: selected,
                playing,
            };
            SectionView::new(section, ctx).map(|view| (*index, view))
        })
        .collect();

    let start = scroll_start(
        &views.iter().map(|(i, v)| (*i, v.height())).collect::<Vec<_>>(),
        state.selection.section,
        area.height,
    );

    let mut y = area.y;
    for (_, view) in views.into_iter().skip(start) {
        if y >= area.bottom() {
            break;
        }
        let height = view.height().min(area.bottom() - y);
        let rect = Rect::new(area.x, y, area.width, height);
        frame.render_stateful_widget(view, rect, mounts);
        y += height;
    }
}

/// First view to draw so the selected one ends inside `available` rows.
fn scroll_start(heights: &[(usize, u16)], selected: usize, available: u16) -> usize {
    let Some(pos) = heights.iter().position(|(i, _)| *i == selected) else {
        return 0;
    };
    let mut start = pos;
    let mut used = heights[pos].1;
    while start > 0 && used + heights[start - 1].1 <= available {
        start -= 1;
        used += heights[start].1;
    }
    start
}

/// Form, edit modal and confirmation, in stacking order.
fn render_overlays(frame: &mut Frame, state: &mut AppState, area: Rect) {
    if let Some(form) = &state.form {
        frame.render_widget(FormModal::new(form), area);
    }

    let modal_rect = state.edit_modal.session().map(|session| {
        let mut rect = Rect::default();
        frame.render_stateful_widget(EditModalView::new(session), area, &mut rect);
        rect
    });
    state.edit_modal.area = modal_rect.map(|r| Area::new(r.x, r.y, r.width, r.height));

    if let Some(dialog) = &state.confirm_dialog {
        frame.render_widget(ConfirmDialog::new(dialog), area);
    }
}
