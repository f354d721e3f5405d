//! Browsing: routes, the page cursor, section intents and audio

use newsdesk_core::prelude::*;
use newsdesk_core::{
    reorder_sections, sort_by_position, visible_items, ArticleId, Capability, ItemId, Route,
    SectionId,
};

use crate::actions::{start_mutation, Mutation};
use crate::confirm_dialog::ConfirmDialogState;
use crate::intents::{resolve_intent, IntentOutcome, SectionIntent};
use crate::message::{Message, Resource};
use crate::state::{AppState, Selection, UiMode};

use super::{admin, UpdateResult};

/// Caches the current route renders from.
pub fn route_resources(state: &AppState) -> Vec<Resource> {
    match &state.route {
        Route::Home | Route::Category(_) => vec![Resource::Sections, Resource::Categories],
        Route::Article(id) => vec![Resource::Article(*id), Resource::Sections],
        Route::Admin => admin::admin_resources(state),
    }
}

pub fn navigate(state: &mut AppState, route: Route) -> UpdateResult {
    if route == Route::Admin && !admin::can_open_admin(state) {
        state.toasts.error("You do not have access to the admin panel");
        return UpdateResult::none();
    }

    debug!("Navigating to {}", route.title());
    if !matches!(route, Route::Article(_)) {
        state.article = None;
    }
    state.route = route;
    state.selection = Selection::default();
    state.admin.selected = 0;
    if !state.ui_mode.is_modal() && state.ui_mode != UiMode::AuthRequired {
        state.ui_mode = state.base_mode();
    }
    UpdateResult::fetch(route_resources(state))
}

/// Move within the selected section.
pub fn move_selection(state: &mut AppState, delta: isize) -> UpdateResult {
    if state.route == Route::Admin {
        let rows = state.admin_row_count();
        state.admin.selected = step(state.admin.selected, delta, rows);
        return UpdateResult::none();
    }
    let Some(section) = state.selected_section() else {
        return UpdateResult::none();
    };
    state.selection.item = step(state.selection.item, delta, section.items.len());
    UpdateResult::none()
}

pub fn move_section_selection(state: &mut AppState, delta: isize) -> UpdateResult {
    let count = state.page_sections().len();
    state.selection.section = step(state.selection.section, delta, count);
    state.selection.item = 0;
    UpdateResult::none()
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

/// Article id from an item link such as `/articles/12`.
pub fn article_link(url: &str) -> Option<ArticleId> {
    let mut segments = url
        .split(['?', '#'])
        .next()?
        .split('/')
        .filter(|s| !s.is_empty())
        .rev();
    let id = segments.next()?.parse().ok()?;
    matches!(segments.next(), Some("article" | "articles")).then_some(id)
}

/// Enter on a page item: play audio, or open the linked article.
pub fn open_selected(state: &mut AppState) -> UpdateResult {
    let Some((section_id, item, _)) = state.selected_item() else {
        return UpdateResult::none();
    };
    if item.audio_url.is_some() {
        return UpdateResult::message(Message::PlayAudio {
            section_id,
            item_id: item.id,
        });
    }
    match item.link_url.as_deref().and_then(article_link) {
        Some(id) => UpdateResult::message(Message::Navigate(Route::Article(id))),
        None => UpdateResult::none(),
    }
}

/// Intent shortcuts for the item under the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selected {
    Add,
    Edit,
    Delete,
    Move { down: bool },
}

pub fn intent_for_selected(state: &mut AppState, selected: Selected) -> UpdateResult {
    let Some(section) = state.selected_section() else {
        return UpdateResult::none();
    };
    if selected == Selected::Add {
        return UpdateResult::message(Message::SectionIntent {
            section_id: section.id,
            intent: SectionIntent::AddItem,
        });
    }

    let Some((section_id, item, index)) = state.selected_item() else {
        return UpdateResult::none();
    };
    let intent = match selected {
        Selected::Add => SectionIntent::AddItem,
        Selected::Edit => SectionIntent::EditItem(item.id),
        Selected::Delete => SectionIntent::DeleteItem(item.id),
        Selected::Move { down } => {
            let visible = visible_items(&section, None).len();
            let new = if down {
                index + 1
            } else {
                match index.checked_sub(1) {
                    Some(new) => new,
                    None => return UpdateResult::none(),
                }
            };
            if new >= visible {
                return UpdateResult::none();
            }
            state.selection.item = new;
            SectionIntent::Reorder { old: index, new }
        }
    };
    UpdateResult::message(Message::SectionIntent { section_id, intent })
}

pub fn handle_intent(
    state: &mut AppState,
    section_id: SectionId,
    intent: SectionIntent,
) -> UpdateResult {
    let outcome = resolve_intent(
        &state.permissions,
        &state.sections,
        state.route.category_filter(),
        section_id,
        intent,
    );

    match outcome {
        IntentOutcome::OpenForm(form) => {
            state.form = Some(*form);
            state.form_ticket = None;
            state.ui_mode = UiMode::Form;
            UpdateResult::none()
        }
        IntentOutcome::ConfirmDelete { target, what } => {
            state.confirm_dialog = Some(ConfirmDialogState::delete(target, what));
            state.ui_mode = UiMode::ConfirmDialog;
            UpdateResult::none()
        }
        IntentOutcome::Persist(mutation) => persist(state, mutation),
        IntentOutcome::Denied => {
            debug!("{:?} on section {} denied", intent, section_id);
            UpdateResult::none()
        }
        IntentOutcome::Stale => {
            debug!("{:?} on section {} no longer applies", intent, section_id);
            UpdateResult::none()
        }
    }
}

/// Start a request that has no form or modal waiting on it.
pub fn persist(state: &mut AppState, mutation: Mutation) -> UpdateResult {
    match start_mutation(&mut state.hooks, mutation) {
        Some((_, action)) => UpdateResult::action(action),
        None => {
            state.toasts.info("Still saving the previous change");
            UpdateResult::none()
        }
    }
}

/// Swap the selected section with its neighbour in position order.
pub fn move_section(state: &mut AppState, down: bool) -> UpdateResult {
    if !state.permissions.can_edit() || !state.can(Capability::ManageSections) {
        return UpdateResult::none();
    }
    let Some(selected) = state.selected_section() else {
        return UpdateResult::none();
    };

    let mut ordered = state.sections.clone();
    sort_by_position(&mut ordered);
    let Some(old) = ordered.iter().position(|s| s.id == selected.id) else {
        return UpdateResult::none();
    };
    let new = if down {
        old + 1
    } else {
        match old.checked_sub(1) {
            Some(new) => new,
            None => return UpdateResult::none(),
        }
    };

    match reorder_sections(&state.sections, old, new) {
        Some(positions) => persist(state, Mutation::ReorderSections(positions)),
        None => UpdateResult::none(),
    }
}

pub fn play_audio(state: &mut AppState, section_id: SectionId, item_id: ItemId) -> UpdateResult {
    let Some(item) = state.find_item(section_id, item_id).cloned() else {
        return UpdateResult::none();
    };
    if state.audio.play(section_id, &item) {
        info!("Playing '{}'", item.title);
    } else {
        state.toasts.error("This item has no audio");
    }
    UpdateResult::none()
}
