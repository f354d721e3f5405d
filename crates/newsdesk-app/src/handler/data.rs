//! Fetch results and request completions

use std::path::PathBuf;

use newsdesk_api::{ActionResult, CurrentUser};
use newsdesk_core::prelude::*;
use newsdesk_core::{Article, Route, Section};

use crate::hooks::Ticket;
use crate::message::Resource;
use crate::state::{AppState, UiMode};

use super::UpdateResult;

pub fn handle_user_loaded(state: &mut AppState, user: CurrentUser) -> UpdateResult {
    info!("Signed in as {} ({} roles)", user.name, user.roles.len());
    state.permissions.set_roles(user.roles.clone());
    if !state.permissions.can_edit() {
        state.bindings.detach_all();
    }
    state.user = Some(user);
    UpdateResult::none()
}

pub fn handle_sections_loaded(state: &mut AppState, sections: Vec<Section>) -> UpdateResult {
    debug!("Loaded {} sections", sections.len());
    state.sections = sections;
    state.sections_loaded = true;
    if state.ui_mode == UiMode::Loading {
        state.ui_mode = state.base_mode();
    }

    if state.permissions.can_edit() {
        state.bindings.bind_sections(&state.sections);
    }

    sync_edit_modal(state);
    state.clamp_selection();
    UpdateResult::none()
}

/// Push fresh values into an open edit session, or close it when its node
/// is gone.
fn sync_edit_modal(state: &mut AppState) {
    let Some(target) = state.edit_modal.session().map(|s| s.target) else {
        return;
    };
    match target.current_values(&state.sections) {
        Some(values) => {
            if state.edit_modal.sync_values(&target, values) {
                debug!("Edit session for {:?} refreshed from server", target);
            }
        }
        None => {
            warn!("Edit target {:?} disappeared", target);
            state.edit_modal.close();
            if let Some(ticket) = state.edit_ticket.take() {
                state.hooks.abandon(&ticket.key);
            }
            if state.ui_mode == UiMode::EditModal {
                state.ui_mode = state.base_mode();
            }
            state.toasts.error("The content you were editing was removed");
        }
    }
}

pub fn handle_article_loaded(state: &mut AppState, article: Article) -> UpdateResult {
    if state.route == Route::Article(article.id) {
        state.article = Some(article);
    } else {
        debug!("Dropping article {} for an old route", article.id);
    }
    UpdateResult::none()
}

/// Keep the admin cursor inside the current tab.
pub fn clamp_admin_selection(state: &mut AppState) {
    let rows = state.admin_row_count();
    state.admin.selected = state.admin.selected.min(rows.saturating_sub(1));
}

pub fn handle_fetch_failed(
    state: &mut AppState,
    resource: Resource,
    message: String,
    unauthorized: bool,
) -> UpdateResult {
    if unauthorized {
        return require_sign_in(state, message);
    }

    if resource == Resource::Sections {
        // Show an empty page rather than an endless spinner
        state.sections_loaded = true;
    }
    if state.ui_mode == UiMode::Loading {
        state.ui_mode = state.base_mode();
    }
    state.toasts.error(message);
    UpdateResult::none()
}

/// 401 anywhere: drop open editors and wait for the user to retry.
pub fn require_sign_in(state: &mut AppState, message: impl Into<String>) -> UpdateResult {
    warn!("Session rejected by the server");
    state.form = None;
    state.confirm_dialog = None;
    state.edit_modal.close();
    for ticket in [state.form_ticket.take(), state.edit_ticket.take()]
        .into_iter()
        .flatten()
    {
        state.hooks.abandon(&ticket.key);
    }
    state.permissions.set_edit_mode(false);
    state.bindings.detach_all();
    state.auth_message = Some(message.into());
    state.ui_mode = UiMode::AuthRequired;
    UpdateResult::none()
}

/// Resources to reload after `ticket` succeeded, at the pages being shown.
fn refetch_for(state: &AppState, ticket: &Ticket) -> Vec<Resource> {
    ticket
        .key
        .kind
        .refetch()
        .into_iter()
        .map(|resource| match resource {
            Resource::Articles { .. } => Resource::Articles {
                page: state.admin.articles_page,
            },
            other => other,
        })
        .collect()
}

pub fn handle_mutation_finished(
    state: &mut AppState,
    ticket: Ticket,
    result: ActionResult<()>,
) -> UpdateResult {
    let refetch = refetch_for(state, &ticket);

    if !state.hooks.complete(&ticket) {
        // Nobody is waiting on it, but the server state still moved
        return if result.success {
            UpdateResult::fetch(refetch)
        } else {
            UpdateResult::none()
        };
    }

    if result.unauthorized {
        return require_sign_in(state, result.message_or_default());
    }

    let owns_form = state.form_ticket == Some(ticket);
    let owns_edit = state.edit_ticket == Some(ticket);
    let message = result.message_or_default().to_string();

    if result.success {
        state.toasts.success(message);
        if owns_form {
            state.form = None;
            state.form_ticket = None;
        }
        if owns_edit {
            state.edit_modal.close();
            state.edit_ticket = None;
        }
        if (owns_form && state.ui_mode == UiMode::Form)
            || (owns_edit && state.ui_mode == UiMode::EditModal)
        {
            state.ui_mode = state.base_mode();
        }
        return UpdateResult::fetch(refetch);
    }

    if owns_form {
        state.form_ticket = None;
        if let Some(form) = state.form.as_mut() {
            form.submitting = false;
            form.error = Some(message);
        }
    } else if owns_edit {
        state.edit_ticket = None;
        if let Some(target) = state.edit_modal.session().map(|s| s.target) {
            state.edit_modal.fail(&target, message);
        }
    } else {
        state.toasts.error(message);
    }
    UpdateResult::none()
}

pub fn handle_export_finished(
    state: &mut AppState,
    ticket: Ticket,
    result: ActionResult<PathBuf>,
) -> UpdateResult {
    if !state.hooks.complete(&ticket) {
        return UpdateResult::none();
    }
    if result.unauthorized {
        return require_sign_in(state, result.message_or_default());
    }
    if result.success {
        state.toasts.success(result.message_or_default());
    } else {
        state.toasts.error(result.message_or_default());
    }
    UpdateResult::none()
}
