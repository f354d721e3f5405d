//! Edit mode, field bindings and the shared edit modal

use newsdesk_api::SectionUpdate;
use newsdesk_core::prelude::*;
use newsdesk_core::{Capability, EditTarget, EditValues};

use crate::actions::{start_mutation, Mutation};
use crate::edit_modal::EditSession;
use crate::message::Message;
use crate::state::{AppState, UiMode};

use super::UpdateResult;

pub fn toggle_edit_mode(state: &mut AppState) -> UpdateResult {
    if !state.can(Capability::EditContent) {
        return UpdateResult::none();
    }

    if state.permissions.toggle_edit_mode() {
        state.bindings.bind_sections(&state.sections);
        info!("Edit mode on, {} editable fields", state.bindings.len());
        state.toasts.info("Edit mode on");
    } else {
        state.bindings.detach_all();
        if state.edit_modal.is_open() {
            close(state);
        }
        info!("Edit mode off");
        state.toasts.info("Edit mode off");
    }
    UpdateResult::none()
}

/// Open the modal on `target`, reading its values now.
pub fn activate_binding(state: &mut AppState, target: EditTarget) -> UpdateResult {
    if !state.permissions.can_edit() || !state.bindings.is_bound(&target) {
        debug!("Ignoring activation of unbound {:?}", target);
        return UpdateResult::none();
    }
    let Some(values) = target.current_values(&state.sections) else {
        state.toasts.error("That content no longer exists");
        return UpdateResult::none();
    };

    let options = state.edit_options();
    if state.edit_modal.open(target, values, options).is_some() {
        if let Some(ticket) = state.edit_ticket.take() {
            state.hooks.abandon(&ticket.key);
        }
    }
    state.ui_mode = UiMode::EditModal;
    UpdateResult::none()
}

pub fn handle_click(state: &mut AppState, x: u16, y: u16) -> UpdateResult {
    match state.ui_mode {
        UiMode::EditModal if state.edit_modal.click_outside(x, y) => {
            UpdateResult::message(Message::EditClose)
        }
        UiMode::Browse if state.permissions.can_edit() => match state.bindings.hit(x, y) {
            Some(binding) => UpdateResult::message(Message::ActivateBinding(binding.target)),
            None => UpdateResult::none(),
        },
        _ => UpdateResult::none(),
    }
}

/// Apply `f` to the open session, if any.
pub fn with_session(state: &mut AppState, f: impl FnOnce(&mut EditSession)) -> UpdateResult {
    if let Some(session) = state.edit_modal.session_mut() {
        if !session.saving {
            f(session);
        }
    }
    UpdateResult::none()
}

pub fn apply_preset(state: &mut AppState, index: usize) -> UpdateResult {
    let seed = rand::random::<u32>();
    with_session(state, |s| {
        s.apply_preset(index, seed);
    })
}

pub fn submit(state: &mut AppState) -> UpdateResult {
    match state.edit_modal.submit() {
        Some((target, patch)) => UpdateResult::message(Message::EditSaved { target, patch }),
        None => UpdateResult::none(),
    }
}

pub fn close(state: &mut AppState) -> UpdateResult {
    state.edit_modal.close();
    if let Some(ticket) = state.edit_ticket.take() {
        state.hooks.abandon(&ticket.key);
    }
    if state.ui_mode == UiMode::EditModal {
        state.ui_mode = state.base_mode();
    }
    UpdateResult::none()
}

/// Turn the modal's patch into a request for the node it edits.
fn mutation_for(state: &AppState, target: &EditTarget, patch: &EditValues) -> Result<Mutation> {
    let section = state
        .sections
        .iter()
        .find(|s| s.id == target.section_id)
        .ok_or_else(|| Error::not_found("That section"))?;

    match target.item_id {
        Some(item_id) => {
            let item = section
                .item(item_id)
                .ok_or_else(|| Error::not_found("That item"))?;
            let draft = target.field.apply(item, patch)?;
            Ok(Mutation::UpdateItem {
                section_id: section.id,
                item_id,
                draft,
            })
        }
        None => Ok(Mutation::UpdateSection {
            id: section.id,
            update: SectionUpdate {
                title: patch.get("text").map(|t| t.trim().to_string()),
                style: section.style.clone(),
            },
        }),
    }
}

pub fn save(state: &mut AppState, target: EditTarget, patch: EditValues) -> UpdateResult {
    if !state.permissions.can_edit() {
        state.edit_modal.fail(&target, "Edit mode is off");
        return UpdateResult::none();
    }

    let mutation = match mutation_for(state, &target, &patch) {
        Ok(mutation) => mutation,
        Err(e) => {
            state.edit_modal.fail(&target, e.user_message());
            return UpdateResult::none();
        }
    };

    match start_mutation(&mut state.hooks, mutation) {
        Some((ticket, action)) => {
            state.edit_ticket = Some(ticket);
            UpdateResult::action(action)
        }
        None => {
            state
                .edit_modal
                .fail(&target, "A save for this field is already in progress");
            UpdateResult::none()
        }
    }
}
