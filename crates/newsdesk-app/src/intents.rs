//! Section-level intents: add, edit, delete and reorder items.
//!
//! Intents are resolved against current state. They do nothing unless the
//! user can edit right now (role AND edit mode).

use newsdesk_core::{reorder_visible, visible_items, ItemId, Permissions, Section, SectionId};

use crate::actions::Mutation;
use crate::forms::FormState;
use crate::message::DeleteTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionIntent {
    AddItem,
    EditItem(ItemId),
    DeleteItem(ItemId),
    /// Indices into the visible (possibly filtered) item list
    Reorder { old: usize, new: usize },
}

#[derive(Debug)]
pub enum IntentOutcome {
    OpenForm(Box<FormState>),
    ConfirmDelete { target: DeleteTarget, what: String },
    Persist(Mutation),
    Denied,
    /// Section, item or index no longer exists
    Stale,
}

/// Turn an intent into what the app should do next.
///
/// `filter` is the active category; it only narrows the main content
/// section, so it is ignored for every other section.
pub fn resolve_intent(
    permissions: &Permissions,
    sections: &[Section],
    filter: Option<&str>,
    section_id: SectionId,
    intent: SectionIntent,
) -> IntentOutcome {
    if !permissions.can_edit() {
        return IntentOutcome::Denied;
    }
    let Some(section) = sections.iter().find(|s| s.id == section_id) else {
        return IntentOutcome::Stale;
    };

    match intent {
        SectionIntent::AddItem => IntentOutcome::OpenForm(Box::new(FormState::new_item(section_id))),
        SectionIntent::EditItem(item_id) => match section.item(item_id) {
            Some(item) => IntentOutcome::OpenForm(Box::new(FormState::edit_item(section_id, item))),
            None => IntentOutcome::Stale,
        },
        SectionIntent::DeleteItem(item_id) => match section.item(item_id) {
            Some(item) => IntentOutcome::ConfirmDelete {
                target: DeleteTarget::Item {
                    section_id,
                    item_id,
                },
                what: item.title.clone(),
            },
            None => IntentOutcome::Stale,
        },
        SectionIntent::Reorder { old, new } => {
            if old == new {
                return IntentOutcome::Stale;
            }
            let filter = filter.filter(|_| section.section_type.is_main_content());
            let full: Vec<ItemId> = section.items.iter().map(|i| i.id).collect();
            let visible: Vec<ItemId> = visible_items(section, filter).iter().map(|i| i.id).collect();
            match reorder_visible(&full, &visible, old, new) {
                Some(item_ids) => IntentOutcome::Persist(Mutation::ReorderItems {
                    section_id,
                    item_ids,
                }),
                None => IntentOutcome::Stale,
            }
        }
    }
}
