//! Tests for handler module

use super::*;
use crate::bindings::{editable_targets, Area};
use crate::forms::FormKind;
use crate::input_key::InputKey;
use crate::message::DeleteTarget;
use crate::state::{AdminTab, AppState, UiMode};
use newsdesk_api::{ActionResult, CurrentUser};
use newsdesk_core::{
    AdKind, Advertisement, Category, ContentItem, EditField, EditTarget, Role, Route, Section,
    SectionType,
};

fn user(roles: Vec<Role>) -> CurrentUser {
    CurrentUser {
        id: 1,
        name: "Dana".to_string(),
        email: None,
        roles,
    }
}

fn sample_sections() -> Vec<Section> {
    vec![
        Section::new(1, SectionType::Breaking, 1)
            .with_title("Breaking")
            .with_items(vec![ContentItem::new(10, "Storm warning")]),
        Section::new(2, SectionType::MainContent, 2).with_items(vec![
            ContentItem::new(20, "Budget vote").with_category("politics"),
            ContentItem::new(21, "Cup final").with_category("sports"),
            ContentItem::new(22, "Derby preview").with_category("sports"),
        ]),
        Section::new(3, SectionType::Sidebar, 3),
    ]
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
    }
}

fn ad(id: i64, active: bool) -> Advertisement {
    Advertisement {
        id,
        name: format!("Ad {id}"),
        kind: AdKind::Image,
        format: None,
        image_url: Some("https://img/ad.png".to_string()),
        script: None,
        target_url: Some("https://example.com".to_string()),
        starts_at: None,
        ends_at: None,
        active,
    }
}

/// Run `message` and every follow-up message, collecting actions.
fn process(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut next = Some(message);
    while let Some(msg) = next.take() {
        let result = update(state, msg);
        actions.extend(result.action);
        next = result.message;
    }
    actions
}

fn signed_in(roles: Vec<Role>) -> AppState {
    let mut state = AppState::new();
    process(&mut state, Message::UserLoaded(user(roles)));
    process(&mut state, Message::SectionsLoaded(sample_sections()));
    process(
        &mut state,
        Message::CategoriesLoaded(vec![category(3, "Politics"), category(4, "Sports")]),
    );
    state
}

fn editing(roles: Vec<Role>) -> AppState {
    let mut state = signed_in(roles);
    process(&mut state, Message::ToggleEditMode);
    assert!(state.permissions.can_edit());
    state
}

fn in_admin(roles: Vec<Role>) -> AppState {
    let mut state = signed_in(roles);
    process(&mut state, Message::Navigate(Route::Admin));
    process(&mut state, Message::AdsLoaded(vec![ad(7, true), ad(8, false)]));
    state
}

fn mutations(actions: &[UpdateAction]) -> Vec<&Mutation> {
    actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::RunMutation { mutation, .. } => Some(mutation),
            _ => None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────
// Startup and loading
// ─────────────────────────────────────────────────────────

#[test]
fn test_initial_action_loads_user_sections_and_categories() {
    match initial_action() {
        UpdateAction::Fetch(resources) => assert_eq!(
            resources,
            vec![Resource::User, Resource::Sections, Resource::Categories]
        ),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_sections_loaded_leaves_loading() {
    let mut state = AppState::new();
    assert_eq!(state.ui_mode, UiMode::Loading);
    process(&mut state, Message::SectionsLoaded(sample_sections()));
    assert_eq!(state.ui_mode, UiMode::Browse);
    assert_eq!(state.sections.len(), 3);
}

#[test]
fn test_failed_section_fetch_shows_empty_page() {
    let mut state = AppState::new();
    process(
        &mut state,
        Message::FetchFailed {
            resource: Resource::Sections,
            message: "Could not reach the server.".to_string(),
            unauthorized: false,
        },
    );
    assert_eq!(state.ui_mode, UiMode::Browse);
    assert_eq!(
        state.toasts.latest().map(|t| t.message.as_str()),
        Some("Could not reach the server.")
    );
}

#[test]
fn test_quit_key() {
    let mut state = signed_in(vec![Role::Viewer]);
    let msg = handle_key(&state, InputKey::Char('q'));
    assert!(matches!(msg, Some(Message::Quit)));
    process(&mut state, Message::Quit);
    assert!(state.should_quit);
}

// ─────────────────────────────────────────────────────────
// Edit mode and bindings
// ─────────────────────────────────────────────────────────

#[test]
fn test_toggling_edit_mode_twice_keeps_one_binding_per_node() {
    let mut state = signed_in(vec![Role::Editor]);
    for _ in 0..2 {
        process(&mut state, Message::ToggleEditMode);
        process(&mut state, Message::ToggleEditMode);
    }
    assert!(state.bindings.is_empty());

    process(&mut state, Message::ToggleEditMode);
    let targets = editable_targets(&state.sections);
    assert_eq!(state.bindings.len(), targets.len());
    for target in &targets {
        assert_eq!(state.bindings.count_for(target), 1, "{target:?}");
    }

    // A reload while editing rebinds without duplicating
    process(&mut state, Message::SectionsLoaded(sample_sections()));
    assert_eq!(state.bindings.len(), targets.len());
}

#[test]
fn test_viewer_cannot_enter_edit_mode() {
    let mut state = signed_in(vec![Role::Viewer]);
    assert!(handle_key(&state, InputKey::Char('e')).is_none());
    process(&mut state, Message::ToggleEditMode);
    assert!(!state.permissions.edit_mode());
    assert!(state.bindings.is_empty());
}

#[test]
fn test_losing_role_detaches_bindings() {
    let mut state = editing(vec![Role::Editor]);
    assert!(!state.bindings.is_empty());
    process(&mut state, Message::UserLoaded(user(vec![Role::Viewer])));
    assert!(!state.permissions.can_edit());
    assert!(state.bindings.is_empty());
}

#[test]
fn test_click_on_binding_opens_modal_with_current_values() {
    let mut state = editing(vec![Role::Editor]);
    let target = EditTarget::item(1, 10, EditField::Title);
    state.bindings.mount(target, Area::new(0, 5, 30, 1));

    process(&mut state, Message::Click { x: 3, y: 5 });
    assert_eq!(state.ui_mode, UiMode::EditModal);
    let session = state.edit_modal.session().unwrap();
    assert_eq!(session.target, target);
    assert_eq!(session.value("text"), "Storm warning");
}

#[test]
fn test_clicks_ignored_outside_edit_mode() {
    let mut state = signed_in(vec![Role::Editor]);
    let target = EditTarget::item(1, 10, EditField::Title);
    state.bindings.mount(target, Area::new(0, 5, 30, 1));
    process(&mut state, Message::Click { x: 3, y: 5 });
    assert_eq!(state.ui_mode, UiMode::Browse);
    assert!(!state.edit_modal.is_open());
}

#[test]
fn test_opening_modal_replaces_previous_session() {
    let mut state = editing(vec![Role::Editor]);
    let first = EditTarget::item(1, 10, EditField::Title);
    let second = EditTarget::item(2, 21, EditField::Category);
    process(&mut state, Message::ActivateBinding(first));
    process(&mut state, Message::EditInput('!'));
    process(&mut state, Message::ActivateBinding(second));

    let session = state.edit_modal.session().unwrap();
    assert_eq!(session.target, second);
    assert_eq!(session.value("category"), "sports");
}

#[test]
fn test_click_outside_modal_closes_it() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::section_title(1)),
    );
    state.edit_modal.area = Some(Area::new(10, 10, 20, 6));

    process(&mut state, Message::Click { x: 12, y: 12 });
    assert!(state.edit_modal.is_open());

    process(&mut state, Message::Click { x: 0, y: 0 });
    assert!(!state.edit_modal.is_open());
    assert_eq!(state.ui_mode, UiMode::Browse);
}

#[test]
fn test_edit_submit_persists_item_update() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    process(&mut state, Message::EditInput('!'));
    let actions = process(&mut state, Message::EditSubmit);

    let found = mutations(&actions);
    assert_eq!(found.len(), 1);
    match found[0] {
        Mutation::UpdateItem {
            section_id,
            item_id,
            draft,
        } => {
            assert_eq!((*section_id, *item_id), (1, 10));
            assert_eq!(draft.title, "Storm warning!");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(state.edit_ticket.is_some());
    assert!(state.edit_modal.session().unwrap().saving);
}

#[test]
fn test_section_title_edit_persists_section_update() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::section_title(1)),
    );
    process(&mut state, Message::EditBackspace);
    let actions = process(&mut state, Message::EditSubmit);
    match mutations(&actions).as_slice() {
        [Mutation::UpdateSection { id: 1, update }] => {
            assert_eq!(update.title.as_deref(), Some("Breakin"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_edit_success_closes_modal_and_refetches_sections() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    process(&mut state, Message::EditSubmit);
    let ticket = state.edit_ticket.unwrap();

    let result = update(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::ok((), "Item updated"),
        },
    );
    assert!(!state.edit_modal.is_open());
    assert_eq!(state.ui_mode, UiMode::Browse);
    assert!(matches!(
        result.action,
        Some(UpdateAction::Fetch(ref r)) if r == &vec![Resource::Sections]
    ));
}

#[test]
fn test_edit_failure_keeps_modal_with_inline_error() {
    let mut state = editing(vec![Role::Editor]);
    let target = EditTarget::item(1, 10, EditField::Title);
    process(&mut state, Message::ActivateBinding(target));
    process(&mut state, Message::EditSubmit);
    let ticket = state.edit_ticket.unwrap();

    process(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::failure("Title too long"),
        },
    );
    let session = state.edit_modal.session().unwrap();
    assert_eq!(session.error.as_deref(), Some("Title too long"));
    assert!(!session.saving);
    assert!(state.edit_ticket.is_none());
}

#[test]
fn test_refresh_overwrites_unsaved_modal_input() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    process(&mut state, Message::EditInput('?'));

    let mut sections = sample_sections();
    sections[0].items[0].title = "Storm warning lifted".to_string();
    process(&mut state, Message::SectionsLoaded(sections));

    let session = state.edit_modal.session().unwrap();
    assert_eq!(session.value("text"), "Storm warning lifted");
    assert!(session.values_refreshed);
}

#[test]
fn test_identical_refresh_keeps_unsaved_input() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    process(&mut state, Message::EditInput('?'));
    process(&mut state, Message::SectionsLoaded(sample_sections()));

    let session = state.edit_modal.session().unwrap();
    assert_eq!(session.value("text"), "Storm warning?");
    assert!(!session.values_refreshed);
}

#[test]
fn test_removed_node_closes_modal() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    let mut sections = sample_sections();
    sections[0].items.clear();
    process(&mut state, Message::SectionsLoaded(sections));

    assert!(!state.edit_modal.is_open());
    assert_eq!(state.ui_mode, UiMode::Browse);
}

// ─────────────────────────────────────────────────────────
// Hooks
// ─────────────────────────────────────────────────────────

#[test]
fn test_stale_completion_is_ignored() {
    let mut state = in_admin(vec![Role::Admin]);
    process(&mut state, Message::OpenForm(FormKind::NewCategory));
    for c in "Weather".chars() {
        process(&mut state, Message::FormInput(c));
    }
    let actions = process(&mut state, Message::FormSubmit);
    assert_eq!(mutations(&actions).len(), 1);
    let ticket = state.form_ticket.unwrap();

    process(&mut state, Message::FormCancel);
    assert!(state.form.is_none());
    let toasts_before = state.toasts.len();

    let result = update(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::failure("Slug already taken"),
        },
    );
    assert!(result.action.is_none());
    assert_eq!(state.toasts.len(), toasts_before);
    assert!(state.form.is_none());
    assert_eq!(state.ui_mode, UiMode::Admin);
}

#[test]
fn test_stale_success_still_refetches() {
    let mut state = in_admin(vec![Role::Admin]);
    let ticket = state
        .hooks
        .begin(Mutation::DeleteCategory(3).hook_key())
        .unwrap();
    state.hooks.abandon(&ticket.key);

    let result = update(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::ok((), "Category deleted"),
        },
    );
    assert!(matches!(
        result.action,
        Some(UpdateAction::Fetch(ref r)) if r == &vec![Resource::Categories]
    ));
}

#[test]
fn test_independent_hooks_do_not_block() {
    let mut state = in_admin(vec![Role::Admin]);
    let first = process(&mut state, Message::ToggleAdActive(7));
    let second = process(&mut state, Message::ToggleAdActive(8));
    assert_eq!(mutations(&first).len(), 1);
    assert_eq!(mutations(&second).len(), 1);
    assert_eq!(state.hooks.in_flight_count(), 2);

    // Same ad again while its toggle is in flight
    let again = process(&mut state, Message::ToggleAdActive(7));
    assert!(again.is_empty());
}

#[test]
fn test_same_export_kind_runs_once() {
    let mut state = in_admin(vec![Role::Admin]);
    let first = process(&mut state, Message::Export(newsdesk_api::ExportKind::Roles));
    let second = process(&mut state, Message::Export(newsdesk_api::ExportKind::Roles));
    let other = process(&mut state, Message::Export(newsdesk_api::ExportKind::Logs));
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(other.len(), 1);
}

// ─────────────────────────────────────────────────────────
// Permissions and deletes
// ─────────────────────────────────────────────────────────

#[test]
fn test_no_category_delete_trigger_without_permission() {
    let mut state = in_admin(vec![Role::Editor]);
    state.admin.tab = AdminTab::Categories;
    assert!(handle_key(&state, InputKey::Char('d')).is_none());

    // Even a forged request opens nothing
    process(&mut state, Message::RequestDelete(DeleteTarget::Category(3)));
    assert!(state.confirm_dialog.is_none());
    assert_eq!(state.ui_mode, UiMode::Admin);
}

#[test]
fn test_admin_delete_goes_through_confirmation() {
    let mut state = in_admin(vec![Role::Admin]);
    state.admin.tab = AdminTab::Categories;
    let msg = handle_key(&state, InputKey::Char('d')).unwrap();
    let actions = process(&mut state, msg);
    assert!(actions.is_empty());
    assert_eq!(state.ui_mode, UiMode::ConfirmDialog);

    // Enter on the preselected option cancels
    let msg = handle_key(&state, InputKey::Enter).unwrap();
    assert!(process(&mut state, msg).is_empty());
    assert!(state.confirm_dialog.is_none());

    process(&mut state, Message::RequestDelete(DeleteTarget::Category(3)));
    let actions = process(&mut state, Message::ConfirmAccept);
    assert!(matches!(
        mutations(&actions).as_slice(),
        [Mutation::DeleteCategory(3)]
    ));
    assert_eq!(state.ui_mode, UiMode::Admin);
}

#[test]
fn test_viewer_cannot_open_admin() {
    let mut state = signed_in(vec![Role::Viewer]);
    let actions = process(&mut state, Message::Navigate(Route::Admin));
    assert!(actions.is_empty());
    assert_eq!(state.route, Route::Home);
}

#[test]
fn test_intents_denied_outside_edit_mode() {
    let mut state = signed_in(vec![Role::Editor]);
    process(
        &mut state,
        Message::SectionIntent {
            section_id: 1,
            intent: crate::intents::SectionIntent::DeleteItem(10),
        },
    );
    assert!(state.confirm_dialog.is_none());
}

#[test]
fn test_item_delete_needs_confirmation() {
    let mut state = editing(vec![Role::Editor]);
    let msg = handle_key(&state, InputKey::Char('d')).unwrap();
    process(&mut state, msg);
    let dialog = state.confirm_dialog.as_ref().unwrap();
    assert_eq!(
        dialog.target,
        DeleteTarget::Item {
            section_id: 1,
            item_id: 10
        }
    );
    let actions = process(&mut state, Message::ConfirmAccept);
    assert!(matches!(
        mutations(&actions).as_slice(),
        [Mutation::DeleteItem {
            section_id: 1,
            item_id: 10
        }]
    ));
}

#[test]
fn test_reorder_under_category_filter_maps_to_full_list() {
    let mut state = editing(vec![Role::Editor]);
    process(&mut state, Message::Navigate(Route::category("sports")));
    // Filtered page shows only the main section: Cup final, Derby preview
    state.selection.item = 1;
    let actions = process(&mut state, Message::MoveSelected { down: false });
    match mutations(&actions).as_slice() {
        [Mutation::ReorderItems {
            section_id,
            item_ids,
        }] => {
            assert_eq!(*section_id, 2);
            assert_eq!(item_ids, &vec![20, 22, 21]);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(state.selection.item, 0);
}

// ─────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────

#[test]
fn test_invalid_ad_form_makes_no_request() {
    let mut state = in_admin(vec![Role::Admin]);
    process(&mut state, Message::OpenForm(FormKind::NewAd));
    let actions = process(&mut state, Message::FormSubmit);

    assert!(actions.is_empty());
    assert_eq!(state.hooks.in_flight_count(), 0);
    let form = state.form.as_ref().unwrap();
    assert!(!form.errors.is_empty());
    assert!(!form.submitting);
}

#[test]
fn test_form_failure_shows_inline_error() {
    let mut state = in_admin(vec![Role::Admin]);
    process(&mut state, Message::OpenForm(FormKind::NewCategory));
    for c in "Sports".chars() {
        process(&mut state, Message::FormInput(c));
    }
    process(&mut state, Message::FormSubmit);
    let ticket = state.form_ticket.unwrap();

    process(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::failure("Slug already taken"),
        },
    );
    let form = state.form.as_ref().unwrap();
    assert_eq!(form.error.as_deref(), Some("Slug already taken"));
    assert!(!form.submitting);
    assert_eq!(state.ui_mode, UiMode::Form);
}

#[test]
fn test_form_success_closes_and_refetches() {
    let mut state = in_admin(vec![Role::Admin]);
    process(&mut state, Message::OpenForm(FormKind::NewCategory));
    for c in "Weather".chars() {
        process(&mut state, Message::FormInput(c));
    }
    process(&mut state, Message::FormSubmit);
    let ticket = state.form_ticket.unwrap();

    let result = update(
        &mut state,
        Message::MutationFinished {
            ticket,
            result: ActionResult::ok((), "Category created"),
        },
    );
    assert!(state.form.is_none());
    assert_eq!(state.ui_mode, UiMode::Admin);
    assert!(matches!(
        result.action,
        Some(UpdateAction::Fetch(ref r)) if r == &vec![Resource::Categories]
    ));
    assert_eq!(
        state.toasts.latest().map(|t| t.message.as_str()),
        Some("Category created")
    );
}

#[test]
fn test_author_cannot_open_category_form() {
    let mut state = in_admin(vec![Role::Author]);
    process(&mut state, Message::OpenForm(FormKind::NewCategory));
    assert!(state.form.is_none());
}

// ─────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────

#[test]
fn test_unauthorized_fetch_requires_sign_in() {
    let mut state = editing(vec![Role::Editor]);
    process(
        &mut state,
        Message::ActivateBinding(EditTarget::item(1, 10, EditField::Title)),
    );
    process(
        &mut state,
        Message::FetchFailed {
            resource: Resource::Sections,
            message: "Your session has expired. Please sign in again.".to_string(),
            unauthorized: true,
        },
    );
    assert_eq!(state.ui_mode, UiMode::AuthRequired);
    assert!(!state.edit_modal.is_open());
    assert!(state.bindings.is_empty());

    let msg = handle_key(&state, InputKey::Enter).unwrap();
    let actions = process(&mut state, msg);
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::Fetch(r)] if r.contains(&Resource::User)
    ));
    assert!(state.auth_message.is_none());
}

#[test]
fn test_unauthorized_mutation_requires_sign_in() {
    let mut state = in_admin(vec![Role::Admin]);
    let actions = process(&mut state, Message::ToggleAdActive(7));
    let ticket = match actions.as_slice() {
        [UpdateAction::RunMutation { ticket, .. }] => *ticket,
        other => panic!("unexpected {other:?}"),
    };
    let mut result = ActionResult::failure("Your session has expired. Please sign in again.");
    result.unauthorized = true;
    process(&mut state, Message::MutationFinished { ticket, result });
    assert_eq!(state.ui_mode, UiMode::AuthRequired);
}

// ─────────────────────────────────────────────────────────
// Browsing and audio
// ─────────────────────────────────────────────────────────

#[test]
fn test_category_navigation_wraps() {
    let mut state = signed_in(vec![Role::Viewer]);
    let actions = process(&mut state, Message::NextCategory);
    assert_eq!(state.route, Route::category("politics"));
    assert!(matches!(actions.as_slice(), [UpdateAction::Fetch(_)]));
    process(&mut state, Message::PrevCategory);
    process(&mut state, Message::PrevCategory);
    assert_eq!(state.route, Route::category("sports"));
}

#[test]
fn test_enter_plays_audio_item() {
    let mut sections = sample_sections();
    sections[0].items[0].audio_url = Some("https://cdn/10.mp3".to_string());
    sections[0].items[0].duration = Some(1);
    let mut state = AppState::new();
    process(&mut state, Message::SectionsLoaded(sections));

    let msg = handle_key(&state, InputKey::Enter).unwrap();
    process(&mut state, msg);
    assert!(state.audio.is_playing(10));

    for _ in 0..crate::audio::TICKS_PER_SECOND {
        process(&mut state, Message::Tick);
    }
    assert!(state.audio.now_playing().is_none());
}

#[test]
fn test_enter_opens_linked_article() {
    let mut sections = sample_sections();
    sections[0].items[0].link_url = Some("/articles/42".to_string());
    let mut state = AppState::new();
    process(&mut state, Message::SectionsLoaded(sections));

    let actions = process(&mut state, Message::OpenSelected);
    assert_eq!(state.route, Route::Article(42));
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::Fetch(r)] if r.contains(&Resource::Article(42))
    ));
}

#[test]
fn test_admin_paging_only_when_more_pages() {
    let mut state = in_admin(vec![Role::Admin]);
    process(&mut state, Message::SelectAdminTab(AdminTab::Articles));
    assert!(process(&mut state, Message::NextPage).is_empty());

    state.articles.page = Some(1);
    state.articles.total_pages = Some(3);
    let actions = process(&mut state, Message::NextPage);
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::Fetch(r)] if r == &vec![Resource::Articles { page: 2 }]
    ));
    assert_eq!(state.admin.articles_page, 2);
}
