//! Main update function - handles state transitions (TEA pattern)

use newsdesk_core::Route;

use crate::message::{Message, Resource};
use crate::state::AppState;

use super::{admin, data, editing, keys::handle_key, page, UpdateAction, UpdateResult};

/// Caches loaded at startup and after signing in again.
pub fn startup_resources() -> Vec<Resource> {
    vec![Resource::User, Resource::Sections, Resource::Categories]
}

/// First action the runner performs.
pub fn initial_action() -> UpdateAction {
    UpdateAction::Fetch(startup_resources())
}

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.should_quit = true;
            UpdateResult::none()
        }

        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Click { x, y } => editing::handle_click(state, x, y),

        Message::Tick => {
            state.toasts.tick();
            state.audio.tick();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Data
        // ─────────────────────────────────────────────────────────
        Message::UserLoaded(user) => data::handle_user_loaded(state, user),
        Message::SectionsLoaded(sections) => data::handle_sections_loaded(state, sections),
        Message::CategoriesLoaded(categories) => {
            state.categories = categories;
            data::clamp_admin_selection(state);
            UpdateResult::none()
        }
        Message::AdsLoaded(ads) => {
            state.ads = ads;
            data::clamp_admin_selection(state);
            UpdateResult::none()
        }
        Message::ArticlesLoaded(page) => {
            state.articles = page;
            data::clamp_admin_selection(state);
            UpdateResult::none()
        }
        Message::ArticleLoaded(article) => data::handle_article_loaded(state, article),
        Message::AuditLogLoaded(page) => {
            state.audit_log = page;
            data::clamp_admin_selection(state);
            UpdateResult::none()
        }
        Message::FetchFailed {
            resource,
            message,
            unauthorized,
        } => data::handle_fetch_failed(state, resource, message, unauthorized),
        Message::MutationFinished { ticket, result } => {
            data::handle_mutation_finished(state, ticket, result)
        }
        Message::ExportFinished { ticket, result } => {
            data::handle_export_finished(state, ticket, result)
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::Navigate(route) => page::navigate(state, route),
        Message::NextCategory => {
            let route = state.adjacent_category(true);
            page::navigate(state, route)
        }
        Message::PrevCategory => {
            let route = state.adjacent_category(false);
            page::navigate(state, route)
        }
        Message::SelectNext => page::move_selection(state, 1),
        Message::SelectPrev => page::move_selection(state, -1),
        Message::SelectNextSection => page::move_section_selection(state, 1),
        Message::SelectPrevSection => page::move_section_selection(state, -1),
        Message::OpenSelected => match state.route {
            Route::Admin => admin::open_selected(state),
            _ => page::open_selected(state),
        },
        Message::NextPage => admin::change_page(state, true),
        Message::PrevPage => admin::change_page(state, false),
        Message::SelectAdminTab(tab) => admin::select_tab(state, tab),
        Message::NextAdminTab => {
            let tab = state.admin.tab.next();
            admin::select_tab(state, tab)
        }
        Message::PrevAdminTab => {
            let tab = state.admin.tab.prev();
            admin::select_tab(state, tab)
        }

        // ─────────────────────────────────────────────────────────
        // Edit mode and modal
        // ─────────────────────────────────────────────────────────
        Message::ToggleEditMode => editing::toggle_edit_mode(state),
        Message::FocusNextBinding => {
            state.bindings.focus_next();
            UpdateResult::none()
        }
        Message::FocusPrevBinding => {
            state.bindings.focus_prev();
            UpdateResult::none()
        }
        Message::ActivateFocused => match state.bindings.focused() {
            Some(binding) => UpdateResult::message(Message::ActivateBinding(binding.target)),
            None => UpdateResult::none(),
        },
        Message::ActivateBinding(target) => editing::activate_binding(state, target),
        Message::EditInput(c) => editing::with_session(state, |s| s.input(c)),
        Message::EditBackspace => editing::with_session(state, |s| s.backspace()),
        Message::EditNewline => editing::with_session(state, |s| s.newline()),
        Message::EditNextField => editing::with_session(state, |s| s.next_field()),
        Message::EditPrevField => editing::with_session(state, |s| s.prev_field()),
        Message::EditQuickPick(index) => editing::with_session(state, |s| {
            s.quick_pick(index);
        }),
        Message::EditPreset(index) => editing::apply_preset(state, index),
        Message::EditCycleOption { forward } => {
            editing::with_session(state, |s| s.cycle_category(forward))
        }
        Message::EditSubmit => editing::submit(state),
        Message::EditClose => editing::close(state),
        Message::EditSaved { target, patch } => editing::save(state, target, patch),

        // ─────────────────────────────────────────────────────────
        // Sections
        // ─────────────────────────────────────────────────────────
        Message::SectionIntent { section_id, intent } => {
            page::handle_intent(state, section_id, intent)
        }
        Message::AddToSelected => page::intent_for_selected(state, page::Selected::Add),
        Message::EditSelected => page::intent_for_selected(state, page::Selected::Edit),
        Message::DeleteSelected => page::intent_for_selected(state, page::Selected::Delete),
        Message::MoveSelected { down } => {
            page::intent_for_selected(state, page::Selected::Move { down })
        }
        Message::MoveSection { down } => page::move_section(state, down),

        // ─────────────────────────────────────────────────────────
        // Forms and confirmation
        // ─────────────────────────────────────────────────────────
        Message::OpenForm(kind) => admin::open_form(state, kind),
        Message::FormInput(c) => admin::with_form(state, |f| f.input(c)),
        Message::FormBackspace => admin::with_form(state, |f| f.backspace()),
        Message::FormNextField => admin::with_form(state, |f| f.next_field()),
        Message::FormPrevField => admin::with_form(state, |f| f.prev_field()),
        Message::FormCycle { forward } => admin::with_form(state, |f| f.cycle(forward)),
        Message::FormSubmit => admin::submit_form(state),
        Message::FormCancel => admin::cancel_form(state),
        Message::RequestDelete(target) => admin::request_delete(state, target),
        Message::ConfirmSelectNext => {
            if let Some(dialog) = state.confirm_dialog.as_mut() {
                dialog.select_next();
            }
            UpdateResult::none()
        }
        Message::ConfirmAccept => admin::confirm_delete(state),
        Message::ConfirmCancel => {
            state.confirm_dialog = None;
            state.ui_mode = state.base_mode();
            UpdateResult::none()
        }
        Message::ToggleAdActive(id) => admin::toggle_ad(state, id),
        Message::Export(kind) => admin::export(state, kind),

        // ─────────────────────────────────────────────────────────
        // Audio
        // ─────────────────────────────────────────────────────────
        Message::PlayAudio {
            section_id,
            item_id,
        } => page::play_audio(state, section_id, item_id),
        Message::ToggleAudioPause => {
            state.audio.toggle_pause();
            UpdateResult::none()
        }
        Message::StopAudio => {
            state.audio.stop();
            UpdateResult::none()
        }

        Message::DismissToast => {
            state.toasts.dismiss();
            UpdateResult::none()
        }
        Message::Refresh => UpdateResult::fetch(page::route_resources(state)),
        Message::RetryLogin => {
            state.auth_message = None;
            state.sections_loaded = false;
            state.ui_mode = state.base_mode();
            UpdateResult::fetch(startup_resources())
        }
    }
}
