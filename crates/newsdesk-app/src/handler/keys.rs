//! Key event handlers for different UI modes

use newsdesk_core::{Capability, EditType, Route};

use crate::forms::{FieldKind, FormState};
use crate::input_key::InputKey;
use crate::message::{DeleteTarget, Message};
use crate::state::{AdminTab, AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }
    match state.ui_mode {
        UiMode::Loading => handle_key_loading(key),
        UiMode::AuthRequired => handle_key_auth_required(key),
        UiMode::Browse => handle_key_browse(state, key),
        UiMode::EditModal => handle_key_edit_modal(state, key),
        UiMode::Form => handle_key_form(state, key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(state, key),
        UiMode::Admin => handle_key_admin(state, key),
    }
}

fn handle_key_loading(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_auth_required(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('r') | InputKey::Enter => Some(Message::RetryLogin),
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

/// Handle key events while reading the page
fn handle_key_browse(state: &AppState, key: InputKey) -> Option<Message> {
    let editing = state.permissions.can_edit();

    match key {
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Esc => match state.route {
            Route::Article(_) => Some(Message::Navigate(Route::Home)),
            _ if !state.toasts.is_empty() => Some(Message::DismissToast),
            _ => None,
        },

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        InputKey::Char('j') | InputKey::Down => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::SelectPrev),
        InputKey::Tab => Some(Message::SelectNextSection),
        InputKey::BackTab => Some(Message::SelectPrevSection),
        InputKey::Char(']') | InputKey::Right => Some(Message::NextCategory),
        InputKey::Char('[') | InputKey::Left => Some(Message::PrevCategory),
        InputKey::Char('g') | InputKey::Home => Some(Message::Navigate(Route::Home)),
        InputKey::Char('r') => Some(Message::Refresh),
        InputKey::Char('A') => Some(Message::Navigate(Route::Admin)),
        InputKey::Char('P') => Some(Message::OpenForm(crate::forms::FormKind::ChangePassword)),

        // ─────────────────────────────────────────────────────────
        // Audio
        // ─────────────────────────────────────────────────────────
        InputKey::Char('p') | InputKey::Char(' ') => Some(Message::ToggleAudioPause),
        InputKey::Char('s') if !editing => Some(Message::StopAudio),

        // ─────────────────────────────────────────────────────────
        // Edit mode
        // ─────────────────────────────────────────────────────────
        InputKey::Char('e') if state.permissions.can(Capability::EditContent) => {
            Some(Message::ToggleEditMode)
        }
        InputKey::Char('f') if editing => Some(Message::FocusNextBinding),
        InputKey::Char('F') if editing => Some(Message::FocusPrevBinding),
        InputKey::Enter if editing && state.bindings.focused().is_some() => {
            Some(Message::ActivateFocused)
        }
        InputKey::Char('a') if editing => Some(Message::AddToSelected),
        InputKey::Char('E') if editing => Some(Message::EditSelected),
        InputKey::Char('d') if editing => Some(Message::DeleteSelected),
        InputKey::Char('J') if editing => Some(Message::MoveSelected { down: true }),
        InputKey::Char('K') if editing => Some(Message::MoveSelected { down: false }),
        InputKey::Char('>') if editing => Some(Message::MoveSection { down: true }),
        InputKey::Char('<') if editing => Some(Message::MoveSection { down: false }),
        InputKey::Char('s') if editing => {
            Some(Message::OpenForm(crate::forms::FormKind::NewSection))
        }
        InputKey::Char('X') if editing => state
            .selected_section()
            .map(|s| Message::RequestDelete(DeleteTarget::Section(s.id))),

        InputKey::Enter => Some(Message::OpenSelected),
        _ => None,
    }
}

/// Handle key events in the admin panel
fn handle_key_admin(state: &AppState, key: InputKey) -> Option<Message> {
    let tab = state.admin.tab;

    match key {
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Esc | InputKey::Char('g') => Some(Message::Navigate(Route::Home)),
        InputKey::Tab | InputKey::Right => Some(Message::NextAdminTab),
        InputKey::BackTab | InputKey::Left => Some(Message::PrevAdminTab),
        InputKey::Char('j') | InputKey::Down => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::SelectPrev),
        InputKey::Char(']') | InputKey::PageDown => Some(Message::NextPage),
        InputKey::Char('[') | InputKey::PageUp => Some(Message::PrevPage),
        InputKey::Char('P') => Some(Message::OpenForm(crate::forms::FormKind::ChangePassword)),
        InputKey::Enter => Some(Message::OpenSelected),
        InputKey::Char('n') => new_form_for(state, tab).map(Message::OpenForm),
        InputKey::Char('d') => delete_trigger(state),
        InputKey::Char('t') if tab == AdminTab::Ads && state.can(Capability::ManageAds) => state
            .ads
            .get(state.admin.selected)
            .map(|ad| Message::ToggleAdActive(ad.id)),
        _ => key
            .digit_index()
            .and_then(|i| AdminTab::ALL.get(i))
            .map(|tab| Message::SelectAdminTab(*tab)),
    }
}

fn new_form_for(state: &AppState, tab: AdminTab) -> Option<crate::forms::FormKind> {
    use crate::forms::FormKind;
    match tab {
        AdminTab::Categories if state.can(Capability::ManageCategories) => {
            Some(FormKind::NewCategory)
        }
        AdminTab::Ads if state.can(Capability::ManageAds) => Some(FormKind::NewAd),
        AdminTab::Articles if state.can(Capability::ManageArticles) => Some(FormKind::NewArticle),
        _ => None,
    }
}

/// The delete key only does something where a delete trigger is shown.
fn delete_trigger(state: &AppState) -> Option<Message> {
    let selected = state.admin.selected;
    let target = match state.admin.tab {
        AdminTab::Categories if state.can_delete_category() => {
            DeleteTarget::Category(state.categories.get(selected)?.id)
        }
        AdminTab::Ads if state.can(Capability::ManageAds) => {
            DeleteTarget::Ad(state.ads.get(selected)?.id)
        }
        AdminTab::Articles if state.can(Capability::ManageArticles) => {
            DeleteTarget::Article(state.articles.items.get(selected)?.id)
        }
        _ => return None,
    };
    Some(Message::RequestDelete(target))
}

/// Handle key events while the edit modal is open
fn handle_key_edit_modal(state: &AppState, key: InputKey) -> Option<Message> {
    let session = state.edit_modal.session()?;
    let edit_type = session.edit_type;

    match key {
        InputKey::Esc => Some(Message::EditClose),
        InputKey::Enter => Some(Message::EditSubmit),
        InputKey::AltEnter if edit_type == EditType::Text => Some(Message::EditNewline),
        InputKey::Tab | InputKey::Down if edit_type != EditType::Category => {
            Some(Message::EditNextField)
        }
        InputKey::BackTab | InputKey::Up if edit_type != EditType::Category => {
            Some(Message::EditPrevField)
        }
        InputKey::Right | InputKey::Down | InputKey::Tab | InputKey::Char(' ')
            if edit_type == EditType::Category =>
        {
            Some(Message::EditCycleOption { forward: true })
        }
        InputKey::Left | InputKey::Up | InputKey::BackTab if edit_type == EditType::Category => {
            Some(Message::EditCycleOption { forward: false })
        }
        InputKey::F(n) if n >= 1 && edit_type == EditType::Image => {
            Some(Message::EditPreset(n as usize - 1))
        }
        InputKey::F(n) if n >= 1 && edit_type.has_quick_picks() => {
            Some(Message::EditQuickPick(n as usize - 1))
        }
        InputKey::Backspace => Some(Message::EditBackspace),
        InputKey::Char(c) => Some(Message::EditInput(c)),
        _ => None,
    }
}

/// Handle key events while a form is open
fn handle_key_form(state: &AppState, key: InputKey) -> Option<Message> {
    let form: &FormState = state.form.as_ref()?;
    let kind = form.focused().map(|f| &f.kind);
    let is_choice = matches!(kind, Some(FieldKind::Choice { .. } | FieldKind::Toggle));

    match key {
        InputKey::Esc => Some(Message::FormCancel),
        InputKey::Enter => Some(Message::FormSubmit),
        InputKey::AltEnter if matches!(kind, Some(FieldKind::Multiline)) => {
            Some(Message::FormInput('\n'))
        }
        InputKey::Tab | InputKey::Down => Some(Message::FormNextField),
        InputKey::BackTab | InputKey::Up => Some(Message::FormPrevField),
        InputKey::Right if is_choice => Some(Message::FormCycle { forward: true }),
        InputKey::Left if is_choice => Some(Message::FormCycle { forward: false }),
        InputKey::Char(' ') if is_choice => Some(Message::FormCycle { forward: true }),
        InputKey::Backspace => Some(Message::FormBackspace),
        InputKey::Char(c) => Some(Message::FormInput(c)),
        _ => None,
    }
}

/// Handle key events in the delete confirmation
fn handle_key_confirm_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') => Some(Message::ConfirmAccept),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::ConfirmCancel),
        InputKey::Tab | InputKey::Left | InputKey::Right => Some(Message::ConfirmSelectNext),
        InputKey::Enter => state.confirm_dialog.as_ref().and_then(|d| d.chosen()),
        _ => None,
    }
}
