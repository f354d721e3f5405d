//! Admin panel, create/edit forms and delete confirmation

use newsdesk_api::ExportKind;
use newsdesk_core::prelude::*;
use newsdesk_core::Capability;

use crate::actions::{export_hook_key, start_mutation, Mutation};
use crate::confirm_dialog::ConfirmDialogState;
use crate::forms::{FormKind, FormState};
use crate::message::{DeleteTarget, Message, Resource};
use crate::state::{AdminTab, AppState, UiMode};

use super::{page, UpdateAction, UpdateResult};

pub fn can_open_admin(state: &AppState) -> bool {
    [
        Capability::ManageCategories,
        Capability::ManageAds,
        Capability::ManageArticles,
        Capability::ExportData,
    ]
    .into_iter()
    .any(|c| state.can(c))
}

/// Caches behind the tabs this user can see.
pub fn admin_resources(state: &AppState) -> Vec<Resource> {
    let mut resources = vec![Resource::Categories];
    if state.can(Capability::ManageAds) {
        resources.push(Resource::Ads);
    }
    if state.can(Capability::ManageArticles) {
        resources.push(Resource::Articles {
            page: state.admin.articles_page,
        });
    }
    if state.can(Capability::ExportData) {
        resources.push(Resource::AuditLog {
            page: state.admin.audit_page,
        });
    }
    resources
}

pub fn select_tab(state: &mut AppState, tab: AdminTab) -> UpdateResult {
    state.admin.tab = tab;
    state.admin.selected = 0;
    let resource = match tab {
        AdminTab::Categories => Resource::Categories,
        AdminTab::Ads if state.can(Capability::ManageAds) => Resource::Ads,
        AdminTab::Articles if state.can(Capability::ManageArticles) => Resource::Articles {
            page: state.admin.articles_page,
        },
        AdminTab::AuditLog if state.can(Capability::ExportData) => Resource::AuditLog {
            page: state.admin.audit_page,
        },
        _ => return UpdateResult::none(),
    };
    UpdateResult::fetch(vec![resource])
}

pub fn change_page(state: &mut AppState, forward: bool) -> UpdateResult {
    let (current, has_next) = match state.admin.tab {
        AdminTab::Articles => (state.admin.articles_page, state.articles.has_next()),
        AdminTab::AuditLog => (state.admin.audit_page, state.audit_log.has_next()),
        _ => return UpdateResult::none(),
    };
    let page = match (forward, has_next) {
        (true, true) => current + 1,
        (false, _) if current > 1 => current - 1,
        _ => return UpdateResult::none(),
    };
    state.admin.selected = 0;
    let resource = if state.admin.tab == AdminTab::Articles {
        state.admin.articles_page = page;
        Resource::Articles { page }
    } else {
        state.admin.audit_page = page;
        Resource::AuditLog { page }
    };
    UpdateResult::fetch(vec![resource])
}

/// Enter on an admin row.
pub fn open_selected(state: &mut AppState) -> UpdateResult {
    let index = state.admin.selected;
    let message = match state.admin.tab {
        AdminTab::Categories => state
            .categories
            .get(index)
            .map(|c| Message::OpenForm(FormKind::EditCategory(c.id))),
        AdminTab::Ads => state
            .ads
            .get(index)
            .map(|ad| Message::OpenForm(FormKind::EditAd(ad.id))),
        AdminTab::Articles => state
            .articles
            .items
            .get(index)
            .map(|a| Message::OpenForm(FormKind::EditArticle(a.id))),
        AdminTab::AuditLog => None,
        AdminTab::Export => ExportKind::ALL.get(index).map(|k| Message::Export(*k)),
    };
    match message {
        Some(message) => UpdateResult::message(message),
        None => UpdateResult::none(),
    }
}

fn may_open(state: &AppState, kind: &FormKind) -> bool {
    match kind {
        FormKind::NewSection => {
            state.permissions.can_edit() && state.can(Capability::ManageSections)
        }
        FormKind::NewItem { .. } | FormKind::EditItem { .. } => state.permissions.can_edit(),
        FormKind::NewCategory | FormKind::EditCategory(_) => {
            state.can(Capability::ManageCategories)
        }
        FormKind::NewAd | FormKind::EditAd(_) => state.can(Capability::ManageAds),
        FormKind::NewArticle | FormKind::EditArticle(_) => state.can(Capability::ManageArticles),
        FormKind::ChangePassword => state.user.is_some(),
    }
}

fn build_form(state: &AppState, kind: FormKind) -> Option<FormState> {
    let form = match kind {
        FormKind::NewSection => {
            let next = state.sections.iter().map(|s| s.position).max().unwrap_or(0) + 1;
            FormState::new_section(next)
        }
        FormKind::NewItem { section_id } => FormState::new_item(section_id),
        FormKind::EditItem {
            section_id,
            item_id,
        } => FormState::edit_item(section_id, state.find_item(section_id, item_id)?),
        FormKind::NewCategory => FormState::new_category(),
        FormKind::EditCategory(id) => {
            FormState::edit_category(state.categories.iter().find(|c| c.id == id)?)
        }
        FormKind::NewAd => FormState::new_ad(),
        FormKind::EditAd(id) => FormState::edit_ad(state.ads.iter().find(|ad| ad.id == id)?),
        FormKind::NewArticle => FormState::new_article(&state.categories),
        FormKind::EditArticle(id) => {
            let article = state
                .articles
                .items
                .iter()
                .chain(state.article.iter())
                .find(|a| a.id == id)?;
            FormState::edit_article(article, &state.categories)
        }
        FormKind::ChangePassword => FormState::change_password(),
    };
    Some(form)
}

pub fn open_form(state: &mut AppState, kind: FormKind) -> UpdateResult {
    if !may_open(state, &kind) {
        state.toasts.error("You do not have permission to do that");
        return UpdateResult::none();
    }
    let Some(form) = build_form(state, kind) else {
        state.toasts.error("That record no longer exists");
        return UpdateResult::none();
    };

    if let Some(ticket) = state.form_ticket.take() {
        state.hooks.abandon(&ticket.key);
    }
    debug!("Opening form: {}", form.kind.title());
    state.form = Some(form);
    state.ui_mode = UiMode::Form;
    UpdateResult::none()
}

/// Apply `f` to the open form unless it is being saved.
pub fn with_form(state: &mut AppState, f: impl FnOnce(&mut FormState)) -> UpdateResult {
    if let Some(form) = state.form.as_mut().filter(|form| !form.submitting) {
        f(form);
    }
    UpdateResult::none()
}

pub fn submit_form(state: &mut AppState) -> UpdateResult {
    let Some(form) = state.form.as_mut() else {
        return UpdateResult::none();
    };
    if form.submitting {
        return UpdateResult::none();
    }
    // Invalid input stays on the form; nothing is sent
    let Some(mutation) = form.submit(&state.categories) else {
        return UpdateResult::none();
    };

    match start_mutation(&mut state.hooks, mutation) {
        Some((ticket, action)) => {
            state.form_ticket = Some(ticket);
            UpdateResult::action(action)
        }
        None => {
            form.submitting = false;
            form.error = Some("This record is already being saved".to_string());
            UpdateResult::none()
        }
    }
}

pub fn cancel_form(state: &mut AppState) -> UpdateResult {
    state.form = None;
    if let Some(ticket) = state.form_ticket.take() {
        state.hooks.abandon(&ticket.key);
    }
    if state.ui_mode == UiMode::Form {
        state.ui_mode = state.base_mode();
    }
    UpdateResult::none()
}

/// Name of the record `target` points at, if the user may delete it.
fn describe_deletable(state: &AppState, target: DeleteTarget) -> Option<String> {
    match target {
        DeleteTarget::Section(id) => {
            if !state.permissions.can_edit() || !state.can(Capability::ManageSections) {
                return None;
            }
            state
                .sections
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.display_title())
        }
        DeleteTarget::Item {
            section_id,
            item_id,
        } => {
            if !state.permissions.can_edit() {
                return None;
            }
            state
                .find_item(section_id, item_id)
                .map(|item| item.title.clone())
        }
        DeleteTarget::Category(id) => {
            if !state.can_delete_category() {
                return None;
            }
            state
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        }
        DeleteTarget::Article(id) => {
            if !state.can(Capability::ManageArticles) {
                return None;
            }
            state
                .articles
                .items
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.title.clone())
        }
        DeleteTarget::Ad(id) => {
            if !state.can(Capability::ManageAds) {
                return None;
            }
            state
                .ads
                .iter()
                .find(|ad| ad.id == id)
                .map(|ad| ad.name.clone())
        }
    }
}

pub fn request_delete(state: &mut AppState, target: DeleteTarget) -> UpdateResult {
    let Some(what) = describe_deletable(state, target) else {
        debug!("Delete of {:?} refused", target);
        return UpdateResult::none();
    };
    state.confirm_dialog = Some(ConfirmDialogState::delete(target, what));
    state.ui_mode = UiMode::ConfirmDialog;
    UpdateResult::none()
}

pub fn confirm_delete(state: &mut AppState) -> UpdateResult {
    let Some(dialog) = state.confirm_dialog.take() else {
        return UpdateResult::none();
    };
    state.ui_mode = state.base_mode();

    let mutation = match dialog.target {
        DeleteTarget::Section(id) => Mutation::DeleteSection(id),
        DeleteTarget::Item {
            section_id,
            item_id,
        } => Mutation::DeleteItem {
            section_id,
            item_id,
        },
        DeleteTarget::Category(id) => Mutation::DeleteCategory(id),
        DeleteTarget::Article(id) => Mutation::DeleteArticle(id),
        DeleteTarget::Ad(id) => Mutation::DeleteAd(id),
    };
    page::persist(state, mutation)
}

pub fn toggle_ad(state: &mut AppState, id: newsdesk_core::AdId) -> UpdateResult {
    if !state.can(Capability::ManageAds) {
        return UpdateResult::none();
    }
    let Some(active) = state.ads.iter().find(|ad| ad.id == id).map(|ad| ad.active) else {
        return UpdateResult::none();
    };
    page::persist(
        state,
        Mutation::SetAdActive {
            id,
            active: !active,
        },
    )
}

pub fn export(state: &mut AppState, kind: ExportKind) -> UpdateResult {
    if !state.can(Capability::ExportData) {
        state.toasts.error("You do not have permission to export data");
        return UpdateResult::none();
    }
    let Some(ticket) = state.hooks.begin(export_hook_key(kind)) else {
        state.toasts.info(format!("The {kind} export is already running"));
        return UpdateResult::none();
    };

    info!("Exporting {} into {}", kind, state.settings.export.download_dir.display());
    state.toasts.info(format!("Exporting {kind}..."));
    UpdateResult::action(UpdateAction::Export {
        ticket,
        kind,
        default_name: state.settings.export.default_filename.clone(),
        dir: state.settings.export.download_dir.clone(),
    })
}
