//! Action handlers: UpdateAction dispatch and background request tasks
//!
//! Every request runs in its own tokio task and reports back with a
//! [`Message`]. Mutations always produce an [`ActionResult`]; no error
//! leaves this module any other way.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use newsdesk_api::{Ack, ActionResult, ArticleQuery, Backend, ExportKind, SectionUpdate};
use newsdesk_core::prelude::*;
use newsdesk_core::{
    AdDraft, AdId, ArticleDraft, ArticleId, CategoryDraft, CategoryId, ItemDraft, ItemId,
    PasswordChange, SectionDraft, SectionId, SectionPosition,
};

use crate::handler::UpdateAction;
use crate::hooks::{HookKey, HookKind, Ticket};
use crate::message::{Message, Resource};

/// Every create/update/delete the client performs
#[derive(Debug, Clone)]
pub enum Mutation {
    CreateSection(SectionDraft),
    UpdateSection {
        id: SectionId,
        update: SectionUpdate,
    },
    ReorderSections(Vec<SectionPosition>),
    DeleteSection(SectionId),
    AddItem {
        section_id: SectionId,
        draft: ItemDraft,
    },
    UpdateItem {
        section_id: SectionId,
        item_id: ItemId,
        draft: ItemDraft,
    },
    DeleteItem {
        section_id: SectionId,
        item_id: ItemId,
    },
    ReorderItems {
        section_id: SectionId,
        item_ids: Vec<ItemId>,
    },
    CreateCategory(CategoryDraft),
    UpdateCategory {
        id: CategoryId,
        draft: CategoryDraft,
    },
    DeleteCategory(CategoryId),
    CreateArticle(ArticleDraft),
    UpdateArticle {
        id: ArticleId,
        draft: ArticleDraft,
    },
    DeleteArticle(ArticleId),
    CreateAd(AdDraft),
    UpdateAd {
        id: AdId,
        draft: AdDraft,
    },
    SetAdActive {
        id: AdId,
        active: bool,
    },
    DeleteAd(AdId),
    ChangePassword(PasswordChange),
}

impl Mutation {
    /// The hook instance this mutation occupies while in flight.
    pub fn hook_key(&self) -> HookKey {
        use Mutation::*;
        match self {
            CreateSection(_) => HookKey::new(HookKind::CreateSection),
            UpdateSection { id, .. } => HookKey::on(HookKind::UpdateSection, *id),
            ReorderSections(_) => HookKey::new(HookKind::ReorderSections),
            DeleteSection(id) => HookKey::on(HookKind::DeleteSection, *id),
            AddItem { section_id, .. } => HookKey::on(HookKind::AddItem, *section_id),
            UpdateItem { item_id, .. } => HookKey::on(HookKind::UpdateItem, *item_id),
            DeleteItem { item_id, .. } => HookKey::on(HookKind::DeleteItem, *item_id),
            ReorderItems { section_id, .. } => HookKey::on(HookKind::ReorderItems, *section_id),
            CreateCategory(_) => HookKey::new(HookKind::CreateCategory),
            UpdateCategory { id, .. } => HookKey::on(HookKind::UpdateCategory, *id),
            DeleteCategory(id) => HookKey::on(HookKind::DeleteCategory, *id),
            CreateArticle(_) => HookKey::new(HookKind::CreateArticle),
            UpdateArticle { id, .. } => HookKey::on(HookKind::UpdateArticle, *id),
            DeleteArticle(id) => HookKey::on(HookKind::DeleteArticle, *id),
            CreateAd(_) => HookKey::new(HookKind::CreateAd),
            UpdateAd { id, .. } => HookKey::on(HookKind::UpdateAd, *id),
            SetAdActive { id, .. } => HookKey::on(HookKind::ToggleAd, *id),
            DeleteAd(id) => HookKey::on(HookKind::DeleteAd, *id),
            ChangePassword(_) => HookKey::new(HookKind::ChangePassword),
        }
    }

    /// Shown when the server's response carries no message of its own.
    pub fn success_message(&self) -> &'static str {
        use Mutation::*;
        match self {
            CreateSection(_) => "Section created",
            UpdateSection { .. } => "Section updated",
            ReorderSections(_) => "Sections reordered",
            DeleteSection(_) => "Section deleted",
            AddItem { .. } => "Item added",
            UpdateItem { .. } => "Item updated",
            DeleteItem { .. } => "Item deleted",
            ReorderItems { .. } => "Items reordered",
            CreateCategory(_) => "Category created",
            UpdateCategory { .. } => "Category updated",
            DeleteCategory(_) => "Category deleted",
            CreateArticle(_) => "Article created",
            UpdateArticle { .. } => "Article updated",
            DeleteArticle(_) => "Article deleted",
            CreateAd(_) => "Advertisement created",
            UpdateAd { .. } => "Advertisement updated",
            SetAdActive { active: true, .. } => "Advertisement activated",
            SetAdActive { active: false, .. } => "Advertisement paused",
            DeleteAd(_) => "Advertisement deleted",
            ChangePassword(_) => "Password changed",
        }
    }
}

/// Hook key for a CSV export; each kind runs independently.
pub fn export_hook_key(kind: ExportKind) -> HookKey {
    let index = ExportKind::ALL.iter().position(|k| *k == kind).unwrap_or_default();
    HookKey::on(HookKind::Export, index as i64)
}

/// Execute `mutation` and normalize the outcome.
pub async fn run_mutation<B: Backend>(backend: &B, mutation: &Mutation) -> ActionResult<Ack> {
    use Mutation::*;
    let result = match mutation {
        CreateSection(draft) => backend.create_section(draft).await,
        UpdateSection { id, update } => backend.update_section(*id, update).await,
        ReorderSections(positions) => backend.reorder_sections(positions).await,
        DeleteSection(id) => backend.delete_section(*id).await,
        AddItem { section_id, draft } => backend.add_item(*section_id, draft).await,
        UpdateItem {
            section_id,
            item_id,
            draft,
        } => backend.update_item(*section_id, *item_id, draft).await,
        DeleteItem {
            section_id,
            item_id,
        } => backend.delete_item(*section_id, *item_id).await,
        ReorderItems {
            section_id,
            item_ids,
        } => backend.reorder_items(*section_id, item_ids).await,
        CreateCategory(draft) => backend.create_category(draft).await,
        UpdateCategory { id, draft } => backend.update_category(*id, draft).await,
        DeleteCategory(id) => backend.delete_category(*id).await,
        CreateArticle(draft) => backend.create_article(draft).await,
        UpdateArticle { id, draft } => backend.update_article(*id, draft).await,
        DeleteArticle(id) => backend.delete_article(*id).await,
        CreateAd(draft) => backend.create_ad(draft).await,
        UpdateAd { id, draft } => backend.update_ad(*id, draft).await,
        SetAdActive { id, active } => backend.set_ad_active(*id, *active).await,
        DeleteAd(id) => backend.delete_ad(*id).await,
        ChangePassword(change) => backend.change_password(change).await,
    };
    ActionResult::from_result(result, mutation.success_message())
}

/// Download a CSV export into `dir`, naming it from the response.
pub async fn run_export<B: Backend>(
    backend: &B,
    kind: ExportKind,
    default_name: &str,
    dir: &Path,
) -> ActionResult<PathBuf> {
    let result = match backend.export_csv(kind, default_name).await {
        Ok(download) => download.save_into(dir),
        Err(e) => Err(e),
    };
    match result {
        Ok(path) => {
            let message = format!("Saved {}", path.display());
            ActionResult::ok(path, message)
        }
        Err(e) => ActionResult::from_error(&e),
    }
}

/// Load one resource and wrap the outcome as a message.
pub async fn run_fetch<B: Backend>(backend: &B, resource: Resource) -> Message {
    let result = match resource {
        Resource::User => backend.me().await.map(Message::UserLoaded),
        Resource::Sections => backend.list_sections().await.map(Message::SectionsLoaded),
        Resource::Categories => backend
            .list_categories()
            .await
            .map(Message::CategoriesLoaded),
        Resource::Ads => backend.list_ads().await.map(Message::AdsLoaded),
        Resource::Articles { page } => backend
            .list_articles(&ArticleQuery::page(page))
            .await
            .map(Message::ArticlesLoaded),
        Resource::Article(id) => backend.get_article(id).await.map(Message::ArticleLoaded),
        Resource::AuditLog { page } => backend
            .list_audit_log(page)
            .await
            .map(Message::AuditLogLoaded),
    };
    result.unwrap_or_else(|e| {
        warn!("Fetching {:?} failed: {}", resource, e);
        Message::FetchFailed {
            resource,
            message: e.user_message(),
            unauthorized: e.is_unauthorized(),
        }
    })
}

/// Execute an action by spawning a background task
pub fn handle_action<B>(action: UpdateAction, backend: Arc<B>, msg_tx: mpsc::Sender<Message>)
where
    B: Backend + Sync + 'static,
{
    match action {
        UpdateAction::Fetch(resources) => {
            for resource in resources {
                let backend = Arc::clone(&backend);
                let tx = msg_tx.clone();
                tokio::spawn(async move {
                    let message = run_fetch(backend.as_ref(), resource).await;
                    send(&tx, message).await;
                });
            }
        }

        UpdateAction::RunMutation { ticket, mutation } => {
            tokio::spawn(async move {
                debug!("Running {:?}", ticket.key);
                let result = run_mutation(backend.as_ref(), &mutation).await.discard();
                send(&msg_tx, Message::MutationFinished { ticket, result }).await;
            });
        }

        UpdateAction::Export {
            ticket,
            kind,
            default_name,
            dir,
        } => {
            tokio::spawn(async move {
                let result = run_export(backend.as_ref(), kind, &default_name, &dir).await;
                send(&msg_tx, Message::ExportFinished { ticket, result }).await;
            });
        }
    }
}

async fn send(tx: &mpsc::Sender<Message>, message: Message) {
    if tx.send(message).await.is_err() {
        // The loop is gone; nothing left to update.
        debug!("Message channel closed, dropping result");
    }
}

/// Ticket plus action for `mutation`, or `None` while its hook is busy.
pub fn start_mutation(
    hooks: &mut crate::hooks::HookRegistry,
    mutation: Mutation,
) -> Option<(Ticket, UpdateAction)> {
    let ticket = hooks.begin(mutation.hook_key())?;
    Some((ticket, UpdateAction::RunMutation { ticket, mutation }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_api::test_utils::{FakeBackend, FakeFailure};
    use newsdesk_core::{AdKind, Advertisement, Category, Role};
    use tempfile::tempdir;

    fn category(id: CategoryId, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    #[tokio::test]
    async fn test_run_mutation_success_uses_server_message() {
        let backend = FakeBackend::default().with_categories(vec![category(3, "Sports")]);
        let result = run_mutation(&backend, &Mutation::DeleteCategory(3)).await;
        assert!(result.success);
        assert_eq!(result.message.as_deref(), Some("Category deleted"));
        assert_eq!(backend.calls(), vec!["delete_category(3)".to_string()]);
        assert!(backend.categories().is_empty());
    }

    #[tokio::test]
    async fn test_run_mutation_normalizes_failures() {
        let backend = FakeBackend::default();
        backend.fail_with(FakeFailure::Http(500, String::new()));
        let result = run_mutation(&backend, &Mutation::DeleteAd(1)).await;
        assert!(!result.success);
        assert_eq!(result.message.as_deref(), Some("Request failed (500)"));

        backend.fail_with(FakeFailure::Http(409, "Ad is scheduled".into()));
        let result = run_mutation(&backend, &Mutation::DeleteAd(1)).await;
        assert_eq!(result.message.as_deref(), Some("Ad is scheduled"));

        backend.fail_with(FakeFailure::Unauthorized);
        let result = run_mutation(&backend, &Mutation::DeleteAd(1)).await;
        assert!(result.unauthorized);
    }

    #[tokio::test]
    async fn test_pausing_an_ad_shows_on_refetch() {
        let ad = Advertisement {
            id: 4,
            name: "Spring sale".into(),
            kind: AdKind::Image,
            format: None,
            image_url: Some("https://img.test/sale.png".into()),
            script: None,
            target_url: Some("https://shop.test".into()),
            starts_at: None,
            ends_at: None,
            active: true,
        };
        let backend = FakeBackend::default().with_ads(vec![ad]);

        let result = run_mutation(&backend, &Mutation::SetAdActive { id: 4, active: false }).await;
        assert!(result.success);
        assert_eq!(backend.calls(), vec!["set_ad_active(4,false)".to_string()]);

        match run_fetch(&backend, Resource::Ads).await {
            Message::AdsLoaded(ads) => assert!(!ads[0].active),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_ad_never_reaches_the_network() {
        let backend = FakeBackend::default();
        let draft = AdDraft {
            name: "Promo".into(),
            kind: AdKind::Image,
            image_url: Some("https://img.test/a.png".into()),
            ..Default::default()
        };
        let result = run_mutation(&backend, &Mutation::CreateAd(draft)).await;
        assert!(!result.success);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_carries_unauthorized() {
        let backend = FakeBackend::new(vec![Role::Viewer]);
        backend.fail_with(FakeFailure::Unauthorized);
        match run_fetch(&backend, Resource::Sections).await {
            Message::FetchFailed {
                resource,
                unauthorized,
                ..
            } => {
                assert_eq!(resource, Resource::Sections);
                assert!(unauthorized);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_export_saves_with_server_filename() {
        let dir = tempdir().unwrap();
        let backend = FakeBackend::default();
        let result = run_export(&backend, ExportKind::Roles, "export.csv", dir.path()).await;
        assert!(result.success);
        assert_eq!(result.data, Some(dir.path().join("roles.csv")));

        let result = run_export(&backend, ExportKind::Users, "export.csv", dir.path()).await;
        assert_eq!(result.data, Some(dir.path().join("export.csv")));
    }

    #[tokio::test]
    async fn test_handle_action_reports_mutation_result() {
        let backend = Arc::new(FakeBackend::default());
        let (tx, mut rx) = mpsc::channel(4);
        let mut hooks = crate::hooks::HookRegistry::new();
        let (ticket, action) = start_mutation(&mut hooks, Mutation::DeleteSection(9)).unwrap();
        assert!(start_mutation(&mut hooks, Mutation::DeleteSection(9)).is_none());

        handle_action(action, backend, tx);
        match rx.recv().await {
            Some(Message::MutationFinished { ticket: got, result }) => {
                assert_eq!(got, ticket);
                assert!(result.success);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_export_keys_are_independent() {
        assert_ne!(export_hook_key(ExportKind::Roles), export_hook_key(ExportKind::Logs));
    }
}
