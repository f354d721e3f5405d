//! The backend seam the application layer depends on.
//!
//! [`ApiClient`] is the production implementation; tests use the in-memory
//! fake from `test_utils`.

use newsdesk_core::prelude::*;
use newsdesk_core::{
    AdDraft, AdId, Advertisement, Article, ArticleDraft, ArticleId, Category, CategoryDraft,
    CategoryId, ItemDraft, ItemId, PasswordChange, Section, SectionDraft, SectionId,
    SectionPosition,
};

use crate::articles::ArticleQuery;
use crate::audit::AuditEntry;
use crate::auth::CurrentUser;
use crate::client::ApiClient;
use crate::download::Download;
use crate::exports::ExportKind;
use crate::response::{Ack, Page};
use crate::sections::SectionUpdate;

/// Every REST operation the client performs
#[trait_variant::make(Backend: Send)]
pub trait LocalBackend {
    async fn me(&self) -> Result<CurrentUser>;
    async fn change_password(&self, change: &PasswordChange) -> Result<Ack>;

    async fn list_sections(&self) -> Result<Vec<Section>>;
    async fn create_section(&self, draft: &SectionDraft) -> Result<Ack>;
    async fn update_section(&self, id: SectionId, update: &SectionUpdate) -> Result<Ack>;
    async fn reorder_sections(&self, positions: &[SectionPosition]) -> Result<Ack>;
    async fn delete_section(&self, id: SectionId) -> Result<Ack>;
    async fn add_item(&self, section_id: SectionId, draft: &ItemDraft) -> Result<Ack>;
    async fn update_item(
        &self,
        section_id: SectionId,
        item_id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Ack>;
    async fn delete_item(&self, section_id: SectionId, item_id: ItemId) -> Result<Ack>;
    async fn reorder_items(&self, section_id: SectionId, item_ids: &[ItemId]) -> Result<Ack>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, draft: &CategoryDraft) -> Result<Ack>;
    async fn update_category(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Ack>;
    async fn delete_category(&self, id: CategoryId) -> Result<Ack>;

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>>;
    async fn get_article(&self, id: ArticleId) -> Result<Article>;
    async fn create_article(&self, draft: &ArticleDraft) -> Result<Ack>;
    async fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Ack>;
    async fn delete_article(&self, id: ArticleId) -> Result<Ack>;

    async fn list_ads(&self) -> Result<Vec<Advertisement>>;
    async fn create_ad(&self, draft: &AdDraft) -> Result<Ack>;
    async fn update_ad(&self, id: AdId, draft: &AdDraft) -> Result<Ack>;
    async fn set_ad_active(&self, id: AdId, active: bool) -> Result<Ack>;
    async fn delete_ad(&self, id: AdId) -> Result<Ack>;

    async fn export_csv(&self, kind: ExportKind, default_name: &str) -> Result<Download>;
    async fn list_audit_log(&self, page: u32) -> Result<Page<AuditEntry>>;
}

impl Backend for ApiClient {
    async fn me(&self) -> Result<CurrentUser> {
        ApiClient::me(self).await
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<Ack> {
        ApiClient::change_password(self, change).await
    }

    async fn list_sections(&self) -> Result<Vec<Section>> {
        ApiClient::list_sections(self).await
    }

    async fn create_section(&self, draft: &SectionDraft) -> Result<Ack> {
        ApiClient::create_section(self, draft).await
    }

    async fn update_section(&self, id: SectionId, update: &SectionUpdate) -> Result<Ack> {
        ApiClient::update_section(self, id, update).await
    }

    async fn reorder_sections(&self, positions: &[SectionPosition]) -> Result<Ack> {
        ApiClient::reorder_sections(self, positions).await
    }

    async fn delete_section(&self, id: SectionId) -> Result<Ack> {
        ApiClient::delete_section(self, id).await
    }

    async fn add_item(&self, section_id: SectionId, draft: &ItemDraft) -> Result<Ack> {
        ApiClient::add_item(self, section_id, draft).await
    }

    async fn update_item(
        &self,
        section_id: SectionId,
        item_id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Ack> {
        ApiClient::update_item(self, section_id, item_id, draft).await
    }

    async fn delete_item(&self, section_id: SectionId, item_id: ItemId) -> Result<Ack> {
        ApiClient::delete_item(self, section_id, item_id).await
    }

    async fn reorder_items(&self, section_id: SectionId, item_ids: &[ItemId]) -> Result<Ack> {
        ApiClient::reorder_items(self, section_id, item_ids).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        ApiClient::list_categories(self).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Ack> {
        ApiClient::create_category(self, draft).await
    }

    async fn update_category(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Ack> {
        ApiClient::update_category(self, id, draft).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<Ack> {
        ApiClient::delete_category(self, id).await
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        ApiClient::list_articles(self, query).await
    }

    async fn get_article(&self, id: ArticleId) -> Result<Article> {
        ApiClient::get_article(self, id).await
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<Ack> {
        ApiClient::create_article(self, draft).await
    }

    async fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Ack> {
        ApiClient::update_article(self, id, draft).await
    }

    async fn delete_article(&self, id: ArticleId) -> Result<Ack> {
        ApiClient::delete_article(self, id).await
    }

    async fn list_ads(&self) -> Result<Vec<Advertisement>> {
        ApiClient::list_ads(self).await
    }

    async fn create_ad(&self, draft: &AdDraft) -> Result<Ack> {
        ApiClient::create_ad(self, draft).await
    }

    async fn update_ad(&self, id: AdId, draft: &AdDraft) -> Result<Ack> {
        ApiClient::update_ad(self, id, draft).await
    }

    async fn set_ad_active(&self, id: AdId, active: bool) -> Result<Ack> {
        ApiClient::set_ad_active(self, id, active).await
    }

    async fn delete_ad(&self, id: AdId) -> Result<Ack> {
        ApiClient::delete_ad(self, id).await
    }

    async fn export_csv(&self, kind: ExportKind, default_name: &str) -> Result<Download> {
        ApiClient::export_csv(self, kind, default_name).await
    }

    async fn list_audit_log(&self, page: u32) -> Result<Page<AuditEntry>> {
        ApiClient::list_audit_log(self, page).await
    }
}
