//! In-memory [`Backend`] for tests.

use std::sync::Mutex;

use newsdesk_core::prelude::*;
use newsdesk_core::{
    AdDraft, AdId, Advertisement, Article, ArticleDraft, ArticleId, Category, CategoryDraft,
    CategoryId, ContentItem, ItemDraft, ItemId, PasswordChange, Role, Section, SectionDraft,
    SectionId, SectionPosition,
};

use crate::articles::ArticleQuery;
use crate::audit::AuditEntry;
use crate::auth::CurrentUser;
use crate::backend::Backend;
use crate::download::Download;
use crate::exports::ExportKind;
use crate::response::{Ack, Page};
use crate::sections::SectionUpdate;

/// Canned failure returned by every call while set
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Unauthorized,
    Http(u16, String),
    Offline,
}

impl FakeFailure {
    fn to_error(&self) -> Error {
        match self {
            FakeFailure::Unauthorized => Error::Unauthorized,
            FakeFailure::Http(status, message) => Error::http(*status, message.clone()),
            FakeFailure::Offline => Error::request("connection refused"),
        }
    }
}

#[derive(Debug, Default)]
struct FakeData {
    sections: Vec<Section>,
    categories: Vec<Category>,
    ads: Vec<Advertisement>,
    articles: Vec<Article>,
    next_id: i64,
}

/// Records every call and serves data from memory.
#[derive(Debug)]
pub struct FakeBackend {
    data: Mutex<FakeData>,
    user: CurrentUser,
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<FakeFailure>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new(vec![Role::Admin])
    }
}

impl FakeBackend {
    pub fn new(roles: Vec<Role>) -> Self {
        Self {
            data: Mutex::new(FakeData {
                next_id: 1000,
                ..Default::default()
            }),
            user: CurrentUser {
                id: 1,
                name: "Test Editor".to_string(),
                email: None,
                roles,
            },
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    pub fn with_sections(self, sections: Vec<Section>) -> Self {
        self.data.lock().unwrap().sections = sections;
        self
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.data.lock().unwrap().categories = categories;
        self
    }

    pub fn with_ads(self, ads: Vec<Advertisement>) -> Self {
        self.data.lock().unwrap().ads = ads;
        self
    }

    pub fn fail_with(&self, failure: FakeFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// Names of the calls made so far, e.g. `"delete_category(3)"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sections(&self) -> Vec<Section> {
        self.data.lock().unwrap().sections.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.data.lock().unwrap().categories.clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.failure.lock().unwrap().as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn ack(&self, message: &str) -> Result<Ack> {
        Ok(Ack {
            message: Some(message.to_string()),
            id: None,
        })
    }

    fn next_id(&self) -> i64 {
        let mut data = self.data.lock().unwrap();
        data.next_id += 1;
        data.next_id
    }
}

impl Backend for FakeBackend {
    async fn me(&self) -> Result<CurrentUser> {
        self.record("me")?;
        Ok(self.user.clone())
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<Ack> {
        change.validate()?;
        self.record("change_password")?;
        self.ack("Password updated")
    }

    async fn list_sections(&self) -> Result<Vec<Section>> {
        self.record("list_sections")?;
        Ok(self.sections())
    }

    async fn create_section(&self, draft: &SectionDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("create_section({})", draft.section_type))?;
        let id = self.next_id();
        let mut section = Section::new(id, draft.section_type.clone(), draft.position);
        section.title = draft.title.clone();
        section.style = draft.style.clone();
        self.data.lock().unwrap().sections.push(section);
        self.ack("Section created")
    }

    async fn update_section(&self, id: SectionId, update: &SectionUpdate) -> Result<Ack> {
        self.record(format!("update_section({id})"))?;
        let mut data = self.data.lock().unwrap();
        let section = data
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::not_found("Section"))?;
        if update.title.is_some() {
            section.title = update.title.clone();
        }
        section.style = update.style.clone();
        self.ack("Section updated")
    }

    async fn reorder_sections(&self, positions: &[SectionPosition]) -> Result<Ack> {
        self.record("reorder_sections")?;
        let mut data = self.data.lock().unwrap();
        for p in positions {
            if let Some(s) = data.sections.iter_mut().find(|s| s.id == p.id) {
                s.position = p.position;
            }
        }
        self.ack("Order saved")
    }

    async fn delete_section(&self, id: SectionId) -> Result<Ack> {
        self.record(format!("delete_section({id})"))?;
        self.data.lock().unwrap().sections.retain(|s| s.id != id);
        self.ack("Section deleted")
    }

    async fn add_item(&self, section_id: SectionId, draft: &ItemDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("add_item({section_id})"))?;
        let id = self.next_id();
        let mut data = self.data.lock().unwrap();
        if let Some(section) = data.sections.iter_mut().find(|s| s.id == section_id) {
            let mut item = ContentItem::new(id, draft.title.clone());
            item.category = draft.category.clone();
            section.items.push(item);
        }
        self.ack("Item added")
    }

    async fn update_item(
        &self,
        section_id: SectionId,
        item_id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("update_item({section_id},{item_id})"))?;
        let mut data = self.data.lock().unwrap();
        let item = data
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .and_then(|s| s.items.iter_mut().find(|i| i.id == item_id))
            .ok_or_else(|| Error::not_found("Item"))?;
        item.title = draft.title.clone();
        item.category = draft.category.clone();
        item.summary = draft.summary.clone();
        item.image_url = draft.image_url.clone();
        item.image_alt = draft.image_alt.clone();
        item.link_url = draft.link_url.clone();
        item.date = draft.date.clone();
        item.read_time = draft.read_time.clone();
        item.duration = draft.duration;
        if let Some(size) = draft.size {
            item.set_size(size);
        }
        item.set_orientation(draft.orientation);
        self.ack("Item updated")
    }

    async fn delete_item(&self, section_id: SectionId, item_id: ItemId) -> Result<Ack> {
        self.record(format!("delete_item({section_id},{item_id})"))?;
        let mut data = self.data.lock().unwrap();
        if let Some(section) = data.sections.iter_mut().find(|s| s.id == section_id) {
            section.items.retain(|i| i.id != item_id);
        }
        self.ack("Item deleted")
    }

    async fn reorder_items(&self, section_id: SectionId, item_ids: &[ItemId]) -> Result<Ack> {
        self.record(format!("reorder_items({section_id},{item_ids:?})"))?;
        let mut data = self.data.lock().unwrap();
        if let Some(section) = data.sections.iter_mut().find(|s| s.id == section_id) {
            section
                .items
                .sort_by_key(|i| item_ids.iter().position(|id| *id == i.id));
        }
        self.ack("Order saved")
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.record("list_categories")?;
        Ok(self.categories())
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("create_category({})", draft.slug))?;
        let id = self.next_id();
        self.data.lock().unwrap().categories.push(Category {
            id,
            name: draft.name.clone(),
            slug: draft.slug.clone(),
        });
        self.ack("Category created")
    }

    async fn update_category(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("update_category({id})"))?;
        self.ack("Category updated")
    }

    async fn delete_category(&self, id: CategoryId) -> Result<Ack> {
        self.record(format!("delete_category({id})"))?;
        self.data.lock().unwrap().categories.retain(|c| c.id != id);
        self.ack("Category deleted")
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        self.record(format!("list_articles({})", query.page))?;
        Ok(Page {
            items: self.data.lock().unwrap().articles.clone(),
            page: Some(query.page),
            per_page: Some(query.per_page),
            total: None,
            total_pages: Some(1),
        })
    }

    async fn get_article(&self, id: ArticleId) -> Result<Article> {
        self.record(format!("get_article({id})"))?;
        self.data
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("Article"))
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<Ack> {
        draft.validate()?;
        self.record("create_article")?;
        self.ack("Article created")
    }

    async fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("update_article({id})"))?;
        self.ack("Article updated")
    }

    async fn delete_article(&self, id: ArticleId) -> Result<Ack> {
        self.record(format!("delete_article({id})"))?;
        self.data.lock().unwrap().articles.retain(|a| a.id != id);
        self.ack("Article deleted")
    }

    async fn list_ads(&self) -> Result<Vec<Advertisement>> {
        self.record("list_ads")?;
        Ok(self.data.lock().unwrap().ads.clone())
    }

    async fn create_ad(&self, draft: &AdDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("create_ad({})", draft.name))?;
        self.ack("Advertisement created")
    }

    async fn update_ad(&self, id: AdId, draft: &AdDraft) -> Result<Ack> {
        draft.validate()?;
        self.record(format!("update_ad({id})"))?;
        self.ack("Advertisement updated")
    }

    async fn set_ad_active(&self, id: AdId, active: bool) -> Result<Ack> {
        self.record(format!("set_ad_active({id},{active})"))?;
        if let Some(ad) = self.data.lock().unwrap().ads.iter_mut().find(|a| a.id == id) {
            ad.active = active;
        }
        self.ack("Advertisement updated")
    }

    async fn delete_ad(&self, id: AdId) -> Result<Ack> {
        self.record(format!("delete_ad({id})"))?;
        self.data.lock().unwrap().ads.retain(|a| a.id != id);
        self.ack("Advertisement deleted")
    }

    async fn export_csv(&self, kind: ExportKind, default_name: &str) -> Result<Download> {
        self.record(format!("export_csv({kind})"))?;
        let filename = match kind {
            ExportKind::Roles => "roles.csv".to_string(),
            _ => default_name.to_string(),
        };
        Ok(Download::new(filename, b"id,name\n".to_vec()))
    }

    async fn list_audit_log(&self, page: u32) -> Result<Page<AuditEntry>> {
        self.record(format!("list_audit_log({page})"))?;
        Ok(Page::default())
    }
}
