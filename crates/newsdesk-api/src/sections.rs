//! Section and section-item endpoints.

use reqwest::Method;
use serde::Serialize;

use newsdesk_core::prelude::*;
use newsdesk_core::{ItemDraft, ItemId, Section, SectionDraft, SectionId, SectionPosition, SectionStyle};

use crate::client::ApiClient;
use crate::response::{Ack, Page};

/// Title and style changes for an existing section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub style: SectionStyle,
}

#[derive(Serialize)]
struct ReorderSections<'a> {
    positions: &'a [SectionPosition],
}

#[derive(Serialize)]
struct ReorderItems<'a> {
    item_ids: &'a [ItemId],
}

impl ApiClient {
    pub async fn list_sections(&self) -> Result<Vec<Section>> {
        let page: Page<Section> = self.get("sections").await?;
        Ok(page.items)
    }

    pub async fn create_section(&self, draft: &SectionDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_json(Method::POST, "sections", draft).await
    }

    pub async fn update_section(&self, id: SectionId, update: &SectionUpdate) -> Result<Ack> {
        update.style.validate()?;
        self.send_json(Method::PATCH, &format!("sections/{id}"), update)
            .await
    }

    pub async fn reorder_sections(&self, positions: &[SectionPosition]) -> Result<Ack> {
        self.send_json(
            Method::PUT,
            "sections/reorder",
            &ReorderSections { positions },
        )
        .await
    }

    pub async fn delete_section(&self, id: SectionId) -> Result<Ack> {
        self.delete(&format!("sections/{id}")).await
    }

    pub async fn add_item(&self, section_id: SectionId, draft: &ItemDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_json(Method::POST, &format!("sections/{section_id}/items"), draft)
            .await
    }

    pub async fn update_item(
        &self,
        section_id: SectionId,
        item_id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Ack> {
        draft.validate()?;
        self.send_json(
            Method::PATCH,
            &format!("sections/{section_id}/items/{item_id}"),
            draft,
        )
        .await
    }

    pub async fn delete_item(&self, section_id: SectionId, item_id: ItemId) -> Result<Ack> {
        self.delete(&format!("sections/{section_id}/items/{item_id}"))
            .await
    }

    /// Persist a full item order for one section.
    pub async fn reorder_items(&self, section_id: SectionId, item_ids: &[ItemId]) -> Result<Ack> {
        self.send_json(
            Method::PUT,
            &format!("sections/{section_id}/items/reorder"),
            &ReorderItems { item_ids },
        )
        .await
    }
}
