//! Category endpoints.

use reqwest::Method;

use newsdesk_core::prelude::*;
use newsdesk_core::{Category, CategoryDraft, CategoryId};

use crate::client::ApiClient;
use crate::response::{Ack, Page};

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let page: Page<Category> = self.get("categories").await?;
        Ok(page.items)
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_json(Method::POST, "categories", draft).await
    }

    pub async fn update_category(&self, id: CategoryId, draft: &CategoryDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_json(Method::PUT, &format!("categories/{id}"), draft)
            .await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<Ack> {
        self.delete(&format!("categories/{id}")).await
    }
}
