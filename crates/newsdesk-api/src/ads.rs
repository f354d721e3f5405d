//! Advertisement endpoints.

use reqwest::Method;
use serde::Serialize;

use newsdesk_core::prelude::*;
use newsdesk_core::{AdDraft, AdId, Advertisement};

use crate::client::ApiClient;
use crate::response::{Ack, Page};

#[derive(Serialize)]
struct ActiveFlag {
    active: bool,
}

impl ApiClient {
    pub async fn list_ads(&self) -> Result<Vec<Advertisement>> {
        let page: Page<Advertisement> = self.get("ads").await?;
        Ok(page.items)
    }

    /// Multipart when an image file is attached, JSON otherwise.
    pub async fn create_ad(&self, draft: &AdDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_payload(Method::POST, "ads", draft, draft.image_file.as_ref())
            .await
    }

    pub async fn update_ad(&self, id: AdId, draft: &AdDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_payload(
            Method::PUT,
            &format!("ads/{id}"),
            draft,
            draft.image_file.as_ref(),
        )
        .await
    }

    pub async fn set_ad_active(&self, id: AdId, active: bool) -> Result<Ack> {
        self.send_json(
            Method::PATCH,
            &format!("ads/{id}/active"),
            &ActiveFlag { active },
        )
        .await
    }

    pub async fn delete_ad(&self, id: AdId) -> Result<Ack> {
        self.delete(&format!("ads/{id}")).await
    }
}
