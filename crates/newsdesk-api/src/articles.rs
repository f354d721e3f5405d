//! Article endpoints.

use reqwest::Method;
use serde::Serialize;

use newsdesk_core::prelude::*;
use newsdesk_core::{Article, ArticleDraft, ArticleId, CategoryId};

use crate::client::ApiClient;
use crate::response::{Ack, Page};

/// Default page size for article listings
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Paging and filter parameters for the article list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            category_id: None,
            search: None,
        }
    }
}

impl ArticleQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Default::default()
        }
    }
}

impl ApiClient {
    pub async fn list_articles(&self, query: &ArticleQuery) -> Result<Page<Article>> {
        self.get_with_query("articles", query).await
    }

    pub async fn get_article(&self, id: ArticleId) -> Result<Article> {
        self.get(&format!("articles/{id}")).await
    }

    /// JSON, or multipart when a cover image file is attached.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_payload(Method::POST, "articles", draft, draft.image_file.as_ref())
            .await
    }

    pub async fn update_article(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Ack> {
        draft.validate()?;
        self.send_payload(
            Method::PUT,
            &format!("articles/{id}"),
            draft,
            draft.image_file.as_ref(),
        )
        .await
    }

    pub async fn delete_article(&self, id: ArticleId) -> Result<Ack> {
        self.delete(&format!("articles/{id}")).await
    }
}
