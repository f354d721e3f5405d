//! Activity log.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use newsdesk_core::prelude::*;

use crate::client::ApiClient;
use crate::response::Page;

/// One recorded admin action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    #[serde(default, alias = "user")]
    pub actor: Option<String>,
    pub action: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub async fn list_audit_log(&self, page: u32) -> Result<Page<AuditEntry>> {
        self.get_with_query("audit-logs", &[("page", page.max(1))])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::decode_response;

    #[test]
    fn test_audit_page_decodes_logs_array() {
        let body = br#"{
            "logs": [{"id": 1, "user": "ana", "action": "delete_category", "created_at": "2024-03-01T10:00:00Z"}],
            "page": 1, "total_pages": 1
        }"#;
        let page: Page<AuditEntry> = decode_response(200, body).unwrap();
        assert_eq!(page.items[0].actor.as_deref(), Some("ana"));
        assert!(!page.has_next());
    }
}
