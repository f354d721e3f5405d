//! Current user and password change.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use newsdesk_core::prelude::*;
use newsdesk_core::{PasswordChange, Permissions, Role};

use crate::client::ApiClient;
use crate::response::Ack;

/// Signed-in user as reported by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn permissions(&self) -> Permissions {
        Permissions::new(self.roles.clone())
    }
}

#[derive(Serialize)]
struct PasswordPayload<'a> {
    current_password: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

impl ApiClient {
    pub async fn me(&self) -> Result<CurrentUser> {
        self.get("auth/me").await
    }

    /// Validated locally first; an invalid change never hits the network.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<Ack> {
        change.validate()?;
        let payload = PasswordPayload {
            current_password: &change.current,
            new_password: &change.new,
            confirm_password: &change.confirm,
        };
        self.send_json(Method::POST, "auth/password", &payload)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_roles() {
        let user: CurrentUser =
            serde_json::from_str(r#"{"id": 1, "name": "Ana", "roles": ["editor"]}"#).unwrap();
        assert!(user.permissions().can(newsdesk_core::Capability::EditContent));
    }
}
