//! Response shapes shared by every endpoint, and normalization of outcomes
//! into [`ActionResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use newsdesk_core::{Error, Result, GENERIC_FAILURE_MESSAGE};

/// A list response, paginated or not.
///
/// The backend names the array `items`, `sections` or `logs` depending on
/// the endpoint; all three land in [`Page::items`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "sections", alias = "logs")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "perPage")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default, alias = "totalPages")]
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        match (self.page, self.total_pages) {
            (Some(page), Some(total)) => page < total,
            _ => false,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: None,
            per_page: None,
            total: None,
            total_pages: None,
        }
    }
}

/// Body of a successful mutation: `{ "message": ..., ... }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

/// Uniform outcome of an action hook. Errors never escape past this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The failure was a 401; the UI should ask the user to sign in again.
    #[serde(skip)]
    pub unauthorized: bool,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            unauthorized: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            unauthorized: false,
        }
    }

    /// Normalize any outcome.
    ///
    /// `success_message` is used when the server did not say anything itself.
    pub fn from_result(result: Result<T>, success_message: &str) -> Self
    where
        T: ServerMessage,
    {
        match result {
            Ok(data) => {
                let message = data
                    .server_message()
                    .unwrap_or_else(|| success_message.to_string());
                Self::ok(data, message)
            }
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn from_error(error: &Error) -> Self {
        if error.is_recoverable() {
            tracing::warn!("Action failed: {}", error);
        } else {
            tracing::error!("Action failed: {:?}", error);
        }
        let message = error.user_message();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            success: false,
            message: Some(message),
            data: None,
            unauthorized: error.is_unauthorized(),
        }
    }

    /// Drop the payload, keeping the outcome.
    pub fn discard(self) -> ActionResult<()> {
        ActionResult {
            success: self.success,
            message: self.message,
            data: self.data.map(|_| ()),
            unauthorized: self.unauthorized,
        }
    }

    pub fn message_or_default(&self) -> &str {
        match &self.message {
            Some(m) => m.as_str(),
            None if self.success => "Done",
            None => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Payloads that may carry a message from the server.
pub trait ServerMessage {
    fn server_message(&self) -> Option<String> {
        None
    }
}

impl ServerMessage for Ack {
    fn server_message(&self) -> Option<String> {
        self.message.clone().filter(|m| !m.trim().is_empty())
    }
}

impl ServerMessage for () {}
impl ServerMessage for crate::download::Download {}
impl<T> ServerMessage for Page<T> {}
impl<T> ServerMessage for Vec<T> {}

/// Pull a human-readable message out of an error body.
///
/// Looks at `message`, then `error`, then `detail`. A plain-text body is
/// returned as-is when short enough to show.
pub fn server_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return ["message", "error", "detail"]
            .iter()
            .filter_map(|key| match value.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(Value::Object(inner)) => inner
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .next();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() || text.len() > 200 || text.starts_with('<') {
        None
    } else {
        Some(text.to_string())
    }
}

/// Turn a raw status + body into a decoded value or a classified error.
pub fn decode_response<T: serde::de::DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    match status {
        200..=299 => {
            let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
                b"{}"
            } else {
                body
            };
            serde_json::from_slice(body).map_err(|e| Error::decode(e.to_string()))
        }
        401 => Err(Error::Unauthorized),
        404 => Err(Error::http(
            status,
            server_message(body).unwrap_or_else(|| "Not found".to_string()),
        )),
        _ => Err(Error::http(status, server_message(body).unwrap_or_default())),
    }
}
