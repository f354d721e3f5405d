//! # newsdesk-api - REST Client
//!
//! Talks to the newsroom backend over JSON/HTTP.
//!
//! Depends on [`newsdesk_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Client
//! - [`ApiClient`] - reqwest-based client with bearer auth
//! - [`ClientConfig`] - base URL, timeout and token
//!
//! ### Responses
//! - [`Page`] - list response (`items` / `sections` / `logs`)
//! - [`ActionResult`] - uniform `{success, message, data}` outcome
//! - [`decode_response()`] - status/body classification
//!
//! ### Downloads
//! - [`filename_from_disposition()`] - `Content-Disposition` filename parsing
//! - [`Download`] - file bytes plus name
//!
//! ### Backend seam
//! - [`Backend`] - every REST operation; implemented by [`ApiClient`]

pub mod ads;
pub mod articles;
pub mod audit;
pub mod auth;
pub mod backend;
pub mod categories;
pub mod client;
pub mod download;
pub mod exports;
pub mod response;
pub mod sections;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use articles::{ArticleQuery, DEFAULT_PER_PAGE};
pub use audit::AuditEntry;
pub use auth::CurrentUser;
pub use backend::{Backend, LocalBackend};
pub use client::{form_fields, ApiClient, ClientConfig};
pub use download::{filename_from_disposition, Download};
pub use exports::ExportKind;
pub use response::{decode_response, server_message, Ack, ActionResult, Page, ServerMessage};
pub use sections::SectionUpdate;
