//! # newsdesk-core - Core Domain Types
//!
//! Foundation crate for Newsdesk. Provides the newsroom data model, page
//! composition, the edit-field model, client-side validation, permissions,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Data model
//! - [`Section`], [`SectionType`], [`SectionStyle`] - positioned, typed containers
//! - [`ContentItem`], [`CardSize`], [`Orientation`] - cards inside a section
//! - [`Category`], [`Article`] and their drafts
//! - [`Advertisement`], [`AdFormat`], [`AdDraft`]
//!
//! ### Page composition (`composition`)
//! - [`compose_page()`] - split sections into before/main/after/sidebar for a [`Route`]
//! - [`reorder_visible()`] - map a filtered reorder back onto the full list
//!
//! ### Editing (`edit`, `widget`)
//! - [`EditTarget`], [`EditType`], [`reduce_patch()`]
//! - [`widget_for()`] - section type to renderer dispatch
//!
//! ### Error Handling (`error`, `validation`)
//! - [`Error`] - error enum with `fatal` vs `recoverable` classification
//! - [`ValidationErrors`] - client-side form failures
//!
//! ## Prelude
//!
//! ```rust
//! use newsdesk_core::prelude::*;
//! ```

pub mod advertisement;
pub mod composition;
pub mod content;
pub mod edit;
pub mod error;
pub mod logging;
pub mod permissions;
pub mod section;
pub mod validation;
pub mod widget;

/// Prelude for common imports used throughout all Newsdesk crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use advertisement::{AdDraft, AdFormat, AdId, AdKind, AdSchedule, Advertisement, Upload};
pub use composition::{
    compose_page, reorder_sections, reorder_visible, visible_items, PageLayout, Route,
};
pub use content::{
    slugify, Article, ArticleDraft, ArticleId, CardSize, Category, CategoryDraft, CategoryId,
    ContentItem, ItemDraft, ItemId, Orientation, HOME_CATEGORY,
};
pub use edit::{
    format_duration, parse_duration, preset_source, reduce_patch, EditField, EditOptions,
    EditTarget, EditType, EditValues,
};
pub use error::{Error, Result, ResultExt, GENERIC_FAILURE_MESSAGE};
pub use permissions::{Capability, Permissions, Role};
pub use section::{
    is_hex_color, sort_by_position, Section, SectionDraft, SectionId, SectionPosition,
    SectionStyle, SectionType,
};
pub use validation::{
    PasswordChange, ValidationError, ValidationErrors, ValidationKind, MIN_PASSWORD_LEN,
};
pub use widget::{widget_for, WidgetKind};
