//! Content items, categories and articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advertisement::Upload;
use crate::validation::{min_len, require, ValidationErrors};

/// Server-assigned item identifier
pub type ItemId = i64;

/// Server-assigned category identifier
pub type CategoryId = i64;

/// Server-assigned article identifier
pub type ArticleId = i64;

/// Slug of the pseudo-category that shows every section
pub const HOME_CATEGORY: &str = "home";

/// News card size hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSize {
    Small,
    Medium,
    Large,
    #[serde(rename = "extralarge")]
    ExtraLarge,
}

impl CardSize {
    pub const ALL: [CardSize; 4] = [
        CardSize::Small,
        CardSize::Medium,
        CardSize::Large,
        CardSize::ExtraLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardSize::Small => "small",
            CardSize::Medium => "medium",
            CardSize::Large => "large",
            CardSize::ExtraLarge => "extralarge",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        CardSize::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// News card orientation hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" => Some(Orientation::Vertical),
            "horizontal" => Some(Orientation::Horizontal),
            _ => None,
        }
    }
}

/// A single news card, audio clip, ad creative or headline inside a section.
///
/// Which fields are populated depends on the owning section's type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(flatten)]
    hints: CardHints,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,

    /// Audio length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// Card size and orientation, never `ExtraLarge` with an orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCardHints")]
struct CardHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<CardSize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    orientation: Option<Orientation>,
}

/// Hints exactly as the server sent them
#[derive(Deserialize)]
struct RawCardHints {
    #[serde(default)]
    size: Option<CardSize>,
    #[serde(default)]
    orientation: Option<Orientation>,
}

impl From<RawCardHints> for CardHints {
    fn from(raw: RawCardHints) -> Self {
        // A stored extralarge keeps its size and loses the orientation
        let orientation = match raw.size {
            Some(CardSize::ExtraLarge) => None,
            _ => raw.orientation,
        };
        Self {
            size: raw.size,
            orientation,
        }
    }
}

impl ContentItem {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn size(&self) -> Option<CardSize> {
        self.hints.size
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.hints.orientation
    }

    /// Set the card size.
    ///
    /// `ExtraLarge` always spans the full width, so it clears the orientation.
    /// Any other size gets a vertical orientation when none is set.
    pub fn set_size(&mut self, size: CardSize) {
        self.hints.size = Some(size);
        if size == CardSize::ExtraLarge {
            self.hints.orientation = None;
        } else if self.hints.orientation.is_none() {
            self.hints.orientation = Some(Orientation::default());
        }
    }

    /// Set or clear the orientation.
    ///
    /// A non-null orientation cannot coexist with `ExtraLarge`; the size is
    /// stepped down to `Large`.
    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.hints.orientation = orientation;
        if orientation.is_some() && self.hints.size == Some(CardSize::ExtraLarge) {
            self.hints.size = Some(CardSize::Large);
        }
    }

    /// Whether this item belongs to the given category slug.
    ///
    /// The home pseudo-category matches everything.
    pub fn in_category(&self, slug: &str) -> bool {
        slug == HOME_CATEGORY
            || self
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(slug))
    }
}

/// Payload for creating or editing a content item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<CardSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl ItemDraft {
    /// Start a draft from an existing item (edit flow).
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            category: item.category.clone(),
            size: item.size(),
            orientation: item.orientation(),
            image_url: item.image_url.clone(),
            image_alt: item.image_alt.clone(),
            audio_url: item.audio_url.clone(),
            link_url: item.link_url.clone(),
            summary: item.summary.clone(),
            date: item.date.clone(),
            read_time: item.read_time.clone(),
            duration: item.duration,
        }
    }

    /// Apply a size with the same exclusivity rule as [`ContentItem::set_size`].
    pub fn set_size(&mut self, size: CardSize) {
        self.size = Some(size);
        if size == CardSize::ExtraLarge {
            self.orientation = None;
        } else if self.orientation.is_none() {
            self.orientation = Some(Orientation::default());
        }
    }

    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.orientation = orientation;
        if orientation.is_some() && self.size == Some(CardSize::ExtraLarge) {
            self.size = Some(CardSize::Large);
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(require("title", Some(&self.title)));
        errors.into_result()
    }
}

/// Article category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Payload for creating or renaming a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

impl CategoryDraft {
    /// Build a draft, deriving the slug from the name when left blank.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let name = name.into();
        let mut slug = slug.into();
        if slug.trim().is_empty() {
            slug = slugify(&name);
        }
        Self { name, slug }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(min_len("name", &self.name, 2));
        errors.check(require("slug", Some(&self.slug)));
        errors.into_result()
    }
}

/// Lowercase, ASCII-alphanumeric, dash-separated slug.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read_time: Option<String>,
}

/// Payload for creating or updating an article
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    /// Cover image sent as multipart alongside the fields
    #[serde(skip)]
    pub image_file: Option<Upload>,
}

/// Shortest accepted article title
pub const MIN_ARTICLE_TITLE_LEN: usize = 5;

impl ArticleDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(min_len("title", &self.title, MIN_ARTICLE_TITLE_LEN));
        errors.check(require("body", Some(&self.body)));
        if self.category_id.is_none() {
            errors.check(require("category", None));
        }
        errors.into_result()
    }
}
