//! Page sections: positioned, typed containers of content items.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::ContentItem;
use crate::validation::{ValidationError, ValidationErrors};

/// Server-assigned section identifier
pub type SectionId = i64;

static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color regex is valid")
});

/// Section type tag as sent by the backend.
///
/// Tags this client does not know are kept in [`SectionType::Unknown`] so a
/// newer backend never breaks deserialization of the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Breaking,
    Trending,
    Featured,
    Mosaic,
    AdSmall,
    AdSkyscraper,
    AdVerticalSm,
    AdLarge,
    Sidebar,
    SideAudios,
    MainContent,
    List,
    Video,
    Shorts,
    Custom,
    Audios,
    Unknown(String),
}

impl SectionType {
    /// Every known type, in the order offered by the "new section" form.
    pub const KNOWN: [SectionType; 16] = [
        SectionType::Breaking,
        SectionType::Trending,
        SectionType::Featured,
        SectionType::Mosaic,
        SectionType::MainContent,
        SectionType::List,
        SectionType::Video,
        SectionType::Shorts,
        SectionType::Audios,
        SectionType::Custom,
        SectionType::Sidebar,
        SectionType::SideAudios,
        SectionType::AdSmall,
        SectionType::AdSkyscraper,
        SectionType::AdVerticalSm,
        SectionType::AdLarge,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Breaking => "breaking",
            SectionType::Trending => "trending",
            SectionType::Featured => "featured",
            SectionType::Mosaic => "mosaic",
            SectionType::AdSmall => "ad-small",
            SectionType::AdSkyscraper => "ad-skyscraper",
            SectionType::AdVerticalSm => "ad-verticalsm",
            SectionType::AdLarge => "ad-large",
            SectionType::Sidebar => "sidebar",
            SectionType::SideAudios => "sideaudios",
            SectionType::MainContent => "maincontent",
            SectionType::List => "list",
            SectionType::Video => "video",
            SectionType::Shorts => "shorts",
            SectionType::Custom => "custom",
            SectionType::Audios => "audios",
            SectionType::Unknown(tag) => tag,
        }
    }

    /// Parse a wire tag. Never fails: unrecognised tags become `Unknown`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "breaking" => SectionType::Breaking,
            "trending" => SectionType::Trending,
            "featured" => SectionType::Featured,
            "mosaic" => SectionType::Mosaic,
            "ad-small" => SectionType::AdSmall,
            "ad-skyscraper" => SectionType::AdSkyscraper,
            "ad-verticalsm" => SectionType::AdVerticalSm,
            "ad-large" => SectionType::AdLarge,
            "sidebar" => SectionType::Sidebar,
            "sideaudios" => SectionType::SideAudios,
            "maincontent" => SectionType::MainContent,
            "list" => SectionType::List,
            "video" => SectionType::Video,
            "shorts" => SectionType::Shorts,
            "custom" => SectionType::Custom,
            "audios" => SectionType::Audios,
            _ => SectionType::Unknown(tag.to_string()),
        }
    }

    /// Types collected into the persistent sidebar column.
    pub fn is_sidebar_widget(&self) -> bool {
        matches!(
            self,
            SectionType::Sidebar
                | SectionType::SideAudios
                | SectionType::AdSmall
                | SectionType::AdSkyscraper
                | SectionType::AdVerticalSm
        )
    }

    pub fn is_main_content(&self) -> bool {
        matches!(self, SectionType::MainContent)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SectionType::Unknown(_))
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> String {
        match self {
            SectionType::AdSmall => "Ad (small)".to_string(),
            SectionType::AdSkyscraper => "Ad (skyscraper)".to_string(),
            SectionType::AdVerticalSm => "Ad (vertical)".to_string(),
            SectionType::AdLarge => "Ad (large)".to_string(),
            SectionType::SideAudios => "Sidebar audios".to_string(),
            SectionType::MainContent => "Main content".to_string(),
            SectionType::Unknown(tag) => format!("Unknown ({tag})"),
            other => {
                let s = other.as_str();
                let mut chars = s.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl From<String> for SectionType {
    fn from(tag: String) -> Self {
        SectionType::parse(&tag)
    }
}

impl From<SectionType> for String {
    fn from(section_type: SectionType) -> Self {
        section_type.as_str().to_string()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-section presentation overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl SectionStyle {
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.font_family.is_none() && self.text_color.is_none()
    }

    /// Colours must be `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("background_color", &self.background_color),
            ("text_color", &self.text_color),
        ] {
            if let Some(color) = value {
                if !is_hex_color(color) {
                    errors.push(ValidationError::invalid(field, "must be a hex colour"));
                }
            }
        }
        errors.into_result()
    }
}

/// Whether `value` is a CSS hex colour.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_REGEX.is_match(value)
}

/// A positioned, typed container of content items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub section_type: SectionType,

    #[serde(default)]
    pub position: i32,

    #[serde(flatten)]
    pub style: SectionStyle,

    #[serde(default)]
    pub items: Vec<ContentItem>,
}

impl Section {
    pub fn new(id: SectionId, section_type: SectionType, position: i32) -> Self {
        Self {
            id,
            title: None,
            section_type,
            position,
            style: SectionStyle::default(),
            items: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_items(mut self, items: Vec<ContentItem>) -> Self {
        self.items = items;
        self
    }

    /// Title to show, falling back to the type label.
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(t) if !t.trim().is_empty() => t.clone(),
            _ => self.section_type.label(),
        }
    }

    pub fn item(&self, item_id: crate::content::ItemId) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// Stable sort by position. Ties keep their fetch order.
pub fn sort_by_position(sections: &mut [Section]) {
    sections.sort_by_key(|s| s.position);
}

/// Payload for creating a section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDraft {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub position: i32,
    #[serde(flatten)]
    pub style: SectionStyle,
}

impl SectionDraft {
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !self.section_type.is_known() {
            errors.push(ValidationError::invalid("type", "is not a supported section type"));
        }
        if self.position < 0 {
            errors.push(ValidationError::invalid("position", "must not be negative"));
        }
        if let Err(style_errors) = self.style.validate() {
            for e in style_errors.iter() {
                errors.push(e.clone());
            }
        }
        errors.into_result()
    }
}

/// One entry of a reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPosition {
    pub id: SectionId,
    pub position: i32,
}
