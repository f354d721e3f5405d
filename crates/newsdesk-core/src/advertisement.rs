//! Advertisement creatives and their schedule.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{require, ValidationError, ValidationErrors};

/// Server-assigned advertisement identifier
pub type AdId = i64;

/// How the creative is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdKind {
    #[default]
    Image,
    Script,
}

impl AdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdKind::Image => "image",
            AdKind::Script => "script",
        }
    }
}

/// Standard creative sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdFormat {
    Leaderboard,
    Billboard,
    MediumRectangle,
    LargeRectangle,
    Skyscraper,
    WideSkyscraper,
    HalfPage,
    MobileBanner,
    SmallSquare,
    VerticalBanner,
}

impl AdFormat {
    pub const ALL: [AdFormat; 10] = [
        AdFormat::Leaderboard,
        AdFormat::Billboard,
        AdFormat::MediumRectangle,
        AdFormat::LargeRectangle,
        AdFormat::Skyscraper,
        AdFormat::WideSkyscraper,
        AdFormat::HalfPage,
        AdFormat::MobileBanner,
        AdFormat::SmallSquare,
        AdFormat::VerticalBanner,
    ];

    /// Pixel `(width, height)` of the creative.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AdFormat::Leaderboard => (728, 90),
            AdFormat::Billboard => (970, 250),
            AdFormat::MediumRectangle => (300, 250),
            AdFormat::LargeRectangle => (336, 280),
            AdFormat::Skyscraper => (160, 600),
            AdFormat::WideSkyscraper => (300, 600),
            AdFormat::HalfPage => (300, 600),
            AdFormat::MobileBanner => (320, 50),
            AdFormat::SmallSquare => (200, 200),
            AdFormat::VerticalBanner => (120, 240),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdFormat::Leaderboard => "leaderboard",
            AdFormat::Billboard => "billboard",
            AdFormat::MediumRectangle => "medium-rectangle",
            AdFormat::LargeRectangle => "large-rectangle",
            AdFormat::Skyscraper => "skyscraper",
            AdFormat::WideSkyscraper => "wide-skyscraper",
            AdFormat::HalfPage => "half-page",
            AdFormat::MobileBanner => "mobile-banner",
            AdFormat::SmallSquare => "small-square",
            AdFormat::VerticalBanner => "vertical-banner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        AdFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.dimensions();
        write!(f, "{} ({w}x{h})", self.as_str())
    }
}

/// Display-only schedule state. The server decides what is actually shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdSchedule {
    Inactive,
    Scheduled,
    Running,
    Expired,
}

impl AdSchedule {
    pub fn label(&self) -> &'static str {
        match self {
            AdSchedule::Inactive => "inactive",
            AdSchedule::Scheduled => "scheduled",
            AdSchedule::Running => "running",
            AdSchedule::Expired => "expired",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: AdId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AdKind,
    #[serde(default)]
    pub format: Option<AdFormat>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
}

impl Advertisement {
    pub fn schedule(&self, now: DateTime<Utc>) -> AdSchedule {
        if !self.active {
            return AdSchedule::Inactive;
        }
        if self.starts_at.is_some_and(|start| now < start) {
            return AdSchedule::Scheduled;
        }
        if self.ends_at.is_some_and(|end| now > end) {
            return AdSchedule::Expired;
        }
        AdSchedule::Running
    }
}

/// Local image file sent alongside an ad or article payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Guess a MIME type from the file extension.
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime = match filename
            .rsplit('.')
            .next()
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Self {
            filename,
            mime: mime.to_string(),
            bytes,
        }
    }
}

/// Create/update payload for an advertisement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AdKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<AdFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub active: bool,
    #[serde(skip)]
    pub image_file: Option<Upload>,
}

impl AdDraft {
    /// Client-side checks run before anything is sent.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(require("name", Some(&self.name)));

        match self.kind {
            AdKind::Image => {
                if self.format.is_none() {
                    errors.check(require("format", None));
                }
                if self.image_file.is_none() {
                    errors.check(require("image", self.image_url.as_deref()));
                }
                errors.check(require("target_url", self.target_url.as_deref()));
            }
            AdKind::Script => {
                errors.check(require("script", self.script.as_deref()));
            }
        }

        if let (Some(start), Some(end)) = (self.starts_at, self.ends_at) {
            if end < start {
                errors.push(ValidationError::invalid("ends_at", "must be after the start date"));
            }
        }
        errors.into_result()
    }
}
