//! Configuration types for Newsdesk
//!
//! `Settings` mirrors `config.toml`. Every section and field has a default
//! so a partial file is always valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use newsdesk_core::{EditOptions, HOME_CATEGORY};

/// Application settings (`<config_dir>/newsdesk/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub editor: EditorSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// Backend connection
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token_env: default_token_env(),
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Token from the configured environment variable, if set.
    pub fn token_from_env(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_token_env() -> String {
    "NEWSDESK_TOKEN".to_string()
}

/// Presentation
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default = "default_category")]
    pub default_category: String,

    #[serde(default = "default_true")]
    pub show_sidebar: bool,

    /// Ticks a toast stays on screen
    #[serde(default = "default_toast_ticks")]
    pub toast_ticks: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            show_sidebar: true,
            toast_ticks: default_toast_ticks(),
        }
    }
}

fn default_category() -> String {
    HOME_CATEGORY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_toast_ticks() -> u32 {
    60
}

/// Edit modal choices
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EditorSettings {
    #[serde(default = "default_quick_dates")]
    pub quick_dates: Vec<String>,

    #[serde(default = "default_image_preset_base")]
    pub image_preset_base: String,

    #[serde(default = "default_image_preset_categories")]
    pub image_preset_categories: Vec<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            quick_dates: default_quick_dates(),
            image_preset_base: default_image_preset_base(),
            image_preset_categories: default_image_preset_categories(),
        }
    }
}

impl EditorSettings {
    /// Modal options, with the category list taken from the backend.
    pub fn edit_options(&self, categories: Vec<String>) -> EditOptions {
        EditOptions {
            categories,
            quick_dates: self.quick_dates.clone(),
            image_presets: self.image_preset_categories.clone(),
            image_preset_base: self.image_preset_base.clone(),
        }
    }
}

fn default_quick_dates() -> Vec<String> {
    vec![
        "Today".to_string(),
        "Yesterday".to_string(),
        "This week".to_string(),
    ]
}

fn default_image_preset_base() -> String {
    "https://images.example.com/presets".to_string()
}

fn default_image_preset_categories() -> Vec<String> {
    ["politics", "sports", "culture", "economy"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// CSV export
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExportSettings {
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Used when the server does not name the file
    #[serde(default = "default_filename")]
    pub default_filename: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            default_filename: default_filename(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_filename() -> String {
    "export.csv".to_string()
}
