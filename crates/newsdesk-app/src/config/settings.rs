//! Settings loader for `config.toml`

use std::path::{Path, PathBuf};

use newsdesk_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "newsdesk";

/// `<config_dir>/newsdesk`, or `./.newsdesk` when the platform has no
/// config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".newsdesk"))
}

/// Load settings from `<dir>/config.toml`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default `config.toml` into `config_dir` unless one exists.
pub fn init_config_dir(config_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(config_dir)
        .map_err(|e| Error::config(format!("Failed to create {:?}: {}", config_dir, e)))?;

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(config_path)
}

const DEFAULT_CONFIG: &str = r#"# Newsdesk configuration

[api]
base_url = "http://localhost:8080/api"
timeout_secs = 30
# Environment variable the bearer token is read from
token_env = "NEWSDESK_TOKEN"

[ui]
default_category = "home"
show_sidebar = true
toast_ticks = 60        # ~6 seconds at the default tick rate

[editor]
quick_dates = ["Today", "Yesterday", "This week"]
image_preset_base = "https://images.example.com/presets"
image_preset_categories = ["politics", "sports", "culture", "economy"]

[export]
download_dir = "."
default_filename = "export.csv"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let temp = tempdir().unwrap();
        let settings = load_settings(temp.path());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let config = r#"
[api]
base_url = "https://news.example.com/api"

[editor]
quick_dates = ["Now"]
"#;
        std::fs::write(temp.path().join("config.toml"), config).unwrap();

        let settings = load_settings(temp.path());
        assert_eq!(settings.api.base_url, "https://news.example.com/api");
        assert_eq!(settings.editor.quick_dates, vec!["Now".to_string()]);
        assert_eq!(settings.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("config.toml"), "not valid toml {{{{").unwrap();
        assert_eq!(load_settings(temp.path()), Settings::default());
    }

    #[test]
    fn test_init_config_dir_writes_valid_default() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("newsdesk");
        let path = init_config_dir(&dir).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Settings = toml::from_str(&content).expect("default config should parse");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn test_init_config_dir_idempotent() {
        let temp = tempdir().unwrap();
        let path = init_config_dir(temp.path()).unwrap();
        std::fs::write(&path, "[ui]\nshow_sidebar = false\n").unwrap();

        init_config_dir(temp.path()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("show_sidebar = false"));
    }
}
