// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[backend]` - Hosted backend project URL and public anon key
//! - `[content]` - Data saver
//!
//! # Backend Endpoint
//!
//! `TV3_HUB_BACKEND_URL` and `TV3_HUB_BACKEND_KEY` take precedence over the
//! `[backend]` section, and `--backend-url` over both for the URL. With no
//! URL or key the app runs offline on the demo feed.
//!
//! # Examples
//!
//! ```no_run
//! use tv3_home_hub::app::config;
//!
//! let (mut config, _warning) = config::load();
//! config.content.data_saver = Some(true);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths::{self, AppDir};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the backend project URL.
pub const ENV_BACKEND_URL: &str = "TV3_HUB_BACKEND_URL";

/// Environment variable overriding the backend anon key.
pub const ENV_BACKEND_KEY: &str = "TV3_HUB_BACKEND_KEY";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Hosted backend project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Public (anon) API key. Not a secret, but still not logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anon_key: Option<String>,
}

/// Content preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentConfig {
    #[serde(default = "default_data_saver", skip_serializing_if = "Option::is_none")]
    pub data_saver: Option<bool>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_saver: default_data_saver(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub content: ContentConfig,
}

impl Config {
    /// Whether data saver is on.
    #[must_use]
    pub fn data_saver(&self) -> bool {
        self.content.data_saver.unwrap_or(DEFAULT_DATA_SAVER)
    }
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn default_data_saver() -> Option<bool> {
    Some(DEFAULT_DATA_SAVER)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Backend Endpoint
// =============================================================================

/// Project URL and anon key after applying overrides.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BackendEndpoint {
    pub url: String,
    pub anon_key: String,
}

impl std::fmt::Debug for BackendEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendEndpoint")
            .field("url", &self.url)
            .field("anon_key", &if self.anon_key.is_empty() { "" } else { "***" })
            .finish()
    }
}

impl BackendEndpoint {
    /// Resolves the endpoint from explicit values, most specific first.
    #[must_use]
    pub fn resolve(
        config: &BackendConfig,
        cli_url: Option<String>,
        env_url: Option<String>,
        env_key: Option<String>,
    ) -> Self {
        let pick = |values: [Option<String>; 3]| {
            values
                .into_iter()
                .flatten()
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
                .unwrap_or_default()
        };
        Self {
            url: pick([cli_url, env_url, config.url.clone()]),
            anon_key: pick([env_key, config.anon_key.clone(), None]),
        }
    }

    /// Resolves the endpoint from the process environment.
    #[must_use]
    pub fn from_env(config: &BackendConfig, cli_url: Option<String>) -> Self {
        Self::resolve(
            config,
            cli_url,
            std::env::var(ENV_BACKEND_URL).ok(),
            std::env::var(ENV_BACKEND_KEY).ok(),
        )
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}

// =============================================================================
// Load / Save
// =============================================================================

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::app_dir_with_override(AppDir::Config, base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "config load failed: {err}");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            backend: BackendConfig {
                url: Some("https://demo.supabase.co".into()),
                anon_key: Some("anon".into()),
            },
            content: ContentConfig {
                data_saver: Some(true),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn default_config_is_dark_without_data_saver() {
        let config = Config::default();
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
        assert!(!config.data_saver());
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\ntheme_mode = \"LIGHT\"\n").expect("write");

        let loaded = load_from_path(&config_path).expect("loads");
        assert_eq!(loaded.general.theme_mode, ThemeMode::Light);
        assert_eq!(loaded.content, ContentConfig::default());
        assert_eq!(loaded.backend, BackendConfig::default());
    }

    #[test]
    fn save_with_override_and_load_with_override_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        assert!(base_dir.join("settings.toml").exists());

        let (loaded, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_none());
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn backend_endpoint_prefers_cli_then_env_then_file() {
        let file = BackendConfig {
            url: Some("https://file.supabase.co".into()),
            anon_key: Some("file-key".into()),
        };

        let from_file = BackendEndpoint::resolve(&file, None, None, None);
        assert_eq!(from_file.url, "https://file.supabase.co");
        assert_eq!(from_file.anon_key, "file-key");

        let from_env = BackendEndpoint::resolve(
            &file,
            None,
            Some("https://env.supabase.co".into()),
            Some("env-key".into()),
        );
        assert_eq!(from_env.url, "https://env.supabase.co");
        assert_eq!(from_env.anon_key, "env-key");

        let from_cli = BackendEndpoint::resolve(
            &file,
            Some("https://cli.supabase.co".into()),
            Some("https://env.supabase.co".into()),
            None,
        );
        assert_eq!(from_cli.url, "https://cli.supabase.co");
        assert_eq!(from_cli.anon_key, "file-key");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let endpoint = BackendEndpoint::resolve(
            &BackendConfig::default(),
            Some("  ".into()),
            Some(String::new()),
            None,
        );
        assert!(!endpoint.is_configured());
        assert_eq!(endpoint, BackendEndpoint::default());
    }

    #[test]
    fn endpoint_debug_hides_key() {
        let endpoint = BackendEndpoint {
            url: "https://demo.supabase.co".into(),
            anon_key: "secret-anon".into(),
        };
        assert!(!format!("{endpoint:?}").contains("secret-anon"));
    }
}
