// SPDX-License-Identifier: MPL-2.0
//! Configuration and state persistence.
//!
//! Saves never abort the flow that triggered them: a failed write is logged
//! and surfaced as a warning toast.

use super::config::{self, Config};
use super::persisted_state::AppState;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use std::path::PathBuf;

/// Where settings and state files live. `None` uses the resolved default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageDirs {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
}

impl StorageDirs {
    #[must_use]
    pub fn from_flags(config_dir: Option<&str>, data_dir: Option<&str>) -> Self {
        Self {
            config: config_dir.map(PathBuf::from),
            data: data_dir.map(PathBuf::from),
        }
    }
}

/// Writes `settings.toml`.
pub fn persist_preferences(
    config: &Config,
    dirs: &StorageDirs,
    notifications: &mut notifications::Manager,
) {
    if let Err(err) = config::save_with_override(config, dirs.config.clone()) {
        tracing::warn!("failed to save config: {err}");
        notifications.push_unique(Notification::warning("notification-config-save-error"));
    }
}

/// Writes `state.cbor`.
pub fn persist_state(
    state: &AppState,
    dirs: &StorageDirs,
    notifications: &mut notifications::Manager,
) {
    if let Some(key) = state.save_to(dirs.data.clone()) {
        notifications.push_unique(Notification::warning(key));
    }
}

/// Switches to the next available locale, persists it and confirms it with
/// a toast naming the language.
pub fn cycle_language(
    i18n: &mut I18n,
    config: &mut Config,
    dirs: &StorageDirs,
    notifications: &mut notifications::Manager,
) {
    let locale = i18n.next_locale();
    i18n.set_locale(locale.clone());
    config.general.language = Some(locale.to_string());
    persist_preferences(config, dirs, notifications);

    let language = i18n.tr(&format!("language-name-{locale}"));
    notifications.push(
        Notification::info("notification-language-changed").with_arg("language", language),
    );
}

/// Resets settings to defaults, keeping the backend endpoint, and deletes
/// the state file.
pub fn reset_local_data(
    config: &mut Config,
    state: &mut AppState,
    dirs: &StorageDirs,
    notifications: &mut notifications::Manager,
) {
    let backend = config.backend.clone();
    *config = Config {
        backend,
        ..Config::default()
    };
    persist_preferences(config, dirs, notifications);

    *state = AppState::default();
    if let Some(key) = AppState::remove_from(dirs.data.clone()) {
        notifications.push_unique(Notification::warning(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theming::ThemeMode;
    use tempfile::tempdir;

    fn dirs(root: &std::path::Path) -> StorageDirs {
        StorageDirs {
            config: Some(root.join("config")),
            data: Some(root.join("data")),
        }
    }

    #[test]
    fn preferences_round_trip_through_settings_file() {
        let temp = tempdir().expect("temp dir");
        let dirs = dirs(temp.path());
        let mut manager = notifications::Manager::new();
        let mut config = Config::default();
        config.general.theme_mode = ThemeMode::Light;
        config.content.data_saver = Some(true);

        persist_preferences(&config, &dirs, &mut manager);

        let (loaded, warning) = config::load_with_override(dirs.config.clone());
        assert!(warning.is_none());
        assert_eq!(loaded, config);
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn unwritable_config_warns() {
        let temp = tempdir().expect("temp dir");
        let dirs = dirs(temp.path());
        let config_dir = dirs.config.clone().expect("config dir");
        std::fs::create_dir_all(config_dir.join("settings.toml")).expect("blocking directory");
        let mut manager = notifications::Manager::new();

        persist_preferences(&Config::default(), &dirs, &mut manager);

        assert_eq!(manager.visible_count(), 1);
    }

    #[test]
    fn reset_keeps_backend_and_removes_state() {
        let temp = tempdir().expect("temp dir");
        let dirs = dirs(temp.path());
        let mut manager = notifications::Manager::new();

        let mut config = Config::default();
        config.backend.url = Some("https://project.example".into());
        config.general.theme_mode = ThemeMode::Light;
        let mut state = AppState {
            never_ask_exit: true,
            ..AppState::default()
        };
        persist_state(&state, &dirs, &mut manager);

        reset_local_data(&mut config, &mut state, &dirs, &mut manager);

        assert_eq!(config.backend.url.as_deref(), Some("https://project.example"));
        assert_eq!(config.general.theme_mode, Config::default().general.theme_mode);
        assert!(!state.never_ask_exit);
        let (reloaded, _) = AppState::load_from(dirs.data.clone());
        assert!(!reloaded.never_ask_exit);
    }

    #[test]
    fn cycling_language_persists_choice() {
        let temp = tempdir().expect("temp dir");
        let dirs = dirs(temp.path());
        let mut manager = notifications::Manager::new();
        let mut config = Config::default();
        let mut i18n = I18n::new(Some("en-US".into()), &config);

        cycle_language(&mut i18n, &mut config, &dirs, &mut manager);

        assert_eq!(i18n.current_locale().to_string(), "fr");
        assert_eq!(config.general.language.as_deref(), Some("fr"));
        let (loaded, _) = config::load_with_override(dirs.config.clone());
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
        assert_eq!(manager.visible_count(), 1);
    }
}
