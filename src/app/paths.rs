// SPDX-License-Identifier: MPL-2.0
//! Application directories.
//!
//! Two directories are used: the config directory holds `settings.toml`, the
//! data directory holds `state.cbor` (session and dialog preferences).
//!
//! # Resolution Order
//!
//! 1. **Explicit override** passed to [`app_dir_with_override`] (tests)
//! 2. **CLI arguments** `--data-dir` / `--config-dir`, set once via [`init_cli_overrides`]
//! 3. **Environment variables** `TV3_HUB_DATA_DIR` / `TV3_HUB_CONFIG_DIR` (non-empty)
//! 4. **Platform default** from `dirs`, with the application name appended

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "TV3HomeHub";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "TV3_HUB_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TV3_HUB_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Which application directory to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppDir {
    /// Persisted application state.
    Data,
    /// User preferences.
    Config,
}

impl AppDir {
    fn env_var(self) -> &'static str {
        match self {
            AppDir::Data => ENV_DATA_DIR,
            AppDir::Config => ENV_CONFIG_DIR,
        }
    }

    fn cli_override(self) -> Option<PathBuf> {
        let cell = match self {
            AppDir::Data => &CLI_DATA_DIR,
            AppDir::Config => &CLI_CONFIG_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn platform_base(self) -> Option<PathBuf> {
        match self {
            AppDir::Data => dirs::data_dir(),
            AppDir::Config => dirs::config_dir(),
        }
    }
}

/// Records the `--data-dir` / `--config-dir` arguments.
///
/// Only the first call has an effect; later calls are logged and ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err()
        || CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err()
    {
        tracing::warn!("directory overrides already initialized, ignoring");
    }
}

/// Resolves an application directory, `None` if the platform has none.
pub fn app_dir(dir: AppDir) -> Option<PathBuf> {
    app_dir_with_override(dir, None)
}

/// Resolves an application directory; `override_path` wins when set.
pub fn app_dir_with_override(dir: AppDir, override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = dir.cli_override() {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(dir.env_var()) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    dir.platform_base().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn platform_default_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        for dir in [AppDir::Data, AppDir::Config] {
            std::env::remove_var(dir.env_var());
            if let Some(path) = app_dir(dir) {
                assert!(path.to_string_lossy().contains(APP_NAME));
                assert!(path.is_absolute());
            }
        }
    }

    #[test]
    fn override_path_takes_precedence() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/env/path");

        let override_path = PathBuf::from("/override/path");
        assert_eq!(
            app_dir_with_override(AppDir::Data, Some(override_path.clone())),
            Some(override_path)
        );

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn env_var_overrides_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/test/config/dir");

        assert_eq!(
            app_dir(AppDir::Config),
            Some(PathBuf::from("/test/config/dir"))
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(path) = app_dir(AppDir::Data) {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }
}
