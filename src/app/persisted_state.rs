// SPDX-License-Identifier: MPL-2.0
//! Application state persisted across launches in CBOR.
//!
//! Holds what the app remembers on its own, as opposed to the preferences the
//! user edits in `settings.toml`: the signed-in session, the exit dialog's
//! "don't ask again" choice, and the last folder an avatar was picked from.
//!
//! Load and save never fail hard. Problems come back as i18n warning keys
//! that the caller turns into toasts.

use super::paths::{self, AppDir};
use crate::domain::auth::Session;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Exit without the confirmation dialog.
    #[serde(default)]
    pub never_ask_exit: bool,

    /// Session restored on the next launch.
    #[serde(default)]
    pub session: Option<Session>,

    /// Folder the avatar picker opens in.
    #[serde(default)]
    pub last_avatar_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads state from the default location.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads state from a custom directory (`None` for the default one).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "state file unreadable: {err}");
                    (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), "state file cannot be opened: {err}");
                (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                )
            }
        }
    }

    /// Saves state to the default location.
    pub fn save(&self) -> Option<String> {
        self.save_to(None)
    }

    /// Saves state to a custom directory, creating it if needed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("notification-state-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-state-create-error".to_string()),
        }
    }

    /// Deletes the state file. A missing file is not an error.
    pub fn remove_from(base_dir: Option<PathBuf>) -> Option<String> {
        let path = Self::state_file_path_with_override(base_dir)?;
        match fs::remove_file(&path) {
            Ok(()) => None,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(path = %path.display(), "state file not removed: {err}");
                Some("notification-state-write-error".to_string())
            }
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::app_dir_with_override(AppDir::Data, base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Remembers the folder of a picked avatar file.
    pub fn set_last_avatar_directory_from_file(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_avatar_directory = Some(parent.to_path_buf());
        }
    }
}
