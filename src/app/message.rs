// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::feed::{FeedSnapshot, Memberships};
use crate::application::session::AuthError;
use crate::domain::auth::Session;
use crate::domain::content::{CommentView, Profile};
use crate::domain::error::BackendError;
use crate::error::Error;
use crate::ui::state::Toggle;
use crate::ui::{about, auth_sheet, exit_dialog, home, live, navbar, notifications, settings};
use iced::window;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages and carry the results of backend tasks.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Home(home::Message),
    Live(live::Message),
    Settings(settings::Message),
    About(about::Message),
    AuthSheet(auth_sheet::Message),
    ExitDialog(exit_dialog::Message),
    Notification(notifications::NotificationMessage),
    /// Periodic tick for toasts, the back-press window and player controls.
    Tick(Instant),
    /// Back input (Escape or the mouse back button).
    Back,
    /// The main window is known; fullscreen requests need its id.
    WindowOpened(window::Id),
    /// The window was resized; its mode may have changed underneath us.
    WindowResized(window::Id),
    WindowModeChanged(window::Mode),

    SignedIn(Result<Session, AuthError>),
    SignedUp {
        username: String,
        result: Result<Option<Session>, AuthError>,
    },
    SignedOut(Result<(), BackendError>),
    ProfileLoaded {
        user_id: String,
        result: Result<Option<Profile>, BackendError>,
    },
    FeedLoaded {
        generation: u64,
        snapshot: FeedSnapshot,
    },
    MembershipsLoaded {
        generation: u64,
        user_id: String,
        memberships: Memberships,
    },
    ReactionWritten {
        generation: u64,
        user_id: String,
        toggle: Toggle,
        result: Result<(), BackendError>,
    },
    CommentsLoaded {
        short_id: String,
        result: Result<Vec<CommentView>, BackendError>,
    },
    CommentPosted {
        short_id: String,
        result: Result<CommentView, BackendError>,
    },
    AvatarFilePicked(Option<PathBuf>),
    AvatarUpdated {
        user_id: String,
        result: Result<(), Error>,
    },
    ImageLoaded {
        url: String,
        result: Result<Vec<u8>, BackendError>,
    },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for `state.cbor`).
    /// Takes precedence over `TV3_HUB_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for `settings.toml`).
    /// Takes precedence over `TV3_HUB_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional backend project URL, overriding config and environment.
    pub backend_url: Option<String>,
}
