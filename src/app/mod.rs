// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens.
//!
//! The `App` struct wires together the components (home, shorts feed, live
//! player, settings, auth sheet), the session and the persisted preferences,
//! and translates component events into side effects such as backend calls
//! and config writes.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use persistence::StorageDirs;
pub use screen::Screen;

use crate::application::port::SharedBackend;
use crate::application::session::SessionContext;
use crate::i18n::fluent::I18n;
use crate::infrastructure::supabase::SupabaseClient;
use crate::ui::notifications::{self, Notification};
use crate::ui::state::BackGuard;
use crate::ui::theming::ThemeMode;
use crate::ui::{auth_sheet, exit_dialog, home, live, settings, shorts, ImageCache};
use config::{BackendEndpoint, Config};
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::AppState;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    dirs: StorageDirs,
    theme_mode: ThemeMode,
    session: SessionContext,
    /// Persisted application state (session, exit opt-out, avatar folder).
    app_state: AppState,
    home: home::State,
    feed: shorts::State,
    live: live::State,
    settings: settings::State,
    auth_sheet: auth_sheet::State,
    exit_dialog: exit_dialog::State,
    back_guard: BackGuard,
    images: ImageCache,
    window_id: Option<window::Id>,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("signed_in", &self.session.is_signed_in())
            .field("shorts", &self.feed.shorts().len())
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires a `Fn` boot closure; flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Connects to the configured backend and boots the application.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let dirs = StorageDirs::from_flags(flags.config_dir.as_deref(), flags.data_dir.as_deref());
        let loaded = config::load_with_override(dirs.config.clone());
        let endpoint = BackendEndpoint::from_env(&loaded.0.backend, flags.backend_url.clone());
        tracing::info!(?endpoint, "backend endpoint resolved");

        let backend: SharedBackend = Arc::new(SupabaseClient::new(&endpoint.url, &endpoint.anon_key));
        let (mut app, task) = Self::from_parts(flags, backend, dirs, loaded);
        if !endpoint.is_configured() {
            tracing::warn!("backend not configured, showing demo content only");
            app.notifications
                .push(Notification::warning("notification-backend-not-configured"));
        }
        (app, task)
    }

    /// Boots against an explicit backend: loads preferences and state,
    /// restores the persisted session and starts the first feed load.
    pub fn with_backend(flags: Flags, backend: SharedBackend) -> (Self, Task<Message>) {
        let dirs = StorageDirs::from_flags(flags.config_dir.as_deref(), flags.data_dir.as_deref());
        let loaded = config::load_with_override(dirs.config.clone());
        Self::from_parts(flags, backend, dirs, loaded)
    }

    fn from_parts(
        flags: Flags,
        backend: SharedBackend,
        dirs: StorageDirs,
        (config, config_warning): (Config, Option<String>),
    ) -> (Self, Task<Message>) {
        let (app_state, state_warning) = AppState::load_from(dirs.data.clone());
        let i18n = I18n::new(flags.lang, &config);

        let mut notifications = notifications::Manager::new();
        for key in [config_warning, state_warning].into_iter().flatten() {
            notifications.push(Notification::warning(key));
        }

        let mut app = App {
            i18n,
            screen: Screen::default(),
            theme_mode: config.general.theme_mode,
            session: SessionContext::init(backend, app_state.session.clone()),
            config,
            dirs,
            app_state,
            home: home::State::default(),
            feed: shorts::State::new(),
            live: live::State::default(),
            settings: settings::State::default(),
            auth_sheet: auth_sheet::State::new(),
            exit_dialog: exit_dialog::State::default(),
            back_guard: BackGuard::new(config::BACK_PRESS_WINDOW),
            images: ImageCache::new(),
            window_id: None,
            notifications,
        };

        let task = update::boot_tasks(&mut app.context());
        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        let ticking = self.notifications.has_notifications()
            || self.back_guard.is_primed()
            || (self.screen == Screen::Live && self.live.controls_visible());

        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(ticking),
        ])
    }

    fn context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            i18n: &mut self.i18n,
            screen: &mut self.screen,
            config: &mut self.config,
            dirs: &self.dirs,
            theme_mode: &mut self.theme_mode,
            session: &mut self.session,
            app_state: &mut self.app_state,
            home: &mut self.home,
            feed: &mut self.feed,
            live: &mut self.live,
            settings: &mut self.settings,
            auth_sheet: &mut self.auth_sheet,
            exit_dialog: &mut self.exit_dialog,
            back_guard: &mut self.back_guard,
            images: &mut self.images,
            window_id: &mut self.window_id,
            notifications: &mut self.notifications,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.context();

        match message {
            Message::Navbar(message) => update::handle_navbar_message(&mut ctx, message),
            Message::Home(message) => update::handle_home_message(&mut ctx, message),
            Message::Live(message) => update::handle_live_message(&mut ctx, message),
            Message::Settings(message) => update::handle_settings_message(&mut ctx, message),
            Message::About(message) => update::handle_about_message(&mut ctx, &message),
            Message::AuthSheet(message) => update::handle_auth_sheet_message(&mut ctx, message),
            Message::ExitDialog(message) => update::handle_exit_dialog_message(&mut ctx, message),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::Tick(now) => update::handle_tick(&mut ctx, now),
            Message::Back => update::handle_back(&mut ctx, Instant::now()),
            Message::WindowOpened(id) => {
                *ctx.window_id = Some(id);
                Task::none()
            }
            Message::WindowResized(id) => update::handle_window_resized(&mut ctx, id),
            Message::WindowModeChanged(mode) => update::handle_window_mode_changed(&mut ctx, mode),
            Message::SignedIn(result) => update::handle_signed_in(&mut ctx, result),
            Message::SignedUp { username, result } => {
                update::handle_signed_up(&mut ctx, username, result)
            }
            Message::SignedOut(result) => {
                if let Err(err) = result {
                    tracing::warn!("server-side sign-out failed: {err}");
                }
                Task::none()
            }
            Message::ProfileLoaded { user_id, result } => {
                update::handle_profile_loaded(&mut ctx, &user_id, result)
            }
            Message::FeedLoaded {
                generation,
                snapshot,
            } => update::handle_feed_loaded(&mut ctx, generation, snapshot),
            Message::MembershipsLoaded {
                generation,
                user_id,
                memberships,
            } => update::handle_memberships_loaded(&mut ctx, generation, &user_id, memberships),
            Message::ReactionWritten {
                generation,
                user_id,
                toggle,
                result,
            } => update::handle_reaction_written(&mut ctx, generation, &user_id, &toggle, result),
            Message::CommentsLoaded { short_id, result } => {
                update::handle_comments_loaded(&mut ctx, &short_id, result)
            }
            Message::CommentPosted { short_id, result } => {
                update::handle_comment_posted(&mut ctx, &short_id, result)
            }
            Message::AvatarFilePicked(path) => update::handle_avatar_file_picked(&mut ctx, path),
            Message::AvatarUpdated { user_id, result } => {
                update::handle_avatar_updated(&mut ctx, user_id, result)
            }
            Message::ImageLoaded { url, result } => {
                update::handle_image_loaded(&mut ctx, url, result)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            home: &self.home,
            feed: &self.feed,
            live: &self.live,
            settings: &self.settings,
            auth_sheet: &self.auth_sheet,
            exit_dialog: &self.exit_dialog,
            profile: self.session.profile(),
            signed_in: self.session.is_signed_in(),
            dark_mode: self.theme_mode.is_dark(),
            data_saver: self.config.data_saver(),
            images: &self.images,
            notifications: &self.notifications,
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn feed(&self) -> &shorts::State {
        &self.feed
    }

    #[must_use]
    pub fn home(&self) -> &home::State {
        &self.home
    }

    #[must_use]
    pub fn live(&self) -> &live::State {
        &self.live
    }

    #[must_use]
    pub fn auth_sheet(&self) -> &auth_sheet::State {
        &self.auth_sheet
    }

    #[must_use]
    pub fn exit_dialog(&self) -> &exit_dialog::State {
        &self.exit_dialog
    }

    #[must_use]
    pub fn settings(&self) -> &settings::State {
        &self.settings
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::feed::{FeedSnapshot, Reaction};
    use crate::domain::auth::{AuthUser, Session};
    use crate::domain::content::Short;
    use crate::domain::error::BackendError;
    use crate::test_utils::FakeBackend;
    use crate::ui::state::Toggle;
    use crate::ui::{about, navbar};
    use tempfile::{tempdir, TempDir};

    fn boot(temp: &TempDir) -> (App, Arc<FakeBackend>) {
        let fake = FakeBackend::new().shared();
        let flags = Flags {
            lang: Some("en-US".into()),
            data_dir: Some(temp.path().join("data").to_string_lossy().into_owned()),
            config_dir: Some(temp.path().join("config").to_string_lossy().into_owned()),
            backend_url: None,
        };
        let (app, _task) = App::with_backend(flags, fake.clone());
        (app, fake)
    }

    fn session(user_id: &str) -> Session {
        Session {
            access_token: format!("token-{user_id}"),
            refresh_token: None,
            user: AuthUser {
                id: user_id.into(),
                email: None,
            },
        }
    }

    fn short(id: &str) -> Short {
        Short {
            id: id.into(),
            title: format!("Clip {id}"),
            audio_name: None,
            channel_name: "TV3".into(),
            channel_logo_url: None,
            video_url: format!("https://cdn.example/{id}.mp4"),
            created_at: None,
        }
    }

    fn load_feed(app: &mut App, ids: &[&str]) {
        let generation = app.feed.generation();
        let _ = app.update(Message::FeedLoaded {
            generation,
            snapshot: FeedSnapshot {
                shorts: ids.iter().map(|id| short(id)).collect(),
                ..FeedSnapshot::default()
            },
        });
    }

    fn like(id: &str) -> Message {
        Message::Home(home::Message::Feed(shorts::Message::ToggleLike(id.into())))
    }

    #[test]
    fn boots_on_home_with_dark_theme() {
        let temp = tempdir().expect("temp dir");
        let (app, _) = boot(&temp);
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.theme_mode().is_dark());
        assert!(!app.session().is_signed_in());
        assert!(app.feed().is_loading());
    }

    #[test]
    fn double_back_on_home_prompts_exit() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);

        let _ = app.update(Message::Back);
        assert!(!app.exit_dialog().is_open());
        let _ = app.update(Message::Back);
        assert!(app.exit_dialog().is_open());

        let _ = app.update(Message::Back);
        assert!(!app.exit_dialog().is_open());
    }

    #[test]
    fn back_from_settings_returns_home() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);

        let _ = app.update(Message::Home(home::Message::OpenSettings));
        assert_eq!(app.screen(), Screen::Settings);
        let _ = app.update(Message::Settings(settings::Message::About));
        assert_eq!(app.screen(), Screen::About);
        let _ = app.update(Message::About(about::Message::BackToSettings));
        assert_eq!(app.screen(), Screen::Settings);

        let _ = app.update(Message::Back);
        assert_eq!(app.screen(), Screen::Home);
        assert!(!app.exit_dialog().is_open());
    }

    #[test]
    fn back_closes_auth_sheet_before_navigating() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::Navbar(navbar::Message::Live));
        let _ = app.update(Message::Navbar(navbar::Message::Profile));
        assert!(app.auth_sheet().is_open());

        let _ = app.update(Message::Back);
        assert!(!app.auth_sheet().is_open());
        assert_eq!(app.screen(), Screen::Live);
    }

    #[test]
    fn sign_in_persists_session_and_sign_out_clears_it() {
        let temp = tempdir().expect("temp dir");
        let (mut app, fake) = boot(&temp);

        let _ = app.update(Message::SignedIn(Ok(session("user-1"))));
        assert_eq!(app.session().user_id(), Some("user-1"));
        assert_eq!(fake.current_user_id().as_deref(), Some("user-1"));
        let (stored, _) = AppState::load_from(Some(temp.path().join("data")));
        assert_eq!(stored.session.map(|s| s.user.id).as_deref(), Some("user-1"));

        let _ = app.update(Message::AuthSheet(auth_sheet::Message::SignOut));
        assert!(!app.session().is_signed_in());
        let (stored, _) = AppState::load_from(Some(temp.path().join("data")));
        assert!(stored.session.is_none());
    }

    #[test]
    fn persisted_session_is_restored_on_boot() {
        let temp = tempdir().expect("temp dir");
        let state = AppState {
            session: Some(session("user-7")),
            ..AppState::default()
        };
        assert!(state.save_to(Some(temp.path().join("data"))).is_none());

        let (app, fake) = boot(&temp);
        assert_eq!(app.session().user_id(), Some("user-7"));
        assert_eq!(fake.current_user_id().as_deref(), Some("user-7"));
    }

    #[test]
    fn like_while_signed_out_opens_auth_sheet() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        load_feed(&mut app, &["s1"]);

        let _ = app.update(like("s1"));

        assert!(app.auth_sheet().is_open());
        assert!(!app.feed().reactions().is_on(Reaction::Like, "s1"));
    }

    #[test]
    fn failed_reaction_write_is_reverted() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::SignedIn(Ok(session("user-1"))));
        load_feed(&mut app, &["s1"]);

        let _ = app.update(like("s1"));
        assert!(app.feed().reactions().is_on(Reaction::Like, "s1"));
        assert_eq!(app.feed().reactions().like_count("s1"), 1);

        let _ = app.update(Message::ReactionWritten {
            generation: app.feed().generation(),
            user_id: "user-1".into(),
            toggle: Toggle {
                reaction: Reaction::Like,
                short_id: "s1".into(),
                on: true,
            },
            result: Err(BackendError::Network("offline".into())),
        });
        assert!(!app.feed().reactions().is_on(Reaction::Like, "s1"));
        assert_eq!(app.feed().reactions().like_count("s1"), 0);
        assert!(app.notifications().has_notifications());
    }

    #[test]
    fn reaction_failure_after_sign_out_is_dropped() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::SignedIn(Ok(session("user-1"))));
        load_feed(&mut app, &["s1"]);
        let generation = app.feed().generation();

        let _ = app.update(like("s1"));
        let _ = app.update(like("s1"));
        assert_eq!(app.feed().reactions().like_count("s1"), 0);

        let _ = app.update(Message::Settings(settings::Message::LogOut));
        assert!(!app.session().is_signed_in());

        let _ = app.update(Message::ReactionWritten {
            generation,
            user_id: "user-1".into(),
            toggle: Toggle {
                reaction: Reaction::Like,
                short_id: "s1".into(),
                on: false,
            },
            result: Err(BackendError::Network("offline".into())),
        });
        assert!(!app.feed().reactions().is_on(Reaction::Like, "s1"));
        assert_eq!(app.feed().reactions().like_count("s1"), 0);
    }

    #[test]
    fn stale_feed_response_is_ignored() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let stale = app.feed().generation();
        let _ = app.update(Message::Settings(settings::Message::ClearCache));
        let _ = app.update(Message::Settings(settings::Message::ConfirmClearCache));

        let _ = app.update(Message::FeedLoaded {
            generation: stale,
            snapshot: FeedSnapshot {
                shorts: vec![short("old")],
                ..FeedSnapshot::default()
            },
        });
        assert!(app.feed().shorts().is_empty());
    }

    #[test]
    fn exit_with_never_ask_is_persisted() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::Back);
        let _ = app.update(Message::Back);
        let _ = app.update(Message::ExitDialog(exit_dialog::Message::NeverAskToggled(true)));
        let _ = app.update(Message::ExitDialog(exit_dialog::Message::Exit));

        let (stored, _) = AppState::load_from(Some(temp.path().join("data")));
        assert!(stored.never_ask_exit);
    }

    #[test]
    fn dark_mode_toggle_is_persisted() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);

        let _ = app.update(Message::Settings(settings::Message::DarkModeToggled(false)));

        assert_eq!(app.theme_mode(), ThemeMode::Light);
        let (stored, _) = config::load_with_override(Some(temp.path().join("config")));
        assert_eq!(stored.general.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn clear_cache_resets_preferences_and_signs_out() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::SignedIn(Ok(session("user-1"))));
        let _ = app.update(Message::Settings(settings::Message::DarkModeToggled(false)));
        let _ = app.update(Message::Settings(settings::Message::DataSaverToggled(true)));

        let _ = app.update(Message::Settings(settings::Message::ClearCache));
        assert!(app.settings().is_confirming_clear());
        let _ = app.update(Message::Settings(settings::Message::ConfirmClearCache));

        assert!(!app.session().is_signed_in());
        assert!(app.theme_mode().is_dark());
        assert!(!app.config().data_saver());
        let (stored, _) = AppState::load_from(Some(temp.path().join("data")));
        assert!(stored.session.is_none());
    }

    #[test]
    fn opening_live_hides_nothing_until_fullscreen() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::Navbar(navbar::Message::Live));
        assert_eq!(app.screen(), Screen::Live);
        assert!(app.live().controls_visible());

        let _ = app.update(Message::Live(live::Message::ToggleFullscreen));
        assert!(app.live().is_fullscreen());
        let _ = app.update(Message::Back);
        assert!(!app.live().is_fullscreen());
        assert_eq!(app.screen(), Screen::Live);

        let _ = app.update(Message::Back);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn window_leaving_fullscreen_restores_live_chrome() {
        let temp = tempdir().expect("temp dir");
        let (mut app, _) = boot(&temp);
        let _ = app.update(Message::Navbar(navbar::Message::Live));
        let _ = app.update(Message::Live(live::Message::ToggleFullscreen));
        assert!(app.live().is_fullscreen());

        let _ = app.update(Message::WindowModeChanged(window::Mode::Windowed));
        assert!(!app.live().is_fullscreen());
        assert_eq!(app.screen(), Screen::Live);

        let _ = app.update(Message::WindowModeChanged(window::Mode::Fullscreen));
        assert!(app.live().is_fullscreen());
    }
}
