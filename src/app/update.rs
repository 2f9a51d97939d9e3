// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application update loop.
//!
//! Components report what the user asked for through their `Event`s; the
//! handlers here turn those into state changes and backend tasks. Backend
//! calls always run as `Task::perform` futures and come back as `Message`s.

use super::config::Config;
use super::persisted_state::AppState;
use super::persistence::{self, StorageDirs};
use super::{Message, Screen};
use crate::application::feed;
use crate::application::port::SharedBackend;
use crate::application::session::{self, SessionContext};
use crate::domain::auth::Session;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::notifications::{self, Notification};
use crate::ui::state::{BackGuard, BackOutcome};
use crate::ui::theming::ThemeMode;
use crate::ui::{about, auth_sheet, exit_dialog, home, live, navbar, settings, shorts};
use crate::ui::ImageCache;
use iced::{window, Task};
use std::path::PathBuf;
use std::time::Instant;

/// Mutable view of the application state shared by the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a mut I18n,
    pub screen: &'a mut Screen,
    pub config: &'a mut Config,
    pub dirs: &'a StorageDirs,
    pub theme_mode: &'a mut ThemeMode,
    pub session: &'a mut SessionContext,
    pub app_state: &'a mut AppState,
    pub home: &'a mut home::State,
    pub feed: &'a mut shorts::State,
    pub live: &'a mut live::State,
    pub settings: &'a mut settings::State,
    pub auth_sheet: &'a mut auth_sheet::State,
    pub exit_dialog: &'a mut exit_dialog::State,
    pub back_guard: &'a mut BackGuard,
    pub images: &'a mut ImageCache,
    pub window_id: &'a mut Option<window::Id>,
    pub notifications: &'a mut notifications::Manager,
}

impl UpdateContext<'_> {
    fn backend(&self) -> SharedBackend {
        self.session.backend()
    }

    fn user_id(&self) -> Option<String> {
        self.session.user_id().map(str::to_string)
    }
}

// =============================================================================
// Navigation
// =============================================================================

pub fn handle_navbar_message(ctx: &mut UpdateContext<'_>, message: navbar::Message) -> Task<Message> {
    let tab = match *ctx.screen {
        Screen::Live => navbar::Tab::Live,
        _ => navbar::Tab::Home,
    };
    match navbar::update(&message, tab) {
        navbar::Event::None => Task::none(),
        navbar::Event::OpenHome => switch_screen(ctx, Screen::Home),
        navbar::Event::OpenLive => switch_screen(ctx, Screen::Live),
        navbar::Event::OpenProfile => {
            ctx.auth_sheet.open();
            Task::none()
        }
    }
}

/// Changes screen, leaving fullscreen when the player goes away.
pub fn switch_screen(ctx: &mut UpdateContext<'_>, target: Screen) -> Task<Message> {
    if *ctx.screen == target {
        return Task::none();
    }
    let task = if *ctx.screen == Screen::Live && ctx.live.exit_fullscreen() {
        set_window_mode(*ctx.window_id, false)
    } else {
        Task::none()
    };
    if target == Screen::Live {
        ctx.live.enter(Instant::now());
    }
    *ctx.screen = target;
    task
}

fn set_window_mode(window_id: Option<window::Id>, fullscreen: bool) -> Task<Message> {
    // Without a known window only the local flag changes.
    let Some(window_id) = window_id else {
        return Task::none();
    };
    let mode = if fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(window_id, mode)
}

/// Asks the window for its mode while the live player is shown, so a
/// fullscreen change made outside the app is picked up.
pub fn handle_window_resized(ctx: &mut UpdateContext<'_>, id: window::Id) -> Task<Message> {
    if *ctx.screen != Screen::Live {
        return Task::none();
    }
    window::mode(id).map(Message::WindowModeChanged)
}

pub fn handle_window_mode_changed(ctx: &mut UpdateContext<'_>, mode: window::Mode) -> Task<Message> {
    if ctx.live.sync_fullscreen(mode == window::Mode::Fullscreen) {
        tracing::debug!(?mode, "window mode changed outside the app");
    }
    Task::none()
}

/// Handles back input: overlays close first, then fullscreen, then the
/// screen stack and finally the exit guard.
pub fn handle_back(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    if ctx.exit_dialog.is_open() {
        exit_dialog::update(ctx.exit_dialog, exit_dialog::Message::Stay);
        return Task::none();
    }
    if ctx.auth_sheet.is_open() {
        ctx.auth_sheet.close();
        return Task::none();
    }
    if ctx.feed.comments().is_open() {
        ctx.feed.comments_mut().close();
        return Task::none();
    }
    if ctx.settings.is_confirming_clear() {
        settings::update(ctx.settings, settings::Message::CancelClearCache);
        return Task::none();
    }
    if *ctx.screen == Screen::Live && ctx.live.exit_fullscreen() {
        return set_window_mode(*ctx.window_id, false);
    }

    match ctx
        .back_guard
        .press(ctx.screen.is_root(), ctx.app_state.never_ask_exit, now)
    {
        BackOutcome::NavigateRoot => switch_screen(ctx, Screen::Home),
        BackOutcome::Primed => Task::none(),
        BackOutcome::PromptExit => {
            ctx.exit_dialog.open();
            Task::none()
        }
        BackOutcome::Exit => iced::exit(),
    }
}

pub fn handle_exit_dialog_message(
    ctx: &mut UpdateContext<'_>,
    message: exit_dialog::Message,
) -> Task<Message> {
    match exit_dialog::update(ctx.exit_dialog, message) {
        exit_dialog::Event::None | exit_dialog::Event::Stay => Task::none(),
        exit_dialog::Event::Exit { never_ask } => {
            if never_ask {
                ctx.app_state.never_ask_exit = true;
                persistence::persist_state(ctx.app_state, ctx.dirs, ctx.notifications);
            }
            iced::exit()
        }
    }
}

pub fn handle_tick(ctx: &mut UpdateContext<'_>, now: Instant) -> Task<Message> {
    ctx.notifications.tick(now);
    ctx.back_guard.expire(now);
    ctx.live.tick(now);
    Task::none()
}

// =============================================================================
// Screens
// =============================================================================

pub fn handle_home_message(ctx: &mut UpdateContext<'_>, message: home::Message) -> Task<Message> {
    match home::update(ctx.home, message) {
        home::Event::None => Task::none(),
        home::Event::OpenSettings => switch_screen(ctx, Screen::Settings),
        home::Event::Feed(message) => handle_feed_message(ctx, message),
    }
}

pub fn handle_feed_message(ctx: &mut UpdateContext<'_>, message: shorts::Message) -> Task<Message> {
    let user_id = ctx.user_id();
    match shorts::update(ctx.feed, message, user_id.as_deref()) {
        shorts::Event::None => Task::none(),
        shorts::Event::SignInRequired => {
            ctx.auth_sheet.open();
            Task::none()
        }
        shorts::Event::WriteReaction {
            generation,
            toggle,
            user_id,
        } => {
            let write = feed::set_reaction(
                ctx.backend(),
                toggle.reaction,
                toggle.short_id.clone(),
                user_id.clone(),
                toggle.on,
            );
            Task::perform(write, move |result| Message::ReactionWritten {
                generation,
                user_id,
                toggle,
                result,
            })
        }
        shorts::Event::LoadComments(short_id) => {
            let load = feed::load_comments(ctx.backend(), short_id.clone());
            Task::perform(load, move |result| Message::CommentsLoaded {
                short_id,
                result,
            })
        }
        shorts::Event::PostComment {
            short_id,
            user_id,
            content,
        } => {
            let post = feed::post_comment(ctx.backend(), short_id.clone(), user_id, content);
            Task::perform(post, move |result| Message::CommentPosted {
                short_id,
                result,
            })
        }
        shorts::Event::Share(text) => {
            ctx.notifications
                .push(Notification::info("notification-link-copied"));
            iced::clipboard::write(text)
        }
    }
}

pub fn handle_live_message(ctx: &mut UpdateContext<'_>, message: live::Message) -> Task<Message> {
    match live::update(ctx.live, message, Instant::now()) {
        live::Event::None => Task::none(),
        live::Event::SetFullscreen(fullscreen) => set_window_mode(*ctx.window_id, fullscreen),
    }
}

pub fn handle_settings_message(
    ctx: &mut UpdateContext<'_>,
    message: settings::Message,
) -> Task<Message> {
    match settings::update(ctx.settings, message) {
        settings::Event::None => Task::none(),
        settings::Event::Back => switch_screen(ctx, Screen::Home),
        settings::Event::OpenAccount => {
            ctx.auth_sheet.open();
            Task::none()
        }
        settings::Event::SwitchAccount => {
            let task = sign_out(ctx);
            ctx.auth_sheet.open_login();
            task
        }
        settings::Event::LogOut => sign_out(ctx),
        settings::Event::SetDarkMode(dark) => {
            let mode = if dark { ThemeMode::Dark } else { ThemeMode::Light };
            *ctx.theme_mode = mode;
            ctx.config.general.theme_mode = mode;
            persistence::persist_preferences(ctx.config, ctx.dirs, ctx.notifications);
            Task::none()
        }
        settings::Event::CycleLanguage => {
            persistence::cycle_language(ctx.i18n, ctx.config, ctx.dirs, ctx.notifications);
            Task::none()
        }
        settings::Event::SetDataSaver(on) => {
            ctx.config.content.data_saver = Some(on);
            persistence::persist_preferences(ctx.config, ctx.dirs, ctx.notifications);
            Task::none()
        }
        settings::Event::ClearCache => clear_cache(ctx),
        settings::Event::Unavailable => {
            ctx.notifications
                .push(Notification::info("notification-coming-soon"));
            Task::none()
        }
        settings::Event::OpenAbout => switch_screen(ctx, Screen::About),
    }
}

pub fn handle_about_message(ctx: &mut UpdateContext<'_>, message: &about::Message) -> Task<Message> {
    match about::update(message) {
        about::Event::None => Task::none(),
        about::Event::BackToSettings => switch_screen(ctx, Screen::Settings),
    }
}

/// Resets preferences and local state, signs out and reloads the feed.
fn clear_cache(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let logout = sign_out(ctx);
    persistence::reset_local_data(ctx.config, ctx.app_state, ctx.dirs, ctx.notifications);
    *ctx.theme_mode = ctx.config.general.theme_mode;
    *ctx.i18n = I18n::new(None, ctx.config);
    ctx.images.clear();
    ctx.notifications
        .push(Notification::success("notification-cache-cleared"));
    tracing::info!("local cache cleared");
    Task::batch([logout, reload_feed(ctx)])
}

// =============================================================================
// Auth sheet and session
// =============================================================================

pub fn handle_auth_sheet_message(
    ctx: &mut UpdateContext<'_>,
    message: auth_sheet::Message,
) -> Task<Message> {
    match auth_sheet::update(ctx.auth_sheet, message) {
        auth_sheet::Event::None | auth_sheet::Event::Closed => Task::none(),
        auth_sheet::Event::SignUp(credentials) => {
            let username = credentials.username().to_string();
            Task::perform(session::sign_up(ctx.backend(), credentials), move |result| {
                Message::SignedUp {
                    username,
                    result,
                }
            })
        }
        auth_sheet::Event::LogIn(credentials) => {
            Task::perform(session::sign_in(ctx.backend(), credentials), Message::SignedIn)
        }
        auth_sheet::Event::ContinueWith(provider) => {
            match session::oauth_url(&ctx.backend(), provider) {
                Ok(url) => {
                    ctx.notifications
                        .push(Notification::info("notification-oauth-link-copied"));
                    iced::clipboard::write(url)
                }
                Err(err) => {
                    tracing::warn!(provider = provider.as_str(), "oauth unavailable: {err}");
                    ctx.notifications.push(Notification::warning(err.i18n_key()));
                    Task::none()
                }
            }
        }
        auth_sheet::Event::ChooseAvatar(url) => {
            let Some(user_id) = ctx.user_id() else {
                return Task::none();
            };
            let backend = ctx.backend();
            let uid = user_id.clone();
            Task::perform(
                async move {
                    session::set_avatar(backend, uid, url)
                        .await
                        .map_err(Error::from)
                },
                move |result| Message::AvatarUpdated {
                    user_id,
                    result,
                },
            )
        }
        auth_sheet::Event::UploadAvatar => {
            ctx.auth_sheet.set_uploading(true);
            pick_avatar_file(ctx.app_state.last_avatar_directory.clone())
        }
        auth_sheet::Event::OpenSettings => switch_screen(ctx, Screen::Settings),
        auth_sheet::Event::SignOut => sign_out(ctx),
    }
}

fn pick_avatar_file(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter("Image", &["png", "jpg", "jpeg", "gif", "webp"]);
            if let Some(directory) = last_directory {
                dialog = dialog.set_directory(directory);
            }
            dialog.pick_file().await.map(|handle| handle.path().to_path_buf())
        },
        Message::AvatarFilePicked,
    )
}

pub fn handle_avatar_file_picked(ctx: &mut UpdateContext<'_>, path: Option<PathBuf>) -> Task<Message> {
    let (Some(path), Some(user_id)) = (path, ctx.user_id()) else {
        ctx.auth_sheet.set_uploading(false);
        return Task::none();
    };
    ctx.app_state.set_last_avatar_directory_from_file(&path);
    persistence::persist_state(ctx.app_state, ctx.dirs, ctx.notifications);

    let upload = session::upload_avatar(ctx.backend(), user_id.clone(), path);
    Task::perform(
        async move { upload.await.map(|_url| ()) },
        move |result| Message::AvatarUpdated {
            user_id,
            result,
        },
    )
}

pub fn handle_avatar_updated(
    ctx: &mut UpdateContext<'_>,
    user_id: String,
    result: Result<(), Error>,
) -> Task<Message> {
    ctx.auth_sheet.set_uploading(false);
    match result {
        Ok(()) => refresh_profile(ctx, user_id),
        Err(err) => {
            tracing::warn!(user = %user_id, "avatar update failed: {err}");
            Task::none()
        }
    }
}

pub fn handle_signed_in(
    ctx: &mut UpdateContext<'_>,
    result: Result<Session, crate::application::session::AuthError>,
) -> Task<Message> {
    match result {
        Ok(session) => {
            let user_id = session.user.id.clone();
            establish(ctx, session);
            Task::batch([refresh_profile(ctx, user_id.clone()), load_memberships(ctx, user_id)])
        }
        Err(err) => {
            ctx.auth_sheet.fail(err);
            Task::none()
        }
    }
}

pub fn handle_signed_up(
    ctx: &mut UpdateContext<'_>,
    username: String,
    result: Result<Option<Session>, crate::application::session::AuthError>,
) -> Task<Message> {
    match result {
        Ok(Some(session)) => {
            let user_id = session.user.id.clone();
            establish(ctx, session);
            let ensure = session::ensure_profile(ctx.backend(), user_id.clone(), username);
            let uid = user_id.clone();
            Task::batch([
                Task::perform(
                    async move { ensure.await.map(Some) },
                    move |result| Message::ProfileLoaded {
                        user_id: uid,
                        result,
                    },
                ),
                load_memberships(ctx, user_id),
            ])
        }
        Ok(None) => {
            ctx.auth_sheet.succeed();
            ctx.notifications
                .push(Notification::info("notification-sign-up-pending"));
            Task::none()
        }
        Err(err) => {
            ctx.auth_sheet.fail(err);
            Task::none()
        }
    }
}

fn establish(ctx: &mut UpdateContext<'_>, session: Session) {
    ctx.session.establish(session.clone());
    ctx.app_state.session = Some(session);
    persistence::persist_state(ctx.app_state, ctx.dirs, ctx.notifications);
    ctx.auth_sheet.succeed();
    ctx.notifications
        .push(Notification::success("notification-signed-in"));
}

/// Clears the session locally and on disk, then logs out on the backend.
pub fn sign_out(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    if !ctx.session.is_signed_in() {
        return Task::none();
    }
    let logout = ctx.session.teardown();
    ctx.app_state.session = None;
    persistence::persist_state(ctx.app_state, ctx.dirs, ctx.notifications);
    ctx.feed.clear_memberships();
    ctx.notifications
        .push(Notification::info("notification-signed-out"));
    Task::perform(logout, Message::SignedOut)
}

/// Fetches the signed-in user's profile.
pub fn refresh_profile(ctx: &mut UpdateContext<'_>, user_id: String) -> Task<Message> {
    let fetch = session::fetch_profile(ctx.backend(), user_id.clone());
    Task::perform(fetch, move |result| Message::ProfileLoaded {
        user_id,
        result,
    })
}

pub fn handle_profile_loaded(
    ctx: &mut UpdateContext<'_>,
    user_id: &str,
    result: Result<Option<crate::domain::content::Profile>, crate::domain::error::BackendError>,
) -> Task<Message> {
    match result {
        Ok(profile) => {
            let avatar = profile.as_ref().and_then(|p| p.avatar_url.clone());
            if !ctx.session.set_profile(user_id, profile) {
                return Task::none();
            }
            fetch_images(ctx, avatar)
        }
        Err(err) => {
            tracing::warn!(user = %user_id, "profile fetch failed: {err}");
            Task::none()
        }
    }
}

// =============================================================================
// Feed
// =============================================================================

/// Starts a feed load; older responses will be ignored.
pub fn reload_feed(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let generation = ctx.feed.begin_load();
    Task::perform(feed::load_feed(ctx.backend()), move |snapshot| {
        Message::FeedLoaded {
            generation,
            snapshot,
        }
    })
}

fn load_memberships(ctx: &mut UpdateContext<'_>, user_id: String) -> Task<Message> {
    let generation = ctx.feed.generation();
    let load = feed::load_memberships(ctx.backend(), user_id.clone());
    Task::perform(load, move |memberships| Message::MembershipsLoaded {
        generation,
        user_id,
        memberships,
    })
}

pub fn handle_feed_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    snapshot: feed::FeedSnapshot,
) -> Task<Message> {
    if !ctx.feed.loaded(generation, snapshot) {
        return Task::none();
    }
    let logos: Vec<String> = ctx
        .feed
        .shorts()
        .iter()
        .filter_map(|short| short.channel_logo_url.clone())
        .collect();
    let images = fetch_images(ctx, logos);
    match ctx.user_id() {
        Some(user_id) => Task::batch([images, load_memberships(ctx, user_id)]),
        None => images,
    }
}

pub fn handle_memberships_loaded(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    user_id: &str,
    memberships: feed::Memberships,
) -> Task<Message> {
    let current = ctx.user_id();
    ctx.feed
        .memberships_loaded(generation, user_id, current.as_deref(), memberships);
    Task::none()
}

pub fn handle_reaction_written(
    ctx: &mut UpdateContext<'_>,
    generation: u64,
    user_id: &str,
    toggle: &crate::ui::state::Toggle,
    result: Result<(), crate::domain::error::BackendError>,
) -> Task<Message> {
    if let Err(err) = result {
        tracing::warn!(short = %toggle.short_id, "reaction write failed: {err}");
        let current = ctx.user_id();
        if ctx
            .feed
            .revert(generation, user_id, current.as_deref(), toggle)
        {
            ctx.notifications
                .push(Notification::warning("notification-reaction-failed"));
        }
    }
    Task::none()
}

pub fn handle_comments_loaded(
    ctx: &mut UpdateContext<'_>,
    short_id: &str,
    result: Result<Vec<crate::domain::content::CommentView>, crate::domain::error::BackendError>,
) -> Task<Message> {
    match result {
        Ok(items) => {
            let avatars: Vec<String> = items
                .iter()
                .filter_map(|item| item.avatar_url.clone())
                .collect();
            if ctx.feed.comments_mut().loaded(short_id, items) {
                fetch_images(ctx, avatars)
            } else {
                Task::none()
            }
        }
        Err(err) => {
            tracing::warn!(short = %short_id, "comments fetch failed: {err}");
            ctx.feed.comments_mut().load_failed(short_id);
            Task::none()
        }
    }
}

pub fn handle_comment_posted(
    ctx: &mut UpdateContext<'_>,
    short_id: &str,
    result: Result<crate::domain::content::CommentView, crate::domain::error::BackendError>,
) -> Task<Message> {
    match result {
        Ok(comment) => {
            ctx.feed.comment_posted(short_id, comment);
            Task::none()
        }
        Err(err) => {
            tracing::warn!(short = %short_id, "comment insert failed: {err}");
            ctx.feed.comments_mut().post_failed();
            ctx.notifications
                .push(Notification::warning("notification-comment-failed"));
            Task::none()
        }
    }
}

// =============================================================================
// Images
// =============================================================================

/// Downloads remote images not fetched yet. Data saver skips them all.
pub fn fetch_images(
    ctx: &mut UpdateContext<'_>,
    urls: impl IntoIterator<Item = String>,
) -> Task<Message> {
    if ctx.config.data_saver() {
        return Task::none();
    }
    let backend = ctx.backend();
    let tasks: Vec<Task<Message>> = urls
        .into_iter()
        .filter(|url| ctx.images.request(url))
        .map(|url| {
            let download = backend.download(&url);
            Task::perform(download, move |result| Message::ImageLoaded {
                url,
                result,
            })
        })
        .collect();
    Task::batch(tasks)
}

pub fn handle_image_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: Result<Vec<u8>, crate::domain::error::BackendError>,
) -> Task<Message> {
    match result {
        Ok(bytes) => ctx.images.insert(url, bytes),
        Err(err) => tracing::debug!(%url, "image download failed: {err}"),
    }
    Task::none()
}

/// Builds the backend-facing part of the boot sequence: the first feed load
/// and, for a restored session, the profile refresh.
pub fn boot_tasks(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let feed = reload_feed(ctx);
    match ctx.user_id() {
        Some(user_id) => Task::batch([feed, refresh_profile(ctx, user_id)]),
        None => feed,
    }
}
