// SPDX-License-Identifier: MPL-2.0
//! Auth sheet: sign up, log in, external providers, and the signed-in
//! profile card.
//!
//! The sheet validates the form itself and only hands validated
//! [`Credentials`] to the application, so an invalid form never reaches the
//! network. While a request is in flight the submit button is disabled.
//! Closing the sheet always returns it to the main view with an empty form.

use crate::application::session::AuthError;
use crate::domain::auth::{cap_password_input, password_bounds, Credentials, OAuthProvider};
use crate::domain::content::{Profile, DEFAULT_AVATARS};
use crate::i18n::fluent::I18n;
use crate::ui::avatar;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles;
use iced::widget::{button, image, rule, text, text_input, Column, Container, Row, Space};
use iced::{alignment, Element, Length, Theme};

/// Which page of the sheet is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Main,
    SignUp,
    Login,
    Profile,
}

#[derive(Debug, Default)]
pub struct State {
    open: bool,
    view: View,
    username: String,
    password: String,
    error: Option<AuthError>,
    loading: bool,
    uploading: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Opens directly on the login form.
    pub fn open_login(&mut self) {
        self.reset();
        self.view = View::Login;
        self.open = true;
    }

    /// Closes the sheet and resets it to the main view.
    pub fn close(&mut self) {
        self.reset();
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub fn error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The page actually shown: signed-in users always see their profile.
    #[must_use]
    pub fn effective_view(&self, signed_in: bool) -> View {
        if signed_in {
            View::Profile
        } else {
            self.view
        }
    }

    /// The request finished successfully.
    pub fn succeed(&mut self) {
        self.close();
    }

    /// The request failed; the form stays open with the message.
    pub fn fail(&mut self, error: AuthError) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    fn show(&mut self, view: View) {
        self.reset();
        self.view = view;
    }

    fn reset(&mut self) {
        self.view = View::Main;
        self.username.clear();
        self.password.clear();
        self.error = None;
        self.loading = false;
    }
}

/// Contextual data needed to render the sheet.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub signed_in: bool,
    pub profile: Option<&'a Profile>,
    pub avatar: Option<&'a image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Close,
    ShowSignUp,
    ShowLogin,
    Back,
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
    ContinueWith(OAuthProvider),
    ChooseAvatar(&'static str),
    UploadAvatar,
    OpenSettings,
    SignOut,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Closed,
    SignUp(Credentials),
    LogIn(Credentials),
    ContinueWith(OAuthProvider),
    ChooseAvatar(String),
    UploadAvatar,
    OpenSettings,
    SignOut,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::Close => {
            state.close();
            Event::Closed
        }
        Message::ShowSignUp => {
            state.show(View::SignUp);
            Event::None
        }
        Message::ShowLogin => {
            state.show(View::Login);
            Event::None
        }
        Message::Back => {
            state.show(View::Main);
            Event::None
        }
        Message::UsernameChanged(username) => {
            state.username = username;
            Event::None
        }
        Message::PasswordChanged(password) => {
            state.password = cap_password_input(&password);
            Event::None
        }
        Message::Submit => submit(state),
        Message::ContinueWith(provider) => Event::ContinueWith(provider),
        Message::ChooseAvatar(url) => Event::ChooseAvatar(url.to_string()),
        Message::UploadAvatar if state.uploading => Event::None,
        Message::UploadAvatar => Event::UploadAvatar,
        Message::OpenSettings => {
            state.close();
            Event::OpenSettings
        }
        Message::SignOut => {
            state.close();
            Event::SignOut
        }
    }
}

fn submit(state: &mut State) -> Event {
    if state.loading || !matches!(state.view, View::SignUp | View::Login) {
        return Event::None;
    }
    let credentials = match Credentials::new(&state.username, &state.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            state.error = Some(AuthError::Invalid(err));
            return Event::None;
        }
    };
    state.error = None;
    state.loading = true;
    if state.view == View::SignUp {
        Event::SignUp(credentials)
    } else {
        Event::LogIn(credentials)
    }
}

/// Renders the sheet body (the caller docks it over a backdrop).
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body = match ctx.state.effective_view(ctx.signed_in) {
        View::Main => build_main(&ctx),
        View::SignUp => build_form(&ctx, true),
        View::Login => build_form(&ctx, false),
        View::Profile => build_profile(&ctx),
    };

    let close = button(icons::sized(Icon::Close, sizing::ICON_SM))
        .on_press(Message::Close)
        .style(styles::button::ghost);
    let header = Row::new()
        .push(Space::new().width(Length::Fill))
        .push(close);

    Container::new(Column::new().spacing(spacing::XS).push(header).push(body))
        .width(Length::Fill)
        .max_width(sizing::SHEET_MAX_WIDTH)
        .padding(spacing::LG)
        .style(styles::container::sheet)
        .into()
}

fn heading<'a>(title: String, subtitle: String) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .push(text(title).size(typography::TITLE_MD))
        .push(text(subtitle).size(typography::BODY).style(muted))
        .into()
}

fn full_width<'a>(
    label: Element<'a, Message>,
    on_press: Option<Message>,
    style: fn(&Theme, button::Status) -> button::Style,
) -> Element<'a, Message> {
    button(
        Container::new(label)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
    .padding(spacing::SM)
    .on_press_maybe(on_press)
    .style(style)
    .into()
}

fn build_main<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let divider = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(rule::horizontal(1))
        .push(text(i18n.tr("auth-or")).size(typography::CAPTION).style(muted))
        .push(rule::horizontal(1));

    Column::new()
        .spacing(spacing::SM)
        .push(heading(i18n.tr("auth-welcome-title"), i18n.tr("auth-welcome-subtitle")))
        .push(Space::new().height(spacing::SM))
        .push(full_width(
            text(i18n.tr("auth-sign-up")).into(),
            Some(Message::ShowSignUp),
            styles::button::primary,
        ))
        .push(full_width(
            text(i18n.tr("auth-log-in")).into(),
            Some(Message::ShowLogin),
            styles::button::secondary,
        ))
        .push(divider)
        .push(full_width(
            text(i18n.tr("auth-continue-google")).into(),
            Some(Message::ContinueWith(OAuthProvider::Google)),
            styles::button::secondary,
        ))
        .push(full_width(
            text(i18n.tr("auth-continue-apple")).into(),
            Some(Message::ContinueWith(OAuthProvider::Apple)),
            styles::button::secondary,
        ))
        .into()
}

fn build_form<'a>(ctx: &ViewContext<'a>, sign_up: bool) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;
    let (title, subtitle, submit) = if sign_up {
        ("auth-sign-up-title", "auth-sign-up-subtitle", "auth-sign-up")
    } else {
        ("auth-log-in-title", "auth-log-in-subtitle", "auth-log-in")
    };

    let back = button(icons::sized(Icon::Back, sizing::ICON_MD))
        .on_press(Message::Back)
        .style(styles::button::ghost);

    let username = text_input(&i18n.tr("auth-username-placeholder"), &state.username)
        .on_input(Message::UsernameChanged)
        .on_submit(Message::Submit)
        .padding(spacing::SM)
        .size(typography::BODY_LG);

    let password = text_input(&i18n.tr("auth-password-placeholder"), &state.password)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::Submit)
        .secure(true)
        .padding(spacing::SM)
        .size(typography::BODY_LG);

    let count = state.password.chars().count().to_string();
    let max = password_bounds::MAX.to_string();
    let counter = text(i18n.tr_with_args(
        "auth-password-counter",
        &[("count", count.as_str()), ("max", max.as_str())],
    ))
    .size(typography::CAPTION)
    .style(muted);

    let submit_label = if state.loading {
        "...".to_string()
    } else {
        i18n.tr(submit)
    };

    let mut form = Column::new()
        .spacing(spacing::SM)
        .push(back)
        .push(heading(i18n.tr(title), i18n.tr(subtitle)))
        .push(username)
        .push(Column::new().spacing(spacing::XXS).push(password).push(counter));

    if let Some(error) = &state.error {
        form = form.push(text(error_text(i18n, error)).size(typography::BODY_SM).style(
            |_theme: &Theme| text::Style {
                color: Some(palette::ERROR_500),
            },
        ));
    }

    form.push(full_width(
        text(submit_label).into(),
        (!state.loading).then_some(Message::Submit),
        styles::button::primary,
    ))
    .into()
}

fn build_profile<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let (initial, username, current_avatar) = match ctx.profile {
        Some(profile) => (
            profile.initial(),
            profile.username.clone(),
            profile.avatar_url.as_deref(),
        ),
        None => ("U".to_string(), String::new(), None),
    };

    let upload = button(icons::sized(Icon::Camera, sizing::ICON_SM))
        .on_press_maybe((!ctx.state.is_uploading()).then_some(Message::UploadAvatar))
        .style(styles::button::secondary);

    let identity = Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .push(avatar::view(initial, ctx.avatar, sizing::AVATAR_LG))
        .push(upload)
        .push(text(username).size(typography::TITLE_SM));

    let mut choices = Row::new().spacing(spacing::SM);
    for (index, url) in DEFAULT_AVATARS.iter().enumerate() {
        let selected = current_avatar == Some(*url);
        let label = if selected {
            Icon::Check.glyph().to_string()
        } else {
            (index + 1).to_string()
        };
        choices = choices.push(
            button(
                Container::new(text(label).size(typography::BODY))
                    .width(Length::Fixed(sizing::AVATAR_SM))
                    .height(Length::Fixed(sizing::AVATAR_SM))
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            )
            .padding(0)
            .on_press(Message::ChooseAvatar(*url))
            .style(styles::button::pill(selected)),
        );
    }

    let picker = Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .push(text(i18n.tr("auth-choose-avatar")).size(typography::CAPTION).style(muted))
        .push(choices);

    Column::new()
        .spacing(spacing::MD)
        .push(identity)
        .push(picker)
        .push(full_width(
            icon_label(Icon::Settings, i18n.tr("auth-settings")),
            Some(Message::OpenSettings),
            styles::button::secondary,
        ))
        .push(full_width(
            icon_label(Icon::Back, i18n.tr("auth-sign-out")),
            Some(Message::SignOut),
            styles::button::secondary,
        ))
        .into()
}

fn icon_label<'a>(icon: Icon, label: String) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(icons::sized(icon, sizing::ICON_SM))
        .push(text(label))
        .into()
}

/// Inline message for a failed attempt.
#[must_use]
pub fn error_text(i18n: &I18n, error: &AuthError) -> String {
    match error.i18n_key() {
        Some(key) => i18n.tr(key),
        None => error.detail().unwrap_or_default().to_string(),
    }
}

fn muted(theme: &Theme) -> text::Style {
    text::Style {
        color: Some(theme.extended_palette().background.strong.text),
    }
}
