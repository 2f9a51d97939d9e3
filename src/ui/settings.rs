// SPDX-License-Identifier: MPL-2.0
//! Settings screen: account actions, display preferences, cache and help.
//!
//! Preferences are applied and persisted by the application; this screen
//! only reports what the user asked for.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles;
use iced::widget::{button, rule, scrollable, text, toggler, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Default)]
pub struct State {
    confirm_clear: bool,
}

impl State {
    /// Whether the "clear cache" confirmation is showing.
    #[must_use]
    pub fn is_confirming_clear(&self) -> bool {
        self.confirm_clear
    }
}

/// Contextual data needed to render the settings screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    pub signed_in: bool,
    pub dark_mode: bool,
    pub data_saver: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    Back,
    Account,
    SwitchAccount,
    LogOut,
    DarkModeToggled(bool),
    CycleLanguage,
    Accessibility,
    DataSaverToggled(bool),
    ClearCache,
    ConfirmClearCache,
    CancelClearCache,
    HelpCenter,
    About,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Back,
    /// Open the auth sheet on its default view.
    OpenAccount,
    /// Sign out, then open the login form.
    SwitchAccount,
    LogOut,
    SetDarkMode(bool),
    CycleLanguage,
    SetDataSaver(bool),
    /// Reset local configuration and state, sign out and reload the feed.
    ClearCache,
    /// A row whose screen does not exist yet.
    Unavailable,
    OpenAbout,
}

pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::Back => Event::Back,
        Message::Account => Event::OpenAccount,
        Message::SwitchAccount => Event::SwitchAccount,
        Message::LogOut => Event::LogOut,
        Message::DarkModeToggled(dark) => Event::SetDarkMode(dark),
        Message::CycleLanguage => Event::CycleLanguage,
        Message::DataSaverToggled(on) => Event::SetDataSaver(on),
        Message::ClearCache => {
            state.confirm_clear = true;
            Event::None
        }
        Message::ConfirmClearCache => {
            state.confirm_clear = false;
            Event::ClearCache
        }
        Message::CancelClearCache => {
            state.confirm_clear = false;
            Event::None
        }
        Message::Accessibility | Message::HelpCenter => Event::Unavailable,
        Message::About => Event::OpenAbout,
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;

    let back = button(
        Row::new()
            .spacing(spacing::XXS)
            .align_y(alignment::Vertical::Center)
            .push(icons::sized(Icon::Back, sizing::ICON_MD))
            .push(text(i18n.tr("settings-back")).size(typography::BODY)),
    )
    .on_press(Message::Back)
    .style(styles::button::ghost);

    let title = Text::new(i18n.tr("settings-title")).size(typography::TITLE_LG);

    let mut account = Column::new()
        .spacing(spacing::XS)
        .push(link_row(i18n.tr("settings-account"), Message::Account))
        .push(link_row(
            i18n.tr("settings-switch-account"),
            Message::SwitchAccount,
        ));
    if ctx.signed_in {
        account = account.push(link_row(i18n.tr("settings-log-out"), Message::LogOut));
    }

    let language_name = i18n.tr(&format!("language-name-{}", i18n.current_locale()));
    let display = Column::new()
        .spacing(spacing::XS)
        .push(toggle_row(
            i18n.tr("settings-appearance"),
            i18n.tr(if ctx.dark_mode {
                "settings-appearance-dark"
            } else {
                "settings-appearance-light"
            }),
            ctx.dark_mode,
            Message::DarkModeToggled,
        ))
        .push(value_row(
            i18n.tr("settings-language"),
            language_name,
            Message::CycleLanguage,
        ))
        .push(link_row(
            i18n.tr("settings-accessibility"),
            Message::Accessibility,
        ));

    let cache = Column::new()
        .spacing(spacing::XS)
        .push(toggle_row(
            i18n.tr("settings-data-saver"),
            i18n.tr("settings-data-saver-hint"),
            ctx.data_saver,
            Message::DataSaverToggled,
        ))
        .push(link_row(i18n.tr("settings-clear-cache"), Message::ClearCache));

    let support = Column::new()
        .spacing(spacing::XS)
        .push(link_row(i18n.tr("settings-help-center"), Message::HelpCenter))
        .push(link_row(i18n.tr("settings-about"), Message::About));

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::LG)
        .padding(spacing::MD)
        .push(back)
        .push(title)
        .push(build_section(i18n.tr("settings-section-account"), account.into()))
        .push(build_section(i18n.tr("settings-section-display"), display.into()))
        .push(build_section(i18n.tr("settings-section-cache"), cache.into()))
        .push(build_section(i18n.tr("settings-section-support"), support.into()));

    scrollable(content).into()
}

/// Confirmation dialog for clearing the cache.
#[must_use]
pub fn view_confirm_clear(i18n: &I18n) -> Element<'_, Message> {
    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(text(i18n.tr("settings-clear-cache-cancel")))
                .on_press(Message::CancelClearCache)
                .style(styles::button::secondary),
        )
        .push(
            button(text(i18n.tr("settings-clear-cache-confirm")))
                .on_press(Message::ConfirmClearCache)
                .style(styles::button::primary),
        );

    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(text(i18n.tr("settings-clear-cache-title")).size(typography::TITLE_SM))
            .push(text(i18n.tr("settings-clear-cache-message")).size(typography::BODY))
            .push(
                Container::new(actions)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Right),
            ),
    )
    .width(Length::Fixed(sizing::DIALOG_WIDTH))
    .padding(spacing::LG)
    .style(styles::container::dialog)
    .into()
}

fn link_row<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(
        Row::new()
            .align_y(alignment::Vertical::Center)
            .push(text(label).size(typography::BODY))
            .push(Space::new().width(Length::Fill))
            .push(icons::sized(Icon::Chevron, sizing::ICON_SM)),
    )
    .width(Length::Fill)
    .padding([spacing::XS, spacing::XXS])
    .on_press(message)
    .style(styles::button::ghost)
    .into()
}

fn value_row<'a>(label: String, value: String, message: Message) -> Element<'a, Message> {
    button(
        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(text(label).size(typography::BODY))
            .push(Space::new().width(Length::Fill))
            .push(text(value).size(typography::BODY_SM))
            .push(icons::sized(Icon::Chevron, sizing::ICON_SM)),
    )
    .width(Length::Fill)
    .padding([spacing::XS, spacing::XXS])
    .on_press(message)
    .style(styles::button::ghost)
    .into()
}

fn toggle_row<'a>(
    label: String,
    hint: String,
    value: bool,
    on_toggle: fn(bool) -> Message,
) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::SM)
        .padding([spacing::XS, spacing::XXS])
        .align_y(alignment::Vertical::Center)
        .push(
            Column::new()
                .spacing(spacing::XXS)
                .width(Length::Fill)
                .push(text(label).size(typography::BODY))
                .push(text(hint).size(typography::CAPTION)),
        )
        .push(toggler(value).on_toggle(on_toggle).size(sizing::ICON_MD))
        .into()
}

/// Section with a title, a separator and its rows.
fn build_section(title: String, content: Element<'_, Message>) -> Element<'_, Message> {
    let inner = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(title).size(typography::TITLE_SM))
        .push(rule::horizontal(1))
        .push(content);

    Container::new(inner)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}
