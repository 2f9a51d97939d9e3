// SPDX-License-Identifier: MPL-2.0
//! Bottom navigation bar: Home, Watch (live) and Profile.
//!
//! Profile does not switch screens; it opens the auth sheet, and shows the
//! signed-in user's avatar and name instead of the generic label.

use crate::domain::content::Profile;
use crate::i18n::fluent::I18n;
use crate::ui::avatar;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles;
use iced::widget::{button, image, text, Column, Container, Row};
use iced::{alignment, Element, Length};

/// Navigation target highlighted as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Live,
}

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: Tab,
    pub profile: Option<&'a Profile>,
    pub avatar: Option<&'a image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Home,
    Live,
    Profile,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    OpenHome,
    OpenLive,
    OpenProfile,
}

#[must_use]
pub fn update(message: &Message, active: Tab) -> Event {
    match message {
        Message::Home if active == Tab::Home => Event::None,
        Message::Home => Event::OpenHome,
        Message::Live if active == Tab::Live => Event::None,
        Message::Live => Event::OpenLive,
        Message::Profile => Event::OpenProfile,
    }
}

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let home = build_item(
        icons::sized(Icon::Home, sizing::ICON_MD).into(),
        ctx.i18n.tr("nav-home"),
        ctx.active == Tab::Home,
        Message::Home,
    );
    let live = build_item(
        icons::sized(Icon::Live, sizing::ICON_MD).into(),
        ctx.i18n.tr("nav-watch"),
        ctx.active == Tab::Live,
        Message::Live,
    );
    let profile = match ctx.profile {
        Some(profile) => build_item(
            avatar::view(profile.initial(), ctx.avatar, sizing::ICON_MD),
            profile.username.clone(),
            false,
            Message::Profile,
        ),
        None => build_item(
            icons::sized(Icon::Profile, sizing::ICON_MD).into(),
            ctx.i18n.tr("nav-profile"),
            false,
            Message::Profile,
        ),
    };

    let bar = Row::new()
        .spacing(spacing::XL)
        .align_y(alignment::Vertical::Center)
        .push(home)
        .push(live)
        .push(profile);

    Container::new(bar)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BOTTOM_NAV_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::bottom_bar)
        .into()
}

fn build_item<'a>(
    icon: Element<'a, Message>,
    label: String,
    active: bool,
    message: Message,
) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(icon)
        .push(text(label).size(typography::CAPTION));

    button(content)
        .padding([spacing::XXS, spacing::SM])
        .style(styles::button::nav_item(active))
        .on_press(message)
        .into()
}
