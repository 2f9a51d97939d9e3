// SPDX-License-Identifier: MPL-2.0
//! About screen module displaying application information and licenses.
//!
//! This module shows the application name and version, the license of the
//! code, and credits for the main dependencies.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, rule, scrollable, text, Column, Container, Row, Text},
    Element, Length,
};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Contextual data needed to render the about screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

/// Messages emitted by the about screen.
#[derive(Debug, Clone)]
pub enum Message {
    BackToSettings,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    BackToSettings,
}

/// Process an about screen message and return the corresponding event.
#[must_use]
pub fn update(message: &Message) -> Event {
    match message {
        Message::BackToSettings => Event::BackToSettings,
    }
}

/// Render the about screen.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let back_button = button(
        Row::new()
            .spacing(spacing::XXS)
            .align_y(Vertical::Center)
            .push(icons::sized(Icon::Back, sizing::ICON_MD))
            .push(text(ctx.i18n.tr("about-back")).size(typography::BODY)),
    )
    .on_press(Message::BackToSettings)
    .style(styles::button::ghost);

    let title = Text::new(ctx.i18n.tr("about-title")).size(typography::TITLE_LG);

    let content = Column::new()
        .width(Length::Fill)
        .spacing(spacing::LG)
        .padding(spacing::MD)
        .push(back_button)
        .push(title)
        .push(build_app_section(&ctx))
        .push(build_license_section(&ctx))
        .push(build_credits_section(&ctx));

    scrollable(content).into()
}

fn build_app_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let app_name = Text::new(ctx.i18n.tr("app-name")).size(typography::TITLE_MD);
    let version = Text::new(format!("v{APP_VERSION}")).size(typography::BODY);
    let description = Text::new(ctx.i18n.tr("about-app-description")).size(typography::BODY);

    let content = Column::new()
        .spacing(spacing::XS)
        .push(
            Row::new()
                .spacing(spacing::SM)
                .align_y(Vertical::Center)
                .push(app_name)
                .push(version),
        )
        .push(description);

    build_section(Icon::Info, ctx.i18n.tr("about-section-app"), content.into())
}

fn build_license_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(ctx.i18n.tr("about-license-name")).size(typography::BODY_LG))
        .push(Text::new(ctx.i18n.tr("about-license-summary")).size(typography::BODY));

    build_section(
        Icon::Check,
        ctx.i18n.tr("about-section-license"),
        content.into(),
    )
}

fn build_credits_section<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::XS)
        .push(build_credit_item(&ctx.i18n.tr("about-credits-iced")))
        .push(build_credit_item(&ctx.i18n.tr("about-credits-supabase")))
        .push(build_credit_item(&ctx.i18n.tr("about-credits-fluent")));

    build_section(
        Icon::Settings,
        ctx.i18n.tr("about-section-credits"),
        content.into(),
    )
}

fn build_credit_item<'a>(description: &str) -> Element<'a, Message> {
    Text::new(format!("• {description}"))
        .size(typography::BODY)
        .into()
}

/// Build a section with icon, title, and content (same pattern as settings).
fn build_section(icon: Icon, title: String, content: Element<'_, Message>) -> Element<'_, Message> {
    let header = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(icons::sized(icon, sizing::ICON_MD))
        .push(Text::new(title).size(typography::TITLE_SM));

    let inner = Column::new()
        .spacing(spacing::SM)
        .push(header)
        .push(rule::horizontal(1))
        .push(content);

    Container::new(inner)
        .padding(spacing::MD)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}
