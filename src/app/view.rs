// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the active screen, the bottom navigation where it applies, then
//! layers whichever modal is open and finally the toast overlay.

use super::{Message, Screen};
use crate::domain::content::Profile;
use crate::i18n::fluent::I18n;
use crate::ui::modal::{modal, Placement};
use crate::ui::notifications::{self, Toast};
use crate::ui::shorts::{self, comments};
use crate::ui::{about, auth_sheet, exit_dialog, home, live, navbar, settings, ImageCache};
use iced::widget::{image, Column, Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub home: &'a home::State,
    pub feed: &'a shorts::State,
    pub live: &'a live::State,
    pub settings: &'a settings::State,
    pub auth_sheet: &'a auth_sheet::State,
    pub exit_dialog: &'a exit_dialog::State,
    pub profile: Option<&'a Profile>,
    pub signed_in: bool,
    pub dark_mode: bool,
    pub data_saver: bool,
    pub images: &'a ImageCache,
    pub notifications: &'a notifications::Manager,
}

impl<'a> ViewContext<'a> {
    fn avatar(&self) -> Option<&'a image::Handle> {
        let images = self.images;
        self.profile
            .and_then(|profile| profile.avatar_url.as_deref())
            .and_then(|url| images.get(url))
    }
}

/// Renders the current application view based on the active screen.
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let screen = view_screen(&ctx);
    let with_modal = layer_modal(&ctx, screen);

    Stack::new()
        .push(with_modal)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_screen<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    match ctx.screen {
        Screen::Home => {
            let content = home::view(home::ViewContext {
                i18n: ctx.i18n,
                state: ctx.home,
                feed: ctx.feed,
                signed_in: ctx.signed_in,
                images: ctx.images,
            })
            .map(Message::Home);
            if ctx.home.shows_navigation() {
                with_navbar(ctx, content, navbar::Tab::Home)
            } else {
                content
            }
        }
        Screen::Live => {
            let content = live::view(live::ViewContext {
                i18n: ctx.i18n,
                state: ctx.live,
            })
            .map(Message::Live);
            if ctx.live.is_fullscreen() {
                content
            } else {
                with_navbar(ctx, content, navbar::Tab::Live)
            }
        }
        Screen::Settings => settings::view(settings::ViewContext {
            i18n: ctx.i18n,
            state: ctx.settings,
            signed_in: ctx.signed_in,
            dark_mode: ctx.dark_mode,
            data_saver: ctx.data_saver,
        })
        .map(Message::Settings),
        Screen::About => about::view(about::ViewContext { i18n: ctx.i18n }).map(Message::About),
    }
}

fn with_navbar<'a>(
    ctx: &ViewContext<'a>,
    content: Element<'a, Message>,
    active: navbar::Tab,
) -> Element<'a, Message> {
    let bar = navbar::view(navbar::ViewContext {
        i18n: ctx.i18n,
        active,
        profile: ctx.profile,
        avatar: ctx.avatar(),
    })
    .map(Message::Navbar);

    Column::new()
        .push(
            Container::new(content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(bar)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// At most one modal shows; the exit dialog wins over everything else.
fn layer_modal<'a>(ctx: &ViewContext<'a>, base: Element<'a, Message>) -> Element<'a, Message> {
    if ctx.exit_dialog.is_open() {
        let dialog = exit_dialog::view(exit_dialog::ViewContext {
            i18n: ctx.i18n,
            state: ctx.exit_dialog,
        })
        .map(Message::ExitDialog);
        return modal(
            base,
            dialog,
            Placement::Center,
            Message::ExitDialog(exit_dialog::Message::Stay),
        );
    }

    if ctx.auth_sheet.is_open() {
        let sheet = auth_sheet::view(auth_sheet::ViewContext {
            i18n: ctx.i18n,
            state: ctx.auth_sheet,
            signed_in: ctx.signed_in,
            profile: ctx.profile,
            avatar: ctx.avatar(),
        })
        .map(Message::AuthSheet);
        return modal(
            base,
            sheet,
            Placement::Bottom,
            Message::AuthSheet(auth_sheet::Message::Close),
        );
    }

    if ctx.screen == Screen::Home && ctx.feed.comments().is_open() {
        let panel = comments::view(comments::ViewContext {
            i18n: ctx.i18n,
            state: ctx.feed.comments(),
            signed_in: ctx.signed_in,
            images: ctx.images,
        })
        .map(|message| Message::Home(home::Message::Feed(shorts::Message::Comments(message))));
        return modal(
            base,
            panel,
            Placement::Bottom,
            Message::Home(home::Message::Feed(shorts::Message::Comments(
                comments::Message::Close,
            ))),
        );
    }

    if ctx.screen == Screen::Settings && ctx.settings.is_confirming_clear() {
        let dialog = settings::view_confirm_clear(ctx.i18n).map(Message::Settings);
        return modal(
            base,
            dialog,
            Placement::Center,
            Message::Settings(settings::Message::CancelClearCache),
        );
    }

    base
}
