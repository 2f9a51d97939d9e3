// SPDX-License-Identifier: MPL-2.0
//! Rendering of the short-video feed.

use super::{Message, ViewContext, SCROLLABLE_ID};
use crate::application::feed::Reaction;
use crate::domain::content::Short;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use crate::ui::state::ReactionCache;
use crate::ui::styles;
use crate::ui::{avatar, ImageCache};
use iced::widget::scrollable::{Direction, Scrollbar, Viewport};
use iced::widget::{button, responsive, text, Column, Container, Id, Row, Scrollable, Space, Stack};
use iced::{alignment, Color, Element, Length, Size};

#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;
    let images = ctx.images;

    if state.shorts().is_empty() {
        let key = if state.is_loading() {
            "shorts-loading"
        } else {
            "shorts-empty"
        };
        return Container::new(text(i18n.tr(key)).size(typography::BODY))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::video)
            .into();
    }

    responsive(move |size: Size| {
        let cards = Column::with_children(
            state
                .shorts()
                .iter()
                .map(|short| build_card(i18n, short, state.reactions(), images, size.height)),
        );

        Scrollable::new(cards)
            .id(Id::new(SCROLLABLE_ID))
            .width(Length::Fill)
            .height(Length::Fill)
            .direction(Direction::Vertical(Scrollbar::hidden()))
            .on_scroll(|viewport: Viewport| Message::Scrolled {
                offset: viewport.absolute_offset().y,
                height: viewport.bounds().height,
            })
            .into()
    })
    .into()
}

fn build_card<'a>(
    i18n: &'a I18n,
    short: &'a Short,
    reactions: &'a ReactionCache,
    images: &'a ImageCache,
    height: f32,
) -> Element<'a, Message> {
    let surface = Container::new(build_player(i18n, short))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::video);

    let overlay = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Bottom)
        .push(build_caption(short, images))
        .push(build_actions(short, reactions));

    let overlay = Container::new(overlay)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::MD)
        .align_y(alignment::Vertical::Bottom);

    Container::new(Stack::new().push(surface).push(overlay))
        .width(Length::Fill)
        .height(Length::Fixed(height.max(1.0)))
        .into()
}

/// Placeholder surface for the clip: embeds and direct files are labelled
/// differently and show where the video comes from.
fn build_player<'a>(i18n: &I18n, short: &'a Short) -> Element<'a, Message> {
    let label = if short.is_embed() {
        i18n.tr("shorts-embedded-player")
    } else {
        i18n.tr("shorts-direct-video")
    };

    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(icons::sized(Icon::Play, sizing::ICON_XL).color(palette::WHITE))
        .push(text(label).size(typography::BODY).color(palette::GRAY_200))
        .push(
            text(short.video_url.as_str())
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        )
        .into()
}

fn build_caption<'a>(short: &'a Short, images: &'a ImageCache) -> Element<'a, Message> {
    let initial = short
        .channel_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    let logo = short
        .channel_logo_url
        .as_deref()
        .and_then(|url| images.get(url));

    let channel = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(avatar::view(initial, logo, sizing::AVATAR_SM))
        .push(
            text(short.channel_name.as_str())
                .size(typography::BODY)
                .color(palette::WHITE),
        );

    let mut caption = Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .push(channel)
        .push(
            text(short.title.as_str())
                .size(typography::BODY_LG)
                .color(palette::WHITE),
        );

    if let Some(audio) = &short.audio_name {
        caption = caption.push(
            Row::new()
                .spacing(spacing::XXS)
                .push(icons::sized(Icon::Music, sizing::ICON_SM).color(palette::GRAY_200))
                .push(
                    text(audio.as_str())
                        .size(typography::CAPTION)
                        .color(palette::GRAY_200),
                ),
        );
    }

    caption.into()
}

fn build_actions<'a>(short: &'a Short, reactions: &ReactionCache) -> Element<'a, Message> {
    let liked = reactions.is_on(Reaction::Like, &short.id);
    let bookmarked = reactions.is_on(Reaction::Bookmark, &short.id);

    let like = action_button(
        if liked { Icon::HeartFilled } else { Icon::Heart },
        Some(reactions.like_count(&short.id).to_string()),
        liked.then_some(palette::LIKE),
        Message::ToggleLike(short.id.clone()),
    );
    let comment = action_button(
        Icon::Comment,
        Some(reactions.comment_count(&short.id).to_string()),
        None,
        Message::OpenComments(short.id.clone()),
    );
    let bookmark = action_button(
        if bookmarked {
            Icon::BookmarkFilled
        } else {
            Icon::Bookmark
        },
        None,
        bookmarked.then_some(palette::BOOKMARK),
        Message::ToggleBookmark(short.id.clone()),
    );
    let share = action_button(Icon::Share, None, None, Message::Share(short.id.clone()));

    Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(like)
        .push(comment)
        .push(bookmark)
        .push(share)
        .push(Space::new().height(Length::Fixed(spacing::XS)))
        .into()
}

fn action_button<'a>(
    icon: Icon,
    count: Option<String>,
    accent: Option<Color>,
    message: Message,
) -> Element<'a, Message> {
    let glyph = Container::new(icons::sized(icon, sizing::ICON_MD))
        .width(Length::Fixed(sizing::ACTION_BUTTON))
        .height(Length::Fixed(sizing::ACTION_BUTTON))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    let mut column = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(
            button(glyph)
                .padding(0)
                .on_press(message)
                .style(styles::button::overlay(accent)),
        );
    if let Some(count) = count {
        column = column.push(text(count).size(typography::CAPTION).color(palette::WHITE));
    }
    column.into()
}
