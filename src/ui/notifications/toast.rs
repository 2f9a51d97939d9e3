// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::ui::icons::{self, Icon};
use iced::widget::{button, container, text, Column, Container, Row, Space};
use iced::{alignment, Color, Element, Length, Theme};

pub struct Toast;

impl Toast {
    /// Renders a single toast.
    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent = severity.color();

        let icon = icons::sized(severity.icon(), sizing::ICON_SM)
            .style(move |_theme: &Theme| text::Style { color: Some(accent) });

        let message = text(notification.text(i18n))
            .size(typography::BODY)
            .style(|theme: &Theme| text::Style {
                color: Some(theme.palette().text),
            });

        let dismiss = button(icons::sized(Icon::Close, sizing::ICON_SM))
            .on_press(Message::Dismiss(notification.id()))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(icon)
            .push(Container::new(message).width(Length::Fill))
            .push(dismiss);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent))
            .into()
    }

    /// Stacks visible toasts at the bottom center, above the bottom bar.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        if manager.visible_count() == 0 {
            return Space::new().width(Length::Shrink).height(Length::Shrink).into();
        }

        let toasts = Column::with_children(manager.visible().map(|n| Self::view(n, i18n)))
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Center);

        Container::new(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Bottom)
            .padding(iced::Padding {
                bottom: sizing::BOTTOM_NAV_HEIGHT + spacing::MD,
                ..iced::Padding::new(spacing::MD)
            })
            .into()
    }
}

fn toast_container_style(theme: &Theme, accent: Color) -> container::Style {
    let bg = theme.extended_palette().background.weak.color;
    container::Style {
        background: Some(iced::Background::Color(bg)),
        border: iced::Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::LG.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.palette().text;
    let background = match status {
        button::Status::Hovered => Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };
    button::Style {
        background,
        text_color,
        border: iced::Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_container_style_uses_accent_color() {
        let style = toast_container_style(&Theme::Dark, palette::SUCCESS_500);
        assert_eq!(style.border.color, palette::SUCCESS_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn dismiss_button_is_transparent_at_rest() {
        let style = dismiss_button_style(&Theme::Light, button::Status::Active);
        assert!(style.background.is_none());
    }
}
