// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for settings sections and list cards.
///
/// The color is derived from the active `Theme` background, with a slight
/// opacity, so panels stay readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::SURFACE,
            ..base
        })),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Bottom sheet (auth, comments): rounded top corners, opaque surface.
pub fn sheet(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(Background::Color(base)),
        text_color: Some(theme.palette().text),
        border: Border {
            radius: iced::border::Radius {
                top_left: radius::XL,
                top_right: radius::XL,
                bottom_right: radius::NONE,
                bottom_left: radius::NONE,
            },
            ..Default::default()
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Centered confirmation dialog.
pub fn dialog(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        text_color: Some(theme.palette().text),
        border: Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Dimmed backdrop behind sheets and dialogs.
pub fn scrim(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// Black video surface; text on top is white regardless of theme.
pub fn video(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BLACK)),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Translucent strip over video (captions, player controls).
pub fn video_overlay(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Small colored label ("LIVE", article category).
pub fn badge(color: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(color)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Circular avatar placeholder showing the user's initial.
pub fn avatar(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::BRAND_600)),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Bottom navigation bar.
pub fn bottom_bar(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            color: palette.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}
