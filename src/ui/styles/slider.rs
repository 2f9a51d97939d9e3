// SPDX-License-Identifier: MPL-2.0
//! Slider style for the live player progress bar.

use crate::ui::design_tokens::{opacity, palette, sizing};
use iced::widget::slider;
use iced::{Background, Border, Color, Theme};

/// Brand-red played portion over a translucent white rail.
pub fn progress(_theme: &Theme, status: slider::Status) -> slider::Style {
    let thumb = match status {
        slider::Status::Hovered | slider::Status::Dragged => palette::BRAND_300,
        slider::Status::Active => palette::BRAND_500,
    };

    slider::Style {
        rail: slider::Rail {
            backgrounds: (
                Background::Color(palette::BRAND_500),
                Background::Color(Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::WHITE
                }),
            ),
            width: sizing::PROGRESS_TRACK,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: (sizing::PROGRESS_TRACK / 2.0).into(),
            },
        },
        handle: slider::Handle {
            shape: slider::HandleShape::Circle {
                radius: sizing::PROGRESS_THUMB / 2.0,
            },
            background: Background::Color(thumb),
            border_width: 0.0,
            border_color: Color::TRANSPARENT,
        },
    }
}
