// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary call to action (submit, exit, post).
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::BRAND_500, palette::BRAND_600, shadow::SM)
        }
        button::Status::Hovered => (palette::BRAND_400, palette::BRAND_500, shadow::MD),
        button::Status::Disabled => return disabled(theme, status),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow,
        snap: true,
    }
}

/// Secondary action on a neutral surface (Stay, Cancel, provider buttons).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let background = theme.extended_palette().background;
    let fill = match status {
        button::Status::Hovered => background.strong.color,
        button::Status::Disabled => return disabled(theme, status),
        button::Status::Active | button::Status::Pressed => background.weak.color,
    };
    button::Style {
        background: Some(Background::Color(fill)),
        text_color: theme.palette().text,
        border: Border {
            color: background.strong.color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Borderless row or icon button that only shows a tint on hover.
pub fn ghost(theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };
    button::Style {
        background,
        text_color: theme.palette().text,
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Grayed out, non-interactive.
pub fn disabled(theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(if theme.extended_palette().is_dark {
            palette::GRAY_700
        } else {
            palette::GRAY_200
        })),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Tab or chip: brand fill when selected, neutral outline otherwise.
pub fn pill(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let text = theme.palette().text;
        let (background, text_color, border_color) = if selected {
            let fill = if matches!(status, button::Status::Hovered) {
                palette::BRAND_400
            } else {
                palette::BRAND_500
            };
            (Some(Background::Color(fill)), WHITE, fill)
        } else {
            let hover = matches!(status, button::Status::Hovered).then(|| {
                Background::Color(Color {
                    a: opacity::OVERLAY_SUBTLE,
                    ..palette::GRAY_400
                })
            });
            (hover, text, palette::GRAY_400)
        };
        button::Style {
            background,
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: radius::FULL.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Bottom navigation item; the active tab is drawn in the brand color.
pub fn nav_item(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let text_color = if active {
            palette::BRAND_500
        } else {
            Color {
                a: opacity::OVERLAY_STRONG,
                ..theme.palette().text
            }
        };
        let background = matches!(status, button::Status::Hovered).then(|| {
            Background::Color(Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::GRAY_400
            })
        });
        button::Style {
            background,
            text_color,
            border: Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Round button floating over video (feed actions, player controls).
///
/// `accent` colors the glyph when the action is active (liked, bookmarked).
pub fn overlay(accent: Option<Color>) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => opacity::OVERLAY_STRONG,
            button::Status::Pressed => opacity::OVERLAY_PRESSED,
            _ => opacity::OVERLAY_MEDIUM,
        };
        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..BLACK })),
            text_color: accent.unwrap_or(WHITE),
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            shadow: shadow::MD,
            snap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_button_uses_brand_colors() {
        let style = primary(&Theme::Dark, button::Status::Active);
        assert_eq!(
            style.background,
            Some(Background::Color(palette::BRAND_500))
        );
    }

    #[test]
    fn primary_button_grays_out_when_disabled() {
        let style = primary(&Theme::Light, button::Status::Disabled);
        assert_eq!(style.text_color, palette::GRAY_400);
    }

    #[test]
    fn overlay_button_alpha_changes_on_hover() {
        let style_fn = overlay(None);
        let normal = style_fn(&Theme::Dark, button::Status::Active);
        let hover = style_fn(&Theme::Dark, button::Status::Hovered);
        assert_ne!(normal.background, hover.background);
    }

    #[test]
    fn overlay_button_uses_accent_when_active() {
        let style = overlay(Some(palette::LIKE))(&Theme::Dark, button::Status::Active);
        assert_eq!(style.text_color, palette::LIKE);
    }

    #[test]
    fn nav_item_highlights_active_tab() {
        let active = nav_item(true)(&Theme::Dark, button::Status::Active);
        let idle = nav_item(false)(&Theme::Dark, button::Status::Active);
        assert_eq!(active.text_color, palette::BRAND_500);
        assert_ne!(idle.text_color, palette::BRAND_500);
    }

    #[test]
    fn unselected_pill_is_transparent_at_rest() {
        let style = pill(false)(&Theme::Light, button::Status::Active);
        assert!(style.background.is_none());
    }
}
