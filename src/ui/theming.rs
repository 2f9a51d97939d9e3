// SPDX-License-Identifier: MPL-2.0
//! Light/Dark/System theme handling.

use crate::ui::design_tokens::{opacity, palette};
use iced::theme::Palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub surface_primary: Color,
    pub surface_secondary: Color,

    pub text_primary: Color,
    pub text_secondary: Color,

    pub brand_primary: Color,

    pub error: Color,
    pub success: Color,

    /// Scrim behind sheets and dialogs.
    pub overlay_background: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_primary: palette::WHITE,
            surface_secondary: palette::GRAY_100,
            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,
            brand_primary: palette::BRAND_500,
            error: palette::ERROR_500,
            success: palette::SUCCESS_500,
            overlay_background: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_primary: palette::GRAY_950,
            surface_secondary: palette::GRAY_800,
            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,
            brand_primary: palette::BRAND_400,
            error: palette::ERROR_500,
            success: palette::SUCCESS_500,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
        }
    }

    /// Builds the iced palette for this scheme.
    #[must_use]
    pub fn to_palette(&self) -> Palette {
        Palette {
            background: self.surface_primary,
            text: self.text_primary,
            primary: self.brand_primary,
            success: self.success,
            danger: self.error,
            ..Palette::DARK
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => {
                // Default to dark on detection error
                !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
            }
        }
    }

    /// The explicit mode the Appearance switch moves to.
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_dark() {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    #[must_use]
    pub fn scheme(self) -> ColorScheme {
        if self.is_dark() {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        }
    }

    /// The iced theme for this mode.
    #[must_use]
    pub fn theme(self) -> Theme {
        let (name, scheme) = if self.is_dark() {
            ("TV3 Dark", ColorScheme::dark())
        } else {
            ("TV3 Light", ColorScheme::light())
        };
        Theme::custom(name.to_string(), scheme.to_palette())
    }
}
