// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Design constants shared by every screen.

## Organization

- **Palette**: Base colors, including the broadcast red brand scale
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use tv3_home_hub::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let scrim = Color {
    a: opacity::OVERLAY_STRONG,
    ..palette::BLACK
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_950: Color = Color::from_rgb(0.05, 0.05, 0.06);
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.11);
    pub const GRAY_800: Color = Color::from_rgb(0.16, 0.16, 0.18);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.32);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.42);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.77);
    pub const GRAY_100: Color = Color::from_rgb(0.93, 0.93, 0.94);

    // Brand colors (broadcast red)
    pub const BRAND_300: Color = Color::from_rgb(0.96, 0.45, 0.45);
    pub const BRAND_400: Color = Color::from_rgb(0.93, 0.3, 0.3);
    pub const BRAND_500: Color = Color::from_rgb(0.86, 0.15, 0.15); // Primary red
    pub const BRAND_600: Color = Color::from_rgb(0.73, 0.11, 0.11);
    pub const BRAND_700: Color = Color::from_rgb(0.6, 0.08, 0.08);

    // Reactions
    pub const LIKE: Color = Color::from_rgb(0.94, 0.27, 0.35);
    pub const BOOKMARK: Color = Color::from_rgb(0.98, 0.8, 0.08);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    pub const OPAQUE: f32 = 1.0;

    /// Sheets and cards over the feed
    pub const SURFACE: f32 = 0.95;
}

// ============================================================================
// Spacing Scale (8px baseline grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
    pub const XXL: f32 = 48.0; // 6 units
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    // Icon sizes
    pub const ICON_SM: f32 = 16.0;
    pub const ICON_MD: f32 = 24.0;
    pub const ICON_LG: f32 = 32.0;
    pub const ICON_XL: f32 = 48.0;

    // Interactive element heights
    pub const BUTTON_HEIGHT: f32 = 44.0;
    pub const INPUT_HEIGHT: f32 = 44.0;

    // Avatars
    pub const AVATAR_SM: f32 = 32.0;
    pub const AVATAR_LG: f32 = 88.0;

    // Chrome
    pub const BOTTOM_NAV_HEIGHT: f32 = 64.0;
    pub const HEADER_HEIGHT: f32 = 56.0;
    pub const TOAST_WIDTH: f32 = 340.0;
    pub const SHEET_MAX_WIDTH: f32 = 480.0;
    pub const DIALOG_WIDTH: f32 = 320.0;
    pub const COMMENTS_PANEL_HEIGHT: f32 = 520.0;

    // Player
    pub const PROGRESS_TRACK: f32 = 4.0;
    pub const PROGRESS_THUMB: f32 = 12.0;
    pub const PLAYER_ASPECT: f32 = 16.0 / 9.0;

    // Feed
    pub const ACTION_BUTTON: f32 = 48.0;
    pub const FEATURED_CARD_HEIGHT: f32 = 200.0;
    pub const THUMBNAIL: f32 = 88.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Page headings
    pub const TITLE_LG: f32 = 28.0;

    /// App name, sheet titles
    pub const TITLE_MD: f32 = 20.0;

    /// Section headers, card titles
    pub const TITLE_SM: f32 = 17.0;

    /// Form inputs, emphasis text
    pub const BODY_LG: f32 = 16.0;

    /// Most UI text
    pub const BODY: f32 = 14.0;

    /// Hints, secondary labels
    pub const BODY_SM: f32 = 13.0;

    /// Badges, timestamps, counters
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Scale
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radius Scale
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const XL: f32 = 20.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const SM: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 2.0 },
        blur_radius: 4.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };

    pub const LG: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 8.0 },
        blur_radius: 16.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::OVERLAY_MEDIUM > 0.0 && opacity::OVERLAY_MEDIUM < 1.0);

    assert!(sizing::ICON_XL > sizing::ICON_LG);
    assert!(sizing::ICON_LG > sizing::ICON_MD);
    assert!(sizing::AVATAR_LG > sizing::AVATAR_SM);
    // Touch targets
    assert!(sizing::BUTTON_HEIGHT >= 44.0);
    assert!(sizing::ACTION_BUTTON >= 44.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::BODY_SM);
    assert!(typography::BODY_SM > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn brand_scale_is_red() {
        for color in [palette::BRAND_400, palette::BRAND_500, palette::BRAND_600] {
            assert!(color.r > color.g && color.r > color.b);
        }
    }
}
