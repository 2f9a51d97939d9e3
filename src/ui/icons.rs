// SPDX-License-Identifier: MPL-2.0
//! Icon glyphs.
//!
//! Icons are single Unicode symbols rendered as text, so they follow the
//! surrounding text color and scale with the font size.

use iced::widget::{text, Text};

/// Every icon used in the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    Live,
    Profile,
    Search,
    Settings,
    Back,
    Close,
    Check,
    Info,
    Warning,
    Heart,
    HeartFilled,
    Comment,
    Bookmark,
    BookmarkFilled,
    Share,
    Music,
    Play,
    Pause,
    SkipBack,
    SkipForward,
    Fullscreen,
    ExitFullscreen,
    Volume,
    Muted,
    Chevron,
    Send,
    Camera,
}

impl Icon {
    /// The glyph for this icon.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::Live => "◉",
            Icon::Profile => "☺",
            Icon::Search => "⌕",
            Icon::Settings => "⚙",
            Icon::Back => "‹",
            Icon::Close => "✕",
            Icon::Check => "✓",
            Icon::Info => "ℹ",
            Icon::Warning => "⚠",
            Icon::Heart => "♡",
            Icon::HeartFilled => "♥",
            Icon::Comment => "✉",
            Icon::Bookmark => "☆",
            Icon::BookmarkFilled => "★",
            Icon::Share => "↗",
            Icon::Music => "♪",
            Icon::Play => "▶",
            Icon::Pause => "⏸",
            Icon::SkipBack => "⟲",
            Icon::SkipForward => "⟳",
            Icon::Fullscreen => "⤢",
            Icon::ExitFullscreen => "⤡",
            Icon::Volume => "🔊",
            Icon::Muted => "🔇",
            Icon::Chevron => "›",
            Icon::Send => "➤",
            Icon::Camera => "📷",
        }
    }
}

/// Renders an icon at `size`.
pub fn sized<'a>(icon: Icon, size: f32) -> Text<'a> {
    text(icon.glyph()).size(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_variants_differ() {
        assert_ne!(Icon::Heart.glyph(), Icon::HeartFilled.glyph());
        assert_ne!(Icon::Bookmark.glyph(), Icon::BookmarkFilled.glyph());
    }
}
