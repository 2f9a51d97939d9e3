// SPDX-License-Identifier: MPL-2.0
//! Live player value objects.
//!
//! The live stream is an embedded third-party player; the client cannot read
//! its real position, so progress is a synthetic percentage driven by the
//! on-screen controls.

use std::fmt;

// =============================================================================
// Progress
// =============================================================================

/// Progress bounds and steps, in percent.
pub mod progress_bounds {
    /// Start of the bar.
    pub const MIN: f32 = 0.0;
    /// End of the bar.
    pub const MAX: f32 = 100.0;
    /// Value shown when the player opens.
    pub const INITIAL: f32 = 35.0;
    /// Amount removed by the skip-back button.
    pub const SKIP_BACK: f32 = 5.0;
    /// Amount added by the skip-forward button.
    pub const SKIP_FORWARD: f32 = 2.5;
}

/// Playback progress percentage, guaranteed to be within 0–100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress(f32);

impl Progress {
    /// Creates a progress value, clamping to the valid range.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self(progress_bounds::MIN);
        }
        Self(percent.clamp(progress_bounds::MIN, progress_bounds::MAX))
    }

    /// Maps a click position on a bar of `width` pixels to a progress value.
    ///
    /// A zero or negative width maps to the start of the bar.
    #[must_use]
    pub fn from_position(x: f32, width: f32) -> Self {
        if width <= 0.0 {
            return Self(progress_bounds::MIN);
        }
        Self::new(x / width * progress_bounds::MAX)
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Moves back by [`progress_bounds::SKIP_BACK`].
    #[must_use]
    pub fn skip_back(self) -> Self {
        Self::new(self.0 - progress_bounds::SKIP_BACK)
    }

    /// Moves forward by [`progress_bounds::SKIP_FORWARD`].
    #[must_use]
    pub fn skip_forward(self) -> Self {
        Self::new(self.0 + progress_bounds::SKIP_FORWARD)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self(progress_bounds::INITIAL)
    }
}

// =============================================================================
// VideoQuality
// =============================================================================

/// Quality label picked in the player menu.
///
/// Purely cosmetic: the embedded player chooses its own stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoQuality {
    #[default]
    Auto,
    P1080,
    P720,
    P480,
    P360,
}

impl VideoQuality {
    /// All options in menu order.
    pub const ALL: [VideoQuality; 5] = [
        VideoQuality::Auto,
        VideoQuality::P1080,
        VideoQuality::P720,
        VideoQuality::P480,
        VideoQuality::P360,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VideoQuality::Auto => "Auto",
            VideoQuality::P1080 => "1080p",
            VideoQuality::P720 => "720p",
            VideoQuality::P480 => "480p",
            VideoQuality::P360 => "360p",
        }
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// Upcoming programme on the live channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub time: &'static str,
    pub title: &'static str,
}

/// Static programme guide shown under the player.
pub const SCHEDULE: [ScheduleEntry; 3] = [
    ScheduleEntry {
        time: "14:00",
        title: "Afternoon News Bulletin",
    },
    ScheduleEntry {
        time: "15:30",
        title: "Sports Round-Up",
    },
    ScheduleEntry {
        time: "17:00",
        title: "Evening Headlines",
    },
];
