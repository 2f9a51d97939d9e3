// SPDX-License-Identifier: MPL-2.0
//! Default values and timing constants.
//!
//! # Categories
//!
//! - **Timing**: back-press window, player controls auto-hide, UI tick
//! - **Content**: data saver
//! - **Window**: initial window size

use std::time::Duration;

// ==========================================================================
// Timing
// ==========================================================================

/// Window in which a second back press counts as "leave the app".
pub const BACK_PRESS_WINDOW: Duration = Duration::from_millis(2000);

/// Player controls hide after this long without pointer activity.
pub const CONTROLS_HIDE_DELAY: Duration = Duration::from_secs(4);

/// Interval of the UI tick driving toasts and timers.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

// ==========================================================================
// Content
// ==========================================================================

/// Data saver is off until the user enables it.
pub const DEFAULT_DATA_SAVER: bool = false;

// ==========================================================================
// Window
// ==========================================================================

/// Initial window width (phone-like portrait layout).
pub const WINDOW_WIDTH: f32 = 430.0;

/// Initial window height.
pub const WINDOW_HEIGHT: f32 = 860.0;

/// Smallest usable window width.
pub const MIN_WINDOW_WIDTH: f32 = 360.0;

/// Smallest usable window height.
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_constants_are_positive() {
        assert!(!BACK_PRESS_WINDOW.is_zero());
        assert!(!CONTROLS_HIDE_DELAY.is_zero());
        assert!(TICK_INTERVAL < BACK_PRESS_WINDOW);
    }

    #[test]
    fn window_fits_minimum() {
        assert!(WINDOW_WIDTH >= MIN_WINDOW_WIDTH);
        assert!(WINDOW_HEIGHT >= MIN_WINDOW_HEIGHT);
    }
}
