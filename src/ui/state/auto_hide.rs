// SPDX-License-Identifier: MPL-2.0
//! Auto-hiding overlay visibility (player controls).

use crate::app::config::CONTROLS_HIDE_DELAY;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHide {
    delay: Duration,
    visible_since: Option<Instant>,
}

impl Default for AutoHide {
    fn default() -> Self {
        Self::new(CONTROLS_HIDE_DELAY)
    }
}

impl AutoHide {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            visible_since: None,
        }
    }

    /// Shows the overlay and restarts the countdown.
    pub fn show(&mut self, now: Instant) {
        self.visible_since = Some(now);
    }

    pub fn hide(&mut self) {
        self.visible_since = None;
    }

    /// Hides the overlay once the delay has passed. Returns `true` if it
    /// just became hidden.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.visible_since {
            Some(since) if now.saturating_duration_since(since) >= self.delay => {
                self.visible_since = None;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible_since.is_some()
    }
}
