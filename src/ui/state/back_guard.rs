// SPDX-License-Identifier: MPL-2.0
//! Double back-press to leave.
//!
//! Away from the root screen, back simply returns to the root. On the root
//! screen, a first press arms a short window; a second press inside it asks
//! whether to exit. Users who opted out of the question exit directly.

use crate::app::config::BACK_PRESS_WINDOW;
use std::time::{Duration, Instant};

/// What the application should do for a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Replace the current screen with the root screen.
    NavigateRoot,
    /// First press on the root screen; nothing visible happens.
    Primed,
    /// Second press in time: show the exit confirmation.
    PromptExit,
    /// Leave without asking.
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Primed { at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackGuard {
    phase: Phase,
    window: Duration,
}

impl Default for BackGuard {
    fn default() -> Self {
        Self::new(BACK_PRESS_WINDOW)
    }
}

impl BackGuard {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            window,
        }
    }

    /// Handles one back press.
    ///
    /// `on_root` tells whether the root screen is showing; `never_ask` is the
    /// persisted opt-out of the exit confirmation.
    pub fn press(&mut self, on_root: bool, never_ask: bool, now: Instant) -> BackOutcome {
        if !on_root {
            return BackOutcome::NavigateRoot;
        }
        if never_ask {
            return BackOutcome::Exit;
        }
        self.expire(now);
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Primed { at: now };
                BackOutcome::Primed
            }
            Phase::Primed { .. } => {
                self.phase = Phase::Idle;
                BackOutcome::PromptExit
            }
        }
    }

    /// Drops back to idle once the window has elapsed.
    pub fn expire(&mut self, now: Instant) {
        if let Phase::Primed { at } = self.phase {
            if now.saturating_duration_since(at) >= self.window {
                self.phase = Phase::Idle;
            }
        }
    }

    #[must_use]
    pub fn is_primed(&self) -> bool {
        matches!(self.phase, Phase::Primed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_root_navigates_home_without_state_change() {
        let mut guard = BackGuard::default();
        let now = Instant::now();
        assert_eq!(guard.press(false, false, now), BackOutcome::NavigateRoot);
        assert!(!guard.is_primed());
    }

    #[test]
    fn two_presses_within_window_prompt() {
        let mut guard = BackGuard::default();
        let start = Instant::now();
        assert_eq!(guard.press(true, false, start), BackOutcome::Primed);
        assert_eq!(
            guard.press(true, false, start + Duration::from_millis(1500)),
            BackOutcome::PromptExit
        );
        assert!(!guard.is_primed());
    }

    #[test]
    fn pause_past_window_resets_without_prompt() {
        let mut guard = BackGuard::default();
        let start = Instant::now();
        guard.press(true, false, start);

        guard.expire(start + BACK_PRESS_WINDOW);
        assert!(!guard.is_primed());
        assert_eq!(
            guard.press(true, false, start + Duration::from_millis(2100)),
            BackOutcome::Primed
        );
    }

    #[test]
    fn never_ask_exits_immediately() {
        let mut guard = BackGuard::default();
        assert_eq!(guard.press(true, true, Instant::now()), BackOutcome::Exit);
    }
}
