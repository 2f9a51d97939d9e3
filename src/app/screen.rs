// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Root screen: top stories and shorts.
    #[default]
    Home,
    Live,
    Settings,
    About,
}

impl Screen {
    /// Whether back on this screen goes through the exit guard.
    #[must_use]
    pub fn is_root(self) -> bool {
        self == Screen::Home
    }
}
