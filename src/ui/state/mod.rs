// SPDX-License-Identifier: MPL-2.0
//! UI state machines, kept apart from the widgets that render them.
//!
//! Everything time based takes an explicit `now: Instant` so the logic runs
//! the same under the UI tick and in tests.

pub mod auto_hide;
pub mod back_guard;
pub mod reactions;

pub use auto_hide::AutoHide;
pub use back_guard::{BackGuard, BackOutcome};
pub use reactions::{ReactionCache, Toggle};
