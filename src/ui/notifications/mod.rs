// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Feedback that must not block the feed: optimistic reaction rollbacks,
//! sign-in prompts, copied links, persistence warnings.
//!
//! - Success/info toasts last 3s, warnings 5s, errors stay until dismissed
//! - At most three toasts at once, the rest are queued
//! - Toasts stack at the bottom, above the navigation bar

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
