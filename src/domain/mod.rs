// SPDX-License-Identifier: MPL-2.0
//! Domain layer - plain records and value objects.
//!
//! Nothing in here talks to the network or the UI toolkit. The only external
//! crates are `serde` (row shapes exchanged with the backend) and `chrono`
//! (row timestamps).
//!
//! # Modules
//!
//! - [`auth`]: Credentials, derived login email and session records
//! - [`content`]: Backend rows ([`Profile`](content::Profile),
//!   [`Short`](content::Short), [`ShortComment`](content::ShortComment)) and
//!   the static [`Article`](content::Article) list
//! - [`error`]: Domain error types ([`BackendError`](error::BackendError))
//! - [`live`]: Live player value objects ([`Progress`](live::Progress),
//!   [`VideoQuality`](live::VideoQuality))

pub mod auth;
pub mod content;
pub mod error;
pub mod live;
