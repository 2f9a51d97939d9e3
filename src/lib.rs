// SPDX-License-Identifier: MPL-2.0
//! `tv3_home_hub` is the TV3 news, live stream and short-video client built
//! with the Iced GUI framework on top of a hosted Supabase project.
//!
//! Layers follow a ports-and-adapters split: `domain` holds plain data and
//! rules, `application` the async flows and backend ports, `infrastructure`
//! the REST adapter, and `ui`/`app` the Iced components and orchestration.

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod ui;

#[doc(hidden)]
pub mod test_utils;
