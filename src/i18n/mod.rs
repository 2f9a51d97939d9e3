// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are Fluent `.ftl` files embedded from `assets/i18n/`. The
//! locale comes from `--lang`, then `settings.toml`, then the OS, then
//! falls back to `en-US`. The language row in settings cycles through the
//! bundled locales at runtime.

pub mod fluent;
