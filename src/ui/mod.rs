// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`home`] - Top stories and the short-video feed
//! - [`live`] - Live channel player and programme guide
//! - [`settings`] - Account, display, cache and support preferences
//! - [`about`] - Application version and credits
//!
//! # Overlays
//!
//! - [`auth_sheet`] - Sign up, log in and profile bottom sheet
//! - [`shorts::comments`] - Comment panel of a short
//! - [`exit_dialog`] - Exit confirmation after a double back-press
//! - [`notifications`] - Toast notification system for user feedback
//!
//! # Shared Infrastructure
//!
//! - [`state`] - UI state machines (back guard, auto-hide, reaction cache)
//! - [`auth_gate`] - Sign-in gate for interactive actions
//! - [`image_cache`] - Downloaded avatars and channel logos
//! - [`styles`] - Centralized styling (buttons, containers, slider)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management
//! - [`icons`] - Icon glyphs
//! - [`navbar`] - Bottom navigation bar

pub mod about;
pub mod auth_gate;
pub mod auth_sheet;
pub mod avatar;
pub mod design_tokens;
pub mod exit_dialog;
pub mod home;
pub mod icons;
pub mod image_cache;
pub mod live;
pub mod modal;
pub mod navbar;
pub mod notifications;
pub mod settings;
pub mod shorts;
pub mod state;
pub mod styles;
pub mod theming;

pub use image_cache::ImageCache;
