// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`supabase`]: Hosted backend over HTTPS via `reqwest` (implements
//!   [`AuthService`], [`RowStore`] and [`ObjectStore`])
//!
//! [`AuthService`]: crate::application::port::AuthService
//! [`RowStore`]: crate::application::port::RowStore
//! [`ObjectStore`]: crate::application::port::ObjectStore

pub mod supabase;

pub use supabase::SupabaseClient;
