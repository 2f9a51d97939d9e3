// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! The hosted backend is reached through three narrow ports: auth, row
//! storage and object storage. The production adapter lives in
//! `infrastructure::supabase`; tests use an in-memory fake.
//!
//! # Design Notes
//!
//! - All traits are object safe and `Send + Sync`, so one
//!   [`SharedBackend`] can be cloned into every `Task`
//! - Methods return boxed `'static` futures; arguments are copied in, never
//!   borrowed across an await
//! - Every call is attempted once; there is no retry layer

pub mod backend;

pub use backend::{
    AuthService, Backend, BackendFuture, Filter, ObjectStore, Order, Query, RowStore,
    SharedBackend,
};
