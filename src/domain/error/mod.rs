// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! This module provides error types shared by the backend ports and the
//! session layer, independent of the HTTP client used to reach the backend.

mod backend;

pub use backend::BackendError;
