// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions the backend adapter implements
//! - [`session`]: Session context and the sign-in / sign-up / profile flows
//! - [`feed`]: Short-video feed loading and social writes
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (`ui`, `app`) calls application services through
//!   `iced::Task::perform`, never the HTTP client directly

pub mod feed;
pub mod port;
pub mod session;
