// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`broker`]: One-at-a-time scoped storage access
//! - [`navigation`]: Swipe state machine with two player slots
//! - [`shuffle`]: Random picks with back/forward history
//! - [`session`]: The browsing controller tying the above together
//! - [`query`]: Query services (CQRS read-side)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The app layer drives the session and owns concurrency

pub mod broker;
pub mod navigation;
pub mod port;
pub mod query;
pub mod session;
pub mod shuffle;

pub use session::BrowseSession;
