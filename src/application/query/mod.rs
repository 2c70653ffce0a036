// SPDX-License-Identifier: MPL-2.0
//! Query services (CQRS read-side).
//!
//! Queries never modify state; they summarize it for presentation.
//!
//! # Available Queries
//!
//! - [`navigation`]: Navigation snapshot (`NavigationInfo`)

pub mod navigation;

// Re-export main types
pub use navigation::NavigationInfo;
