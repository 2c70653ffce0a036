// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`storage`]: Local filesystem access with bookmarks (implements [`StorageAccess`])
//! - [`playback`]: In-memory players (implements [`PlaybackSink`])
//!
//! [`StorageAccess`]: crate::application::port::StorageAccess
//! [`PlaybackSink`]: crate::application::port::PlaybackSink

pub mod playback;
pub mod storage;

// Re-export main types for convenience
pub use playback::HeadlessSink;
pub use storage::FsStorage;
