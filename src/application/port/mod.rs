// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These are the collaborators the session controller consumes without
//! knowing how they work:
//!
//! - [`access`]: scoped access to stored media ([`StorageAccess`])
//! - [`playback`]: players for video handles ([`PlaybackSink`])
//!
//! Folder enumeration is the third collaborator; it lives in
//! [`crate::directory_scanner`].

pub mod access;
pub mod playback;

// Re-export main types for convenience
pub use access::{AccessError, AccessHandle, Grant, GrantId, HandleAccess, StorageAccess};
pub use playback::{PlaybackError, PlaybackSink, PlayerId};
