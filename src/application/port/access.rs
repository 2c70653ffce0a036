// SPDX-License-Identifier: MPL-2.0
//! Storage access port definition.
//!
//! This module defines the [`StorageAccess`] trait through which the broker
//! turns a descriptor's [`Locator`] into something readable. Platforms with
//! scoped permissions (sandboxed bookmarks and the like) start a grant in
//! `resolve` and end it in `release`.
//!
//! # Design Notes
//!
//! - Methods are blocking; callers run them off the controller thread when
//!   the storage is slow (see `app::tasks`)
//! - `release` must be idempotent
//! - Implementations must be `Send + Sync` so a shared instance can be used
//!   from worker threads

use crate::domain::media::{Locator, MediaId};
use std::path::{Path, PathBuf};

// =============================================================================
// AccessError
// =============================================================================

/// Why a locator could not be turned into a grant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The locator no longer points at the item it was captured from.
    #[error("locator is stale: {}", .0.display())]
    Stale(PathBuf),

    /// The storage layer refused to start a scoped grant.
    #[error("access denied: {}", .0.display())]
    Denied(PathBuf),

    /// Neither the bookmark nor the raw path can be reached.
    #[error("unreachable '{}': {reason}", path.display())]
    Unreachable { path: PathBuf, reason: String },
}

// =============================================================================
// Grant / AccessHandle
// =============================================================================

/// Identifier of one scoped-access grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GrantId(u64);

impl GrantId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A started scoped-access grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    id: GrantId,
    path: PathBuf,
}

impl Grant {
    #[must_use]
    pub fn new(id: GrantId, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GrantId {
        self.id
    }

    /// Resolved, readable location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// How an [`AccessHandle`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleAccess {
    /// Backed by a live grant that must be released.
    Scoped(GrantId),
    /// Resolution failed; the raw, unresolved locator is used best-effort.
    Degraded,
}

/// An accessible location handed to display and playback collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessHandle {
    media: Option<MediaId>,
    path: PathBuf,
    access: HandleAccess,
}

impl AccessHandle {
    /// Handle backed by a live grant.
    #[must_use]
    pub fn scoped(media: Option<MediaId>, grant: &Grant) -> Self {
        Self {
            media,
            path: grant.path().to_path_buf(),
            access: HandleAccess::Scoped(grant.id()),
        }
    }

    /// Handle falling back to the raw locator path.
    #[must_use]
    pub fn degraded(media: Option<MediaId>, locator: &Locator) -> Self {
        Self {
            media,
            path: locator.path().to_path_buf(),
            access: HandleAccess::Degraded,
        }
    }

    /// Item this handle was opened for; `None` for folder handles.
    #[must_use]
    pub fn media(&self) -> Option<MediaId> {
        self.media
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn access(&self) -> HandleAccess {
        self.access
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.access, HandleAccess::Degraded)
    }

    /// Grant to release, if any.
    #[must_use]
    pub fn grant_id(&self) -> Option<GrantId> {
        match self.access {
            HandleAccess::Scoped(id) => Some(id),
            HandleAccess::Degraded => None,
        }
    }
}

// =============================================================================
// StorageAccess Trait
// =============================================================================

/// Port for starting and ending scoped access to stored media.
pub trait StorageAccess: Send + Sync {
    /// Resolves a locator and starts a scoped grant for it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Stale`] when the bookmark no longer matches,
    /// [`AccessError::Denied`] when the grant is refused and
    /// [`AccessError::Unreachable`] when nothing can be reached at all.
    fn resolve(&self, locator: &Locator) -> Result<Grant, AccessError>;

    /// Ends a grant. Releasing twice is a no-op.
    fn release(&self, grant: GrantId);
}
