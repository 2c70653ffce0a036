// SPDX-License-Identifier: MPL-2.0
//! Filesystem adapter implementing the [`StorageAccess`] port trait.
//!
//! Locators discovered on disk carry a [`Bookmark`]: the canonical path plus
//! the size and modification time seen at discovery. Resolving checks the
//! bookmark is still accurate, checks that the target can actually be opened
//! and then records a grant. Grants on a plain filesystem carry no OS
//! resources, but tracking them keeps the one-handle rule observable.
//!
//! [`StorageAccess`]: crate::application::port::StorageAccess

use crate::application::port::{AccessError, Grant, GrantId, StorageAccess};
use crate::domain::media::{Bookmark, Locator};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Captures a bookmark for a file, or `None` if it cannot be inspected.
#[must_use]
pub fn capture_bookmark(path: &Path) -> Option<Bookmark> {
    let target = fs::canonicalize(path).ok()?;
    let metadata = fs::metadata(&target).ok()?;
    Some(Bookmark {
        target,
        len: metadata.len(),
        modified: metadata.modified().ok(),
    })
}

/// Local filesystem storage with grant bookkeeping.
#[derive(Debug, Default)]
pub struct FsStorage {
    next_grant: AtomicU64,
    active: Mutex<HashSet<GrantId>>,
}

impl FsStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grants started and not yet released.
    #[must_use]
    pub fn active_grants(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the given grant is still live.
    #[must_use]
    pub fn is_active(&self, grant: GrantId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&grant)
    }

    fn start_grant(&self, path: PathBuf) -> Grant {
        let id = GrantId::new(self.next_grant.fetch_add(1, Ordering::Relaxed) + 1);
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        Grant::new(id, path)
    }
}

impl StorageAccess for FsStorage {
    fn resolve(&self, locator: &Locator) -> Result<Grant, AccessError> {
        let target = match locator.bookmark() {
            Some(bookmark) => resolve_bookmark(locator, bookmark)?,
            None => {
                let path = locator.path();
                fs::metadata(path).map_err(|err| classify(path, &err, false))?;
                path.to_path_buf()
            }
        };

        check_readable(&target)?;
        Ok(self.start_grant(target))
    }

    fn release(&self, grant: GrantId) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&grant);
    }
}

fn resolve_bookmark(locator: &Locator, bookmark: &Bookmark) -> Result<PathBuf, AccessError> {
    let metadata =
        fs::metadata(&bookmark.target).map_err(|err| classify(locator.path(), &err, true))?;

    let changed = metadata.len() != bookmark.len
        || (bookmark.modified.is_some() && metadata.modified().ok() != bookmark.modified);
    if changed {
        return Err(AccessError::Stale(locator.path().to_path_buf()));
    }
    Ok(bookmark.target.clone())
}

fn check_readable(target: &Path) -> Result<(), AccessError> {
    let opened = if target.is_dir() {
        fs::read_dir(target).map(|_| ())
    } else {
        fs::File::open(target).map(|_| ())
    };
    opened.map_err(|err| classify(target, &err, false))
}

/// A missing bookmark target means the item moved; a missing raw path means
/// there is nothing left to fall back to.
fn classify(path: &Path, err: &std::io::Error, bookmarked: bool) -> AccessError {
    match err.kind() {
        ErrorKind::PermissionDenied => AccessError::Denied(path.to_path_buf()),
        ErrorKind::NotFound if bookmarked => AccessError::Stale(path.to_path_buf()),
        _ => AccessError::Unreachable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        },
    }
}
