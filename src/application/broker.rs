// SPDX-License-Identifier: MPL-2.0
//! Resource access broker.
//!
//! The broker owns the [`AccessHandle`] of the item on screen. A handle only
//! replaces it once the new item is actually shown: [`AccessBroker::install`]
//! releases the previous handle and opens the new one in a single step, so a
//! failed jump or swipe leaves the item on screen readable.
//!
//! A swipe target's handle is [staged](AccessBroker::stage) next to the open
//! one while its slot is preloading. Settling the swipe commits it; cancelling
//! or aborting the swipe releases it. The folder handle pinned by
//! [`AccessBroker::pin`] stays open until another folder is chosen or the
//! session shuts down.
//!
//! Resolution itself happens elsewhere (see `StorageAccess`); the broker only
//! turns outcomes into handles. Stale and denied outcomes degrade to a handle
//! on the raw, unresolved path so playback can still be attempted. Only an
//! unreachable location is reported to the caller.

use crate::application::port::{AccessError, AccessHandle, Grant, StorageAccess};
use crate::domain::media::{Locator, MediaDescriptor};
use std::path::Path;
use std::sync::Arc;

/// Grants and revokes scoped access, one item on screen at a time.
#[derive(Debug)]
pub struct AccessBroker<S: StorageAccess> {
    storage: Arc<S>,
    open: Option<AccessHandle>,
    staged: Option<AccessHandle>,
    pinned: Option<AccessHandle>,
}

impl<S: StorageAccess> AccessBroker<S> {
    #[must_use]
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            open: None,
            staged: None,
            pinned: None,
        }
    }

    /// Shared storage, for resolutions performed off the controller thread.
    #[must_use]
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Handle of the item on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&AccessHandle> {
        self.open.as_ref()
    }

    /// Handle of the swipe target being preloaded, if any.
    #[must_use]
    pub fn staged(&self) -> Option<&AccessHandle> {
        self.staged.as_ref()
    }

    /// Turns a resolution outcome into a handle without opening it.
    ///
    /// The caller either installs, stages or releases the returned handle.
    ///
    /// # Errors
    ///
    /// Passes [`AccessError::Unreachable`] through; other errors degrade.
    pub fn admit(
        &self,
        descriptor: &MediaDescriptor,
        outcome: Result<Grant, AccessError>,
    ) -> Result<AccessHandle, AccessError> {
        match outcome {
            Ok(grant) => Ok(AccessHandle::scoped(Some(descriptor.id()), &grant)),
            Err(err @ (AccessError::Stale(_) | AccessError::Denied(_))) => {
                log::warn!(
                    "falling back to raw locator for {}: {err}",
                    descriptor.display_name()
                );
                Ok(AccessHandle::degraded(
                    Some(descriptor.id()),
                    descriptor.locator(),
                ))
            }
            Err(err) => Err(err),
        }
    }

    /// Makes `handle` the open one, releasing the previous handle first.
    pub fn install(&mut self, handle: AccessHandle) {
        self.release_current();
        self.open = Some(handle);
    }

    /// Holds `handle` for the slot being preloaded, replacing any earlier
    /// staged handle.
    pub fn stage(&mut self, handle: AccessHandle) {
        self.drop_staged();
        self.staged = Some(handle);
    }

    /// Opens the staged handle in place of the current one. Returns `false`
    /// when nothing was staged.
    pub fn commit_staged(&mut self) -> bool {
        match self.staged.take() {
            Some(handle) => {
                self.install(handle);
                true
            }
            None => false,
        }
    }

    /// Releases the staged handle, if any.
    pub fn drop_staged(&mut self) {
        if let Some(handle) = self.staged.take() {
            self.release(&handle);
        }
    }

    /// Drops the outcome of a resolution that is no longer wanted.
    pub fn discard(&self, outcome: &Result<Grant, AccessError>) {
        if let Ok(grant) = outcome {
            self.storage.release(grant.id());
        }
    }

    /// Ends a handle's grant. Releasing twice is a no-op.
    pub fn release(&mut self, handle: &AccessHandle) {
        for slot in [&mut self.open, &mut self.staged, &mut self.pinned] {
            if slot.as_ref() == Some(handle) {
                *slot = None;
            }
        }
        if let Some(grant) = handle.grant_id() {
            self.storage.release(grant);
        }
    }

    /// Releases the handle of the item on screen, if any.
    pub fn release_current(&mut self) {
        if let Some(handle) = self.open.take() {
            self.release(&handle);
        }
    }

    /// Keeps `root` open across navigation, replacing any previously pinned
    /// folder. A failed resolution pins the raw path instead.
    pub fn pin(&mut self, root: &Path, outcome: Result<Grant, AccessError>) -> AccessHandle {
        self.unpin();
        let handle = match outcome {
            Ok(grant) => AccessHandle::scoped(None, &grant),
            Err(err) => {
                log::warn!("folder access degraded: {err}");
                AccessHandle::degraded(None, &Locator::new(root))
            }
        };
        self.pinned = Some(handle.clone());
        handle
    }

    /// Releases the pinned folder handle, if any.
    pub fn unpin(&mut self) {
        if let Some(handle) = self.pinned.take() {
            self.release(&handle);
        }
    }

    /// Releases every handle, pinned folder included.
    pub fn release_all(&mut self) {
        self.drop_staged();
        self.release_current();
        self.unpin();
    }
}
