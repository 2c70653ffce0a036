// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float assertions and in-memory fakes for the ports.
//!
//! The `approx` crate's assertion macros are re-exported for float
//! comparison, which `assert_eq!` cannot do reliably.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use crate::application::port::{
    AccessError, AccessHandle, Grant, GrantId, PlaybackError, PlaybackSink, PlayerId,
    StorageAccess,
};
use crate::directory_scanner::Catalog;
use crate::domain::media::{Locator, MediaDescriptor};
use crate::domain::video::{PlaybackState, Presentation};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Root used by [`descriptor`] and [`catalog`].
pub const MEDIA_ROOT: &str = "/media";

/// A descriptor for `/media/<name>`; panics on unsupported names.
pub fn descriptor(name: &str) -> MediaDescriptor {
    MediaDescriptor::new(Locator::new(Path::new(MEDIA_ROOT).join(name)))
        .unwrap_or_else(|| panic!("unsupported test file name: {name}"))
}

/// A catalog of `/media/<name>` entries, in the given order.
pub fn catalog(names: &[&str]) -> Catalog {
    Catalog::from_descriptors(MEDIA_ROOT, names.iter().map(|name| descriptor(name)).collect())
}

// =============================================================================
// MemoryStorage
// =============================================================================

#[derive(Debug, Default)]
struct StorageState {
    next: u64,
    active: HashSet<GrantId>,
    failures: HashMap<PathBuf, AccessError>,
    resolved: Vec<PathBuf>,
}

/// Storage that grants everything unless told to fail for a path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<StorageState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every resolution of `path` fail with `err`.
    pub fn fail(&self, path: &Path, err: AccessError) {
        self.state
            .lock()
            .expect("storage lock")
            .failures
            .insert(path.to_path_buf(), err);
    }

    pub fn active_grants(&self) -> usize {
        self.state.lock().expect("storage lock").active.len()
    }

    pub fn is_active(&self, grant: GrantId) -> bool {
        self.state.lock().expect("storage lock").active.contains(&grant)
    }

    /// Every path resolved so far, in order.
    pub fn resolved(&self) -> Vec<PathBuf> {
        self.state.lock().expect("storage lock").resolved.clone()
    }
}

impl StorageAccess for MemoryStorage {
    fn resolve(&self, locator: &Locator) -> Result<Grant, AccessError> {
        let mut state = self.state.lock().expect("storage lock");
        state.resolved.push(locator.path().to_path_buf());
        if let Some(err) = state.failures.get(locator.path()) {
            return Err(err.clone());
        }
        state.next += 1;
        let id = GrantId::new(state.next);
        state.active.insert(id);
        Ok(Grant::new(id, locator.path()))
    }

    fn release(&self, grant: GrantId) {
        self.state.lock().expect("storage lock").active.remove(&grant);
    }
}

// =============================================================================
// RecordingSink
// =============================================================================

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Prepared(PlayerId, PathBuf),
    Played(PlayerId),
    Paused(PlayerId),
    Seeked(PlayerId, f64),
    Presented(PlayerId, Presentation),
    TornDown(PlayerId),
}

/// Sink that records every call and keeps minimal player state.
#[derive(Debug, Default)]
pub struct RecordingSink {
    next: u64,
    live: HashMap<PlayerId, (PathBuf, PlaybackState)>,
    failures: HashSet<PathBuf>,
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `prepare` fail for handles at `path`.
    pub fn fail_on(&mut self, path: &Path) {
        self.failures.insert(path.to_path_buf());
    }

    pub fn live_players(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, player: PlayerId) -> bool {
        self.live.contains_key(&player)
    }

    /// Path the given live player was prepared for.
    pub fn path_of(&self, player: PlayerId) -> Option<&Path> {
        self.live.get(&player).map(|(path, _)| path.as_path())
    }
}

impl PlaybackSink for RecordingSink {
    fn prepare(
        &mut self,
        handle: &AccessHandle,
        _presentation: Presentation,
    ) -> Result<PlayerId, PlaybackError> {
        if self.failures.contains(handle.path()) {
            return Err(PlaybackError::Unreadable(handle.path().to_path_buf()));
        }
        self.next += 1;
        let id = PlayerId::new(self.next);
        self.live
            .insert(id, (handle.path().to_path_buf(), PlaybackState::Stopped));
        self.events
            .push(SinkEvent::Prepared(id, handle.path().to_path_buf()));
        Ok(id)
    }

    fn play(&mut self, player: PlayerId) {
        if let Some(entry) = self.live.get_mut(&player) {
            entry.1 = PlaybackState::Playing;
        }
        self.events.push(SinkEvent::Played(player));
    }

    fn pause(&mut self, player: PlayerId) {
        if let Some(entry) = self.live.get_mut(&player) {
            entry.1 = PlaybackState::Paused;
        }
        self.events.push(SinkEvent::Paused(player));
    }

    fn seek_by(&mut self, player: PlayerId, offset_secs: f64) {
        self.events.push(SinkEvent::Seeked(player, offset_secs));
    }

    fn set_presentation(&mut self, player: PlayerId, presentation: Presentation) {
        self.events.push(SinkEvent::Presented(player, presentation));
    }

    fn state(&self, player: PlayerId) -> PlaybackState {
        self.live
            .get(&player)
            .map_or(PlaybackState::Stopped, |(_, state)| *state)
    }

    fn teardown(&mut self, player: PlayerId) {
        self.live.remove(&player);
        self.events.push(SinkEvent::TornDown(player));
    }
}
