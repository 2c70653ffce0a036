// SPDX-License-Identifier: MPL-2.0
//! Playback sink port definition.
//!
//! The session controller never decodes video. It asks a [`PlaybackSink`] to
//! prepare a player for an [`AccessHandle`] and then drives that player by
//! its [`PlayerId`]. Only video items ever get a player.
//!
//! # Lifecycle
//!
//! 1. `prepare()` loads a handle into a new, stopped player
//! 2. `play()` / `pause()` / `seek_by()` while it is on screen
//! 3. `teardown()` once the player leaves its slot

use super::access::AccessHandle;
use crate::domain::video::{PlaybackState, Presentation};
use std::path::PathBuf;

/// Identifier of a live player owned by a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(u64);

impl PlayerId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Errors raised while preparing a player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackError {
    /// The handle's location cannot be read.
    #[error("cannot read {}", .0.display())]
    Unreadable(PathBuf),

    /// The sink cannot play this container.
    #[error("unsupported media: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Failed(String),
}

/// Port for whatever loads and plays video handles.
pub trait PlaybackSink {
    /// Loads a handle into a new player, initially [`PlaybackState::Stopped`].
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackError`] if the player cannot be created.
    fn prepare(
        &mut self,
        handle: &AccessHandle,
        presentation: Presentation,
    ) -> Result<PlayerId, PlaybackError>;

    fn play(&mut self, player: PlayerId);

    fn pause(&mut self, player: PlayerId);

    /// Moves the playback position by `offset_secs` (negative seeks back).
    fn seek_by(&mut self, player: PlayerId, offset_secs: f64);

    /// Applies new presentation options to a live player.
    fn set_presentation(&mut self, player: PlayerId, presentation: Presentation);

    fn state(&self, player: PlayerId) -> PlaybackState;

    /// Stops and drops a player. Unknown ids are ignored.
    fn teardown(&mut self, player: PlayerId);
}
