// SPDX-License-Identifier: MPL-2.0
//! Headless adapter implementing the [`PlaybackSink`] port trait.
//!
//! No frames are decoded. Each player only checks that its file can be
//! opened, then tracks play state, position and presentation, logging every
//! change. The driver binary uses it to exercise the session end to end.
//!
//! [`PlaybackSink`]: crate::application::port::PlaybackSink

use crate::application::port::{AccessHandle, PlaybackError, PlaybackSink, PlayerId};
use crate::domain::video::{PlaybackState, Presentation};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// State tracked for one headless player.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPlayer {
    path: PathBuf,
    state: PlaybackState,
    position_secs: f64,
    presentation: Presentation,
}

impl HeadlessPlayer {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }
}

/// Playback sink that keeps players in memory.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    next_id: u64,
    players: HashMap<PlayerId, HeadlessPlayer>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of players not yet torn down.
    pub fn live_players(&self) -> usize {
        self.players.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&HeadlessPlayer> {
        self.players.get(&id)
    }
}

impl PlaybackSink for HeadlessSink {
    fn prepare(
        &mut self,
        handle: &AccessHandle,
        presentation: Presentation,
    ) -> Result<PlayerId, PlaybackError> {
        let path = handle.path();
        if !path.is_file() || fs::File::open(path).is_err() {
            return Err(PlaybackError::Unreadable(path.to_path_buf()));
        }

        self.next_id += 1;
        let id = PlayerId::new(self.next_id);
        self.players.insert(
            id,
            HeadlessPlayer {
                path: path.to_path_buf(),
                state: PlaybackState::Stopped,
                position_secs: 0.0,
                presentation,
            },
        );
        log::debug!("player {} prepared for {}", id.value(), path.display());
        Ok(id)
    }

    fn play(&mut self, player: PlayerId) {
        if let Some(entry) = self.players.get_mut(&player) {
            entry.state = PlaybackState::Playing;
            log::debug!("player {} playing", player.value());
        }
    }

    fn pause(&mut self, player: PlayerId) {
        if let Some(entry) = self.players.get_mut(&player) {
            entry.state = PlaybackState::Paused;
            log::debug!("player {} paused", player.value());
        }
    }

    fn seek_by(&mut self, player: PlayerId, offset_secs: f64) {
        if let Some(entry) = self.players.get_mut(&player) {
            entry.position_secs = (entry.position_secs + offset_secs).max(0.0);
            log::debug!(
                "player {} at {:.1}s",
                player.value(),
                entry.position_secs
            );
        }
    }

    fn set_presentation(&mut self, player: PlayerId, presentation: Presentation) {
        if let Some(entry) = self.players.get_mut(&player) {
            entry.presentation = presentation;
        }
    }

    fn state(&self, player: PlayerId) -> PlaybackState {
        self.players
            .get(&player)
            .map_or(PlaybackState::Stopped, |entry| entry.state)
    }

    fn teardown(&mut self, player: PlayerId) {
        if self.players.remove(&player).is_some() {
            log::debug!("player {} torn down", player.value());
        }
    }
}
