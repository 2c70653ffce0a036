// SPDX-License-Identifier: MPL-2.0
//! Playback state and presentation options for video players.

use serde::{Deserialize, Serialize};

/// Represents the current playback state of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Loaded but never started, or rewound.
    #[default]
    Stopped,
    /// Video is currently playing.
    Playing,
    /// Video is paused at current position.
    Paused,
}

impl PlaybackState {
    /// Returns true if the video is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the video is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }
}

/// Which player a video is presented with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerStyle {
    /// Player with transport controls and seek buttons.
    #[default]
    Controlled,
    /// Plain full-screen system player.
    Native,
}

impl PlayerStyle {
    /// The other style.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Controlled => Self::Native,
            Self::Native => Self::Controlled,
        }
    }
}

/// How live players should present their video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    pub style: PlayerStyle,
    /// Fill the screen (cropping) instead of fitting inside it.
    pub aspect_fill: bool,
}
