// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::navigation::TransitionId;
use crate::application::session::{OpenResolved, PreloadResolved, ScanCompleted};
use crate::domain::media::MediaKind;
use crate::domain::navigation::Direction;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`: user commands plus the
/// results of background work.
#[derive(Debug)]
pub enum Message {
    /// Browse a new folder.
    OpenFolder(PathBuf),
    /// A vertical drag ended with this translation, in points.
    Swipe(f32),
    /// Move one item without a gesture.
    Navigate(Direction),
    /// The presentation layer finished animating a swipe.
    CompleteTransition,
    /// The animation timer for a given swipe ran out.
    AnimationEnded(TransitionId),
    /// Abandon the swipe in progress.
    CancelTransition,
    PickRandom,
    StepBack,
    StepForward,
    ToggleKind(MediaKind),
    /// Seek the current video; `Next` is forward.
    Seek(Direction),
    AdjustSeekStep { increase: bool },
    TogglePlayerStyle,
    ToggleAspectFill,
    TogglePlayback,
    ToggleAutoplay,
    ShowInfo,
    ShowHelp,
    /// Result from async folder listing.
    ScanCompleted(ScanCompleted),
    /// Result from async locator resolution for a swipe target.
    PreloadResolved(PreloadResolved),
    /// Result from async locator resolution for a jump, shuffle pick,
    /// history step or the first item of a view.
    OpenResolved(OpenResolved),
    Quit,
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Folder to open on startup instead of the last one.
    pub folder: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `SWIPE_REEL_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `SWIPE_REEL_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Seed for reproducible shuffle order.
    pub seed: Option<u64>,
}
