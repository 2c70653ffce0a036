// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Nothing in here is fatal to the process: callers degrade every variant to
//! "stay on the current item" or "show the empty state".

use crate::application::port::playback::PlaybackError;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The chosen folder could not be listed.
    #[error("Failed to enumerate '{}': {reason}", path.display())]
    EnumerationFailed { path: PathBuf, reason: String },

    /// The storage layer refused access to a location.
    #[error("Access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    /// A locator no longer resolves to the item it was captured from.
    #[error("Stale locator: {}", .0.display())]
    StaleLocator(PathBuf),

    /// A swipe preload failed; the previous item stays current.
    #[error("Transition aborted: {0}")]
    TransitionAborted(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
