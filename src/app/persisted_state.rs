// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! This module handles transient application state that should persist across sessions
//! but is not user-configurable (unlike preferences in `settings.toml`).
//!
//! # Path Resolution
//!
//! The state file location can be customized for testing or portable deployments:
//! 1. Use `load_from()`/`save_to()` with explicit path override
//! 2. Set `SWIPE_REEL_DATA_DIR` environment variable
//! 3. Falls back to platform-specific data directory

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Folder browsed last, reopened on the next launch when no folder is
    /// given on the command line.
    #[serde(default)]
    pub last_folder: Option<PathBuf>,
}

impl AppState {
    /// Loads application state, from `base_dir` when given.
    ///
    /// `base_dir` takes precedence over the standard path resolution.
    /// Returns a tuple of (state, optional_warning). If loading fails, returns
    /// default state with a warning message explaining what went wrong.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => (
                    Self::default(),
                    Some(format!("Could not parse {}: {err}", path.display())),
                ),
            },
            Err(err) => (
                Self::default(),
                Some(format!("Could not read {}: {err}", path.display())),
            ),
        }
    }

    /// Saves application state, to `base_dir` when given, creating the
    /// directory if needed.
    ///
    /// Returns an optional warning message if save failed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("No data directory available".to_string());
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                return Some(format!("Could not create {}: {err}", parent.display()));
            }
        }

        match fs::File::create(&path) {
            Ok(file) => ciborium::into_writer(self, BufWriter::new(file))
                .err()
                .map(|err| format!("Could not write {}: {err}", path.display())),
            Err(err) => Some(format!("Could not create {}: {err}", path.display())),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }

    /// Remembers `folder` as the one to reopen next time.
    ///
    /// Returns `true` when the stored folder changed.
    pub fn set_last_folder(&mut self, folder: &Path) -> bool {
        if self.last_folder.as_deref() == Some(folder) {
            return false;
        }
        self.last_folder = Some(folder.to_path_buf());
        true
    }
}
