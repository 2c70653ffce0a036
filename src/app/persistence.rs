// SPDX-License-Identifier: MPL-2.0
//! Preference and state persistence.
//!
//! Preferences go to `settings.toml` on every change; the last folder goes
//! to `state.cbor` whenever a new one is opened. Failures are logged and
//! otherwise ignored.

use super::persisted_state::AppState;
use crate::config::{self, Config};
use std::path::{Path, PathBuf};

/// Persists the current preferences to disk.
pub fn persist_preferences(config: &Config, config_dir: Option<PathBuf>) {
    if let Err(error) = config::save_with_override(config, config_dir) {
        log::warn!("Failed to save config: {error}");
    }
}

/// Records `folder` as the one to reopen and saves the state if it changed.
pub fn remember_folder(state: &mut AppState, folder: &Path, data_dir: Option<PathBuf>) {
    if !state.set_last_folder(folder) {
        return;
    }
    if let Some(warning) = state.save_to(data_dir) {
        log::warn!("{warning}");
    }
}
