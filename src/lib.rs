// SPDX-License-Identifier: MPL-2.0
//! `swipe_reel` browses a folder of videos, images and animated images one
//! item at a time, the way a vertical video feed does.
//!
//! The crate is layered:
//!
//! - [`domain`]: media descriptors, kind filters, seek steps and swipe
//!   classification. Pure values, no I/O.
//! - [`application`]: the access broker, the navigation state machine with
//!   its two player slots, shuffle history and the [`BrowseSession`] tying
//!   them together, plus the ports storage and playback adapters implement.
//! - [`infrastructure`]: filesystem storage and a headless playback sink.
//! - [`app`]: the terminal front end, preferences and persisted state.
//!
//! [`BrowseSession`]: application::BrowseSession

pub mod app;
pub mod application;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
mod test_utils;
