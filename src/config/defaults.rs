// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Browse**: Which media kinds are shown
//! - **Video Seek**: Seek step bounds
//! - **Swipe**: Gesture classification threshold and animation length

use crate::domain::navigation::swipe_bounds;
use crate::domain::video::seek_step_bounds;

// ==========================================================================
// Browse Defaults
// ==========================================================================

/// Media kinds enabled on first launch (all of them).
pub const DEFAULT_ENABLED_KINDS: &str = "video,image,animated";

// ==========================================================================
// Video Seek Defaults
// ==========================================================================

/// Default seek step in seconds.
pub const DEFAULT_SEEK_STEP_SECS: f64 = seek_step_bounds::DEFAULT;

/// Minimum seek step in seconds.
pub const MIN_SEEK_STEP_SECS: f64 = seek_step_bounds::MIN;

/// Maximum seek step in seconds.
pub const MAX_SEEK_STEP_SECS: f64 = seek_step_bounds::MAX;

/// Seek step adjustment per increase/decrease.
pub const SEEK_STEP_INCREMENT_SECS: f64 = seek_step_bounds::INCREMENT;

// ==========================================================================
// Swipe Defaults
// ==========================================================================

/// Vertical drag distance, in points, past which a gesture navigates.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = swipe_bounds::DEFAULT;

/// How long the driver waits before settling a swipe, in milliseconds.
pub const TRANSITION_ANIMATION_MS: u64 = 300;

// ==========================================================================
// Tests
// ==========================================================================
