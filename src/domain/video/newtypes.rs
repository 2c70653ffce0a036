// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// SeekStep
// =============================================================================

/// Seek step bounds (5 to 60 seconds, in 5 second increments).
pub mod seek_step_bounds {
    /// Minimum seek step in seconds.
    pub const MIN: f64 = 5.0;
    /// Maximum seek step in seconds.
    pub const MAX: f64 = 60.0;
    /// Default seek step in seconds.
    pub const DEFAULT: f64 = 10.0;
    /// Increment used when the step is adjusted.
    pub const INCREMENT: f64 = 5.0;
}

/// How far a seek forward/backward jumps, in seconds.
///
/// Always a multiple of [`seek_step_bounds::INCREMENT`] within
/// [`seek_step_bounds::MIN`]..=[`seek_step_bounds::MAX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekStep(f64);

impl SeekStep {
    /// Creates a seek step, snapping to the nearest increment and clamping.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let snapped = (value / seek_step_bounds::INCREMENT).round() * seek_step_bounds::INCREMENT;
        Self(snapped.clamp(seek_step_bounds::MIN, seek_step_bounds::MAX))
    }

    /// Returns the value in seconds.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the step as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs_f64(self.0)
    }

    /// One increment longer, clamping at the maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(self.0 + seek_step_bounds::INCREMENT)
    }

    /// One increment shorter, clamping at the minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(self.0 - seek_step_bounds::INCREMENT)
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= seek_step_bounds::MIN
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= seek_step_bounds::MAX
    }
}

impl Default for SeekStep {
    fn default() -> Self {
        Self(seek_step_bounds::DEFAULT)
    }
}

// =============================================================================
// Tests
// =============================================================================
