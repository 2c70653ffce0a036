// SPDX-License-Identifier: MPL-2.0
//! Navigation value types: swipe direction and drag classification.

/// Direction of a linear step through the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the end of the list (`+1`).
    Next,
    /// Towards the start of the list (`-1`).
    Previous,
}

impl Direction {
    /// Signed offset applied to the current index.
    #[must_use]
    pub fn offset(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Next => Direction::Previous,
            Direction::Previous => Direction::Next,
        }
    }

    /// Index reached by stepping from `index`, if it stays inside `0..len`.
    #[must_use]
    pub fn step(self, index: usize, len: usize) -> Option<usize> {
        let target = index.checked_add_signed(self.offset())?;
        (target < len).then_some(target)
    }
}

/// Swipe threshold bounds, in points of vertical drag.
pub mod swipe_bounds {
    /// Default distance a drag must travel to count as a swipe.
    pub const DEFAULT: f32 = 50.0;
    /// Smallest accepted threshold.
    pub const MIN: f32 = 10.0;
    /// Largest accepted threshold.
    pub const MAX: f32 = 400.0;
}

/// Minimum vertical drag distance that counts as a swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeThreshold(f32);

impl SwipeThreshold {
    /// Creates a threshold, clamping to the valid range.
    #[must_use]
    pub fn new(points: f32) -> Self {
        if points.is_nan() {
            return Self::default();
        }
        Self(points.clamp(swipe_bounds::MIN, swipe_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Classifies a finished vertical drag.
    ///
    /// Dragging up (negative translation) moves to the next item, dragging
    /// down to the previous one. Drags not strictly beyond the threshold are
    /// ignored and should snap back.
    #[must_use]
    pub fn classify(self, translation_y: f32) -> Option<Direction> {
        if translation_y.is_nan() || translation_y.abs() <= self.0 {
            None
        } else if translation_y < 0.0 {
            Some(Direction::Next)
        } else {
            Some(Direction::Previous)
        }
    }
}

impl Default for SwipeThreshold {
    fn default() -> Self {
        Self(swipe_bounds::DEFAULT)
    }
}
