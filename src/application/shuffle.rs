// SPDX-License-Identifier: MPL-2.0
//! Shuffle picks with back/forward history.
//!
//! Random picks are drawn from a bag holding a permutation of the filtered
//! view's indices, so every item comes up once before any repeats. The bag
//! is refilled when it runs dry. An index equal to the one on screen is
//! pushed further into the bag when that is possible.
//!
//! Picks are recorded in a browser-style history: stepping back and then
//! picking again drops the entries after the cursor.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Visited-index history plus the shuffle bag feeding it.
#[derive(Debug)]
pub struct ShuffleHistory {
    visited: Vec<usize>,
    cursor: Option<usize>,
    bag: VecDeque<usize>,
    rng: StdRng,
}

impl Default for ShuffleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ShuffleHistory {
    /// History seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// History with a reproducible pick order.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            visited: Vec::new(),
            cursor: None,
            bag: VecDeque::new(),
            rng,
        }
    }

    /// Indices recorded so far, oldest first.
    #[must_use]
    pub fn visited(&self) -> &[usize] {
        &self.visited
    }

    /// Position in [`Self::visited`] of the entry on screen.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Picks left before the bag is refilled.
    #[must_use]
    pub fn remaining_in_bag(&self) -> usize {
        self.bag.len()
    }

    /// Forgets history and bag. Called whenever the view changes.
    pub fn clear(&mut self) {
        self.visited.clear();
        self.cursor = None;
        self.bag.clear();
    }

    /// Draws the next index for a view of `len` items without recording it.
    ///
    /// `shown` is the index on screen, which is avoided when the bag holds
    /// another candidate.
    pub fn next_pick(&mut self, len: usize, shown: Option<usize>) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.bag.retain(|&index| index < len);
        if self.bag.is_empty() {
            self.refill(len);
        }
        if self.bag.len() > 1 && self.bag.front().copied() == shown {
            let swap_with = self.rng.random_range(1..self.bag.len());
            self.bag.swap(0, swap_with);
        }
        self.bag.pop_front()
    }

    /// Appends `index` at the cursor, dropping any forward entries.
    pub fn record(&mut self, index: usize) {
        if let Some(cursor) = self.cursor {
            self.visited.truncate(cursor + 1);
        }
        self.visited.push(index);
        self.cursor = Some(self.visited.len() - 1);
    }

    /// Draws and records in one step.
    pub fn pick(&mut self, len: usize, shown: Option<usize>) -> Option<usize> {
        let index = self.next_pick(len, shown)?;
        self.record(index);
        Some(index)
    }

    /// Index one step back, without moving.
    #[must_use]
    pub fn peek_back(&self) -> Option<usize> {
        let cursor = self.cursor?.checked_sub(1)?;
        self.visited.get(cursor).copied()
    }

    /// Index one step forward, without moving.
    #[must_use]
    pub fn peek_forward(&self) -> Option<usize> {
        let cursor = self.cursor? + 1;
        self.visited.get(cursor).copied()
    }

    #[must_use]
    pub fn can_step_back(&self) -> bool {
        self.peek_back().is_some()
    }

    #[must_use]
    pub fn can_step_forward(&self) -> bool {
        self.peek_forward().is_some()
    }

    /// Moves the cursor back. No-op at the oldest entry.
    pub fn step_back(&mut self) -> Option<usize> {
        let index = self.peek_back()?;
        self.cursor = self.cursor.map(|cursor| cursor - 1);
        Some(index)
    }

    /// Moves the cursor forward. No-op at the newest entry.
    pub fn step_forward(&mut self) -> Option<usize> {
        let index = self.peek_forward()?;
        self.cursor = self.cursor.map(|cursor| cursor + 1);
        Some(index)
    }

    fn refill(&mut self, len: usize) {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        self.bag = indices.into();
    }
}
