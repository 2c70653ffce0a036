// SPDX-License-Identifier: MPL-2.0
//! Navigation state machine with double-buffered player slots.
//!
//! The [`Navigator`] tracks which item of the filtered view is on screen and
//! which of its two slots holds it. Advancing is a two-phase operation:
//!
//! 1. [`Navigator::begin_advance`] picks the target index and reserves the
//!    non-active slot for it (`Transitioning`, preload pending).
//! 2. Once the caller has resolved access and prepared a player, it calls
//!    [`Navigator::attach_preload`]; the preload is then ready.
//! 3. [`Navigator::complete_transition`] flips the active slot. The slot that
//!    was visible is emptied and its player handed back for teardown.
//!
//! The navigator never touches storage or players itself. Every operation
//! that empties a slot returns the player ids the caller must tear down.

use crate::application::port::PlayerId;
use crate::domain::media::MediaId;
use crate::domain::navigation::Direction;
use std::fmt;

/// Identifies one advance, so late preload results can be matched up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionId(u64);

impl TransitionId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What one player slot currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry {
    index: usize,
    media: MediaId,
    player: Option<PlayerId>,
}

impl SlotEntry {
    /// `player` must be `None` for items that do not need one.
    #[must_use]
    pub fn new(index: usize, media: MediaId, player: Option<PlayerId>) -> Self {
        Self {
            index,
            media,
            player,
        }
    }

    /// Index into the filtered view.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn media(&self) -> MediaId {
        self.media
    }

    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }
}

/// Progress of the slot being filled for an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preload {
    Pending,
    Ready,
}

/// An advance in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub id: TransitionId,
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub preload: Preload,
}

/// Where navigation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// Nothing to show.
    #[default]
    Idle,
    /// The item at the index is on screen.
    Showing(usize),
    /// The `from` item is on screen while the `to` item is being prepared.
    Transitioning(Transition),
}

impl NavState {
    /// Index of the item on screen.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Showing(index) => Some(*index),
            Self::Transitioning(transition) => Some(transition.from),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Showing(_) => "showing",
            Self::Transitioning(_) => "transitioning",
        }
    }
}

/// Why an advance did not start. None of these are errors to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AdvanceRejected {
    #[error("nothing to navigate")]
    Empty,
    #[error("a transition is already in progress")]
    Busy,
    #[error("already at the end of the list")]
    AtBoundary,
}

/// Why a transition could not be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompleteError {
    #[error("no transition in progress")]
    NotTransitioning,
    #[error("the next item is still loading")]
    PreloadPending,
}

/// The slot reserved by [`Navigator::begin_advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadTicket {
    pub transition: TransitionId,
    pub slot: usize,
    pub index: usize,
}

/// Result of a completed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub from: usize,
    pub to: usize,
    pub active_slot: usize,
    /// Player of the item that left the screen.
    pub released: Option<PlayerId>,
}

/// Result of an aborted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aborted {
    pub transition: Transition,
    /// Player prepared for the abandoned target, if any.
    pub released: Option<PlayerId>,
}

/// Target index outside the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} outside 0..{}", self.index, self.len)
    }
}

impl std::error::Error for OutOfRange {}

/// Navigation state over a filtered view of `len` items.
#[derive(Debug, Default)]
pub struct Navigator {
    state: NavState,
    len: usize,
    active_slot: usize,
    slots: [Option<SlotEntry>; 2],
    next_transition: u64,
    flips: u64,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.state
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    /// The transition in progress, if any.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        match self.state {
            NavState::Transitioning(transition) => Some(transition),
            _ => None,
        }
    }

    /// Number of items in the view being navigated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn active_slot(&self) -> usize {
        self.active_slot
    }

    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&SlotEntry> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Entry of the item on screen.
    #[must_use]
    pub fn active_entry(&self) -> Option<&SlotEntry> {
        self.slot(self.active_slot)
    }

    /// Players currently held by either slot.
    pub fn live_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().flatten().filter_map(SlotEntry::player)
    }

    /// How many times the active slot has flipped.
    #[must_use]
    pub fn flips(&self) -> u64 {
        self.flips
    }

    /// Starts over on a view of `len` items, showing `first` if given.
    ///
    /// Returns the players that were held before.
    pub fn load(&mut self, len: usize, first: Option<SlotEntry>) -> Vec<PlayerId> {
        let released = self.clear_slots();
        self.len = len;
        self.active_slot = 0;
        match first {
            Some(entry) if entry.index < len => {
                self.state = NavState::Showing(entry.index);
                self.slots[0] = Some(entry);
            }
            _ => self.state = NavState::Idle,
        }
        released
    }

    /// Empties both slots and goes idle.
    pub fn reset(&mut self) -> Vec<PlayerId> {
        self.load(0, None)
    }

    /// Reserves the non-active slot for the neighbour in `direction`.
    ///
    /// # Errors
    ///
    /// Rejects when there is nothing shown, when a transition is already in
    /// progress, or when the neighbour would fall outside the view.
    pub fn begin_advance(&mut self, direction: Direction) -> Result<PreloadTicket, AdvanceRejected> {
        let from = match self.state {
            NavState::Idle => return Err(AdvanceRejected::Empty),
            NavState::Transitioning(_) => return Err(AdvanceRejected::Busy),
            NavState::Showing(index) => index,
        };
        let to = direction
            .step(from, self.len)
            .ok_or(AdvanceRejected::AtBoundary)?;

        self.next_transition += 1;
        let id = TransitionId(self.next_transition);
        self.state = NavState::Transitioning(Transition {
            id,
            from,
            to,
            direction,
            preload: Preload::Pending,
        });

        Ok(PreloadTicket {
            transition: id,
            slot: self.preload_slot(),
            index: to,
        })
    }

    /// Fills the reserved slot. Returns `false`, leaving the state untouched,
    /// when `transition` is no longer the pending one.
    pub fn attach_preload(&mut self, transition: TransitionId, entry: SlotEntry) -> bool {
        let NavState::Transitioning(current) = &mut self.state else {
            return false;
        };
        if current.id != transition || current.preload != Preload::Pending || entry.index != current.to
        {
            return false;
        }
        current.preload = Preload::Ready;
        let slot = 1 - self.active_slot;
        self.slots[slot] = Some(entry);
        true
    }

    /// Abandons the transition in progress and returns to its origin.
    pub fn abort_transition(&mut self) -> Option<Aborted> {
        let transition = self.transition()?;
        let slot = self.preload_slot();
        let released = self.slots[slot].take().and_then(|entry| entry.player);
        self.state = NavState::Showing(transition.from);
        Some(Aborted {
            transition,
            released,
        })
    }

    /// Flips to the preloaded slot.
    ///
    /// # Errors
    ///
    /// Fails when no transition is in progress or its preload is not ready.
    pub fn complete_transition(&mut self) -> Result<Settled, CompleteError> {
        let transition = self.transition().ok_or(CompleteError::NotTransitioning)?;
        if transition.preload != Preload::Ready {
            return Err(CompleteError::PreloadPending);
        }

        let released = self.slots[self.active_slot]
            .take()
            .and_then(|entry| entry.player);
        self.active_slot = self.preload_slot();
        self.flips += 1;
        self.state = NavState::Showing(transition.to);

        Ok(Settled {
            from: transition.from,
            to: transition.to,
            active_slot: self.active_slot,
            released,
        })
    }

    /// Shows `entry` directly in slot 0, bypassing the transition.
    ///
    /// Returns the players that were held before.
    ///
    /// # Errors
    ///
    /// Fails, leaving the state untouched, when the entry's index is outside
    /// the view.
    pub fn jump_to(&mut self, entry: SlotEntry) -> Result<Vec<PlayerId>, OutOfRange> {
        if entry.index >= self.len {
            return Err(OutOfRange {
                index: entry.index,
                len: self.len,
            });
        }
        let released = self.clear_slots();
        self.active_slot = 0;
        self.state = NavState::Showing(entry.index);
        self.slots[0] = Some(entry);
        Ok(released)
    }

    fn preload_slot(&self) -> usize {
        1 - self.active_slot
    }

    fn clear_slots(&mut self) -> Vec<PlayerId> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.take().and_then(|entry| entry.player))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u64) -> PlayerId {
        PlayerId::new(id)
    }

    fn entry(index: usize, player_id: Option<u64>) -> SlotEntry {
        SlotEntry::new(index, MediaId::next(), player_id.map(player))
    }

    fn showing(len: usize) -> Navigator {
        let mut nav = Navigator::new();
        nav.load(len, Some(entry(0, Some(1))));
        nav
    }

    fn advance(nav: &mut Navigator, direction: Direction, player_id: Option<u64>) -> Settled {
        let ticket = nav.begin_advance(direction).expect("advance starts");
        assert!(nav.attach_preload(ticket.transition, entry(ticket.index, player_id)));
        nav.complete_transition().expect("completes")
    }

    #[test]
    fn new_navigator_is_idle() {
        let nav = Navigator::new();
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.current_index(), None);
        assert_eq!(nav.live_players().count(), 0);
    }

    #[test]
    fn load_without_items_stays_idle() {
        let mut nav = Navigator::new();
        assert!(nav.load(0, None).is_empty());
        assert_eq!(nav.state(), NavState::Idle);
        assert_eq!(nav.begin_advance(Direction::Next), Err(AdvanceRejected::Empty));
    }

    #[test]
    fn load_shows_first_item_in_slot_zero() {
        let nav = showing(3);
        assert_eq!(nav.state(), NavState::Showing(0));
        assert_eq!(nav.active_slot(), 0);
        assert_eq!(nav.active_entry().map(SlotEntry::index), Some(0));
    }

    #[test]
    fn reload_releases_previous_players() {
        let mut nav = showing(3);
        let released = nav.load(2, Some(entry(0, None)));
        assert_eq!(released, vec![player(1)]);
    }

    #[test]
    fn advance_flips_slots_and_releases_old_player() {
        let mut nav = showing(3);

        let settled = advance(&mut nav, Direction::Next, Some(2));
        assert_eq!(settled.from, 0);
        assert_eq!(settled.to, 1);
        assert_eq!(settled.released, Some(player(1)));
        assert_eq!(nav.state(), NavState::Showing(1));
        assert_eq!(nav.active_slot(), 1);
        assert!(nav.slot(0).is_none());
        assert_eq!(nav.flips(), 1);
    }

    #[test]
    fn previous_from_first_is_rejected() {
        let mut nav = showing(3);
        assert_eq!(
            nav.begin_advance(Direction::Previous),
            Err(AdvanceRejected::AtBoundary)
        );
        assert_eq!(nav.state(), NavState::Showing(0));
    }

    #[test]
    fn next_from_last_is_rejected() {
        let mut nav = showing(2);
        advance(&mut nav, Direction::Next, None);
        assert_eq!(
            nav.begin_advance(Direction::Next),
            Err(AdvanceRejected::AtBoundary)
        );
        assert_eq!(nav.state(), NavState::Showing(1));
    }

    #[test]
    fn second_advance_during_transition_is_busy() {
        let mut nav = showing(3);
        nav.begin_advance(Direction::Next).expect("starts");
        assert_eq!(nav.begin_advance(Direction::Next), Err(AdvanceRejected::Busy));
    }

    #[test]
    fn completing_before_preload_is_ready_fails() {
        let mut nav = showing(3);
        assert_eq!(
            nav.complete_transition(),
            Err(CompleteError::NotTransitioning)
        );
        nav.begin_advance(Direction::Next).expect("starts");
        assert_eq!(nav.complete_transition(), Err(CompleteError::PreloadPending));
    }

    #[test]
    fn stale_preload_is_refused() {
        let mut nav = showing(3);
        let ticket = nav.begin_advance(Direction::Next).expect("starts");
        nav.abort_transition();
        assert!(!nav.attach_preload(ticket.transition, entry(1, Some(9))));
        assert!(nav.slot(1).is_none());

        let ticket = nav.begin_advance(Direction::Next).expect("starts again");
        assert!(!nav.attach_preload(ticket.transition, entry(2, None)));
    }

    #[test]
    fn abort_returns_to_origin_and_releases_preload() {
        let mut nav = showing(3);
        let ticket = nav.begin_advance(Direction::Next).expect("starts");
        nav.attach_preload(ticket.transition, entry(1, Some(2)));

        let aborted = nav.abort_transition().expect("was transitioning");
        assert_eq!(aborted.released, Some(player(2)));
        assert_eq!(nav.state(), NavState::Showing(0));
        assert_eq!(nav.active_slot(), 0);
        assert!(nav.slot(1).is_none());
        assert!(nav.abort_transition().is_none());
    }

    #[test]
    fn flip_parity_tracks_active_slot() {
        let mut nav = showing(6);
        for expected in 1..=5 {
            advance(&mut nav, Direction::Next, Some(expected + 1));
            assert_eq!(nav.flips(), expected);
            assert_eq!(nav.active_slot() as u64, expected % 2);
            // Only the visible slot holds anything between transitions.
            assert!(nav.slot(1 - nav.active_slot()).is_none());
        }
        advance(&mut nav, Direction::Previous, None);
        assert_eq!(nav.state(), NavState::Showing(4));
        assert_eq!(nav.active_slot(), 0);
    }

    #[test]
    fn jump_clears_both_slots_and_uses_slot_zero() {
        let mut nav = showing(5);
        advance(&mut nav, Direction::Next, Some(2));
        let ticket = nav.begin_advance(Direction::Next).expect("starts");
        nav.attach_preload(ticket.transition, entry(2, Some(3)));

        let mut released = nav.jump_to(entry(4, Some(4))).expect("in range");
        released.sort();
        assert_eq!(released, vec![player(2), player(3)]);
        assert_eq!(nav.state(), NavState::Showing(4));
        assert_eq!(nav.active_slot(), 0);
        assert!(nav.slot(1).is_none());
    }

    #[test]
    fn jump_out_of_range_keeps_state() {
        let mut nav = showing(2);
        assert_eq!(
            nav.jump_to(entry(2, None)),
            Err(OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(nav.state(), NavState::Showing(0));
        assert_eq!(nav.live_players().collect::<Vec<_>>(), vec![player(1)]);
    }

    #[test]
    fn single_item_view_cannot_advance() {
        let mut nav = showing(1);
        assert_eq!(nav.begin_advance(Direction::Next), Err(AdvanceRejected::AtBoundary));
        assert_eq!(
            nav.begin_advance(Direction::Previous),
            Err(AdvanceRejected::AtBoundary)
        );
    }
}
