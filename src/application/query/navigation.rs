// SPDX-License-Identifier: MPL-2.0
//! Read-only navigation snapshot for presentation layers.

use crate::application::navigation::{NavState, Navigator};
use crate::application::shuffle::ShuffleHistory;
use crate::domain::media::{FilteredView, KindSet};

/// Navigation state information for rendering.
///
/// A snapshot taken after every update so the presentation layer does not
/// need access to the catalog or the navigator.
// Allow excessive bools: read-only snapshot with orthogonal capability flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether a swipe up would show another item.
    pub has_next: bool,
    /// Whether a swipe down would show another item.
    pub has_previous: bool,
    /// Current position in the filtered view (0-indexed), if any.
    pub current_index: Option<usize>,
    /// Number of items in the catalog.
    pub total_count: usize,
    /// Number of items passing the kind filter.
    pub filtered_count: usize,
    /// Whether some kinds are hidden.
    pub filter_active: bool,
    /// Whether a swipe is in progress.
    pub transitioning: bool,
    /// Whether shuffle history can go back.
    pub can_step_back: bool,
    /// Whether shuffle history can go forward.
    pub can_step_forward: bool,
    /// Slot holding the item on screen.
    pub active_slot: usize,
}

impl NavigationInfo {
    /// Builds the snapshot from the session's parts.
    #[must_use]
    pub fn capture(
        navigator: &Navigator,
        view: &FilteredView,
        total_count: usize,
        enabled: &KindSet,
        history: &ShuffleHistory,
    ) -> Self {
        let current_index = navigator.current_index();
        let showing = matches!(navigator.state(), NavState::Showing(_));
        let len = view.len();

        Self {
            has_next: showing && current_index.is_some_and(|index| index + 1 < len),
            has_previous: showing && current_index.is_some_and(|index| index > 0),
            current_index,
            total_count,
            filtered_count: len,
            filter_active: *enabled != KindSet::all(),
            transitioning: navigator.transition().is_some(),
            can_step_back: history.can_step_back(),
            can_step_forward: history.can_step_forward(),
            active_slot: navigator.active_slot(),
        }
    }

    /// One-based position label such as `3/12`.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        self.current_index
            .map(|index| format!("{}/{}", index + 1, self.filtered_count))
    }
}
