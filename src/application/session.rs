// SPDX-License-Identifier: MPL-2.0
//! The browsing session: one folder, one filter, one navigator.
//!
//! [`BrowseSession`] owns every piece of mutable browsing state and is the
//! only place where it changes. Slow work (listing a folder, resolving a
//! locator) is split into a request/apply pair so it can run elsewhere:
//!
//! - [`BrowseSession::request_scan`] hands out a [`ScanRequest`]; whoever
//!   runs it feeds the [`ScanCompleted`] back through
//!   [`BrowseSession::apply_scan`].
//! - [`BrowseSession::begin_advance`] hands out a [`PreloadRequest`]; its
//!   [`PreloadResolved`] goes back through [`BrowseSession::finish_preload`].
//! - Jumps, shuffle picks, history steps and the first item of a new view
//!   hand out an [`OpenRequest`]; its [`OpenResolved`] goes back through
//!   [`BrowseSession::finish_open`]. Folder and filter changes leave their
//!   request in [`BrowseSession::take_open_request`].
//!
//! Every request carries the session [`Generation`] it was issued under.
//! Folder and filter changes bump the generation, so results that arrive
//! afterwards are recognised as stale and dropped. Only the latest open
//! request is honoured; starting a swipe supersedes it too.
//!
//! Methods named after the user action (`open_folder`, `advance`, `jump_to`,
//! `pick_random`, ...) run the whole pair on the calling thread.
//!
//! Nothing here is fatal: failures leave the previous item on screen or fall
//! back to the empty state, and are reported to the caller once.

use crate::application::broker::AccessBroker;
use crate::application::navigation::{
    AdvanceRejected, CompleteError, NavState, Navigator, Preload, Settled, SlotEntry,
    TransitionId,
};
use crate::application::port::{
    AccessError, AccessHandle, Grant, PlaybackSink, PlayerId, StorageAccess,
};
use crate::application::query::NavigationInfo;
use crate::application::shuffle::ShuffleHistory;
use crate::config::SortOrder;
use crate::directory_scanner::Catalog;
use crate::domain::media::{FilteredView, KindSet, Locator, MediaDescriptor, MediaKind};
use crate::domain::navigation::Direction;
use crate::domain::video::{PlaybackState, PlayerStyle, Presentation, SeekStep};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// Tickets
// =============================================================================

/// Counter identifying the folder/filter configuration a request was made
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Whether a delivered result was applied or dropped as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    Stale,
}

/// A folder listing to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    generation: Generation,
    root: PathBuf,
    sort_order: SortOrder,
}

impl ScanRequest {
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Opens the folder for the session, then lists it. Blocking.
    pub fn run<S: StorageAccess + ?Sized>(self, storage: &S) -> ScanCompleted {
        let access = storage.resolve(&Locator::new(&self.root));
        let result = Catalog::discover(&self.root, self.sort_order);
        ScanCompleted {
            generation: self.generation,
            root: self.root,
            access,
            result,
        }
    }
}

/// Outcome of a [`ScanRequest`].
#[derive(Debug)]
pub struct ScanCompleted {
    generation: Generation,
    root: PathBuf,
    access: std::result::Result<Grant, AccessError>,
    result: Result<Catalog>,
}

impl ScanCompleted {
    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Access resolution for the item an advance is heading to.
#[derive(Debug, Clone)]
pub struct PreloadRequest {
    generation: Generation,
    transition: TransitionId,
    index: usize,
    descriptor: Arc<MediaDescriptor>,
}

impl PreloadRequest {
    #[must_use]
    pub fn transition(&self) -> TransitionId {
        self.transition
    }

    /// Target index in the filtered view.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn descriptor(&self) -> &MediaDescriptor {
        &self.descriptor
    }

    /// Resolves the target's locator. Blocking.
    pub fn resolve<S: StorageAccess + ?Sized>(self, storage: &S) -> PreloadResolved {
        let outcome = storage.resolve(self.descriptor.locator());
        PreloadResolved {
            generation: self.generation,
            transition: self.transition,
            index: self.index,
            descriptor: self.descriptor,
            outcome,
        }
    }
}

/// Outcome of a [`PreloadRequest`].
#[derive(Debug)]
pub struct PreloadResolved {
    generation: Generation,
    transition: TransitionId,
    index: usize,
    descriptor: Arc<MediaDescriptor>,
    outcome: std::result::Result<Grant, AccessError>,
}

impl PreloadResolved {
    #[must_use]
    pub fn transition(&self) -> TransitionId {
        self.transition
    }
}

/// Why an item is being opened directly, without a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenPurpose {
    /// First item of a freshly built view.
    First,
    /// Explicit jump to an index.
    Jump,
    /// Shuffle pick; recorded in history once shown.
    Random,
    /// One step back through the shuffle history.
    Back,
    /// One step forward through the shuffle history.
    Forward,
}

/// Access resolution for an item to show directly.
#[derive(Debug, Clone)]
pub struct OpenRequest {
    generation: Generation,
    ticket: u64,
    index: usize,
    descriptor: Arc<MediaDescriptor>,
    purpose: OpenPurpose,
}

impl OpenRequest {
    /// Target index in the filtered view.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn purpose(&self) -> OpenPurpose {
        self.purpose
    }

    #[must_use]
    pub fn descriptor(&self) -> &MediaDescriptor {
        &self.descriptor
    }

    /// Resolves the target's locator. Blocking.
    pub fn resolve<S: StorageAccess + ?Sized>(self, storage: &S) -> OpenResolved {
        let outcome = storage.resolve(self.descriptor.locator());
        OpenResolved {
            request: self,
            outcome,
        }
    }
}

/// Outcome of an [`OpenRequest`].
#[derive(Debug)]
pub struct OpenResolved {
    request: OpenRequest,
    outcome: std::result::Result<Grant, AccessError>,
}

impl OpenResolved {
    #[must_use]
    pub fn index(&self) -> usize {
        self.request.index
    }

    #[must_use]
    pub fn purpose(&self) -> OpenPurpose {
        self.request.purpose
    }
}

/// Result of a synchronous [`BrowseSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Nothing happened; a drag in progress should snap back.
    Rejected(AdvanceRejected),
    /// The target is preloaded and waits for
    /// [`BrowseSession::complete_transition`].
    Ready { from: usize, to: usize },
}

// =============================================================================
// Preferences
// =============================================================================

/// Playback preferences applied to every player the session prepares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackPrefs {
    pub seek_step: SeekStep,
    pub presentation: Presentation,
    pub autoplay: bool,
}

impl Default for PlaybackPrefs {
    fn default() -> Self {
        Self {
            seek_step: SeekStep::default(),
            presentation: Presentation::default(),
            autoplay: true,
        }
    }
}

// =============================================================================
// BrowseSession
// =============================================================================

/// Browsing controller over one storage backend and one playback sink.
#[derive(Debug)]
pub struct BrowseSession<S: StorageAccess, P: PlaybackSink> {
    broker: AccessBroker<S>,
    sink: P,
    folder: Option<PathBuf>,
    catalog: Catalog,
    enabled: KindSet,
    view: FilteredView,
    navigator: Navigator,
    history: ShuffleHistory,
    generation: Generation,
    next_open: u64,
    /// Ticket of the only open request whose result will be applied.
    pending_open: Option<u64>,
    /// Open request produced by a folder or filter change, not yet handed
    /// out.
    queued_open: Option<OpenRequest>,
    prefs: PlaybackPrefs,
}

impl<S: StorageAccess, P: PlaybackSink> BrowseSession<S, P> {
    #[must_use]
    pub fn new(storage: Arc<S>, sink: P, enabled: KindSet, prefs: PlaybackPrefs) -> Self {
        Self {
            broker: AccessBroker::new(storage),
            sink,
            folder: None,
            catalog: Catalog::new(),
            enabled,
            view: FilteredView::default(),
            navigator: Navigator::new(),
            history: ShuffleHistory::new(),
            generation: Generation::default(),
            next_open: 0,
            pending_open: None,
            queued_open: None,
            prefs,
        }
    }

    /// Replaces the shuffle history, e.g. with a seeded one.
    #[must_use]
    pub fn with_history(mut self, history: ShuffleHistory) -> Self {
        self.history = history;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    #[must_use]
    pub fn enabled_kinds(&self) -> &KindSet {
        &self.enabled
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub fn history(&self) -> &ShuffleHistory {
        &self.history
    }

    #[must_use]
    pub fn prefs(&self) -> &PlaybackPrefs {
        &self.prefs
    }

    #[must_use]
    pub fn sink(&self) -> &P {
        &self.sink
    }

    #[must_use]
    pub fn storage(&self) -> &Arc<S> {
        self.broker.storage()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.navigator.current_index()
    }

    /// The item on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Arc<MediaDescriptor>> {
        self.current_index().and_then(|index| self.view.get(index))
    }

    /// Access handle of the item on screen, if it has been opened.
    #[must_use]
    pub fn current_handle(&self) -> Option<&AccessHandle> {
        self.broker.current()
    }

    /// Player of the item on screen.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.navigator.active_entry().and_then(SlotEntry::player)
    }

    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        NavigationInfo::capture(
            &self.navigator,
            &self.view,
            self.catalog.len(),
            &self.enabled,
            &self.history,
        )
    }

    // -------------------------------------------------------------------------
    // Folder
    // -------------------------------------------------------------------------

    /// Starts a new folder listing, cancelling anything in flight.
    pub fn request_scan(&mut self, root: impl Into<PathBuf>, sort_order: SortOrder) -> ScanRequest {
        self.generation.bump();
        self.cancel_transition();
        self.pending_open = None;
        self.queued_open = None;
        ScanRequest {
            generation: self.generation,
            root: root.into(),
            sort_order,
        }
    }

    /// Installs a finished listing unless a newer request superseded it.
    ///
    /// On success the first item is placed on screen and its open request
    /// waits in [`Self::take_open_request`].
    ///
    /// # Errors
    ///
    /// Returns the listing's error after falling back to the empty state.
    pub fn apply_scan(&mut self, completed: ScanCompleted) -> Result<Delivery> {
        let ScanCompleted {
            generation,
            root,
            access,
            result,
        } = completed;
        if generation != self.generation {
            log::debug!("dropping stale listing of {}", root.display());
            self.broker.discard(&access);
            return Ok(Delivery::Stale);
        }

        match result {
            Ok(catalog) => {
                self.broker.pin(&root, access);
                log::info!("{}: {} media items", root.display(), catalog.len());
                self.install(Some(root), catalog);
                Ok(Delivery::Applied)
            }
            Err(err) => {
                log::warn!("{err}");
                self.broker.discard(&access);
                self.install(None, Catalog::new());
                Err(err)
            }
        }
    }

    /// Lists `root` and opens its first item on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the listing's error after falling back to the empty state, or
    /// the first item's error while keeping the folder open.
    pub fn open_folder(&mut self, root: impl Into<PathBuf>, sort_order: SortOrder) -> Result<()> {
        let request = self.request_scan(root, sort_order);
        let completed = request.run(self.broker.storage().as_ref());
        self.apply_scan(completed)?;
        self.open_queued()
    }

    /// Installs an already built catalog, as if its folder had just been
    /// listed, and opens its first item on the calling thread.
    pub fn load_catalog(&mut self, catalog: Catalog) {
        self.generation.bump();
        self.cancel_transition();
        let root = catalog.root().map(Path::to_path_buf);
        if let Some(root) = &root {
            let access = self.broker.storage().resolve(&Locator::new(root));
            self.broker.pin(root, access);
        }
        self.install(root, catalog);
        if let Err(err) = self.open_queued() {
            log::debug!("first item left unopened: {err}");
        }
    }

    fn install(&mut self, root: Option<PathBuf>, catalog: Catalog) {
        if root.is_none() {
            self.broker.unpin();
        }
        self.folder = root;
        self.catalog = catalog;
        self.rebuild_view();
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    /// Shows only `kinds`. Returns `false` if nothing changed.
    ///
    /// The view restarts at its first item and shuffle history is cleared.
    /// Opening that item is left in [`Self::take_open_request`].
    pub fn set_enabled_kinds(&mut self, kinds: KindSet) -> bool {
        if kinds == self.enabled {
            return false;
        }
        self.generation.bump();
        log::debug!("enabled kinds: {kinds}");
        self.enabled = kinds;
        self.rebuild_view();
        true
    }

    /// Flips one kind. Turning off the last enabled kind is a no-op.
    pub fn toggle_kind(&mut self, kind: MediaKind) -> bool {
        match self.enabled.toggled(kind) {
            Some(kinds) => self.set_enabled_kinds(kinds),
            None => {
                log::debug!("keeping {kind}: it is the only enabled kind");
                false
            }
        }
    }

    /// Recomputes the view and puts its first item on screen, unopened.
    ///
    /// Both slots are torn down whatever they held.
    fn rebuild_view(&mut self) {
        self.view = FilteredView::compute(self.catalog.items(), &self.enabled);
        self.history.clear();

        let released = self.navigator.reset();
        self.teardown(released);
        self.broker.drop_staged();
        self.broker.release_current();

        let first = self
            .view
            .get(0)
            .map(|descriptor| SlotEntry::new(0, descriptor.id(), None));
        let released = self.navigator.load(self.view.len(), first);
        self.teardown(released);
        self.queued_open = self.request_open(0, OpenPurpose::First);
    }

    /// Hands out the open request left by the last folder or filter change.
    pub fn take_open_request(&mut self) -> Option<OpenRequest> {
        self.queued_open.take()
    }

    /// Runs the request from [`Self::take_open_request`], if any, on the
    /// calling thread.
    ///
    /// # Errors
    ///
    /// Same as [`Self::finish_open`].
    pub fn open_queued(&mut self) -> Result<()> {
        match self.take_open_request() {
            Some(request) => self.open_now(request),
            None => Ok(()),
        }
    }

    // -------------------------------------------------------------------------
    // Linear navigation
    // -------------------------------------------------------------------------

    /// Starts moving one item in `direction`. Any open request in flight is
    /// superseded.
    ///
    /// # Errors
    ///
    /// Rejects at the ends of the view, while idle and while another
    /// transition is in progress.
    pub fn begin_advance(
        &mut self,
        direction: Direction,
    ) -> std::result::Result<PreloadRequest, AdvanceRejected> {
        let ticket = self.navigator.begin_advance(direction)?;
        let Some(descriptor) = self.view.get(ticket.index).cloned() else {
            self.navigator.abort_transition();
            return Err(AdvanceRejected::AtBoundary);
        };
        self.pending_open = None;
        self.queued_open = None;
        Ok(PreloadRequest {
            generation: self.generation,
            transition: ticket.transition,
            index: ticket.index,
            descriptor,
        })
    }

    /// Prepares the reserved slot from a resolved preload.
    ///
    /// The target's handle is staged until the transition completes; the
    /// item on screen keeps its own.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransitionAborted`] when the target cannot be
    /// reached or its player cannot be prepared; the previous item stays
    /// on screen.
    pub fn finish_preload(&mut self, resolved: PreloadResolved) -> Result<Delivery> {
        let PreloadResolved {
            generation,
            transition,
            index,
            descriptor,
            outcome,
        } = resolved;

        let pending = self
            .navigator
            .transition()
            .is_some_and(|current| current.id == transition && current.preload == Preload::Pending);
        if generation != self.generation || !pending {
            log::debug!("dropping stale preload of {}", descriptor.display_name());
            self.broker.discard(&outcome);
            return Ok(Delivery::Stale);
        }

        let handle = match self.broker.admit(&descriptor, outcome) {
            Ok(handle) => handle,
            Err(err) => return Err(self.abort_preload(&err.to_string())),
        };
        let player = match self.prepare_player(&descriptor, &handle) {
            Ok(player) => player,
            Err(err) => {
                self.broker.release(&handle);
                return Err(self.abort_preload(&err.to_string()));
            }
        };

        let entry = SlotEntry::new(index, descriptor.id(), player);
        if !self.navigator.attach_preload(transition, entry) {
            self.teardown(player);
            self.broker.release(&handle);
            return Ok(Delivery::Stale);
        }
        self.broker.stage(handle);
        Ok(Delivery::Applied)
    }

    /// Begins and preloads an advance on the calling thread.
    ///
    /// # Errors
    ///
    /// Same as [`Self::finish_preload`].
    pub fn advance(&mut self, direction: Direction) -> Result<AdvanceOutcome> {
        let request = match self.begin_advance(direction) {
            Ok(request) => request,
            Err(rejected) => {
                log::debug!("advance rejected: {rejected}");
                return Ok(AdvanceOutcome::Rejected(rejected));
            }
        };
        let to = request.index();
        let from = self.current_index().unwrap_or(to);

        let resolved = request.resolve(self.broker.storage().as_ref());
        self.finish_preload(resolved)?;
        Ok(AdvanceOutcome::Ready { from, to })
    }

    /// Settles the transition once the presentation layer has finished
    /// animating it.
    ///
    /// # Errors
    ///
    /// Fails when there is no transition or its preload is still pending.
    pub fn complete_transition(&mut self) -> std::result::Result<Settled, CompleteError> {
        let settled = self.navigator.complete_transition()?;
        self.teardown(settled.released);
        self.broker.commit_staged();
        self.autoplay_active();
        log::debug!("showing {} of {}", settled.to + 1, self.view.len());
        Ok(settled)
    }

    /// Abandons the transition in progress. Returns `false` if there was none.
    pub fn cancel_transition(&mut self) -> bool {
        let Some(aborted) = self.navigator.abort_transition() else {
            return false;
        };
        self.teardown(aborted.released);
        self.broker.drop_staged();
        true
    }

    fn abort_preload(&mut self, reason: &str) -> Error {
        if let Some(aborted) = self.navigator.abort_transition() {
            self.teardown(aborted.released);
        }
        self.broker.drop_staged();
        log::warn!("transition aborted: {reason}");
        Error::TransitionAborted(reason.to_string())
    }

    // -------------------------------------------------------------------------
    // Jumps
    // -------------------------------------------------------------------------

    /// Asks to show the item at `index` directly, without a transition.
    ///
    /// # Errors
    ///
    /// Fails when `index` is outside the view.
    pub fn request_jump(&mut self, index: usize) -> Result<OpenRequest> {
        self.request_open(index, OpenPurpose::Jump)
            .ok_or_else(|| Error::TransitionAborted(format!("no item at index {index}")))
    }

    /// Draws a random item not seen in the current round. `None` when the
    /// view is empty.
    pub fn request_random(&mut self) -> Option<OpenRequest> {
        let shown = self.current_index();
        let index = self.history.next_pick(self.view.len(), shown)?;
        self.request_open(index, OpenPurpose::Random)
    }

    /// Asks for the previous random pick. `None` at the oldest one.
    pub fn request_step_back(&mut self) -> Option<OpenRequest> {
        let index = self.history.peek_back()?;
        self.request_open(index, OpenPurpose::Back)
    }

    /// Asks for the next random pick again. `None` at the newest one.
    pub fn request_step_forward(&mut self) -> Option<OpenRequest> {
        let index = self.history.peek_forward()?;
        self.request_open(index, OpenPurpose::Forward)
    }

    /// Shows a resolved item in place of whatever is on screen, including a
    /// swipe in progress.
    ///
    /// Shuffle picks are recorded and history steps move the cursor only
    /// once the item is shown.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransitionAborted`], keeping the item on screen and
    /// its handle, when the target cannot be reached or played.
    pub fn finish_open(&mut self, resolved: OpenResolved) -> Result<Delivery> {
        let OpenResolved { request, outcome } = resolved;
        let OpenRequest {
            generation,
            ticket,
            index,
            descriptor,
            purpose,
        } = request;
        if generation != self.generation || self.pending_open != Some(ticket) {
            log::debug!("dropping stale open of {}", descriptor.display_name());
            self.broker.discard(&outcome);
            return Ok(Delivery::Stale);
        }
        self.pending_open = None;

        let handle = match self.broker.admit(&descriptor, outcome) {
            Ok(handle) => handle,
            Err(err) => return Err(open_failed(&descriptor, &err.to_string())),
        };
        let player = match self.prepare_player(&descriptor, &handle) {
            Ok(player) => player,
            Err(err) => {
                self.broker.release(&handle);
                return Err(open_failed(&descriptor, &err.to_string()));
            }
        };

        let entry = SlotEntry::new(index, descriptor.id(), player);
        match self.navigator.jump_to(entry) {
            Ok(released) => self.teardown(released),
            Err(err) => {
                self.teardown(player);
                self.broker.release(&handle);
                return Err(open_failed(&descriptor, &err.to_string()));
            }
        }
        self.broker.drop_staged();
        self.broker.install(handle);

        match purpose {
            OpenPurpose::Random => self.history.record(index),
            OpenPurpose::Back => {
                self.history.step_back();
            }
            OpenPurpose::Forward => {
                self.history.step_forward();
            }
            OpenPurpose::First | OpenPurpose::Jump => {}
        }
        self.autoplay_active();
        Ok(Delivery::Applied)
    }

    /// Shows the item at `index` on the calling thread.
    ///
    /// # Errors
    ///
    /// Fails, keeping the current item, when `index` is outside the view or
    /// the item cannot be opened.
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        let request = self.request_jump(index)?;
        self.open_now(request)
    }

    /// Jumps to a random item not seen in the current round, on the calling
    /// thread.
    ///
    /// Returns the index shown, or `None` when the view is empty.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::jump_to`]; the pick is then not recorded.
    pub fn pick_random(&mut self) -> Result<Option<usize>> {
        let Some(request) = self.request_random() else {
            return Ok(None);
        };
        let index = request.index();
        self.open_now(request)?;
        Ok(Some(index))
    }

    /// Returns to the previous random pick. `Ok(false)` at the oldest one.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::jump_to`]; the history cursor then stays put.
    pub fn step_back(&mut self) -> Result<bool> {
        let Some(request) = self.request_step_back() else {
            return Ok(false);
        };
        self.open_now(request)?;
        Ok(true)
    }

    /// Redoes the next random pick. `Ok(false)` at the newest one.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::jump_to`]; the history cursor then stays put.
    pub fn step_forward(&mut self) -> Result<bool> {
        let Some(request) = self.request_step_forward() else {
            return Ok(false);
        };
        self.open_now(request)?;
        Ok(true)
    }

    fn request_open(&mut self, index: usize, purpose: OpenPurpose) -> Option<OpenRequest> {
        let descriptor = self.view.get(index).cloned()?;
        self.next_open += 1;
        self.pending_open = Some(self.next_open);
        Some(OpenRequest {
            generation: self.generation,
            ticket: self.next_open,
            index,
            descriptor,
            purpose,
        })
    }

    fn open_now(&mut self, request: OpenRequest) -> Result<()> {
        let resolved = request.resolve(self.broker.storage().as_ref());
        self.finish_open(resolved).map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Playback
    // -------------------------------------------------------------------------

    /// Plays or pauses the video on screen.
    pub fn toggle_playback(&mut self) -> Option<PlaybackState> {
        let player = self.active_player()?;
        if self.sink.state(player).is_playing() {
            self.sink.pause(player);
        } else {
            self.sink.play(player);
        }
        Some(self.sink.state(player))
    }

    /// Seeks the video on screen by one seek step. `Next` seeks forward.
    pub fn seek(&mut self, direction: Direction) -> bool {
        let Some(player) = self.active_player() else {
            return false;
        };
        let step = self.prefs.seek_step.value();
        let offset = match direction {
            Direction::Next => step,
            Direction::Previous => -step,
        };
        self.sink.seek_by(player, offset);
        true
    }

    /// Moves the seek step one increment up or down, within bounds.
    pub fn adjust_seek_step(&mut self, increase: bool) -> SeekStep {
        let step = self.prefs.seek_step;
        self.prefs.seek_step = if increase {
            step.increase()
        } else {
            step.decrease()
        };
        self.prefs.seek_step
    }

    pub fn toggle_player_style(&mut self) -> PlayerStyle {
        self.prefs.presentation.style = self.prefs.presentation.style.toggled();
        self.push_presentation();
        self.prefs.presentation.style
    }

    pub fn toggle_aspect_fill(&mut self) -> bool {
        self.prefs.presentation.aspect_fill = !self.prefs.presentation.aspect_fill;
        self.push_presentation();
        self.prefs.presentation.aspect_fill
    }

    /// Whether videos start playing when they come on screen. Applies from
    /// the next item on.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.prefs.autoplay = autoplay;
    }

    fn push_presentation(&mut self) {
        let presentation = self.prefs.presentation;
        for player in self.navigator.live_players() {
            self.sink.set_presentation(player, presentation);
        }
    }

    fn autoplay_active(&mut self) {
        if !self.prefs.autoplay {
            return;
        }
        if let Some(player) = self.active_player() {
            self.sink.play(player);
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Tears down every player and releases every handle.
    pub fn shutdown(&mut self) {
        self.pending_open = None;
        self.queued_open = None;
        let released = self.navigator.reset();
        self.teardown(released);
        self.broker.release_all();
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Prepares a player for video items. The caller owns `handle` either
    /// way.
    fn prepare_player(
        &mut self,
        descriptor: &MediaDescriptor,
        handle: &AccessHandle,
    ) -> Result<Option<PlayerId>> {
        if !descriptor.kind().needs_player() {
            return Ok(None);
        }
        let player = self.sink.prepare(handle, self.prefs.presentation)?;
        Ok(Some(player))
    }

    fn teardown(&mut self, players: impl IntoIterator<Item = PlayerId>) {
        for player in players {
            self.sink.pause(player);
            self.sink.teardown(player);
        }
    }
}

fn open_failed(descriptor: &MediaDescriptor, reason: &str) -> Error {
    log::warn!("cannot open {}: {reason}", descriptor.display_name());
    Error::TransitionAborted(reason.to_string())
}
