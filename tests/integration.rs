// SPDX-License-Identifier: MPL-2.0
//! End-to-end browsing over a real folder with the filesystem storage and
//! the headless playback sink.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use swipe_reel::app::persisted_state::AppState;
use swipe_reel::app::{tasks, Effect, Message};
use swipe_reel::application::navigation::NavState;
use swipe_reel::application::session::{AdvanceOutcome, Delivery, PlaybackPrefs};
use swipe_reel::application::shuffle::ShuffleHistory;
use swipe_reel::application::BrowseSession;
use swipe_reel::config::{self, Config, SortOrder};
use swipe_reel::domain::media::{KindSet, MediaKind};
use swipe_reel::domain::navigation::Direction;
use swipe_reel::error::Error;
use swipe_reel::infrastructure::{FsStorage, HeadlessSink};
use tempfile::{tempdir, TempDir};
use tokio::sync::mpsc;

fn media_folder(files: &[&str]) -> TempDir {
    let dir = tempdir().expect("failed to create temp dir");
    for name in files {
        fs::write(dir.path().join(name), b"media bytes").expect("failed to write media file");
    }
    dir
}

fn open(root: &Path) -> BrowseSession<FsStorage, HeadlessSink> {
    let mut session = BrowseSession::new(
        Arc::new(FsStorage::new()),
        HeadlessSink::new(),
        KindSet::all(),
        PlaybackPrefs::default(),
    )
    .with_history(ShuffleHistory::with_seed(42));
    session
        .open_folder(root, SortOrder::Alphabetical)
        .expect("folder should open");
    session
}

fn swipe(session: &mut BrowseSession<FsStorage, HeadlessSink>, direction: Direction) {
    match session.advance(direction).expect("advance should preload") {
        AdvanceOutcome::Ready { .. } => {}
        AdvanceOutcome::Rejected(rejected) => panic!("advance rejected: {rejected}"),
    }
    session
        .complete_transition()
        .expect("transition should settle");
}

#[test]
fn browsing_a_folder_walks_every_supported_file() {
    let dir = media_folder(&["c.gif", "a.mp4", "b.jpg", "notes.txt", ".hidden.mp4"]);
    let mut session = open(dir.path());

    assert_eq!(session.catalog().len(), 3);
    let mut names = vec![session.current().expect("first item").display_name().to_string()];
    for _ in 1..3 {
        swipe(&mut session, Direction::Next);
        names.push(session.current().expect("item").display_name().to_string());
    }
    assert_eq!(names, ["a.mp4", "b.jpg", "c.gif"]);

    let outcome = session.advance(Direction::Next).expect("no error");
    assert!(matches!(outcome, AdvanceOutcome::Rejected(_)));
}

#[test]
fn at_most_two_players_and_one_item_grant_are_live() {
    let dir = media_folder(&["a.mp4", "b.mp4", "c.mp4", "d.mp4"]);
    let mut session = open(dir.path());

    for _ in 0..3 {
        assert!(matches!(
            session.advance(Direction::Next).expect("preload"),
            AdvanceOutcome::Ready { .. }
        ));
        assert_eq!(session.sink().live_players(), 2);
        session.complete_transition().expect("settle");
        assert_eq!(session.sink().live_players(), 1);
        // Folder grant plus the item on screen.
        assert_eq!(session.storage().active_grants(), 2);
    }

    session.shutdown();
    assert_eq!(session.sink().live_players(), 0);
    assert_eq!(session.storage().active_grants(), 0);
}

#[test]
fn filtering_restarts_at_the_first_matching_item() {
    let dir = media_folder(&["a.jpg", "b.mp4", "c.jpg", "d.mp4"]);
    let mut session = open(dir.path());
    swipe(&mut session, Direction::Next);

    assert!(session.set_enabled_kinds(KindSet::only(MediaKind::Video)));

    assert_eq!(session.view().len(), 2);
    assert_eq!(session.current_index(), Some(0));
    assert_eq!(
        session.current().expect("item").display_name(),
        "b.mp4"
    );
}

#[test]
fn a_changed_file_is_shown_without_a_grant() {
    let dir = media_folder(&["a.jpg", "b.jpg"]);
    let mut session = open(dir.path());
    fs::write(dir.path().join("b.jpg"), b"rewritten with more bytes").expect("rewrite");

    swipe(&mut session, Direction::Next);

    let handle = session.current_handle().expect("handle for the item on screen");
    assert!(handle.is_degraded());
    assert_eq!(session.current_index(), Some(1));
}

#[test]
fn a_deleted_video_keeps_the_previous_item_on_screen() {
    let dir = media_folder(&["a.mp4", "b.mp4"]);
    let mut session = open(dir.path());
    fs::remove_file(dir.path().join("b.mp4")).expect("remove");

    let err = session.advance(Direction::Next).expect_err("cannot play a missing file");

    assert!(matches!(err, Error::TransitionAborted(_)));
    assert_eq!(session.state(), NavState::Showing(0));
    assert_eq!(session.sink().live_players(), 1);
}

#[test]
fn a_missing_folder_falls_back_to_the_empty_state() {
    let dir = media_folder(&["a.jpg"]);
    let mut session = open(dir.path());

    let err = session
        .open_folder(dir.path().join("gone"), SortOrder::Discovery)
        .expect_err("listing fails");

    assert!(matches!(err, Error::EnumerationFailed { .. }));
    assert_eq!(session.state(), NavState::Idle);
    assert!(session.folder().is_none());
    assert_eq!(session.storage().active_grants(), 0);
}

#[test]
fn shuffle_visits_every_item_before_repeating() {
    let dir = media_folder(&["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"]);
    let mut session = open(dir.path());

    let mut seen: Vec<usize> = (0..5)
        .map(|_| {
            session
                .pick_random()
                .expect("pick succeeds")
                .expect("view is not empty")
        })
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, [0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn background_tasks_report_back_on_the_channel() {
    let dir = media_folder(&["a.jpg", "b.jpg"]);
    let storage = Arc::new(FsStorage::new());
    let mut session = BrowseSession::new(
        Arc::clone(&storage),
        HeadlessSink::new(),
        KindSet::all(),
        PlaybackPrefs::default(),
    );
    let (sender, mut receiver) = mpsc::unbounded_channel();

    let request = session.request_scan(dir.path(), SortOrder::Alphabetical);
    tasks::spawn(Effect::Scan(request), &storage, &sender);
    let Some(Message::ScanCompleted(completed)) = receiver.recv().await else {
        panic!("expected a finished listing");
    };
    assert_eq!(session.apply_scan(completed).expect("applies"), Delivery::Applied);
    assert_eq!(session.view().len(), 2);

    let request = session.take_open_request().expect("first item queued");
    tasks::spawn(Effect::Open(request), &storage, &sender);
    let Some(Message::OpenResolved(resolved)) = receiver.recv().await else {
        panic!("expected the first item's access");
    };
    assert_eq!(session.finish_open(resolved).expect("applies"), Delivery::Applied);
    assert!(session.current_handle().is_some());

    let request = session.begin_advance(Direction::Next).expect("advance starts");
    tasks::spawn(Effect::Preload(request), &storage, &sender);
    let Some(Message::PreloadResolved(resolved)) = receiver.recv().await else {
        panic!("expected a resolved preload");
    };
    let transition = resolved.transition();
    assert_eq!(session.finish_preload(resolved).expect("applies"), Delivery::Applied);

    tasks::spawn(
        Effect::FinishTransition {
            transition,
            delay: Duration::from_millis(1),
        },
        &storage,
        &sender,
    );
    let Some(Message::AnimationEnded(ended)) = receiver.recv().await else {
        panic!("expected the animation timer");
    };
    assert_eq!(ended, transition);
    session.complete_transition().expect("settles");
    assert_eq!(session.state(), NavState::Showing(1));
}

#[tokio::test]
async fn a_rescan_makes_the_earlier_listing_stale() {
    let first = media_folder(&["a.jpg"]);
    let second = media_folder(&["x.jpg", "y.jpg"]);
    let storage = Arc::new(FsStorage::new());
    let mut session = BrowseSession::new(
        Arc::clone(&storage),
        HeadlessSink::new(),
        KindSet::all(),
        PlaybackPrefs::default(),
    );

    let early = session
        .request_scan(first.path(), SortOrder::Discovery)
        .run(storage.as_ref());
    let late = session
        .request_scan(second.path(), SortOrder::Discovery)
        .run(storage.as_ref());

    assert_eq!(session.apply_scan(late).expect("applies"), Delivery::Applied);
    assert_eq!(session.apply_scan(early).expect("dropped"), Delivery::Stale);
    assert_eq!(session.folder(), Some(second.path()));
    assert_eq!(session.view().len(), 2);
    // Only the second folder stays pinned.
    assert_eq!(storage.active_grants(), 1);
}

#[test]
fn a_failed_jump_leaves_the_image_on_screen_readable() {
    let dir = media_folder(&["a.jpg", "b.mp4"]);
    let mut session = open(dir.path());
    let before = session.current_handle().cloned().expect("a.jpg is open");
    fs::remove_file(dir.path().join("b.mp4")).expect("remove");

    assert!(session.jump_to(1).is_err());
    assert!(matches!(
        session.advance(Direction::Next),
        Err(Error::TransitionAborted(_))
    ));

    assert_eq!(session.state(), NavState::Showing(0));
    assert_eq!(session.current_handle(), Some(&before));
    assert_eq!(session.storage().active_grants(), 2);
}

#[test]
fn preferences_and_last_folder_survive_a_restart() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");
    let media = media_folder(&["a.mp4", "b.jpg"]);

    let mut config = Config::default();
    config.set_enabled_kinds(&KindSet::only(MediaKind::Video));
    config.video.seek_step_secs = Some(33.0);
    config::save_with_override(&config, Some(config_dir.path().to_path_buf()))
        .expect("config saves");

    let mut state = AppState::default();
    assert!(state.set_last_folder(media.path()));
    assert!(state.save_to(Some(data_dir.path().to_path_buf())).is_none());

    let (loaded, warning) = config::load_with_override(Some(config_dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded.enabled_kinds(), KindSet::only(MediaKind::Video));
    // Snapped to the nearest seek increment.
    assert_eq!(loaded.seek_step().value(), 35.0);

    let (restored, warning) = AppState::load_from(Some(data_dir.path().to_path_buf()));
    assert!(warning.is_none());
    let folder = restored.last_folder.expect("folder remembered");

    let mut session = BrowseSession::new(
        Arc::new(FsStorage::new()),
        HeadlessSink::new(),
        loaded.enabled_kinds(),
        PlaybackPrefs::default(),
    );
    session
        .open_folder(folder, loaded.sort_order())
        .expect("folder reopens");
    assert_eq!(session.view().len(), 1);
    assert_eq!(session.current().expect("video").kind(), MediaKind::Video);
}
