// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Every [`Message`] goes through [`update`], which mutates the session,
//! persists preference changes and returns the [`Effect`] to run next.
//! Nothing here touches storage: listings and resolutions go out as effects
//! and come back as messages.
//! User feedback is left in `App::notice`; `App::redraw` asks the driver to
//! print a fresh status line.

use super::command::HELP;
use super::tasks::Effect;
use super::{persistence, view, App, Message};
use crate::application::session::{Delivery, OpenResolved, PreloadResolved, ScanCompleted};
use crate::config::TRANSITION_ANIMATION_MS;
use crate::domain::media::MediaKind;
use crate::domain::navigation::Direction;
use crate::domain::video::PlaybackState;
use std::path::PathBuf;
use std::time::Duration;

/// Routes a message to its handler.
pub(super) fn update(app: &mut App, message: Message) -> Effect {
    match message {
        Message::OpenFolder(path) => handle_open_folder(app, path),
        Message::ScanCompleted(completed) => handle_scan_completed(app, completed),
        Message::Swipe(translation) => handle_swipe(app, translation),
        Message::Navigate(direction) => handle_navigate(app, direction),
        Message::PreloadResolved(resolved) => handle_preload_resolved(app, resolved),
        Message::OpenResolved(resolved) => handle_open_resolved(app, resolved),
        Message::CompleteTransition => handle_complete_transition(app),
        Message::AnimationEnded(transition) => {
            let current = app.session.navigator().transition();
            if current.is_some_and(|current| current.id == transition) {
                handle_complete_transition(app)
            } else {
                Effect::None
            }
        }
        Message::CancelTransition => {
            if app.session.cancel_transition() {
                app.redraw = true;
            } else {
                app.notice = Some("no swipe in progress".to_string());
            }
            Effect::None
        }
        Message::PickRandom => match app.session.request_random() {
            Some(request) => Effect::Open(request),
            None => {
                app.notice = Some("nothing to pick from".to_string());
                Effect::None
            }
        },
        Message::StepBack => handle_history_step(app, Direction::Previous),
        Message::StepForward => handle_history_step(app, Direction::Next),
        Message::ToggleKind(kind) => handle_toggle_kind(app, kind),
        Message::Seek(direction) => {
            if app.session.seek(direction) {
                app.redraw = true;
            } else {
                app.notice = Some("no video on screen".to_string());
            }
            Effect::None
        }
        Message::AdjustSeekStep { increase } => {
            let step = app.session.adjust_seek_step(increase);
            app.config.video.seek_step_secs = Some(step.value());
            persistence::persist_preferences(&app.config, app.config_dir.clone());
            app.notice = Some(format!("seek step: {}s", step.value()));
            Effect::None
        }
        Message::TogglePlayerStyle => {
            let style = app.session.toggle_player_style();
            app.config.video.player_style = Some(style);
            persistence::persist_preferences(&app.config, app.config_dir.clone());
            app.notice = Some(format!("player style: {style:?}").to_lowercase());
            Effect::None
        }
        Message::ToggleAspectFill => {
            let fill = app.session.toggle_aspect_fill();
            app.config.video.aspect_fill = Some(fill);
            persistence::persist_preferences(&app.config, app.config_dir.clone());
            app.notice = Some(if fill { "aspect: fill" } else { "aspect: fit" }.to_string());
            Effect::None
        }
        Message::TogglePlayback => {
            match app.session.toggle_playback() {
                Some(PlaybackState::Playing) => app.notice = Some("playing".to_string()),
                Some(_) => app.notice = Some("paused".to_string()),
                None => app.notice = Some("no video on screen".to_string()),
            }
            Effect::None
        }
        Message::ToggleAutoplay => {
            let autoplay = !app.session.prefs().autoplay;
            app.session.set_autoplay(autoplay);
            app.config.video.autoplay = Some(autoplay);
            persistence::persist_preferences(&app.config, app.config_dir.clone());
            app.notice = Some(if autoplay { "autoplay: on" } else { "autoplay: off" }.to_string());
            Effect::None
        }
        Message::ShowInfo => {
            app.notice = Some(view::info(&app.session));
            Effect::None
        }
        Message::ShowHelp => {
            app.notice = Some(HELP.to_string());
            Effect::None
        }
        Message::Quit => {
            app.session.shutdown();
            Effect::Quit
        }
    }
}

fn handle_open_folder(app: &mut App, path: PathBuf) -> Effect {
    let request = app.session.request_scan(path, app.config.sort_order());
    app.notice = Some(format!("scanning {}...", request.root().display()));
    Effect::Scan(request)
}

fn handle_scan_completed(app: &mut App, completed: ScanCompleted) -> Effect {
    match app.session.apply_scan(completed) {
        Ok(Delivery::Applied) => {
            if let Some(folder) = app.session.folder().map(PathBuf::from) {
                persistence::remember_folder(&mut app.app_state, &folder, app.data_dir.clone());
            }
            app.redraw = true;
            open_first_item(app)
        }
        Ok(Delivery::Stale) => Effect::None,
        Err(err) => {
            app.notice = Some(err.to_string());
            app.redraw = true;
            Effect::None
        }
    }
}

/// Effect opening the first item of a freshly built view, if it has one.
fn open_first_item(app: &mut App) -> Effect {
    app.session
        .take_open_request()
        .map_or(Effect::None, Effect::Open)
}

fn handle_swipe(app: &mut App, translation: f32) -> Effect {
    match app.swipe_threshold.classify(translation) {
        Some(direction) => handle_navigate(app, direction),
        None => {
            app.notice = Some("swipe too short".to_string());
            Effect::None
        }
    }
}

fn handle_navigate(app: &mut App, direction: Direction) -> Effect {
    match app.session.begin_advance(direction) {
        Ok(request) => Effect::Preload(request),
        Err(rejected) => {
            app.notice = Some(rejected.to_string());
            Effect::None
        }
    }
}

fn handle_preload_resolved(app: &mut App, resolved: PreloadResolved) -> Effect {
    let transition = resolved.transition();
    match app.session.finish_preload(resolved) {
        Ok(Delivery::Applied) => {
            app.redraw = true;
            Effect::FinishTransition {
                transition,
                delay: Duration::from_millis(TRANSITION_ANIMATION_MS),
            }
        }
        Ok(Delivery::Stale) => Effect::None,
        Err(err) => {
            app.notice = Some(err.to_string());
            Effect::None
        }
    }
}

fn handle_open_resolved(app: &mut App, resolved: OpenResolved) -> Effect {
    match app.session.finish_open(resolved) {
        Ok(Delivery::Applied) => app.redraw = true,
        Ok(Delivery::Stale) => {}
        Err(err) => app.notice = Some(err.to_string()),
    }
    Effect::None
}

fn handle_complete_transition(app: &mut App) -> Effect {
    match app.session.complete_transition() {
        Ok(_) => app.redraw = true,
        Err(err) => app.notice = Some(err.to_string()),
    }
    Effect::None
}

fn handle_history_step(app: &mut App, direction: Direction) -> Effect {
    let request = match direction {
        Direction::Previous => app.session.request_step_back(),
        Direction::Next => app.session.request_step_forward(),
    };
    match request {
        Some(request) => Effect::Open(request),
        None => {
            app.notice = Some(
                match direction {
                    Direction::Previous => "no earlier random pick",
                    Direction::Next => "no later random pick",
                }
                .to_string(),
            );
            Effect::None
        }
    }
}

fn handle_toggle_kind(app: &mut App, kind: MediaKind) -> Effect {
    if app.session.toggle_kind(kind) {
        app.config.set_enabled_kinds(app.session.enabled_kinds());
        persistence::persist_preferences(&app.config, app.config_dir.clone());
        app.redraw = true;
        open_first_item(app)
    } else {
        app.notice = Some(format!("{kind} is the only kind shown; enable another first"));
        Effect::None
    }
}
