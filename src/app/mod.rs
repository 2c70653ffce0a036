// SPDX-License-Identifier: MPL-2.0
//! Application root state and the terminal event loop.
//!
//! The `App` struct wires the browsing session to persisted preferences and
//! translates messages into side effects like config persistence, folder
//! listing or access resolution. Input arrives as text commands on stdin;
//! background results arrive on an in-process channel. Both feed the same
//! `update` path so session state is only ever touched from one task.

pub mod command;
mod message;
pub mod paths;
pub mod persisted_state;
mod persistence;
pub mod tasks;
mod update;
pub mod view;

pub use message::{Flags, Message};
pub use tasks::Effect;

use crate::application::session::PlaybackPrefs;
use crate::application::shuffle::ShuffleHistory;
use crate::application::BrowseSession;
use crate::config::{self, Config};
use crate::domain::navigation::SwipeThreshold;
use crate::error::Result;
use crate::infrastructure::playback::HeadlessSink;
use crate::infrastructure::storage::FsStorage;
use persisted_state::AppState;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

/// Root application state bridging the browsing session and persisted
/// preferences.
pub struct App {
    session: BrowseSession<FsStorage, HeadlessSink>,
    config: Config,
    /// Persisted application state (last opened folder).
    app_state: AppState,
    /// Explicit settings directory, if one was given on the command line.
    config_dir: Option<PathBuf>,
    /// Explicit state directory, if one was given on the command line.
    data_dir: Option<PathBuf>,
    swipe_threshold: SwipeThreshold,
    /// Feedback for the last command.
    notice: Option<String>,
    /// Whether the status line changed since it was last printed.
    redraw: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("folder", &self.session.folder())
            .field("state", &self.session.state())
            .field("enabled_kinds", &self.session.enabled_kinds().to_string())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the app from saved preferences and opens the folder named in
    /// `flags`, or the last one browsed.
    #[must_use]
    pub fn new(flags: Flags) -> (Self, Effect) {
        let config_dir = flags.config_dir.map(PathBuf::from);
        let data_dir = flags.data_dir.map(PathBuf::from);

        let (config, config_warning) = config::load_with_override(config_dir.clone());
        let (app_state, state_warning) = AppState::load_from(data_dir.clone());
        for warning in [config_warning, state_warning].into_iter().flatten() {
            log::warn!("{warning}");
        }

        let prefs = PlaybackPrefs {
            seek_step: config.seek_step(),
            presentation: config.presentation(),
            autoplay: config.autoplay(),
        };
        let history = flags
            .seed
            .map_or_else(ShuffleHistory::new, ShuffleHistory::with_seed);
        let session = BrowseSession::new(
            Arc::new(FsStorage::new()),
            HeadlessSink::new(),
            config.enabled_kinds(),
            prefs,
        )
        .with_history(history);

        let mut app = App {
            session,
            swipe_threshold: config.swipe_threshold(),
            config,
            app_state,
            config_dir,
            data_dir,
            notice: None,
            redraw: true,
        };

        let folder = flags
            .folder
            .map(PathBuf::from)
            .or_else(|| app.app_state.last_folder.clone());
        let effect = match folder {
            Some(folder) => app.update(Message::OpenFolder(folder)),
            None => Effect::None,
        };
        (app, effect)
    }

    pub fn update(&mut self, message: Message) -> Effect {
        update::update(self, message)
    }

    #[must_use]
    pub fn session(&self) -> &BrowseSession<FsStorage, HeadlessSink> {
        &self.session
    }

    /// Takes the feedback left by the last update, if any.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Lines to print after an update: the notice, then the status line if
    /// it changed.
    pub fn take_output(&mut self) -> Vec<String> {
        let mut lines: Vec<String> = self.notice.take().into_iter().collect();
        if std::mem::take(&mut self.redraw) {
            lines.push(view::status_line(&self.session));
        }
        lines
    }
}

/// Runs the command loop until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin or stdout fail.
pub async fn run(flags: Flags) -> Result<()> {
    let (mut app, effect) = App::new(flags);
    let storage = Arc::clone(app.session.storage());
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    write_lines(&mut stdout, &app.take_output()).await?;
    tasks::spawn(effect, &storage, &sender);

    loop {
        let message = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => match command::parse(&line) {
                    Ok(Some(message)) => message,
                    Ok(None) => continue,
                    Err(err) => {
                        write_lines(&mut stdout, &[err]).await?;
                        continue;
                    }
                },
                None => Message::Quit,
            },
            Some(message) = receiver.recv() => message,
        };

        let effect = app.update(message);
        write_lines(&mut stdout, &app.take_output()).await?;
        if matches!(effect, Effect::Quit) {
            break;
        }
        tasks::spawn(effect, &storage, &sender);
    }

    log::info!("bye");
    Ok(())
}

async fn write_lines(stdout: &mut tokio::io::Stdout, lines: &[String]) -> Result<()> {
    for line in lines {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}
