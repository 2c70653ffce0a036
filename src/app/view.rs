// SPDX-License-Identifier: MPL-2.0
//! Text rendering of the browsing state.
//!
//! The terminal front end has no widgets; these functions turn the session
//! snapshot into the lines printed after each update.

use crate::application::port::{PlaybackSink, StorageAccess};
use crate::application::BrowseSession;
use crate::domain::video::{PlaybackState, PlayerStyle};

/// One-line summary of what is on screen.
#[must_use]
pub fn status_line<S: StorageAccess, P: PlaybackSink>(session: &BrowseSession<S, P>) -> String {
    let info = session.navigation_info();
    let Some(position) = info.position_label() else {
        return if session.folder().is_some() {
            "nothing to show (no items match the enabled kinds)".to_string()
        } else {
            "no folder open".to_string()
        };
    };

    let mut line = format!("[{position}]");
    if let Some(current) = session.current() {
        line.push_str(&format!(" {} ({})", current.display_name(), current.kind()));
    }
    if let Some(player) = session.active_player() {
        line.push_str(match session.sink().state(player) {
            PlaybackState::Playing => " playing",
            PlaybackState::Paused => " paused",
            PlaybackState::Stopped => " stopped",
        });
    }
    if session.current_handle().is_some_and(|handle| handle.is_degraded()) {
        line.push_str(" [no access grant]");
    }
    if info.filter_active {
        line.push_str(&format!(" | showing {}", session.enabled_kinds()));
    }
    if info.transitioning {
        line.push_str(" | swiping...");
    }
    line
}

/// Multi-line details about the folder, the filter and the current item.
#[must_use]
pub fn info<S: StorageAccess, P: PlaybackSink>(session: &BrowseSession<S, P>) -> String {
    let info = session.navigation_info();
    let prefs = session.prefs();
    let mut lines = Vec::new();

    match session.folder() {
        Some(folder) => lines.push(format!("folder:   {}", folder.display())),
        None => lines.push("folder:   none".to_string()),
    }
    lines.push(format!(
        "items:    {} shown of {} ({})",
        info.filtered_count,
        info.total_count,
        session.enabled_kinds()
    ));
    if let Some(current) = session.current() {
        lines.push(format!("current:  {}", current.locator().path().display()));
        lines.push(format!("kind:     {}", current.kind()));
    }
    lines.push(format!(
        "state:    {} (slot {})",
        session.state().name(),
        info.active_slot
    ));
    lines.push(format!(
        "history:  back {} / forward {}",
        yes_no(info.can_step_back),
        yes_no(info.can_step_forward)
    ));
    lines.push(format!(
        "player:   {}, {}, seek step {}s, autoplay {}",
        match prefs.presentation.style {
            PlayerStyle::Controlled => "controlled",
            PlayerStyle::Native => "native",
        },
        if prefs.presentation.aspect_fill {
            "fill"
        } else {
            "fit"
        },
        prefs.seek_step.value(),
        yes_no(prefs.autoplay)
    ));
    lines.join("\n")
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
