// SPDX-License-Identifier: MPL-2.0
//! Parsing of the line-based commands read from stdin.

use super::Message;
use crate::domain::media::MediaKind;
use crate::domain::navigation::Direction;
use std::path::PathBuf;

pub const HELP: &str = "\
commands:
  open <folder>          browse a folder
  next | n, prev | p     move one item
  swipe <dy>             vertical drag in points (negative = up = next)
  done, cancel           finish or abandon the swipe in progress
  random | r             jump to a random item
  back | b, forward | f  walk the random-pick history
  toggle <kind>          show/hide video, image or animated
  seek + | seek -        seek the current video
  step + | step -        change the seek step
  player, fill           toggle player style / aspect fill
  pause                  play or pause the current video
  autoplay               toggle starting videos automatically
  info | i, help | h     show details / this text
  quit | q";

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a short explanation for unknown commands and bad arguments.
pub fn parse(line: &str) -> Result<Option<Message>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let message = match word.to_ascii_lowercase().as_str() {
        "open" | "o" if !rest.is_empty() => Message::OpenFolder(PathBuf::from(rest)),
        "open" | "o" => return Err("open needs a folder".to_string()),
        "next" | "n" => Message::Navigate(Direction::Next),
        "prev" | "p" => Message::Navigate(Direction::Previous),
        "swipe" | "s" => Message::Swipe(
            rest.parse()
                .map_err(|_| format!("swipe needs a distance, got '{rest}'"))?,
        ),
        "done" => Message::CompleteTransition,
        "cancel" => Message::CancelTransition,
        "random" | "r" => Message::PickRandom,
        "back" | "b" => Message::StepBack,
        "forward" | "f" => Message::StepForward,
        "toggle" | "t" => Message::ToggleKind(rest.parse::<MediaKind>()?),
        "seek" => Message::Seek(sign(rest)?),
        "step" => Message::AdjustSeekStep {
            increase: sign(rest)? == Direction::Next,
        },
        "player" => Message::TogglePlayerStyle,
        "fill" => Message::ToggleAspectFill,
        "pause" | "play" => Message::TogglePlayback,
        "autoplay" => Message::ToggleAutoplay,
        "info" | "i" => Message::ShowInfo,
        "help" | "h" | "?" => Message::ShowHelp,
        "quit" | "q" | "exit" => Message::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(message))
}

fn sign(arg: &str) -> Result<Direction, String> {
    match arg {
        "+" => Ok(Direction::Next),
        "-" => Ok(Direction::Previous),
        other => Err(format!("expected + or -, got '{other}'")),
    }
}
