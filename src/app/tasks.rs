// SPDX-License-Identifier: MPL-2.0
//! Background work requested by `App::update`.
//!
//! Folder listing and every locator resolution block on storage I/O, so they
//! run on tokio's blocking pool. Their results come back as [`Message`]s on the
//! app's channel and are applied on the single update path, where stale ones
//! are dropped.

use super::Message;
use crate::application::navigation::TransitionId;
use crate::application::port::StorageAccess;
use crate::application::session::{OpenRequest, PreloadRequest, ScanRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Side effect returned from `App::update`.
#[derive(Debug)]
pub enum Effect {
    None,
    /// List a folder off the update path.
    Scan(ScanRequest),
    /// Resolve a swipe target off the update path.
    Preload(PreloadRequest),
    /// Resolve an item to show directly off the update path.
    Open(OpenRequest),
    /// Stand in for the swipe animation: settle after `delay`.
    FinishTransition {
        transition: TransitionId,
        delay: Duration,
    },
    /// Stop the event loop.
    Quit,
}

/// Starts the work described by `effect`. `None` and `Quit` do nothing.
///
/// Must be called from within a tokio runtime.
pub fn spawn<S>(effect: Effect, storage: &Arc<S>, sender: &UnboundedSender<Message>)
where
    S: StorageAccess + 'static,
{
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::Scan(request) => {
            let sender = sender.clone();
            let storage = Arc::clone(storage);
            tokio::spawn(async move {
                let completed =
                    tokio::task::spawn_blocking(move || request.run(storage.as_ref())).await;
                match completed {
                    Ok(completed) => deliver(&sender, Message::ScanCompleted(completed)),
                    Err(err) => log::error!("folder listing task failed: {err}"),
                }
            });
        }
        Effect::Preload(request) => {
            let sender = sender.clone();
            let storage = Arc::clone(storage);
            tokio::spawn(async move {
                let resolved =
                    tokio::task::spawn_blocking(move || request.resolve(storage.as_ref())).await;
                match resolved {
                    Ok(resolved) => deliver(&sender, Message::PreloadResolved(resolved)),
                    Err(err) => log::error!("preload task failed: {err}"),
                }
            });
        }
        Effect::Open(request) => {
            let sender = sender.clone();
            let storage = Arc::clone(storage);
            tokio::spawn(async move {
                let resolved =
                    tokio::task::spawn_blocking(move || request.resolve(storage.as_ref())).await;
                match resolved {
                    Ok(resolved) => deliver(&sender, Message::OpenResolved(resolved)),
                    Err(err) => log::error!("open task failed: {err}"),
                }
            });
        }
        Effect::FinishTransition { transition, delay } => {
            let sender = sender.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                deliver(&sender, Message::AnimationEnded(transition));
            });
        }
    }
}

fn deliver(sender: &UnboundedSender<Message>, message: Message) {
    if sender.send(message).is_err() {
        log::debug!("app stopped before a background result arrived");
    }
}
