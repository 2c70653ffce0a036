// SPDX-License-Identifier: MPL-2.0
//! Domain layer - media descriptors, filters and navigation values.
//!
//! Nothing in here performs I/O; the application and infrastructure layers
//! own filesystem access and playback.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind),
//!   [`MediaDescriptor`](media::MediaDescriptor), [`KindSet`](media::KindSet),
//!   [`FilteredView`](media::FilteredView))
//! - [`navigation`]: Swipe values ([`Direction`](navigation::Direction),
//!   [`SwipeThreshold`](navigation::SwipeThreshold))
//! - [`video`]: Playback values ([`SeekStep`](video::SeekStep),
//!   [`PlayerStyle`](video::PlayerStyle))

pub mod media;
pub mod navigation;
pub mod video;
