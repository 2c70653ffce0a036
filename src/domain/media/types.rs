// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any presentation dependencies.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

/// Supported media extensions, matched case-insensitively and exactly.
pub mod extensions {
    /// Video file extensions.
    pub const VIDEO_EXTENSIONS: &[&str] = &[
        "mp4", "mov", "avi", "mkv", "m4v", "wmv", "flv", "webm", "mpg", "mpeg", "3gp",
    ];

    /// Still image file extensions.
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "heic"];

    /// Animated image file extensions.
    pub const ANIMATED_EXTENSIONS: &[&str] = &["gif"];
}

/// The category a media file belongs to.
///
/// Files whose extension is not listed in [`extensions`] are unsupported and
/// never get a kind (see [`MediaKind::classify`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaKind {
    /// Played through a player slot.
    Video,
    /// Static image (PNG, JPEG, HEIC).
    Image,
    /// Animated image (GIF).
    AnimatedImage,
}

impl MediaKind {
    /// All kinds in their canonical order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Video, MediaKind::Image, MediaKind::AnimatedImage];

    /// Classifies a bare extension (without the dot). `None` means unsupported.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();
        if extensions::VIDEO_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Video)
        } else if extensions::IMAGE_EXTENSIONS.contains(&ext) {
            Some(MediaKind::Image)
        } else if extensions::ANIMATED_EXTENSIONS.contains(&ext) {
            Some(MediaKind::AnimatedImage)
        } else {
            None
        }
    }

    /// Classifies a path by its extension. `None` means unsupported.
    #[must_use]
    pub fn classify(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether items of this kind occupy a player slot.
    #[must_use]
    pub fn needs_player(self) -> bool {
        matches!(self, MediaKind::Video)
    }

    /// Stable lowercase name, used in settings files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
            MediaKind::AnimatedImage => "animated",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(MediaKind::Video),
            "image" => Ok(MediaKind::Image),
            "animated" | "gif" => Ok(MediaKind::AnimatedImage),
            other => Err(format!("unknown media kind: {other}")),
        }
    }
}

static NEXT_MEDIA_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a discovered item, independent of where it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(u64);

impl MediaId {
    /// Allocates a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_MEDIA_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Snapshot of a file's identity taken at discovery time.
///
/// A bookmark is what makes a locator re-resolvable: if the target moved or
/// changed since capture, resolving it reports a stale locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Canonical path at capture time.
    pub target: PathBuf,
    /// File size in bytes at capture time.
    pub len: u64,
    /// Modification time at capture time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

/// Opaque reference to where a media item lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    path: PathBuf,
    bookmark: Option<Bookmark>,
}

impl Locator {
    /// A locator without a bookmark; resolving it always uses the raw path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bookmark: None,
        }
    }

    #[must_use]
    pub fn with_bookmark(path: impl Into<PathBuf>, bookmark: Bookmark) -> Self {
        Self {
            path: path.into(),
            bookmark: Some(bookmark),
        }
    }

    /// The unresolved path the item was discovered at.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn bookmark(&self) -> Option<&Bookmark> {
        self.bookmark.as_ref()
    }
}

/// Metadata record identifying one media file without holding its content.
///
/// Immutable once discovered; the catalog drops descriptors in bulk when a new
/// folder is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    id: MediaId,
    locator: Locator,
    display_name: String,
    kind: MediaKind,
}

impl MediaDescriptor {
    /// Builds a descriptor for a supported file, allocating a fresh id.
    ///
    /// Returns `None` when the locator's extension is unsupported.
    #[must_use]
    pub fn new(locator: Locator) -> Option<Self> {
        let kind = MediaKind::classify(locator.path())?;
        let display_name = locator
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Some(Self {
            id: MediaId::next(),
            locator,
            display_name,
            kind,
        })
    }

    #[must_use]
    pub fn id(&self) -> MediaId {
        self.id
    }

    #[must_use]
    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}
