// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for building the media catalog of a folder.
//!
//! Only the immediate, visible regular files of the folder are considered;
//! each is classified by extension and unsupported files are dropped.

use crate::config::SortOrder;
use crate::domain::media::{Locator, MediaDescriptor, MediaKind};
use crate::error::{Error, Result};
use crate::infrastructure::storage::capture_bookmark;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable, per-folder list of discovered media.
///
/// Replaced wholesale whenever a new folder is chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    root: Option<PathBuf>,
    items: Vec<Arc<MediaDescriptor>>,
}

impl Catalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-built descriptors, keeping their order.
    pub fn from_descriptors(root: impl Into<PathBuf>, items: Vec<MediaDescriptor>) -> Self {
        Self {
            root: Some(root.into()),
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    /// Scans `root` for supported media files.
    ///
    /// Entries that cannot be inspected are skipped; only a failure to list
    /// the folder itself is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccessDenied`] when listing is refused and
    /// [`Error::EnumerationFailed`] for any other listing failure.
    pub fn discover(root: &Path, sort_order: SortOrder) -> Result<Self> {
        let entries = std::fs::read_dir(root).map_err(|err| match err.kind() {
            ErrorKind::PermissionDenied => Error::AccessDenied(root.to_path_buf()),
            _ => Error::EnumerationFailed {
                path: root.to_path_buf(),
                reason: err.to_string(),
            },
        })?;

        let mut descriptors = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::debug!("skipping unreadable entry in {}: {err}", root.display());
                    continue;
                }
            };
            // Symlinks and folders are not regular files.
            if !entry.file_type().is_ok_and(|file_type| file_type.is_file()) {
                continue;
            }
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }
            if MediaKind::classify(&path).is_none() {
                continue;
            }

            let locator = match capture_bookmark(&path) {
                Some(bookmark) => Locator::with_bookmark(&path, bookmark),
                None => Locator::new(&path),
            };
            if let Some(descriptor) = MediaDescriptor::new(locator) {
                descriptors.push(descriptor);
            }
        }

        sort_descriptors(&mut descriptors, sort_order);
        log::debug!(
            "discovered {} media files in {}",
            descriptors.len(),
            root.display()
        );

        Ok(Self::from_descriptors(root, descriptors))
    }

    /// Folder this catalog was built from.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn items(&self) -> &[Arc<MediaDescriptor>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items of the given kind.
    pub fn count_of(&self, kind: MediaKind) -> usize {
        self.items.iter().filter(|item| item.kind() == kind).count()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn sort_descriptors(descriptors: &mut [MediaDescriptor], sort_order: SortOrder) {
    match sort_order {
        SortOrder::Discovery => {}
        SortOrder::Alphabetical => {
            descriptors.sort_by_cached_key(|d| d.display_name().to_lowercase());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"fake media data").expect("failed to write test file");
        path
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.items().iter().map(|d| d.display_name()).collect()
    }

    #[test]
    fn discover_keeps_only_supported_files() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_file(temp_dir.path(), "a.mp4");
        create_file(temp_dir.path(), "b.PNG");
        create_file(temp_dir.path(), "c.gif");
        create_file(temp_dir.path(), "notes.txt");
        create_file(temp_dir.path(), "d.webp");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Alphabetical)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["a.mp4", "b.PNG", "c.gif"]);
        assert_eq!(catalog.count_of(MediaKind::Video), 1);
        assert_eq!(catalog.count_of(MediaKind::Image), 1);
        assert_eq!(catalog.count_of(MediaKind::AnimatedImage), 1);
    }

    #[test]
    fn discover_skips_hidden_entries() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_file(temp_dir.path(), ".secret.mp4");
        create_file(temp_dir.path(), "visible.mp4");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Discovery)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["visible.mp4"]);
    }

    #[test]
    fn discover_does_not_recurse() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let nested = temp_dir.path().join("nested.mp4");
        fs::create_dir(&nested).expect("failed to create dir");
        create_file(&nested, "inner.mp4");
        create_file(temp_dir.path(), "top.mov");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Discovery)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["top.mov"]);
    }

    #[test]
    fn discover_captures_bookmarks() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_file(temp_dir.path(), "clip.mkv");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Discovery)
            .expect("failed to scan directory");

        let descriptor = catalog.items().first().expect("one item");
        let bookmark = descriptor.locator().bookmark().expect("bookmark captured");
        assert_eq!(bookmark.len, b"fake media data".len() as u64);
        assert_eq!(catalog.root(), Some(temp_dir.path()));
    }

    #[test]
    fn discover_missing_folder_fails() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let missing = temp_dir.path().join("does-not-exist");

        match Catalog::discover(&missing, SortOrder::Discovery) {
            Err(Error::EnumerationFailed { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected EnumerationFailed, got {other:?}"),
        }
    }

    #[test]
    fn discover_empty_folder_gives_empty_catalog() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_file(temp_dir.path(), "readme.md");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Alphabetical)
            .expect("failed to scan directory");

        assert!(catalog.is_empty());
    }

    #[test]
    fn alphabetical_order_sorts_by_display_name() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_file(temp_dir.path(), "c.jpg");
        create_file(temp_dir.path(), "a.jpg");
        create_file(temp_dir.path(), "b.mp4");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Alphabetical)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["a.jpg", "b.mp4", "c.jpg"]);
    }

    #[test]
    fn alphabetical_order_ignores_case() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        for name in ["b.jpg", "A.jpg", "C.jpg", "a2.jpg"] {
            create_file(temp_dir.path(), name);
        }

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Alphabetical)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["A.jpg", "a2.jpg", "b.jpg", "C.jpg"]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_skips_symlinks() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let target = create_file(temp_dir.path(), "real.mp4");
        std::os::unix::fs::symlink(&target, temp_dir.path().join("link.mp4"))
            .expect("failed to create symlink");

        let catalog = Catalog::discover(temp_dir.path(), SortOrder::Alphabetical)
            .expect("failed to scan directory");

        assert_eq!(names(&catalog), ["real.mp4"]);
    }
}
