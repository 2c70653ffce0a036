// SPDX-License-Identifier: MPL-2.0
//! Media filtering types for the domain layer.
//!
//! - [`KindSet`]: the enabled media kinds, never empty
//! - [`FilteredView`]: the stable-order subsequence of a catalog matching a [`KindSet`]

use super::{MediaDescriptor, MediaKind};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Kind Set
// =============================================================================

/// Non-empty set of enabled media kinds.
///
/// Every constructor refuses to build an empty set, so a filter can never hide
/// every kind at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindSet(BTreeSet<MediaKind>);

impl KindSet {
    /// Builds a set from the given kinds, or `None` if there are none.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = MediaKind>) -> Option<Self> {
        let set: BTreeSet<MediaKind> = kinds.into_iter().collect();
        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    /// Every supported kind.
    #[must_use]
    pub fn all() -> Self {
        Self(MediaKind::ALL.into_iter().collect())
    }

    /// A set holding exactly one kind.
    #[must_use]
    pub fn only(kind: MediaKind) -> Self {
        Self(BTreeSet::from([kind]))
    }

    #[must_use]
    pub fn contains(&self, kind: MediaKind) -> bool {
        self.0.contains(&kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the set with `kind` flipped, or `None` if that would empty it.
    #[must_use]
    pub fn toggled(&self, kind: MediaKind) -> Option<Self> {
        let mut set = self.0.clone();
        if !set.remove(&kind) {
            set.insert(kind);
        }
        Self::new(set)
    }

    pub fn iter(&self) -> impl Iterator<Item = MediaKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for KindSet {
    fn default() -> Self {
        Self::all()
    }
}

/// Comma-delimited kind names, e.g. `video,image`.
impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|kind| kind.name()).collect();
        f.write_str(&names.join(","))
    }
}

/// Parses a delimited list of kind names. Unknown names are skipped; the
/// result must still contain at least one kind.
impl FromStr for KindSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kinds = s
            .split([',', ';', '|'])
            .filter(|part| !part.trim().is_empty())
            .filter_map(|part| part.parse::<MediaKind>().ok());
        Self::new(kinds).ok_or_else(|| format!("no known media kind in '{s}'"))
    }
}

// =============================================================================
// Filtered View
// =============================================================================

/// The subset of the catalog currently eligible for display.
///
/// Always recomputed from scratch; never patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    items: Vec<Arc<MediaDescriptor>>,
}

impl FilteredView {
    /// Keeps catalog entries whose kind is enabled, preserving catalog order.
    #[must_use]
    pub fn compute(catalog: &[Arc<MediaDescriptor>], kinds: &KindSet) -> Self {
        let items = catalog
            .iter()
            .filter(|descriptor| kinds.contains(descriptor.kind()))
            .cloned()
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<MediaDescriptor>> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MediaDescriptor>> {
        self.items.iter()
    }

    /// Position of the item with the given identity, if visible.
    #[must_use]
    pub fn position_of(&self, id: super::MediaId) -> Option<usize> {
        self.items.iter().position(|descriptor| descriptor.id() == id)
    }
}

// =============================================================================
// Tests
// =============================================================================
