// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for media navigation operations.
//!
//! Measures the performance of:
//! - Folder discovery (listing, classifying and bookmarking files)
//! - Filtering a large catalog by kind
//! - Swipe cycles through the two-slot navigator
//! - Shuffle picks with history bookkeeping

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use swipe_reel::application::navigation::{Navigator, SlotEntry};
use swipe_reel::application::shuffle::ShuffleHistory;
use swipe_reel::config::SortOrder;
use swipe_reel::directory_scanner::Catalog;
use swipe_reel::domain::media::{FilteredView, KindSet, Locator, MediaDescriptor, MediaKind};
use swipe_reel::domain::navigation::Direction;

const CATALOG_SIZE: usize = 10_000;
const FOLDER_SIZE: usize = 300;

/// Builds a catalog cycling through the three kinds.
fn catalog() -> Vec<Arc<MediaDescriptor>> {
    let extensions = ["mp4", "jpg", "gif"];
    (0..CATALOG_SIZE)
        .filter_map(|i| {
            let path = format!("/media/item_{i:05}.{}", extensions[i % extensions.len()]);
            MediaDescriptor::new(Locator::new(path)).map(Arc::new)
        })
        .collect()
}

/// Benchmark listing a folder of mixed media and unsupported files.
fn bench_discover(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let extensions = ["mp4", "jpg", "gif", "txt"];
    for i in 0..FOLDER_SIZE {
        let name = format!("file_{i:04}.{}", extensions[i % extensions.len()]);
        std::fs::write(dir.path().join(name), b"bench").expect("failed to write file");
    }

    group.bench_function("discover_folder", |b| {
        b.iter(|| {
            let catalog = Catalog::discover(dir.path(), SortOrder::Alphabetical)
                .expect("folder should list");
            black_box(catalog.len());
        });
    });

    group.finish();
}

/// Benchmark recomputing the filtered view after a kind toggle.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let items = catalog();
    let videos_only = KindSet::only(MediaKind::Video);
    let all = KindSet::all();

    group.bench_function("filter_videos_only", |b| {
        b.iter(|| black_box(FilteredView::compute(&items, &videos_only)));
    });
    group.bench_function("filter_all_kinds", |b| {
        b.iter(|| black_box(FilteredView::compute(&items, &all)));
    });

    group.finish();
}

/// Benchmark begin/attach/complete cycles without any I/O.
fn bench_swipe_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");
    let items = catalog();

    group.bench_function("swipe_through_catalog", |b| {
        b.iter(|| {
            let mut navigator = Navigator::new();
            let first = SlotEntry::new(0, items[0].id(), None);
            navigator.load(items.len(), Some(first));
            while let Ok(ticket) = navigator.begin_advance(Direction::Next) {
                let entry = SlotEntry::new(ticket.index, items[ticket.index].id(), None);
                navigator.attach_preload(ticket.transition, entry);
                let _ = navigator.complete_transition();
            }
            black_box(navigator.flips());
        });
    });

    group.finish();
}

/// Benchmark a full round of random picks.
fn bench_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("media_navigation");

    group.bench_function("shuffle_full_round", |b| {
        b.iter(|| {
            let mut history = ShuffleHistory::with_seed(7);
            let mut shown = Some(0);
            for _ in 0..CATALOG_SIZE {
                shown = history.pick(CATALOG_SIZE, shown);
            }
            black_box(history.visited().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_discover, bench_filter, bench_swipe_cycle, bench_shuffle);
criterion_main!(benches);
