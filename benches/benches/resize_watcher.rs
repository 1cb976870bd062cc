// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_resize::error::HandlerError;
use understory_resize::observer::{PollingObserver, ResizeObserver};
use understory_resize::tree::{ElementId, ElementTree};
use understory_resize::types::{ResizeEntry, WatchOptions};
use understory_resize::watcher::ResizeWatcher;

type Shared = Rc<RefCell<ElementTree>>;

/// A single chain `depth` elements deep; returns the tree and the leaf.
fn gen_chain(depth: usize) -> (Shared, ElementId) {
    let mut tree = ElementTree::new();
    let mut cur = tree.insert(None, Size::new(1024.0, 768.0));
    for _ in 1..depth {
        cur = tree.insert(Some(cur), Size::new(100.0, 100.0));
    }
    (Rc::new(RefCell::new(tree)), cur)
}

/// `n` sibling elements under one root.
fn gen_flat(n: usize) -> (Shared, Vec<ElementId>) {
    let mut tree = ElementTree::new();
    let root = tree.insert(None, Size::new(1024.0, 768.0));
    let mut leaves = Vec::with_capacity(n);
    let mut w = 0.0;
    for _ in 0..n {
        w += 1.0;
        leaves.push(tree.insert(Some(root), Size::new(w, 10.0)));
    }
    (Rc::new(RefCell::new(tree)), leaves)
}

fn ignore(_: &[ResizeEntry<ElementId>]) -> Result<(), HandlerError> {
    Ok(())
}

type Handler = fn(&[ResizeEntry<ElementId>]) -> Result<(), HandlerError>;

fn watcher(
    tree: &Shared,
    ancestors: bool,
) -> ResizeWatcher<ElementId, PollingObserver<ElementId>, Shared, Handler> {
    ResizeWatcher::new(
        PollingObserver::new(),
        tree.clone(),
        WatchOptions {
            watch_ancestors: ancestors,
        },
        ignore as Handler,
    )
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for &depth in &[8_usize, 64, 512] {
        let (tree, leaf) = gen_chain(depth);
        group.throughput(Throughput::Elements(depth as u64));

        group.bench_function(format!("unchanged_depth{}", depth), |b| {
            let mut w = watcher(&tree, true);
            let _ = w.on_attach(Some(leaf));
            b.iter(|| black_box(w.on_update(black_box(Some(leaf)), false)));
        });

        group.bench_function(format!("forced_rebuild_depth{}", depth), |b| {
            let mut w = watcher(&tree, true);
            let _ = w.on_attach(Some(leaf));
            b.iter(|| black_box(w.on_update(black_box(Some(leaf)), true)));
        });
    }
    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");
    for &depth in &[8_usize, 64, 512] {
        let (tree, leaf) = gen_chain(depth);
        group.throughput(Throughput::Elements(depth as u64));

        group.bench_function(format!("quiet_depth{}", depth), |b| {
            let mut w = watcher(&tree, true);
            let _ = w.on_attach(Some(leaf));
            let _ = w.flush(&tree);
            b.iter(|| black_box(w.flush(&tree)));
        });

        group.bench_function(format!("baseline_depth{}", depth), |b| {
            b.iter_batched(
                || {
                    let mut w = watcher(&tree, true);
                    let _ = w.on_attach(Some(leaf));
                    w
                },
                |mut w| black_box(w.flush(&tree)),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_polling_observer(c: &mut Criterion) {
    let mut group = c.benchmark_group("polling_observer");
    for &n in &[64_usize, 1024] {
        let (tree, leaves) = gen_flat(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(format!("gather_all_changed_n{}", n), |b| {
            let mut observer = PollingObserver::new();
            for &leaf in &leaves {
                observer.observe(leaf);
            }
            let mut grow = false;
            b.iter(|| {
                {
                    let mut t = tree.borrow_mut();
                    let h = if grow { 20.0 } else { 10.0 };
                    for &leaf in &leaves {
                        let w = t.size(leaf).map_or(0.0, |s| s.width);
                        t.set_size(leaf, Size::new(w, h));
                    }
                }
                grow = !grow;
                black_box(observer.gather_frame(&tree))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_flush, bench_polling_observer);
criterion_main!(benches);
