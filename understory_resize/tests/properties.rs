// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: subscription set shape and baseline delivery over random lifecycles.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use proptest::prelude::*;
use understory_resize::observer::PollingObserver;
use understory_resize::tree::{ElementId, ElementTree};
use understory_resize::types::{ResizeEntry, Resolution, WatchOptions};
use understory_resize::watcher::ResizeWatcher;

const ELEMENTS: usize = 8;

#[derive(Copy, Clone, Debug)]
enum Op {
    Resolve { element: Option<usize>, force: bool },
    Toggle { element: usize },
    Dispose,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (proptest::option::of(0..ELEMENTS), any::<bool>())
            .prop_map(|(element, force)| Op::Resolve { element, force }),
        2 => (0..ELEMENTS).prop_map(|element| Op::Toggle { element }),
        1 => Just(Op::Dispose),
    ]
}

// Element `i` hangs under `parents[i]` when that index is smaller; otherwise it is a root.
fn build_forest(parents: &[Option<usize>]) -> (ElementTree, Vec<ElementId>) {
    let mut tree = ElementTree::new();
    let mut ids: Vec<ElementId> = Vec::with_capacity(parents.len());
    let mut side = 0.0;
    for (i, parent) in parents.iter().enumerate() {
        let parent = parent.filter(|&p| p < i).map(|p| ids[p]);
        side += 10.0;
        ids.push(tree.insert(parent, Size::new(side, side)));
    }
    (tree, ids)
}

fn expected(tree: &ElementTree, target: Option<ElementId>, ancestors: bool) -> Vec<ElementId> {
    let Some(target) = target else {
        return Vec::new();
    };
    let mut out = vec![target];
    if ancestors {
        out.extend(tree.ancestors(target));
    }
    out
}

proptest! {
    #[test]
    fn subscriptions_always_match_target_and_chain(
        parents in proptest::collection::vec(proptest::option::of(0..ELEMENTS), ELEMENTS),
        ops in proptest::collection::vec(op(), 1..40),
    ) {
        let (tree, ids) = build_forest(&parents);
        let tree = Rc::new(RefCell::new(tree));
        let mut watcher = ResizeWatcher::new(
            PollingObserver::new(),
            tree.clone(),
            WatchOptions::default(),
            |_: &[ResizeEntry<ElementId>]| Ok(()),
        );
        let mut disposed = false;

        for op in ops {
            let resolution = match op {
                Op::Resolve { element, force } => {
                    watcher.on_update(element.map(|i| ids[i]), force)
                }
                Op::Toggle { element } => {
                    let on = !watcher.options().watch_ancestors;
                    let changed = watcher.set_watch_ancestors(on);
                    prop_assert!(changed);
                    watcher.on_update(Some(ids[element]), changed)
                }
                Op::Dispose => {
                    watcher.on_detach();
                    disposed = true;
                    Resolution::Disposed
                }
            };

            let want = if disposed {
                Vec::new()
            } else {
                expected(&tree.borrow(), watcher.target(), watcher.options().watch_ancestors)
            };
            prop_assert_eq!(watcher.subscriptions(), want.as_slice());

            // Sizes never change here, so only fresh subscriptions report.
            let delivered = watcher.flush(&tree);
            match resolution {
                Resolution::Rebuilt { observed } => {
                    prop_assert!(!disposed);
                    prop_assert_eq!(observed, want.len());
                    prop_assert_eq!(delivered, Ok(observed));
                }
                Resolution::Unchanged | Resolution::Cleared | Resolution::Disposed => {
                    prop_assert_eq!(delivered, Ok(0));
                }
            }
        }
    }

    #[test]
    fn repeated_resolve_is_free(
        parents in proptest::collection::vec(proptest::option::of(0..ELEMENTS), ELEMENTS),
        element in 0..ELEMENTS,
        ancestors in any::<bool>(),
        repeats in 1_usize..6,
    ) {
        let (tree, ids) = build_forest(&parents);
        let tree = Rc::new(RefCell::new(tree));
        let mut watcher = ResizeWatcher::new(
            PollingObserver::new(),
            tree.clone(),
            WatchOptions { watch_ancestors: ancestors },
            |_: &[ResizeEntry<ElementId>]| Ok(()),
        );
        let first = watcher.on_attach(Some(ids[element]));
        let chain = watcher.ancestors_of(ids[element]);
        let expected_len = if ancestors { 1 + chain.len() } else { 1 };
        prop_assert_eq!(first, Resolution::Rebuilt { observed: expected_len });
        prop_assert_eq!(watcher.flush(&tree), Ok(expected_len));

        for _ in 0..repeats {
            prop_assert_eq!(watcher.on_update(Some(ids[element]), false), Resolution::Unchanged);
            prop_assert_eq!(watcher.flush(&tree), Ok(0));
        }
        prop_assert_eq!(watcher.subscriptions().len(), expected_len);
    }
}
