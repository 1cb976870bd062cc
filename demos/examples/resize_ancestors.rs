// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watching ancestors with a host-defined tree.
//!
//! Some layouts resize a container without resizing the element inside it (a scroll view
//! whose content has a fixed size, say). Turning on `watch_ancestors` subscribes the whole
//! chain so those changes still arrive.
//!
//! Run:
//! - `cargo run -p understory_demos --example resize_ancestors`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_resize::error::HandlerError;
use understory_resize::observer::PollingObserver;
use understory_resize::types::{Measure, ParentLookup, ResizeEntry, Resolution, WatchOptions};
use understory_resize::watcher::ResizeWatcher;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct Node(u32);

#[derive(Default)]
struct Host {
    parents: HashMap<Node, Node>,
    sizes: HashMap<Node, Size>,
}

impl ParentLookup<Node> for Host {
    fn parent_of(&self, node: &Node) -> Option<Node> {
        self.parents.get(node).copied()
    }
}

impl Measure<Node> for Host {
    fn content_rect(&self, node: &Node) -> Option<Rect> {
        self.sizes.get(node).map(|s| s.to_rect())
    }
}

fn main() {
    // window(1) → scroll(2) → content(3)
    let mut host = Host::default();
    host.parents.insert(Node(3), Node(2));
    host.parents.insert(Node(2), Node(1));
    host.sizes.insert(Node(1), Size::new(800.0, 600.0));
    host.sizes.insert(Node(2), Size::new(800.0, 560.0));
    host.sizes.insert(Node(3), Size::new(800.0, 2000.0));
    let host = Rc::new(RefCell::new(host));

    let mut batches: Vec<Vec<Node>> = Vec::new();
    let mut watcher = ResizeWatcher::new(
        PollingObserver::new(),
        host.clone(),
        WatchOptions::default(),
        |entries: &[ResizeEntry<Node>]| {
            batches.push(entries.iter().map(|e| e.target).collect());
            Ok::<(), HandlerError>(())
        },
    );

    println!("== Target only ==");
    let _ = watcher.on_attach(Some(Node(3)));
    let _ = watcher.flush(&host);
    host.borrow_mut().sizes.insert(Node(2), Size::new(800.0, 400.0));
    println!("  scroll view shrank: {:?} entries", watcher.flush(&host));

    println!("== With ancestors ==");
    let changed = watcher.set_watch_ancestors(true);
    assert_eq!(
        watcher.on_update(Some(Node(3)), changed),
        Resolution::Rebuilt { observed: 3 }
    );
    println!("  subscribed: {:?}", watcher.subscriptions());
    let _ = watcher.flush(&host);
    host.borrow_mut().sizes.insert(Node(2), Size::new(800.0, 300.0));
    println!("  scroll view shrank: {:?} entries", watcher.flush(&host));

    watcher.on_detach();
    drop(watcher);

    assert_eq!(
        batches,
        vec![
            vec![Node(3)],
            vec![Node(3), Node(2), Node(1)],
            vec![Node(2)],
        ]
    );
}
