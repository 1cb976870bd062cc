// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize sensor basics: mount, re-render, swap the child, unmount.
//!
//! The host here is an `ElementTree` shared through `Rc<RefCell<_>>`, so layout can keep
//! writing sizes while the sensor holds a handle to it.
//!
//! Run:
//! - `cargo run -p understory_demos --example resize_sensor_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use understory_resize::error::UsageError;
use understory_resize::observer::PollingObserver;
use understory_resize::sensor::{Child, ResizeSensor};
use understory_resize::tree::{ElementId, ElementTree};
use understory_resize::types::{ResizeEntry, Resolution, WatchOptions};

fn main() {
    let tree = Rc::new(RefCell::new(ElementTree::new()));
    let page = tree.borrow_mut().insert(None, Size::new(1280.0, 800.0));
    let sidebar = tree.borrow_mut().insert(Some(page), Size::new(240.0, 800.0));
    let content = tree.borrow_mut().insert(Some(page), Size::new(1040.0, 800.0));

    let log: Rc<RefCell<Vec<(ElementId, Size)>>> = Rc::default();
    let sink = log.clone();
    let mut sensor = ResizeSensor::new(
        PollingObserver::new(),
        tree.clone(),
        WatchOptions::default(),
        move |entries: &[ResizeEntry<ElementId>]| {
            for e in entries {
                println!("  resized {:?} -> {:?}", e.target, e.size());
                sink.borrow_mut().push((e.target, e.size()));
            }
            Ok(())
        },
    );

    println!("== Mount on the sidebar ==");
    assert_eq!(
        sensor.mount(&[Child::Node(Some(sidebar))]),
        Ok(Resolution::Rebuilt { observed: 1 })
    );
    let _ = sensor.frame(&tree);

    println!("== Sidebar collapses ==");
    tree.borrow_mut().set_size(sidebar, Size::new(64.0, 800.0));
    let _ = sensor.frame(&tree);

    println!("== Re-render with two children ==");
    let err = sensor.update(
        &[Child::Node(Some(sidebar)), Child::Node(Some(content))],
        WatchOptions::default(),
    );
    println!("  {}", err.unwrap_err());
    assert_eq!(sensor.watcher().subscriptions(), &[sidebar]);

    println!("== Child now renders the content pane ==");
    assert_eq!(
        sensor.update(&[Child::Node(Some(content))], WatchOptions::default()),
        Ok(Resolution::Rebuilt { observed: 1 })
    );
    let _ = sensor.frame(&tree);

    println!("== Text child ==");
    assert_eq!(
        sensor.update(&[Child::Text], WatchOptions::default()),
        Err(UsageError::NotAnElement)
    );

    sensor.unmount();
    tree.borrow_mut().set_size(content, Size::new(900.0, 800.0));
    assert_eq!(sensor.frame(&tree), Ok(0));

    assert_eq!(
        log.borrow().as_slice(),
        &[
            (sidebar, Size::new(240.0, 800.0)),
            (sidebar, Size::new(64.0, 800.0)),
            (content, Size::new(1040.0, 800.0)),
        ]
    );
}
