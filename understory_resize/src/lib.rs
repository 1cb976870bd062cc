// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_resize --heading-base-level=0

//! Understory Resize: deterministic, `no_std` resize observation for UI elements.
//!
//! ## Overview
//!
//! This crate watches the single element underneath a wrapper (and optionally every ancestor of
//! it) and reports size changes to a handler, one batch per frame.
//! It does not perform layout. Hosts tell it which element backs the wrapper, how to find an
//! element's parent, and how to measure an element; it decides what to subscribe and when.
//!
//! ## Pieces
//!
//! - [`ResizeObserver`](crate::observer::ResizeObserver): the size-observation primitive. It
//!   owns a subscription set and turns a frame into a batch of
//!   [`ResizeEntry`](crate::types::ResizeEntry) values.
//!   [`PollingObserver`](crate::observer::PollingObserver) is the built-in backend.
//! - [`ResizeWatcher`](crate::watcher::ResizeWatcher): keeps the subscription set equal to the
//!   target (plus its ancestors when [`WatchOptions::watch_ancestors`](crate::types::WatchOptions)
//!   is on) across attach, update, and detach, and relays every batch unchanged.
//! - [`ResizeSensor`](crate::sensor::ResizeSensor): the host wrapper. It checks that it wraps a
//!   single element child and drives the watcher from mount/update/unmount.
//! - [`ElementTree`](crate::tree::ElementTree): a minimal retained element hierarchy that
//!   implements [`ParentLookup`](crate::types::ParentLookup) and
//!   [`Measure`](crate::types::Measure).
//!
//! ## Guarantees
//!
//! - After every resolve, the subscriptions are exactly `{target}` or
//!   `{target} ∪ ancestors(target)`, or nothing when there is no element.
//! - Re-resolving the same element without an option change makes no primitive calls.
//! - Every other resolve rebuilds from scratch, and each new subscription reports a baseline
//!   measurement on the next frame. Handlers should expect that first entry.
//! - Elements that change size within one frame arrive in one handler call, target first,
//!   then ancestors from the nearest parent outwards.
//! - A failing handler is reported to the frame driver and never disturbs subscriptions.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_resize::observer::PollingObserver;
//! use understory_resize::sensor::{Child, ResizeSensor};
//! use understory_resize::tree::ElementTree;
//! use understory_resize::types::WatchOptions;
//!
//! let tree = Rc::new(RefCell::new(ElementTree::new()));
//! let body = tree.borrow_mut().insert(None, Size::new(1024.0, 768.0));
//! let card = tree.borrow_mut().insert(Some(body), Size::new(320.0, 200.0));
//!
//! let mut widths = Vec::new();
//! let mut sensor = ResizeSensor::new(
//!     PollingObserver::new(),
//!     tree.clone(),
//!     WatchOptions { watch_ancestors: true },
//!     |entries| {
//!         widths.extend(entries.iter().map(|e| e.size().width));
//!         Ok(())
//!     },
//! );
//!
//! sensor.mount(&[Child::Node(Some(card))]).unwrap();
//! // Baselines for the card and the body arrive together.
//! assert_eq!(sensor.frame(&tree), Ok(2));
//!
//! tree.borrow_mut().set_size(body, Size::new(800.0, 768.0));
//! assert_eq!(sensor.frame(&tree), Ok(1));
//!
//! sensor.unmount();
//! drop(sensor);
//! assert_eq!(widths, [320.0, 1024.0, 800.0]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to Kurbo's `std` feature.
//! - `libm`: Kurbo's `no_std` float support.
//! - `tracing`: structured logs for rebuilds, clears, disposal, and handler failures.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod error;
pub mod observer;
pub mod sensor;
pub mod tree;
pub mod types;
pub mod watcher;
