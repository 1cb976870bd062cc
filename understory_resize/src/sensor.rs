// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sensor: the host-facing wrapper around a [`ResizeWatcher`].
//!
//! ## Overview
//!
//! A [`ResizeSensor`] wraps exactly one child. On every lifecycle step it checks the child
//! shape, resolves the element the child currently renders to, and forwards that to the
//! watcher together with any option change.
//!
//! - Zero children, several children, or a bare text child are [`UsageError`]s. They are
//!   reported before the watcher is touched.
//! - A single child that currently renders nothing resolves to `None`, and the watcher drops
//!   its subscriptions until an element shows up again.
//!
//! ## Example
//!
//! ```
//! use understory_resize::error::UsageError;
//! use understory_resize::observer::PollingObserver;
//! use understory_resize::sensor::{Child, ResizeSensor};
//! use understory_resize::types::{NoParent, Resolution, WatchOptions};
//!
//! let mut sensor = ResizeSensor::new(
//!     PollingObserver::new(),
//!     NoParent,
//!     WatchOptions::default(),
//!     |_entries| Ok(()),
//! );
//!
//! assert_eq!(sensor.mount(&[Child::Node(Some(7_u32))]), Ok(Resolution::Rebuilt { observed: 1 }));
//! assert_eq!(
//!     sensor.update(&[], WatchOptions::default()),
//!     Err(UsageError::NoChild)
//! );
//! // The failed update left the subscription in place.
//! assert_eq!(sensor.watcher().subscriptions(), &[7]);
//! sensor.unmount();
//! ```

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::error::{HandlerError, UsageError};
use crate::observer::ResizeObserver;
use crate::types::{Measure, ParentLookup, ResizeEntry, Resolution, WatchOptions};
use crate::watcher::ResizeWatcher;

/// A child handed to a [`ResizeSensor`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Child<K> {
    /// A bare text node.
    Text,
    /// An element or component, with the element it currently renders to.
    ///
    /// `None` when it renders nothing (or only text) right now.
    Node(Option<K>),
}

/// Resolve the single element child of a sensor.
///
/// Returns the element the child renders to, `Ok(None)` if it renders nothing, or a
/// [`UsageError`] for any shape other than exactly one non-text child.
pub fn only_child<K: Copy>(children: &[Child<K>]) -> Result<Option<K>, UsageError> {
    match children {
        [] => Err(UsageError::NoChild),
        [Child::Text] => Err(UsageError::NotAnElement),
        [Child::Node(element)] => Ok(*element),
        _ => Err(UsageError::MultipleChildren(children.len())),
    }
}

/// Host wrapper that reports resizes of its single child.
///
/// ## Usage
///
/// - [`mount`](Self::mount) once the child is live.
/// - [`update`](Self::update) after every re-render, with the current options.
/// - [`frame`](Self::frame) once per frame to deliver batches.
/// - [`unmount`](Self::unmount) on teardown.
pub struct ResizeSensor<K, O: ResizeObserver<K>, P, F> {
    watcher: ResizeWatcher<K, O, P, F>,
}

impl<K: core::fmt::Debug, O: ResizeObserver<K>, P, F> core::fmt::Debug
    for ResizeSensor<K, O, P, F>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeSensor")
            .field("watcher", &self.watcher)
            .finish()
    }
}

impl<K, O, P, F> ResizeSensor<K, O, P, F>
where
    K: Copy + Eq,
    O: ResizeObserver<K>,
    P: ParentLookup<K>,
    F: FnMut(&[ResizeEntry<K>]) -> Result<(), HandlerError>,
{
    /// Create a sensor; `on_resize` receives one batch per frame.
    pub fn new(observer: O, parents: P, options: WatchOptions, on_resize: F) -> Self {
        Self {
            watcher: ResizeWatcher::new(observer, parents, options, on_resize),
        }
    }

    /// The child became live: start observing the element it renders to.
    pub fn mount(&mut self, children: &[Child<K>]) -> Result<Resolution, UsageError> {
        let element = only_child(children).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            debug!(error = %_err, "resize sensor: rejected children on mount");
        })?;
        Ok(self.watcher.on_attach(element))
    }

    /// The sensor re-rendered with `children` and `options`.
    ///
    /// On error nothing changes, including the options.
    pub fn update(
        &mut self,
        children: &[Child<K>],
        options: WatchOptions,
    ) -> Result<Resolution, UsageError> {
        let element = only_child(children).inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            debug!(error = %_err, "resize sensor: rejected children on update");
        })?;
        let changed = self.watcher.set_watch_ancestors(options.watch_ancestors);
        Ok(self.watcher.on_update(element, changed))
    }

    /// Swap the resize handler without touching subscriptions.
    pub fn set_on_resize(&mut self, on_resize: F) {
        self.watcher.set_handler(on_resize);
    }

    /// Deliver this frame's batch, if any.
    pub fn frame<M: Measure<K> + ?Sized>(&mut self, measure: &M) -> Result<usize, HandlerError> {
        self.watcher.flush(measure)
    }

    /// The sensor is gone: release every subscription.
    pub fn unmount(&mut self) {
        self.watcher.on_detach();
    }

    /// The underlying watcher.
    pub fn watcher(&self) -> &ResizeWatcher<K, O, P, F> {
        &self.watcher
    }
}
