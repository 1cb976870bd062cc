// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Watcher: keeps one observer's subscriptions in step with a target element.
//!
//! ## Overview
//!
//! [`ResizeWatcher`] owns a single [`ResizeObserver`] for its whole lifetime and decides which
//! elements it subscribes. After every [`resolve`](ResizeWatcher::resolve) the subscription set is
//! exactly:
//!
//! - empty, when there is no element to observe;
//! - `{target}`, when [`WatchOptions::watch_ancestors`] is off;
//! - `{target} ∪ ancestors(target)`, when it is on.
//!
//! ## Lifecycle
//!
//! Hosts drive the watcher with three calls:
//!
//! 1) [`on_attach`](ResizeWatcher::on_attach) once the host has a live element.
//! 2) [`on_update`](ResizeWatcher::on_update) after every update, passing the element now backing
//!    the host and whether the options changed.
//! 3) [`on_detach`](ResizeWatcher::on_detach) when the host is torn down for good.
//!
//! Re-resolving the same element without an option change is free: the observer is not touched.
//! Any other change disconnects everything and subscribes from scratch, so every element
//! change is followed by fresh baseline entries.
//!
//! ## Delivery
//!
//! The watcher never reports synchronously. The host's frame driver calls
//! [`flush`](ResizeWatcher::flush) once per frame; a non-empty batch reaches the handler in one call.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_resize::observer::PollingObserver;
//! use understory_resize::tree::ElementTree;
//! use understory_resize::types::{Resolution, WatchOptions};
//! use understory_resize::watcher::ResizeWatcher;
//!
//! let tree = Rc::new(RefCell::new(ElementTree::new()));
//! let root = tree.borrow_mut().insert(None, Size::new(800.0, 600.0));
//! let panel = tree.borrow_mut().insert(Some(root), Size::new(200.0, 100.0));
//!
//! let mut seen = 0;
//! let mut watcher = ResizeWatcher::new(
//!     PollingObserver::new(),
//!     tree.clone(),
//!     WatchOptions::default(),
//!     |entries| {
//!         seen += entries.len();
//!         Ok(())
//!     },
//! );
//!
//! assert_eq!(watcher.on_attach(Some(panel)), Resolution::Rebuilt { observed: 1 });
//! // The baseline measurement arrives on the next frame.
//! assert_eq!(watcher.flush(&tree), Ok(1));
//! assert_eq!(watcher.flush(&tree), Ok(0));
//!
//! // Resizes land in the next frame.
//! tree.borrow_mut().set_size(panel, Size::new(240.0, 100.0));
//! assert_eq!(watcher.flush(&tree), Ok(1));
//! watcher.on_detach();
//! # drop(watcher);
//! # assert_eq!(seen, 2);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

use crate::error::HandlerError;
use crate::observer::ResizeObserver;
use crate::types::{Measure, ParentLookup, ResizeEntry, Resolution, WatchOptions};

/// A type-erased resize handler, for hosts that swap handlers at runtime.
pub type BoxedHandler<'a, K> = Box<dyn FnMut(&[ResizeEntry<K>]) -> Result<(), HandlerError> + 'a>;

/// Resize watcher over a single target element and, optionally, its ancestors.
///
/// ## Usage
///
/// - Construct with [`ResizeWatcher::new`], supplying the observer backend, a
///   [`ParentLookup`] for ancestor walks, the initial [`WatchOptions`], and the handler.
/// - Drive it with [`on_attach`](Self::on_attach) / [`on_update`](Self::on_update) /
///   [`on_detach`](Self::on_detach), or call [`resolve`](Self::resolve) and
///   [`dispose`](Self::dispose) directly.
/// - Call [`flush`](Self::flush) once per frame.
///
/// Dropping the watcher disposes it.
pub struct ResizeWatcher<K, O: ResizeObserver<K>, P, F> {
    // `None` once disposed.
    observer: Option<O>,
    parents: P,
    handler: F,
    target: Option<K>,
    options: WatchOptions,
}

impl<K: core::fmt::Debug, O: ResizeObserver<K>, P, F> core::fmt::Debug
    for ResizeWatcher<K, O, P, F>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeWatcher")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("subscriptions", &self.observer.as_ref().map(|o| o.observed()))
            .finish_non_exhaustive()
    }
}

impl<K, O, P, F> ResizeWatcher<K, O, P, F>
where
    K: Copy + Eq,
    O: ResizeObserver<K>,
    P: ParentLookup<K>,
    F: FnMut(&[ResizeEntry<K>]) -> Result<(), HandlerError>,
{
    /// Create a watcher. Nothing is subscribed until the first resolve.
    pub fn new(observer: O, parents: P, options: WatchOptions, handler: F) -> Self {
        Self {
            observer: Some(observer),
            parents,
            handler,
            target: None,
            options,
        }
    }

    /// Replace the handler. Subscriptions are left alone; the next batch goes to `handler`.
    pub fn set_handler(&mut self, handler: F) {
        self.handler = handler;
    }

    /// Run one frame: gather the observer's batch and hand it to the handler.
    ///
    /// Returns the number of entries delivered. An empty batch does not call the handler.
    /// A handler error is returned as-is; the subscriptions are not affected by it.
    pub fn flush<M: Measure<K> + ?Sized>(&mut self, measure: &M) -> Result<usize, HandlerError> {
        let Some(observer) = self.observer.as_mut() else {
            return Ok(0);
        };
        let batch = observer.gather_frame(measure);
        if batch.is_empty() {
            return Ok(0);
        }
        #[cfg(feature = "tracing")]
        trace!(entries = batch.len(), "resize watcher: delivering batch");
        match (self.handler)(&batch) {
            Ok(()) => Ok(batch.len()),
            Err(err) => {
                #[cfg(feature = "tracing")]
                warn!(
                    entries = batch.len(),
                    error = %err,
                    "resize watcher: handler failed"
                );
                Err(err)
            }
        }
    }
}

impl<K, O, P, F> ResizeWatcher<K, O, P, F>
where
    K: Copy + Eq,
    O: ResizeObserver<K>,
    P: ParentLookup<K>,
{
    /// Current options.
    pub fn options(&self) -> WatchOptions {
        self.options
    }

    /// Turn ancestor watching on or off. Returns true if the setting changed.
    ///
    /// The subscriptions follow on the next forced resolve, e.g.
    /// `on_update(element, changed)`.
    pub fn set_watch_ancestors(&mut self, watch_ancestors: bool) -> bool {
        let changed = self.options.watch_ancestors != watch_ancestors;
        self.options.watch_ancestors = watch_ancestors;
        changed
    }

    /// The element currently treated as the target, if any.
    pub fn target(&self) -> Option<K> {
        self.target
    }

    /// Elements currently subscribed, target first. Empty once disposed.
    pub fn subscriptions(&self) -> &[K] {
        match &self.observer {
            Some(observer) => observer.observed(),
            None => &[],
        }
    }

    /// Returns true once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.observer.is_none()
    }

    /// The host attached to a live element.
    pub fn on_attach(&mut self, element: Option<K>) -> Resolution {
        self.resolve(element, false)
    }

    /// The host updated; `element` is what now backs it.
    ///
    /// Pass `options_changed = true` when [`WatchOptions`] changed since the last resolve.
    pub fn on_update(&mut self, element: Option<K>, options_changed: bool) -> Resolution {
        self.resolve(element, options_changed)
    }

    /// The host is gone for good.
    pub fn on_detach(&mut self) {
        self.dispose();
    }

    /// Make `candidate` the target and rebuild subscriptions around it if needed.
    ///
    /// - `None` (nothing to observe) drops every subscription and forgets the target.
    /// - The current target with `force == false` does nothing.
    /// - Anything else disconnects, subscribes the target, then each ancestor from the
    ///   nearest parent up to the root when [`WatchOptions::watch_ancestors`] is set.
    ///
    /// The ancestor walk stops early at an element that is already subscribed, so a cyclic
    /// [`ParentLookup`] terminates.
    pub fn resolve(&mut self, candidate: Option<K>, force: bool) -> Resolution {
        let Some(observer) = self.observer.as_mut() else {
            #[cfg(feature = "tracing")]
            warn!("resize watcher: resolve after dispose ignored");
            return Resolution::Disposed;
        };

        let Some(element) = candidate else {
            observer.disconnect();
            self.target = None;
            #[cfg(feature = "tracing")]
            debug!("resize watcher: nothing to observe, subscriptions cleared");
            return Resolution::Cleared;
        };

        if self.target == Some(element) && !force {
            #[cfg(feature = "tracing")]
            trace!("resize watcher: target unchanged");
            return Resolution::Unchanged;
        }

        observer.disconnect();
        self.target = Some(element);
        observer.observe(element);
        if self.options.watch_ancestors {
            let mut parent = self.parents.parent_of(&element);
            while let Some(p) = parent {
                if observer.is_observing(&p) {
                    break;
                }
                observer.observe(p);
                parent = self.parents.parent_of(&p);
            }
        }

        let observed = observer.observed().len();
        #[cfg(feature = "tracing")]
        debug!(
            observed,
            watch_ancestors = self.options.watch_ancestors,
            forced = force,
            "resize watcher: subscriptions rebuilt"
        );
        Resolution::Rebuilt { observed }
    }

    /// Disconnect everything and release the observer. Safe to call more than once.
    pub fn dispose(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
            #[cfg(feature = "tracing")]
            debug!("resize watcher: disposed");
        }
        self.target = None;
    }

    /// Collect the ancestor chain of `node`, nearest parent first.
    ///
    /// This is the chain [`resolve`](Self::resolve) subscribes when ancestors are watched.
    pub fn ancestors_of(&self, node: K) -> Vec<K> {
        let mut out = Vec::new();
        let mut parent = self.parents.parent_of(&node);
        while let Some(p) = parent {
            if p == node || out.contains(&p) {
                break;
            }
            out.push(p);
            parent = self.parents.parent_of(&p);
        }
        out
    }
}

impl<K, O: ResizeObserver<K>, P, F> Drop for ResizeWatcher<K, O, P, F> {
    fn drop(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
