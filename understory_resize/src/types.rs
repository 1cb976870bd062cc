// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for resize observation: entries, lookups, measurement, and options.
//!
//! ## Overview
//!
//! These types describe what the watcher consumes from the host and what it hands to the
//! resize handler. They are referenced by the [`observer`](crate::observer) and the
//! [`watcher`](crate::watcher), and implemented by host trees such as
//! [`ElementTree`](crate::tree::ElementTree).

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Rect, Size};

/// A single measured change, delivered to the resize handler as part of a batch.
///
/// Produced by [`ResizeObserver::gather_frame`](crate::observer::ResizeObserver::gather_frame)
/// and relayed unchanged by [`ResizeWatcher::flush`](crate::watcher::ResizeWatcher::flush).
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeEntry<K> {
    /// The element whose size changed.
    pub target: K,
    /// Measured content box of the target.
    ///
    /// Only the width and height are meaningful; the origin is whatever the measurement
    /// source reports and is not compared between frames.
    pub content_rect: Rect,
}

impl<K> ResizeEntry<K> {
    /// Width and height of the measured content box.
    pub fn size(&self) -> Size {
        self.content_rect.size()
    }
}

/// Look up the parent of an element to walk its ancestor chain.
///
/// The [watcher](crate::watcher::ResizeWatcher) consults this when
/// [`WatchOptions::watch_ancestors`] is enabled.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A no‑op parent provider for hosts that never watch ancestors.
///
/// All calls to [`ParentLookup::parent_of`] return `None`.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    #[inline]
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for &T {
    #[inline]
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for Rc<T> {
    #[inline]
    fn parent_of(&self, node: &K) -> Option<K> {
        (**self).parent_of(node)
    }
}

/// Shared, mutable hosts: the borrow lasts for a single lookup.
impl<K, T: ParentLookup<K> + ?Sized> ParentLookup<K> for RefCell<T> {
    #[inline]
    fn parent_of(&self, node: &K) -> Option<K> {
        self.borrow().parent_of(node)
    }
}

/// Measure the content box of an element.
///
/// Supplied to [`ResizeWatcher::flush`](crate::watcher::ResizeWatcher::flush) once per frame.
pub trait Measure<K> {
    /// Returns the content box of `node`, or `None` if it can no longer be measured
    /// (for example because it was removed).
    fn content_rect(&self, node: &K) -> Option<Rect>;
}

impl<K, T: Measure<K> + ?Sized> Measure<K> for &T {
    #[inline]
    fn content_rect(&self, node: &K) -> Option<Rect> {
        (**self).content_rect(node)
    }
}

impl<K, T: Measure<K> + ?Sized> Measure<K> for Rc<T> {
    #[inline]
    fn content_rect(&self, node: &K) -> Option<Rect> {
        (**self).content_rect(node)
    }
}

impl<K, T: Measure<K> + ?Sized> Measure<K> for RefCell<T> {
    #[inline]
    fn content_rect(&self, node: &K) -> Option<Rect> {
        self.borrow().content_rect(node)
    }
}

/// Watcher configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchOptions {
    /// If true, every ancestor of the target is subscribed as well, up to the root.
    ///
    /// Only needed when an ancestor resizes in a way that does not also resize the target.
    pub watch_ancestors: bool,
}

/// What a call to [`ResizeWatcher::resolve`](crate::watcher::ResizeWatcher::resolve) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// No element to observe; every subscription was dropped.
    Cleared,
    /// Same element and no forced rebuild; nothing was touched.
    Unchanged,
    /// Subscriptions were dropped and rebuilt around the target.
    Rebuilt {
        /// Number of elements now subscribed (target plus ancestors).
        observed: usize,
    },
    /// The watcher was disposed; the call was ignored.
    Disposed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_size_ignores_origin() {
        let a = ResizeEntry {
            target: 1_u32,
            content_rect: Rect::new(0.0, 0.0, 40.0, 20.0),
        };
        let b = ResizeEntry {
            target: 1_u32,
            content_rect: Rect::new(15.0, 5.0, 55.0, 25.0),
        };
        assert_eq!(a.size(), Size::new(40.0, 20.0));
        assert_eq!(a.size(), b.size());
    }

    #[test]
    fn no_parent_is_always_root() {
        assert_eq!(ParentLookup::<u32>::parent_of(&NoParent, &7), None);
    }

    #[test]
    fn shared_handles_forward_lookups() {
        struct Chain;
        impl ParentLookup<u32> for Chain {
            fn parent_of(&self, node: &u32) -> Option<u32> {
                node.checked_sub(1)
            }
        }
        let shared = Rc::new(RefCell::new(Chain));
        assert_eq!(shared.parent_of(&3), Some(2));
        assert_eq!((&Chain).parent_of(&0), None);
    }

    #[test]
    fn options_default_to_target_only() {
        assert!(!WatchOptions::default().watch_ancestors);
    }
}
