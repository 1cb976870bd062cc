// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The underlying size-observation primitive and a polling backend.
//!
//! ## Overview
//!
//! A [`ResizeObserver`] owns a subscription set and turns one scheduling frame into one batch
//! of [`ResizeEntry`] values. It never calls user code; the
//! [watcher](crate::watcher::ResizeWatcher) relays each non-empty batch to its handler.
//!
//! Backends are pluggable so that platform-native sources (a browser `ResizeObserver`, a
//! compositor's layout notifications) can satisfy the same contract as [`PollingObserver`].
//!
//! ## Contract
//!
//! - Subscribing an element that is already subscribed does nothing.
//! - A new subscription has no reported size, so the next frame always carries a baseline
//!   entry for it.
//! - A frame reports each subscribed element at most once, in subscription order, and only
//!   when its width or height differs from the last size reported for it.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use crate::types::{Measure, ResizeEntry};

/// Size-observation primitive used by [`ResizeWatcher`](crate::watcher::ResizeWatcher).
pub trait ResizeObserver<K> {
    /// Subscribe `target`. Does nothing if it is already subscribed.
    fn observe(&mut self, target: K);

    /// Drop the subscription for `target`, if any.
    fn unobserve(&mut self, target: &K);

    /// Drop every subscription along with its reported-size history.
    fn disconnect(&mut self);

    /// Current subscriptions, in subscription order.
    fn observed(&self) -> &[K];

    /// Returns true if `target` is subscribed.
    fn is_observing(&self, target: &K) -> bool
    where
        K: PartialEq,
    {
        self.observed().contains(target)
    }

    /// Run one scheduling frame and return the batch of changed elements.
    ///
    /// The batch is empty when nothing changed.
    fn gather_frame<M: Measure<K> + ?Sized>(&mut self, measure: &M) -> Vec<ResizeEntry<K>>;
}

/// Polling backend: measures every subscription once per frame and reports size changes.
///
/// Elements the measurement source cannot resolve are measured as [`Rect::ZERO`], the way a
/// detached element measures in a browser. Float sizes are assumed to be finite (no NaNs).
///
/// ```
/// use kurbo::Rect;
/// use understory_resize::observer::{PollingObserver, ResizeObserver};
/// use understory_resize::types::Measure;
///
/// struct Fixed;
/// impl Measure<u32> for Fixed {
///     fn content_rect(&self, _node: &u32) -> Option<Rect> {
///         Some(Rect::new(0.0, 0.0, 100.0, 50.0))
///     }
/// }
///
/// let mut observer = PollingObserver::new();
/// observer.observe(1);
/// // A new subscription always reports a baseline...
/// assert_eq!(observer.gather_frame(&Fixed).len(), 1);
/// // ...and then stays quiet until the size changes.
/// assert!(observer.gather_frame(&Fixed).is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct PollingObserver<K> {
    targets: Vec<K>,
    // Last reported size per target; `None` until the baseline is delivered.
    reported: Vec<Option<Size>>,
}

impl<K> Default for PollingObserver<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PollingObserver<K> {
    /// Create an observer with no subscriptions.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            reported: Vec::new(),
        }
    }

    /// Number of subscribed elements.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<K: Copy + Eq> ResizeObserver<K> for PollingObserver<K> {
    fn observe(&mut self, target: K) {
        if self.targets.contains(&target) {
            return;
        }
        self.targets.push(target);
        self.reported.push(None);
    }

    fn unobserve(&mut self, target: &K) {
        if let Some(i) = self.targets.iter().position(|t| t == target) {
            self.targets.remove(i);
            self.reported.remove(i);
        }
    }

    fn disconnect(&mut self) {
        self.targets.clear();
        self.reported.clear();
    }

    fn observed(&self) -> &[K] {
        &self.targets
    }

    fn gather_frame<M: Measure<K> + ?Sized>(&mut self, measure: &M) -> Vec<ResizeEntry<K>> {
        let mut batch = Vec::new();
        for (target, last) in self.targets.iter().zip(self.reported.iter_mut()) {
            let content_rect = measure.content_rect(target).unwrap_or(Rect::ZERO);
            let size = content_rect.size();
            if *last != Some(size) {
                *last = Some(size);
                batch.push(ResizeEntry {
                    target: *target,
                    content_rect,
                });
            }
        }
        batch
    }
}
