// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the sensor and for handler delivery.

use alloc::borrow::Cow;

use thiserror::Error;

/// Child shapes a [`ResizeSensor`](crate::sensor::ResizeSensor) refuses to wrap.
///
/// The sensor needs exactly one element child. These are reported before the watcher is
/// touched, so the current subscriptions stay as they were.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// The sensor was given no child.
    #[error("resize sensor requires a single element child, found none")]
    NoChild,
    /// The sensor was given more than one child.
    #[error("resize sensor requires a single element child, found {0}")]
    MultipleChildren(usize),
    /// The only child is a bare text node.
    #[error("resize sensor requires a single element child, found a text node")]
    NotAnElement,
}

/// A resize handler could not process a batch.
///
/// Handlers return this from their callback; [`ResizeWatcher::flush`](crate::watcher::ResizeWatcher::flush)
/// hands it back to the frame driver. The watcher's subscriptions are unaffected and the next
/// frame is delivered normally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("resize handler failed: {message}")]
pub struct HandlerError {
    message: Cow<'static, str>,
}

impl HandlerError {
    /// Create an error with a human-readable message.
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The handler's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
