// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element tree: a minimal retained hierarchy of sized elements.
//!
//! [`ElementTree`] is the smallest host a watcher can run against: it knows each element's
//! parent and content size, and nothing else. It implements [`ParentLookup`] and [`Measure`],
//! so it can be handed to a [`ResizeWatcher`](crate::watcher::ResizeWatcher) directly or
//! through an `Rc<RefCell<_>>` when the host keeps mutating it.
//!
//! This is not a layout engine. Upstream code computes sizes and writes them here with
//! [`ElementTree::set_size`].

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::types::{Measure, ParentLookup};

/// Identifier for an element in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct id.
///
/// Stale ids never alias a different live element because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(u32, u32);

impl ElementId {
    const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Element {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    size: Size,
}

/// Top-level element tree.
#[derive(Clone, Default)]
pub struct ElementTree {
    elements: Vec<Option<Element>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|e| e.is_some()).count();
        f.debug_struct("ElementTree")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl ElementTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element as a child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts a root.
    pub fn insert(&mut self, parent: Option<ElementId>, size: Size) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.generations[idx] += 1;
            idx
        } else {
            self.elements.push(None);
            self.generations.push(1);
            self.elements.len() - 1
        };
        let generation = self.generations[idx];
        self.elements[idx] = Some(Element {
            generation,
            parent: None,
            children: Vec::new(),
            size,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "ElementId uses 32-bit indices by design."
        )]
        let id = ElementId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|&p| self.is_alive(p)) {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element and its subtree.
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.get(id).and_then(|e| e.parent) {
            self.unlink_parent(id, parent);
        }
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            if let Some(element) = self.elements[cur.idx()].take() {
                stack.extend(element.children);
                self.free_list.push(cur.idx());
            }
        }
    }

    /// Move `id` under `new_parent` (or make it a root).
    ///
    /// Returns false, leaving the tree unchanged, if either element is stale or if the move
    /// would make `id` its own ancestor.
    pub fn reparent(&mut self, id: ElementId, new_parent: Option<ElementId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || p == id || self.ancestors(p).any(|a| a == id))
        {
            return false;
        }
        if let Some(parent) = self.get(id).and_then(|e| e.parent) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        true
    }

    /// Update an element's content size.
    pub fn set_size(&mut self, id: ElementId, size: Size) {
        if let Some(element) = self.get_mut(id) {
            element.size = size;
        }
    }

    /// Content size of a live element.
    pub fn size(&self, id: ElementId) -> Option<Size> {
        self.get(id).map(|e| e.size)
    }

    /// Parent of a live element; `None` for roots and stale ids.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Children of a live element, in insertion order.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        match self.get(id) {
            Some(e) => &e.children,
            None => &[],
        }
    }

    /// Iterate the ancestors of `id`, nearest parent first, up to its root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut cur = self.parent(id);
        core::iter::from_fn(move || {
            let next = cur?;
            cur = self.parent(next);
            Some(next)
        })
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    /// Returns true if the tree has no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- internals ---

    fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .get(id.idx())?
            .as_ref()
            .filter(|e| e.generation == id.1)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements
            .get_mut(id.idx())?
            .as_mut()
            .filter(|e| e.generation == id.1)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        if let Some(e) = self.get_mut(id) {
            e.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(e) = self.get_mut(id) {
            e.parent = None;
        }
    }
}

impl ParentLookup<ElementId> for ElementTree {
    fn parent_of(&self, node: &ElementId) -> Option<ElementId> {
        self.parent(*node)
    }
}

impl Measure<ElementId> for ElementTree {
    fn content_rect(&self, node: &ElementId) -> Option<Rect> {
        self.size(*node)
            .map(|size| Rect::from_origin_size(Point::ORIGIN, size))
    }
}
