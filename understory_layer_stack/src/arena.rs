// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal owned element tree.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::element::ElementTree;
use crate::types::ResourceId;

/// Handle of an element stored in an [`ElementArena`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(u32);

impl ElementId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "ElementId uses 32-bit indices by design."
    )]
    const fn from_index(i: usize) -> Self {
        Self(i as u32)
    }
}

/// Per-element data for [`ElementArena::insert`].
#[derive(Clone, Debug)]
pub struct ElementDesc {
    /// Bounds in the arena's shared coordinate space.
    pub bounds: Rect,
    /// Initial visibility.
    pub visible: bool,
    /// Optional opaque identifier.
    pub resource_id: Option<ResourceId>,
}

impl Default for ElementDesc {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            visible: true,
            resource_id: None,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    desc: ElementDesc,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Owned element tree for headless hosts, tools, and tests.
///
/// Elements are never removed; handles stay valid for the arena's lifetime.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layer_stack::{ElementArena, ElementDesc, ElementTree};
///
/// let mut arena = ElementArena::new();
/// let root = arena.insert(None, ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
///     ..ElementDesc::default()
/// });
/// let child = arena.insert(Some(root), ElementDesc::default());
/// assert_eq!(arena.children(root), &[child]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ElementArena {
    slots: Vec<Slot>,
}

impl ElementArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element as the last child of `parent` (or as a root if `None`).
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this arena.
    pub fn insert(&mut self, parent: Option<ElementId>, desc: ElementDesc) -> ElementId {
        let id = ElementId::from_index(self.slots.len());
        self.slots.push(Slot {
            desc,
            parent,
            children: Vec::new(),
        });
        if let Some(p) = parent {
            self.slot_mut(p).children.push(id);
        }
        id
    }

    /// Number of elements in the arena.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the arena holds no elements.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Parent of `id`, or `None` for roots.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.slot(id).parent
    }

    /// Move or resize an element.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        self.slot_mut(id).desc.bounds = bounds;
    }

    /// Iterate all handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.slots.len()).map(ElementId::from_index)
    }

    fn slot(&self, id: ElementId) -> &Slot {
        &self.slots[id.0 as usize]
    }

    fn slot_mut(&mut self, id: ElementId) -> &mut Slot {
        &mut self.slots[id.0 as usize]
    }
}

impl ElementTree for ElementArena {
    type Id = ElementId;

    fn children(&self, id: ElementId) -> &[ElementId] {
        &self.slot(id).children
    }

    fn bounds(&self, id: ElementId) -> Rect {
        self.slot(id).desc.bounds
    }

    fn is_visible(&self, id: ElementId) -> bool {
        self.slot(id).desc.visible
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.slot_mut(id).desc.visible = visible;
    }

    fn resource_id(&self, id: ElementId) -> Option<ResourceId> {
        self.slot(id).desc.resource_id
    }
}
