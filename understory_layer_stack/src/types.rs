// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layer stack: node indices, resource identifiers, and layer nodes.

use smallvec::SmallVec;

/// Index of a node inside a [`LayerTree`](crate::LayerTree).
///
/// Indices are only meaningful for the tree that produced them; a rebuilt tree
/// hands out fresh indices.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct LayerIdx(pub(crate) u32);

impl LayerIdx {
    /// The root wrapper of every layer tree.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "LayerIdx uses 32-bit indices by design."
    )]
    pub(crate) const fn from_index(i: usize) -> Self {
        Self(i as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Opaque integer identifier a host attaches to an element.
///
/// Hosts typically map these to human-readable names through a resource table; the
/// layer stack never interprets the value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceId(pub u32);

/// One element wrapped with its assigned depth.
#[derive(Clone, Debug)]
pub struct LayerNode<Id> {
    /// Host handle of the wrapped element (non-owning).
    pub element: Id,
    /// Assigned depth layer. The root wrapper sits at `-1`, so its direct children start at `0`.
    pub level: i32,
    /// Number of depth layers the subtree occupies above `level`.
    ///
    /// Zero for a node without visible children.
    pub span_layers: u32,
    pub(crate) children: SmallVec<[LayerIdx; 4]>,
}

impl<Id> LayerNode<Id> {
    pub(crate) fn new(element: Id, level: i32) -> Self {
        Self {
            element,
            level,
            span_layers: 0,
            children: SmallVec::new(),
        }
    }

    /// Children in original sibling order.
    pub fn children(&self) -> &[LayerIdx] {
        &self.children
    }

    /// Highest level occupied by this node's subtree.
    #[inline]
    pub fn top_level(&self) -> i32 {
        #[allow(
            clippy::cast_possible_wrap,
            reason = "span is bounded by tree depth, far below i32::MAX"
        )]
        let span = self.span_layers as i32;
        self.level + span
    }
}
