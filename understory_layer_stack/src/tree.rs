// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer assignment: structure, construction, traversal.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use tracing::debug;

use crate::element::ElementTree;
use crate::suppression::Suppression;
use crate::types::{LayerIdx, LayerNode};
use crate::util::overlaps;

/// An element tree with a depth level assigned to every visible element.
///
/// The tree is an immutable snapshot for one build-and-render cycle: it holds
/// handles into the host tree, not copies of geometry, and is rebuilt wholesale
/// when the host tree changes.
///
/// Level assignment walks each element's visible children in sibling order.
/// A child starts one level above its parent; if its bounds overlap an earlier
/// sibling whose subtree reaches that level or higher, it is pushed one level
/// past that sibling's subtree. Two overlapping siblings therefore never share
/// a level range, which is what keeps their drawings apart once the stack is
/// fanned out in 3D.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layer_stack::{ElementArena, ElementDesc, LayerTree};
///
/// let mut arena = ElementArena::new();
/// let root = arena.insert(None, ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 100.0, 300.0),
///     ..ElementDesc::default()
/// });
/// let a = arena.insert(Some(root), ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 100.0, 50.0),
///     ..ElementDesc::default()
/// });
/// let b = arena.insert(Some(root), ElementDesc {
///     bounds: Rect::new(0.0, 40.0, 100.0, 100.0),
///     ..ElementDesc::default()
/// });
///
/// let layers = LayerTree::snapshot(&arena, root);
/// assert_eq!(layers.level_of(a), Some(0));
/// assert_eq!(layers.level_of(b), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct LayerTree<Id> {
    nodes: Vec<LayerNode<Id>>,
}

impl<Id: Copy + Eq + core::fmt::Debug> LayerTree<Id> {
    /// Assign levels to the visible subtree under `root` without touching the host.
    ///
    /// The root itself is wrapped at level `-1` and is never drawn; its visible
    /// children start at level `0`. Invisible elements are pruned together with
    /// their subtrees and take no part in overlap detection.
    pub fn snapshot<T>(host: &T, root: Id) -> Self
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        let mut tree = Self::root_only(root);
        tree.wrap_children(host, LayerIdx::ROOT);
        tree
    }

    pub(crate) fn root_only(root: Id) -> Self {
        Self {
            nodes: alloc::vec![LayerNode::new(root, -1)],
        }
    }

    /// Assign levels under `root` and suppress the host's own drawing of every wrapped element.
    ///
    /// The returned [`Suppression`] must be released with [`Suppression::release`]
    /// once the layer view stops drawing, which restores each element's original
    /// visibility.
    pub fn build<T>(host: &mut T, root: Id) -> (Self, Suppression<Id>)
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        let tree = Self::snapshot(&*host, root);
        let suppression = Suppression::acquire(host, &tree);
        (tree, suppression)
    }

    /// The root wrapper.
    pub fn root(&self) -> &LayerNode<Id> {
        &self.nodes[LayerIdx::ROOT.idx()]
    }

    /// Access a node; panics if `idx` did not come from this tree.
    pub fn node(&self, idx: LayerIdx) -> &LayerNode<Id> {
        &self.nodes[idx.idx()]
    }

    /// Access a node if `idx` is in range.
    pub fn get(&self, idx: LayerIdx) -> Option<&LayerNode<Id>> {
        self.nodes.get(idx.idx())
    }

    /// Children of `idx` in sibling order, or an empty slice for unknown indices.
    pub fn children_of(&self, idx: LayerIdx) -> &[LayerIdx] {
        self.get(idx).map(LayerNode::children).unwrap_or(&[])
    }

    /// Number of wrapped elements, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no element below the root was wrapped.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Highest level assigned to any node, or `-1` if only the root exists.
    pub fn max_level(&self) -> i32 {
        self.root().top_level()
    }

    /// Level assigned to `element`, if it was wrapped.
    ///
    /// This is a linear scan; it exists for tools and tests rather than per-frame use.
    pub fn level_of(&self, element: Id) -> Option<i32> {
        self.nodes
            .iter()
            .find(|n| n.element == element)
            .map(|n| n.level)
    }

    /// Iterate the nodes below the root in breadth-first order.
    ///
    /// This is the draw order: every node at tree depth `d` precedes every node at depth `d + 1`.
    pub fn iter_breadth_first(&self) -> BreadthFirst<'_, Id> {
        BreadthFirst {
            tree: self,
            queue: self.root().children().iter().copied().collect(),
        }
    }

    /// Iterate every wrapped node below the root, in construction (depth-first) order.
    pub fn iter(&self) -> impl Iterator<Item = (LayerIdx, &LayerNode<Id>)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, n)| (LayerIdx::from_index(i), n))
    }

    fn push(&mut self, node: LayerNode<Id>) -> LayerIdx {
        let idx = LayerIdx::from_index(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    fn wrap_children<T>(&mut self, host: &T, parent: LayerIdx)
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        let parent_element = self.nodes[parent.idx()].element;
        let parent_level = self.nodes[parent.idx()].level;
        let mut span = 0_u32;

        for &child in host.children(parent_element) {
            if !host.is_visible(child) {
                continue;
            }
            let child_bounds = host.bounds(child);

            // Only earlier siblings have been placed; later ones will test against us.
            let mut child_level = parent_level + 1;
            for &sibling in self.nodes[parent.idx()].children() {
                let sibling = &self.nodes[sibling.idx()];
                let sibling_bounds = host.bounds(sibling.element);
                if overlaps(sibling_bounds, child_bounds) {
                    debug!(
                        ?sibling_bounds,
                        ?child_bounds,
                        "intersection between {:?} and {:?}",
                        sibling.element,
                        child
                    );
                    let sibling_top = sibling.top_level();
                    if sibling_top >= child_level {
                        child_level = sibling_top + 1;
                    }
                }
            }

            let idx = self.push(LayerNode::new(child, child_level));
            self.wrap_children(host, idx);

            let node = &self.nodes[idx.idx()];
            #[allow(
                clippy::cast_sign_loss,
                reason = "a child's level is always above its parent's"
            )]
            let reach = (node.level - parent_level) as u32 + node.span_layers;
            span = span.max(reach);
            self.nodes[parent.idx()].children.push(idx);
        }

        self.nodes[parent.idx()].span_layers = span;
    }
}

/// Breadth-first iterator over a [`LayerTree`], created by [`LayerTree::iter_breadth_first`].
#[derive(Debug)]
pub struct BreadthFirst<'a, Id> {
    tree: &'a LayerTree<Id>,
    queue: VecDeque<LayerIdx>,
}

impl<'a, Id> Iterator for BreadthFirst<'a, Id> {
    type Item = (LayerIdx, &'a LayerNode<Id>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.pop_front()?;
        let node = &self.tree.nodes[idx.idx()];
        self.queue.extend(node.children().iter().copied());
        Some((idx, node))
    }
}
