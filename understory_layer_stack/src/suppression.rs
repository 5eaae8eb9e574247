// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reversible visibility suppression of wrapped elements.

use alloc::vec::Vec;
use core::fmt::Debug;

use tracing::warn;

use crate::element::ElementTree;
use crate::tree::LayerTree;

/// Record of elements hidden from the host's own drawing pass.
///
/// While a layer view is active, every element it draws must not also be drawn
/// by the host. [`Suppression::acquire`] hides each wrapped element and
/// remembers its prior visibility; [`Suppression::release`] puts it back.
///
/// A suppression cannot reach the host tree on its own, so dropping one
/// without releasing it leaves elements hidden. That is always a bug in the
/// caller and is reported through `tracing`. Use [`SuppressedScope`] when the
/// host tree can be borrowed for the whole period.
#[must_use = "dropping a Suppression without release() leaves host elements hidden"]
#[derive(Debug)]
pub struct Suppression<Id: Copy + Debug> {
    hidden: Vec<(Id, bool)>,
}

impl<Id: Copy + Eq + Debug> Suppression<Id> {
    /// Hide every element below the root of `layers`.
    pub fn acquire<T>(host: &mut T, layers: &LayerTree<Id>) -> Self
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        let mut hidden = Vec::with_capacity(layers.len().saturating_sub(1));
        for (_, node) in layers.iter() {
            hidden.push((node.element, host.is_visible(node.element)));
            host.set_visible(node.element, false);
        }
        Self { hidden }
    }

    /// Number of suppressed elements.
    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    /// Returns true if nothing is suppressed.
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    /// Returns true if `id` is currently suppressed by this record.
    pub fn contains(&self, id: Id) -> bool {
        self.hidden.iter().any(|&(h, _)| h == id)
    }

    /// Restore every suppressed element to the visibility it had before [`Suppression::acquire`].
    pub fn release<T>(mut self, host: &mut T)
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        self.restore(host);
    }

    fn restore<T>(&mut self, host: &mut T)
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        // Reverse so an element listed twice ends at its first recorded state.
        for (id, was_visible) in self.hidden.drain(..).rev() {
            host.set_visible(id, was_visible);
        }
    }
}

impl<Id: Copy + Debug> Drop for Suppression<Id> {
    fn drop(&mut self) {
        if !self.hidden.is_empty() {
            warn!(
                count = self.hidden.len(),
                "suppression dropped without release; host elements stay hidden"
            );
        }
    }
}

/// A [`LayerTree`] and its [`Suppression`], bound to a borrowed host tree.
///
/// Visibility is restored when the scope ends, including during unwinding, so
/// a panic in a drawing callback cannot leave the host with hidden elements.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layer_stack::{ElementArena, ElementDesc, ElementTree, SuppressedScope};
///
/// let mut arena = ElementArena::new();
/// let root = arena.insert(None, ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
///     ..ElementDesc::default()
/// });
/// let child = arena.insert(Some(root), ElementDesc::default());
///
/// {
///     let scope = SuppressedScope::new(&mut arena, root);
///     assert!(!scope.host().is_visible(child));
///     assert_eq!(scope.layers().len(), 2);
/// }
/// assert!(arena.is_visible(child));
/// ```
pub struct SuppressedScope<'a, T: ElementTree + ?Sized> {
    host: &'a mut T,
    layers: LayerTree<T::Id>,
    suppression: Option<Suppression<T::Id>>,
}

impl<'a, T: ElementTree + ?Sized> SuppressedScope<'a, T> {
    /// Build layers under `root` and suppress them for the lifetime of the scope.
    pub fn new(host: &'a mut T, root: T::Id) -> Self {
        let (layers, suppression) = LayerTree::build(&mut *host, root);
        Self {
            host,
            layers,
            suppression: Some(suppression),
        }
    }

    /// The suppressed host tree.
    pub fn host(&self) -> &T {
        self.host
    }

    /// The layer assignment built for this scope.
    pub fn layers(&self) -> &LayerTree<T::Id> {
        &self.layers
    }

    /// End the scope now, restoring visibility and returning the layers.
    pub fn finish(mut self) -> LayerTree<T::Id> {
        if let Some(s) = self.suppression.take() {
            s.release(&mut *self.host);
        }
        let root = self.layers.root().element;
        core::mem::replace(&mut self.layers, LayerTree::root_only(root))
    }
}

impl<T: ElementTree + ?Sized> Drop for SuppressedScope<'_, T> {
    fn drop(&mut self) {
        if let Some(s) = self.suppression.take() {
            s.release(&mut *self.host);
        }
    }
}

impl<T: ElementTree + ?Sized> Debug for SuppressedScope<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SuppressedScope")
            .field("layers", &self.layers.len())
            .field("suppressed", &self.suppression.as_ref().map_or(0, Suppression::len))
            .finish_non_exhaustive()
    }
}
