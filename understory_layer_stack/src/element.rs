// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side view of an element tree.

use core::fmt::Debug;

use kurbo::Rect;

use crate::types::ResourceId;

/// Read and visibility access to a host-owned tree of rectangular elements.
///
/// The layer stack never owns elements. It refers to them through copyable
/// handles (`Id`) and asks the host for geometry, ordering, and visibility.
/// Hosts usually implement this on their widget arena or on a thin adapter
/// around their UI framework's view hierarchy.
///
/// All bounds must live in one shared coordinate space (for example window
/// coordinates), since siblings are compared against each other and the
/// renderer positions every element relative to the root's bounds.
pub trait ElementTree {
    /// Non-owning handle of an element.
    type Id: Copy + Eq + Debug;

    /// Ordered children of `id`. Leaves return an empty slice.
    fn children(&self, id: Self::Id) -> &[Self::Id];

    /// Bounding rectangle of `id` in the shared coordinate space.
    fn bounds(&self, id: Self::Id) -> Rect;

    /// Whether `id` is currently visible.
    fn is_visible(&self, id: Self::Id) -> bool;

    /// Show or hide `id`.
    ///
    /// Used to suppress the host's own drawing of elements while they are
    /// drawn through the layer view instead.
    fn set_visible(&mut self, id: Self::Id, visible: bool);

    /// Opaque identifier attached to `id`, if any.
    fn resource_id(&self, id: Self::Id) -> Option<ResourceId> {
        let _ = id;
        None
    }
}
