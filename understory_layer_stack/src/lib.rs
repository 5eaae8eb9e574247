// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layer_stack --heading-base-level=0

//! Understory Layer Stack: depth layering of element trees for exploded 3D inspection.
//!
//! Debugging tools that show a UI as a fanned-out stack of layers need to know how far
//! apart to place each element. This crate answers that question for any host tree of
//! rectangular elements: it walks the visible elements, gives every one a depth level,
//! and pushes overlapping siblings onto distinct levels so that no two overlapping
//! elements are ever drawn at the same depth.
//!
//! It also owns the one side effect such a tool needs: while the stack is being drawn by
//! the inspector, the host must not draw the same elements itself. [`Suppression`] hides
//! the wrapped elements and restores their original visibility afterwards.
//!
//! ## Where this fits
//!
//! - Host tree: the UI framework's own elements, exposed through [`ElementTree`].
//! - Layer stack: a per-frame [`LayerTree`] with levels (this crate).
//! - Layer view: projection, gestures, and drawing (`understory_layer_view`).
//!
//! ## Not a layout engine
//!
//! This crate never measures or positions anything. Bounds are read from the host as they
//! are, in one shared coordinate space, and only compared against each other.
//!
//! ## API overview
//!
//! - [`ElementTree`]: host capability (children, bounds, visibility, resource id).
//! - [`LayerTree`]: arena of [`LayerNode`]s addressed by [`LayerIdx`].
//!   - [`LayerTree::snapshot`] assigns levels without side effects.
//!   - [`LayerTree::build`] assigns levels and returns a [`Suppression`].
//!   - [`LayerTree::iter_breadth_first`] walks nodes in draw order.
//! - [`Suppression`]: hidden elements and their prior visibility; [`Suppression::release`] restores them.
//! - [`SuppressedScope`]: RAII pairing of a borrowed host tree, its layers, and the suppression.
//! - [`ElementArena`]: a small owned [`ElementTree`] for headless hosts and tests.
//! - [`overlaps`]: the overlap test used between siblings.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_layer_stack::{ElementArena, ElementDesc, ElementTree, LayerTree};
//!
//! let mut arena = ElementArena::new();
//! let root = arena.insert(None, ElementDesc {
//!     bounds: Rect::new(0.0, 0.0, 320.0, 480.0),
//!     ..ElementDesc::default()
//! });
//! let header = arena.insert(Some(root), ElementDesc {
//!     bounds: Rect::new(0.0, 0.0, 320.0, 50.0),
//!     ..ElementDesc::default()
//! });
//! let badge = arena.insert(Some(root), ElementDesc {
//!     bounds: Rect::new(280.0, 40.0, 310.0, 70.0),
//!     ..ElementDesc::default()
//! });
//!
//! let (layers, suppression) = LayerTree::build(&mut arena, root);
//! assert_eq!(layers.level_of(header), Some(0));
//! assert_eq!(layers.level_of(badge), Some(1));
//! assert!(!arena.is_visible(badge));
//!
//! suppression.release(&mut arena);
//! assert!(arena.is_visible(badge));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
mod element;
mod suppression;
mod tree;
mod types;
mod util;

pub use arena::{ElementArena, ElementDesc, ElementId};
pub use element::ElementTree;
pub use suppression::{SuppressedScope, Suppression};
pub use tree::{BreadthFirst, LayerTree};
pub use types::{LayerIdx, LayerNode, ResourceId};
pub use util::overlaps;
