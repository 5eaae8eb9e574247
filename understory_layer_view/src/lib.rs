// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layer_view --heading-base-level=0

//! Understory Layer View: an interactive exploded 3D view of a host element tree.
//!
//! This crate draws the layers computed by `understory_layer_stack` as a stack of
//! outlined planes, tilted through a pinhole camera and fanned out by depth level, and
//! steers the view with the gestures of `understory_layer_gesture`.
//!
//! ## Drawing model
//!
//! - The surface transform becomes `T(c) * P * T(-c) * S_c(zoom)`, where `P` is the
//!   camera projection for the current rotation and `c` is the viewport center.
//! - Layers are visited breadth-first from the root's children; the root is never drawn.
//! - Each layer is shifted by `level * spacing * density` scaled by the rotation, then
//!   moved to its element's position relative to the root, and drawn as an outline,
//!   optionally followed by the element's contents and a name label.
//! - Every layer is drawn inside its own save/restore, and the whole pass inside another.
//!
//! ## API overview
//!
//! - [`Inspector`]: the host-facing object. Enable or disable it, feed it touches, ask it to draw.
//! - [`InspectorSession`]: an enabled inspector bound to its host; restores visibility when dropped.
//! - [`Renderer`]: the draw pass on its own, for hosts that manage layers themselves.
//! - [`Surface`]: the canvas capability the host provides; [`SaveGuard`] scopes its state.
//! - [`DrawElement`]: lets host elements paint their own contents.
//! - [`NameLookup`] and [`LabelCache`]: resource names for labels, with a hexadecimal fallback.
//! - [`Camera`] and [`Projective`]: the perspective math.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use understory_layer_stack::{ElementArena, ElementDesc, ElementId};
//! use understory_layer_view::{
//!     Chrome, DrawDisposition, DrawElement, Inspector, InspectorConfig, NoNames, Projective,
//!     Surface,
//! };
//!
//! #[derive(Default)]
//! struct Outlines(usize);
//!
//! impl Surface for Outlines {
//!     fn save(&mut self) -> usize { 0 }
//!     fn restore_to_count(&mut self, _: usize) {}
//!     fn concat(&mut self, _: &Projective) {}
//!     fn stroke_rect(&mut self, _: Rect, _: &Chrome) { self.0 += 1; }
//!     fn fill_text(&mut self, _: &str, _: Point, _: &Chrome) {}
//! }
//!
//! struct Host(ElementArena);
//!
//! # use understory_layer_stack::{ElementTree, ResourceId};
//! # impl ElementTree for Host {
//! #     type Id = ElementId;
//! #     fn children(&self, id: ElementId) -> &[ElementId] { self.0.children(id) }
//! #     fn bounds(&self, id: ElementId) -> Rect { self.0.bounds(id) }
//! #     fn is_visible(&self, id: ElementId) -> bool { self.0.is_visible(id) }
//! #     fn set_visible(&mut self, id: ElementId, visible: bool) { self.0.set_visible(id, visible) }
//! #     fn resource_id(&self, id: ElementId) -> Option<ResourceId> { self.0.resource_id(id) }
//! # }
//! impl DrawElement<Outlines> for Host {
//!     fn draw(&self, _: ElementId, _: &mut Outlines) {}
//! }
//!
//! let mut arena = ElementArena::new();
//! let root = arena.insert(None, ElementDesc {
//!     bounds: Rect::new(0.0, 0.0, 320.0, 480.0),
//!     ..ElementDesc::default()
//! });
//! for y in [0.0, 40.0, 300.0] {
//!     arena.insert(Some(root), ElementDesc {
//!         bounds: Rect::new(0.0, y, 320.0, y + 60.0),
//!         ..ElementDesc::default()
//!     });
//! }
//! let mut host = Host(arena);
//!
//! let mut inspector = Inspector::new(InspectorConfig::default());
//! inspector.set_interaction_enabled(&mut host, root, true);
//!
//! let mut surface = Outlines::default();
//! let viewport = Size::new(320.0, 480.0);
//! assert_eq!(inspector.draw(&mut surface, &host, viewport, &NoNames), DrawDisposition::Rendered);
//! assert_eq!(surface.0, 3);
//!
//! inspector.teardown(&mut host);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod inspector;
mod labels;
mod projective;
mod render;
mod surface;

pub use camera::{Camera, DEFAULT_CAMERA_DISTANCE, view_matrix};
pub use inspector::{
    DrawDisposition, Inspector, InspectorConfig, InspectorSession, TouchDisposition,
};
pub use labels::{LabelCache, LookupError, NameLookup, NoNames, fallback_label};
pub use projective::Projective;
pub use render::{DrawElement, DrawOptions, Renderer};
pub use surface::{Chrome, SaveGuard, Surface};
