// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_layer_gesture --heading-base-level=0

//! Understory Layer Gesture: touch interpretation for exploded 3D layer views.
//!
//! An exploded view is steered with plain touch input. One finger rotates the model,
//! a vertical two-finger pinch zooms, and a horizontal two-finger pinch changes the
//! distance between layers. This crate holds that state machine and nothing else: it
//! does not draw, and it does not know what is being viewed.
//!
//! ## API overview
//!
//! - [`TouchEvent`]: phase, acting pointer, and every pointer in contact.
//! - [`GestureState`]: pointer slots, [`Tracking`] mode, and the four view values,
//!   always clamped to the ranges given by the `*_MIN` and `*_MAX` constants.
//! - [`GestureController`]: applies events to a state and reports a [`GestureResult`].
//! - [`GestureConfig`]: platform touch slop.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_layer_gesture::{
//!     GestureConfig, GestureController, GestureResult, GestureState, PointerId, PointerSample,
//!     TouchEvent, TouchPhase, Tracking,
//! };
//!
//! let controller = GestureController::new(GestureConfig::with_touch_slop(4.0));
//! let mut state = GestureState::new();
//! let viewport = Size::new(800.0, 800.0);
//! let (a, b) = (PointerId(0), PointerId(1));
//!
//! controller.handle(&mut state, &TouchEvent::single(TouchPhase::Down, a, Point::new(300.0, 300.0)), viewport);
//! controller.handle(
//!     &mut state,
//!     &TouchEvent::with_action(
//!         TouchPhase::Down,
//!         1,
//!         [
//!             PointerSample::new(a, Point::new(300.0, 300.0)),
//!             PointerSample::new(b, Point::new(500.0, 300.0)),
//!         ],
//!     ),
//!     viewport,
//! );
//!
//! // Spreading the fingers apart horizontally widens the layer spacing.
//! let spread = TouchEvent::moved([
//!     PointerSample::new(a, Point::new(260.0, 300.0)),
//!     PointerSample::new(b, Point::new(540.0, 300.0)),
//! ]);
//! assert_eq!(controller.handle(&mut state, &spread, viewport), GestureResult::Redraw);
//! assert_eq!(state.tracking, Tracking::Horizontal);
//! assert!(state.spacing > 25.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod controller;
mod event;
mod state;

pub use controller::{GestureConfig, GestureController, GestureResult};
pub use event::{PointerId, PointerSample, TouchEvent, TouchPhase};
pub use state::{
    GestureState, ROTATION_DEFAULT_X, ROTATION_DEFAULT_Y, ROTATION_MAX, ROTATION_MIN,
    SPACING_DEFAULT, SPACING_MAX, SPACING_MIN, TrackedPointer, Tracking, ZOOM_DEFAULT, ZOOM_MAX,
    ZOOM_MIN,
};
