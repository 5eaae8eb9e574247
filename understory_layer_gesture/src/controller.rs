// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpretation for an exploded layer view.
//!
//! This module turns raw touch events into changes of the four view values held
//! in a [`GestureState`]: rotation around X and Y, zoom, and layer spacing.
//!
//! ## Usage
//!
//! Single pointer drag rotates the model:
//! ```
//! use kurbo::{Point, Size};
//! use understory_layer_gesture::{
//!     GestureController, GestureResult, GestureState, PointerId, TouchEvent, TouchPhase,
//! };
//!
//! let controller = GestureController::default();
//! let mut state = GestureState::new();
//! let viewport = Size::new(900.0, 900.0);
//! let finger = PointerId(7);
//!
//! controller.handle(&mut state, &TouchEvent::single(TouchPhase::Down, finger, Point::new(100.0, 100.0)), viewport);
//!
//! // Dragging right by a tenth of the width turns the model 9 degrees around Y.
//! let moved = TouchEvent::single(TouchPhase::Move, finger, Point::new(190.0, 100.0));
//! assert_eq!(controller.handle(&mut state, &moved, viewport), GestureResult::Redraw);
//! assert!((state.rotation_y - 24.0).abs() < 1e-9);
//! ```
//!
//! ## Interpretation Rules
//!
//! 1. **Two slots**: only the first two pointers to go down are tracked. Later
//!    pointers are ignored until a slot frees up.
//! 2. **One pointer**: a drag of `(dx, dy)` adds `90 * dx / width` to the Y rotation
//!    and `90 * -dy / height` to the X rotation. Horizontal motion turns the model
//!    around the vertical axis and vice versa; the Y axis is inverted.
//! 3. **Two pointers, undecided**: absolute deltas of both pointers are summed per axis.
//!    Once either sum exceeds twice the touch slop, the gesture locks to
//!    [`Tracking::Horizontal`] if the horizontal sum is larger, else to [`Tracking::Vertical`].
//!    Last positions are not advanced while undecided, so the sums keep growing.
//! 4. **Vertical lock**: zoom changes by the lower pointer's vertical delta minus the
//!    upper pointer's, each normalized by the viewport height.
//! 5. **Horizontal lock**: spacing changes by the rightmost pointer's horizontal delta
//!    minus the other's, each normalized by the viewport width and scaled to [`SPACING_MAX`].
//! 6. **Lock stability**: a lock holds until a tracked pointer lifts.
//! 7. **Release**: lifting pointer one promotes pointer two into its slot. Lifting
//!    either tracked pointer resets tracking. Unknown pointer ids are ignored.
//!
//! Every value is clamped to its range after each change.

use kurbo::{Size, Vec2};
use tracing::{debug, trace};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::event::{PointerId, PointerSample, TouchEvent, TouchPhase};
use crate::state::{GestureState, SPACING_MAX, TrackedPointer, Tracking};

/// Rotation, in degrees, produced by dragging across the full viewport.
const DEGREES_PER_VIEWPORT: f64 = 90.0;

/// Platform parameters for gesture interpretation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance in pixels a pointer may travel before it counts as a deliberate move.
    pub touch_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { touch_slop: 8.0 }
    }
}

impl GestureConfig {
    /// Configuration with a specific touch slop.
    pub fn with_touch_slop(touch_slop: f64) -> Self {
        Self { touch_slop }
    }
}

/// Outcome of feeding one event to a [`GestureController`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum GestureResult {
    /// View values changed; the host should redraw.
    Redraw,
    /// Nothing visible changed.
    Unchanged,
}

/// Stateless interpreter of touch events.
///
/// All mutable data lives in the [`GestureState`] passed to [`GestureController::handle`],
/// so one controller can serve any number of views and states can be tested in isolation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureController {
    config: GestureConfig,
}

impl GestureController {
    /// Create a controller with the given configuration.
    pub fn new(config: GestureConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    /// Apply one touch event to `state`.
    ///
    /// `viewport` is the current size of the view the gesture happens in; moves
    /// are ignored while it has no area.
    pub fn handle(
        &self,
        state: &mut GestureState,
        event: &TouchEvent,
        viewport: Size,
    ) -> GestureResult {
        match event.phase {
            TouchPhase::Down => {
                if let Some(sample) = event.action_pointer() {
                    self.on_down(state, sample);
                }
                GestureResult::Unchanged
            }
            TouchPhase::Move => self.on_move(state, event, viewport),
            TouchPhase::Up | TouchPhase::Cancel => {
                if let Some(sample) = event.action_pointer() {
                    self.on_up(state, sample.id);
                }
                GestureResult::Unchanged
            }
        }
    }

    /// Record a pointer going down.
    ///
    /// # Arguments
    /// * `state` - Gesture state to update
    /// * `sample` - The pointer that made contact and where
    pub fn on_down(&self, state: &mut GestureState, sample: PointerSample) {
        let tracked = TrackedPointer {
            id: sample.id,
            last: sample.position,
        };
        if state.pointer_one.is_none() {
            debug!(id = sample.id.0, position = ?sample.position, "got pointer 1");
            state.pointer_one = Some(tracked);
        } else if state.pointer_two.is_none() {
            debug!(id = sample.id.0, position = ?sample.position, "got pointer 2");
            state.pointer_two = Some(tracked);
        } else {
            debug!(id = sample.id.0, "ignoring additional pointer");
        }
    }

    /// Process a move event.
    ///
    /// # Returns
    /// [`GestureResult::Redraw`] if a view value was adjusted.
    pub fn on_move(
        &self,
        state: &mut GestureState,
        event: &TouchEvent,
        viewport: Size,
    ) -> GestureResult {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return GestureResult::Unchanged;
        }
        match (state.pointer_one, state.pointer_two) {
            (Some(one), None) => Self::rotate(state, one, event, viewport),
            (Some(one), Some(two)) => self.pinch(state, one, two, event, viewport),
            _ => GestureResult::Unchanged,
        }
    }

    /// Record a pointer lifting or being canceled.
    ///
    /// # Returns
    /// `true` if `id` occupied a slot.
    pub fn on_up(&self, state: &mut GestureState, id: PointerId) -> bool {
        if state.pointer_one.is_some_and(|p| p.id == id) {
            debug!(promoted = ?state.pointer_two.map(|p| p.id.0), "promoting pointer 2 to pointer 1");
            state.pointer_one = state.pointer_two.take();
            state.tracking = Tracking::Unknown;
            true
        } else if state.pointer_two.is_some_and(|p| p.id == id) {
            debug!(id = id.0, "lost pointer 2");
            state.pointer_two = None;
            state.tracking = Tracking::Unknown;
            true
        } else {
            false
        }
    }

    fn rotate(
        state: &mut GestureState,
        one: TrackedPointer,
        event: &TouchEvent,
        viewport: Size,
    ) -> GestureResult {
        let Some(position) = event.position_of(one.id) else {
            return GestureResult::Unchanged;
        };
        let d = position - one.last;
        let drx = DEGREES_PER_VIEWPORT * (d.x / viewport.width);
        let dry = DEGREES_PER_VIEWPORT * (-d.y / viewport.height);
        // An x delta turns around the y axis and vice versa.
        state.add_rotation(drx, dry);
        trace!(dx = d.x, dy = d.y, drx, dry, "single pointer rotation");

        state.pointer_one = Some(TrackedPointer {
            id: one.id,
            last: position,
        });
        GestureResult::Redraw
    }

    fn pinch(
        &self,
        state: &mut GestureState,
        one: TrackedPointer,
        two: TrackedPointer,
        event: &TouchEvent,
        viewport: Size,
    ) -> GestureResult {
        let (Some(p_one), Some(p_two)) = (event.position_of(one.id), event.position_of(two.id))
        else {
            return GestureResult::Unchanged;
        };
        let d_one = p_one - one.last;
        let d_two = p_two - two.last;

        if state.tracking == Tracking::Unknown {
            state.tracking = self.classify(d_one, d_two);
            if state.tracking != Tracking::Unknown {
                debug!(tracking = ?state.tracking, "two pointer gesture locked");
            }
        }

        match state.tracking {
            Tracking::Unknown => return GestureResult::Unchanged,
            Tracking::Vertical => {
                let h = viewport.height;
                let delta = if p_one.y >= p_two.y {
                    d_one.y / h - d_two.y / h
                } else {
                    d_two.y / h - d_one.y / h
                };
                state.add_zoom(delta);
                trace!(delta, zoom = state.zoom, "pinch zoom");
            }
            Tracking::Horizontal => {
                let w = viewport.width;
                let delta = if p_one.x >= p_two.x {
                    d_one.x / w * SPACING_MAX - d_two.x / w * SPACING_MAX
                } else {
                    d_two.x / w * SPACING_MAX - d_one.x / w * SPACING_MAX
                };
                state.add_spacing(delta);
                trace!(delta, spacing = state.spacing, "pinch spacing");
            }
        }

        state.pointer_one = Some(TrackedPointer {
            id: one.id,
            last: p_one,
        });
        state.pointer_two = Some(TrackedPointer {
            id: two.id,
            last: p_two,
        });
        GestureResult::Redraw
    }

    fn classify(&self, d_one: Vec2, d_two: Vec2) -> Tracking {
        let adx = d_one.x.abs() + d_two.x.abs();
        let ady = d_one.y.abs() + d_two.y.abs();
        let threshold = self.config.touch_slop * 2.0;
        if adx <= threshold && ady <= threshold {
            Tracking::Unknown
        } else if adx > ady {
            Tracking::Horizontal
        } else {
            Tracking::Vertical
        }
    }
}
