// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture state and the ranges of the view values it drives.

use kurbo::Point;

use crate::event::PointerId;

/// Largest rotation around either axis, in degrees.
pub const ROTATION_MAX: f64 = 60.0;
/// Smallest rotation around either axis, in degrees.
pub const ROTATION_MIN: f64 = -ROTATION_MAX;
/// Initial rotation around the X axis, in degrees.
pub const ROTATION_DEFAULT_X: f64 = -10.0;
/// Initial rotation around the Y axis, in degrees.
pub const ROTATION_DEFAULT_Y: f64 = 15.0;
/// Initial zoom factor.
pub const ZOOM_DEFAULT: f64 = 0.6;
/// Smallest zoom factor.
pub const ZOOM_MIN: f64 = 0.33;
/// Largest zoom factor.
pub const ZOOM_MAX: f64 = 2.0;
/// Initial distance between layers, in density-independent pixels.
pub const SPACING_DEFAULT: f64 = 25.0;
/// Smallest distance between layers.
pub const SPACING_MIN: f64 = 10.0;
/// Largest distance between layers.
pub const SPACING_MAX: f64 = 100.0;

/// Axis a two-pointer gesture is interpreted along.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Tracking {
    /// Not enough movement yet to tell.
    #[default]
    Unknown,
    /// Vertical pinch: adjusts zoom.
    Vertical,
    /// Horizontal pinch: adjusts layer spacing.
    Horizontal,
}

/// A pointer occupying one of the two gesture slots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackedPointer {
    /// Pointer id.
    pub id: PointerId,
    /// Last position deltas were measured from.
    pub last: Point,
}

/// Everything a gesture mutates: pointer slots, tracking mode, and the four view values.
///
/// The view values are always within their ranges:
/// rotations in [`ROTATION_MIN`]..=[`ROTATION_MAX`], zoom in [`ZOOM_MIN`]..=[`ZOOM_MAX`],
/// and spacing in [`SPACING_MIN`]..=[`SPACING_MAX`].
#[derive(Clone, Debug, PartialEq)]
pub struct GestureState {
    /// First tracked pointer.
    pub pointer_one: Option<TrackedPointer>,
    /// Second tracked pointer; only set while `pointer_one` is.
    pub pointer_two: Option<TrackedPointer>,
    /// Two-pointer tracking mode.
    pub tracking: Tracking,
    /// Rotation around the X axis, in degrees.
    pub rotation_x: f64,
    /// Rotation around the Y axis, in degrees.
    pub rotation_y: f64,
    /// Uniform zoom factor.
    pub zoom: f64,
    /// Distance between layers, in density-independent pixels.
    pub spacing: f64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            pointer_one: None,
            pointer_two: None,
            tracking: Tracking::Unknown,
            rotation_x: ROTATION_DEFAULT_X,
            rotation_y: ROTATION_DEFAULT_Y,
            zoom: ZOOM_DEFAULT,
            spacing: SPACING_DEFAULT,
        }
    }
}

impl GestureState {
    /// Create a state with default view values and no pointers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset rotation, zoom, and spacing to their defaults. Pointer slots are kept.
    pub fn reset_view(&mut self) {
        let defaults = Self::default();
        self.rotation_x = defaults.rotation_x;
        self.rotation_y = defaults.rotation_y;
        self.zoom = defaults.zoom;
        self.spacing = defaults.spacing;
    }

    /// Number of occupied pointer slots (0, 1, or 2).
    pub fn active_pointers(&self) -> usize {
        usize::from(self.pointer_one.is_some()) + usize::from(self.pointer_two.is_some())
    }

    /// Returns true if `id` occupies a slot.
    pub fn is_tracking(&self, id: PointerId) -> bool {
        self.pointer_one.is_some_and(|p| p.id == id) || self.pointer_two.is_some_and(|p| p.id == id)
    }

    pub(crate) fn add_rotation(&mut self, drx: f64, dry: f64) {
        self.rotation_y = (self.rotation_y + drx).clamp(ROTATION_MIN, ROTATION_MAX);
        self.rotation_x = (self.rotation_x + dry).clamp(ROTATION_MIN, ROTATION_MAX);
    }

    pub(crate) fn add_zoom(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub(crate) fn add_spacing(&mut self, delta: f64) {
        self.spacing = (self.spacing + delta).clamp(SPACING_MIN, SPACING_MAX);
    }
}
