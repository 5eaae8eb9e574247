// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinhole camera and the view matrix of the exploded stack.

use core::f64::consts::PI;

use kurbo::{Point, Size};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use understory_layer_gesture::GestureState;

use crate::projective::Projective;

/// Default camera distance: 8 inches at 72 points per inch.
pub const DEFAULT_CAMERA_DISTANCE: f64 = 576.0;

/// A pinhole camera looking at the z = 0 plane from `distance` pixels in front of it.
///
/// Rotations are applied about the plane's origin, so callers center the plane on the
/// point they want to pivot around first (see [`view_matrix`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Distance from the eye to the plane, in pixels. Must be positive.
    pub distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            distance: DEFAULT_CAMERA_DISTANCE,
        }
    }
}

impl Camera {
    /// A camera at the given distance.
    pub fn new(distance: f64) -> Self {
        debug_assert!(distance > 0.0, "camera distance must be positive");
        Self { distance }
    }

    /// Projection of the plane after rotating it `rotation_y` degrees about the Y axis
    /// and then `rotation_x` degrees about the X axis (`Rx * Ry` applied to points).
    ///
    /// Positive `rotation_y` swings the right side (positive x) away from the eye.
    /// Positive `rotation_x` swings the lower side (positive y) away.
    #[must_use]
    pub fn projection(&self, rotation_x: f64, rotation_y: f64) -> Projective {
        let (sa, ca) = sin_cos(rotation_x * (PI / 180.0));
        let (sb, cb) = sin_cos(rotation_y * (PI / 180.0));
        let d = self.distance;

        // Rotate (x, y, 0) about Y, then about X:
        //   X = cb x
        //   Y = ca y - sa sb x
        //   Z = sa y + ca sb x
        // and project with x' = X d / (d + Z), y' = Y d / (d + Z).
        Projective::new([
            cb,
            0.0,
            0.0,
            -sa * sb,
            ca,
            0.0,
            ca * sb / d,
            sa / d,
            1.0,
        ])
    }
}

/// The full transform applied to the surface before any layer is drawn.
///
/// The projection pivots around the viewport center `c` and the zoom scales about
/// the same point: `T(c) * P * T(-c) * S_c(zoom)`.
#[must_use]
pub fn view_matrix(camera: &Camera, state: &GestureState, viewport: Size) -> Projective {
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    let c = center.to_vec2();
    let pivot = Projective::translate(c)
        * camera.projection(state.rotation_x, state.rotation_y)
        * Projective::translate(-c);
    pivot * Projective::scale_about(state.zoom, center)
}

#[cfg(feature = "std")]
fn sin_cos(radians: f64) -> (f64, f64) {
    radians.sin_cos()
}

#[cfg(not(feature = "std"))]
fn sin_cos(radians: f64) -> (f64, f64) {
    (radians.sin(), radians.cos())
}
