// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row-major 3×3 projective transform of the plane.
//!
//! Tilting a flat layer toward or away from a pinhole camera is not an affine map:
//! parallel edges converge. This type covers exactly what the layer view needs
//! (compose, translate, scale, map points) and converts from [`Affine`] so that
//! per-layer offsets can be expressed with `kurbo` as usual.

use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};

/// A 3×3 matrix acting on homogeneous 2D points `[x, y, 1]`.
///
/// A point maps to `(m[0] x + m[1] y + m[2], m[3] x + m[4] y + m[5]) / (m[6] x + m[7] y + m[8])`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projective {
    /// Matrix coefficients, row by row.
    pub m: [f64; 9],
}

impl Projective {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Creates a transform from row-major coefficients.
    #[inline]
    #[must_use]
    pub const fn new(m: [f64; 9]) -> Self {
        Self { m }
    }

    /// A pure translation.
    #[inline]
    #[must_use]
    pub const fn translate(offset: Vec2) -> Self {
        Self {
            m: [1.0, 0.0, offset.x, 0.0, 1.0, offset.y, 0.0, 0.0, 1.0],
        }
    }

    /// A uniform scale by `factor` that keeps `center` fixed.
    #[must_use]
    pub fn scale_about(factor: f64, center: Point) -> Self {
        let c = center.to_vec2();
        Self::translate(c)
            * Self {
                m: [factor, 0.0, 0.0, 0.0, factor, 0.0, 0.0, 0.0, 1.0],
            }
            * Self::translate(-c)
    }

    /// Apply the transform to a point.
    ///
    /// Points on the line at infinity (`w == 0`) map to non-finite coordinates.
    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        let m = &self.m;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        Point::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / w,
            (m[3] * p.x + m[4] * p.y + m[5]) / w,
        )
    }

    /// Returns true if the bottom row is `[0, 0, 1]`.
    #[inline]
    #[must_use]
    pub fn is_affine(&self) -> bool {
        self.m[6] == 0.0 && self.m[7] == 0.0 && self.m[8] == 1.0
    }

    /// The equivalent [`Affine`], if this transform has no perspective part.
    #[must_use]
    pub fn as_affine(&self) -> Option<Affine> {
        let m = &self.m;
        self.is_affine()
            .then(|| Affine::new([m[0], m[3], m[1], m[4], m[2], m[5]]))
    }

    /// Is every coefficient [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|c| c.is_finite())
    }
}

impl Default for Projective {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Projective {
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            m: [a, c, e, b, d, f, 0.0, 0.0, 1.0],
        }
    }
}

impl Mul for Projective {
    type Output = Self;

    /// `self * rhs` applies `rhs` first.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [0.0_f64; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Self { m: out }
    }
}

impl Mul<Point> for Projective {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        self.map_point(rhs)
    }
}
