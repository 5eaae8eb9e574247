// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Returns true if two rectangles share a region of positive area.
///
/// Rectangles that only touch along an edge or a corner do not overlap, and a
/// zero-area rectangle never overlaps anything.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    let i = a.intersect(b);
    i.width() > 0.0 && i.height() > 0.0
}
