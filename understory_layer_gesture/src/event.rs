// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch input as delivered by the host.

use kurbo::Point;
use smallvec::SmallVec;

/// Host-assigned pointer identifier, stable for the duration of one contact.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PointerId(pub u32);

/// Phase of a touch event.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchPhase {
    /// A pointer made contact.
    Down,
    /// One or more pointers moved.
    Move,
    /// A pointer lifted.
    Up,
    /// The host aborted a pointer.
    Cancel,
}

/// Position of one pointer within a touch event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Which pointer.
    pub id: PointerId,
    /// Position in viewport coordinates.
    pub position: Point,
}

impl PointerSample {
    /// Create a sample.
    pub fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// One touch event: a phase, the pointer it concerns, and every pointer currently down.
///
/// `pointers[action_index]` is the pointer that went down or up for
/// [`TouchPhase::Down`], [`TouchPhase::Up`], and [`TouchPhase::Cancel`]. For
/// [`TouchPhase::Move`], `action_index` is ignored and each tracked pointer is
/// looked up by id.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    /// Event phase.
    pub phase: TouchPhase,
    /// Index into `pointers` of the acting pointer.
    pub action_index: usize,
    /// All pointers in contact, including the acting one.
    pub pointers: SmallVec<[PointerSample; 2]>,
}

impl TouchEvent {
    /// A single-pointer event of the given phase.
    pub fn single(phase: TouchPhase, id: PointerId, position: Point) -> Self {
        let mut pointers = SmallVec::new();
        pointers.push(PointerSample::new(id, position));
        Self {
            phase,
            action_index: 0,
            pointers,
        }
    }

    /// A move event carrying every listed pointer.
    pub fn moved(pointers: impl IntoIterator<Item = PointerSample>) -> Self {
        Self {
            phase: TouchPhase::Move,
            action_index: 0,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// An event whose acting pointer is `pointers[action_index]`.
    pub fn with_action(
        phase: TouchPhase,
        action_index: usize,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self {
            phase,
            action_index,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// The acting pointer, if `action_index` is in range.
    pub fn action_pointer(&self) -> Option<PointerSample> {
        self.pointers.get(self.action_index).copied()
    }

    /// Current position of pointer `id`, if it is part of this event.
    pub fn position_of(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }
}
