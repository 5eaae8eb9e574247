// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface the layer view renders onto.

use core::ops::{Deref, DerefMut};

use kurbo::{Point, Rect, Vec2};

use crate::projective::Projective;

/// Capabilities the renderer needs from a 2D canvas.
///
/// The surface keeps a current transform and a stack of saved states, like most
/// immediate-mode canvases. Every draw call is interpreted in the current transform.
pub trait Surface {
    /// Push the current transform; returns the stack depth before the push.
    fn save(&mut self) -> usize;

    /// Pop saved states until the stack depth equals `count`.
    fn restore_to_count(&mut self, count: usize);

    /// Pre-multiply the current transform by `transform`.
    fn concat(&mut self, transform: &Projective);

    /// Stroke the outline of `rect` with the chrome paint.
    fn stroke_rect(&mut self, rect: Rect, chrome: &Chrome);

    /// Draw `text` with its baseline starting at `origin`, using the chrome paint.
    fn fill_text(&mut self, text: &str, origin: Point, chrome: &Chrome);

    /// Translate the current transform.
    fn translate(&mut self, offset: Vec2) {
        self.concat(&Projective::translate(offset));
    }
}

/// Paint used for layer outlines and labels.
///
/// Sizes are in density-independent pixels until [`Chrome::scaled`] is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chrome {
    /// Outline and text color, `0xAARRGGBB`.
    pub color: u32,
    /// Color of the one pixel drop shadow under outlines and text, `0xAARRGGBB`.
    pub shadow_color: u32,
    /// Label text size.
    pub text_size: f64,
    /// Horizontal inset of labels from the left edge of their element.
    pub text_offset: f64,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            color: 0xFF88_8888,
            shadow_color: 0xFF00_0000,
            text_size: 10.0,
            text_offset: 2.0,
        }
    }
}

impl Chrome {
    /// The same paint with sizes converted to physical pixels.
    #[must_use]
    pub fn scaled(self, density: f64) -> Self {
        Self {
            text_size: self.text_size * density,
            text_offset: self.text_offset * density,
            ..self
        }
    }

    /// Where a label for an element is drawn, in the element's local coordinates.
    pub fn label_origin(&self) -> Point {
        Point::new(self.text_offset, self.text_size)
    }
}

/// Scoped save of a [`Surface`]: restores the saved depth when dropped.
#[derive(Debug)]
pub struct SaveGuard<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    count: usize,
}

impl<'a, S: Surface + ?Sized> SaveGuard<'a, S> {
    /// Save `surface` and return a guard that restores it.
    pub fn new(surface: &'a mut S) -> Self {
        let count = surface.save();
        Self { surface, count }
    }

    /// Stack depth the surface returns to on drop.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<S: Surface + ?Sized> Deref for SaveGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for SaveGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for SaveGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore_to_count(self.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Stack {
        current: Projective,
        saved: Vec<Projective>,
    }

    impl Surface for Stack {
        fn save(&mut self) -> usize {
            self.saved.push(self.current);
            self.saved.len() - 1
        }

        fn restore_to_count(&mut self, count: usize) {
            while self.saved.len() > count {
                if let Some(t) = self.saved.pop() {
                    self.current = t;
                }
            }
        }

        fn concat(&mut self, transform: &Projective) {
            self.current = self.current * *transform;
        }

        fn stroke_rect(&mut self, _: Rect, _: &Chrome) {}

        fn fill_text(&mut self, _: &str, _: Point, _: &Chrome) {}
    }

    #[test]
    fn guard_restores_transform() {
        let mut s = Stack::default();
        {
            let mut g = SaveGuard::new(&mut s);
            g.translate(Vec2::new(5.0, 5.0));
            {
                let mut inner = SaveGuard::new(&mut *g);
                inner.translate(Vec2::new(1.0, 0.0));
                assert_eq!(inner.count(), 1);
            }
            assert_eq!(g.current, Projective::translate(Vec2::new(5.0, 5.0)));
        }
        assert_eq!(s.current, Projective::IDENTITY);
        assert!(s.saved.is_empty());
    }

    #[test]
    fn chrome_scales_sizes_only() {
        let c = Chrome::default().scaled(3.0);
        assert_eq!(c.text_size, 30.0);
        assert_eq!(c.text_offset, 6.0);
        assert_eq!(c.color, 0xFF88_8888);
        assert_eq!(c.label_origin(), Point::new(6.0, 30.0));
    }
}
