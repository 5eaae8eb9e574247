// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breadth-first rendering of a [`LayerTree`] through the pinhole camera.

use alloc::collections::VecDeque;

use kurbo::{Point, Rect, Size, Vec2};
use tracing::trace;
use understory_layer_gesture::{GestureState, ROTATION_MAX};
use understory_layer_stack::{ElementTree, LayerIdx, LayerTree};

use crate::camera::{Camera, view_matrix};
use crate::labels::{LabelCache, NameLookup};
use crate::surface::{Chrome, SaveGuard, Surface};

bitflags::bitflags! {
    /// What the renderer draws for each layer besides its outline.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DrawOptions: u8 {
        /// The element's own contents, through [`DrawElement::draw`].
        const CONTENTS = 1 << 0;
        /// A name label resolved from the element's resource id.
        const LABELS = 1 << 1;
    }
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self::CONTENTS
    }
}

/// A host tree whose elements can draw themselves onto a surface of type `S`.
///
/// `draw` paints the element's own contents in its local coordinates, with the
/// origin at the element's top-left corner. It is called while the element is
/// suppressed, so it must not depend on the element's visibility flag; children
/// are suppressed too and are drawn separately on their own layers.
pub trait DrawElement<S: Surface + ?Sized>: ElementTree {
    /// Paint the contents of `id` onto `surface`.
    fn draw(&self, id: Self::Id, surface: &mut S);
}

/// Draws every layer of a [`LayerTree`] as a fanned-out stack.
///
/// The renderer owns the camera, the scaled chrome paint, the label cache, and a
/// worklist that is reused between passes.
#[derive(Debug)]
pub struct Renderer {
    camera: Camera,
    chrome: Chrome,
    density: f64,
    labels: LabelCache,
    worklist: VecDeque<LayerIdx>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Camera::default(), Chrome::default(), 1.0)
    }
}

impl Renderer {
    /// Create a renderer. `chrome` is given in density-independent pixels.
    pub fn new(camera: Camera, chrome: Chrome, density: f64) -> Self {
        Self {
            camera,
            chrome: chrome.scaled(density),
            density,
            labels: LabelCache::new(),
            worklist: VecDeque::new(),
        }
    }

    /// The camera in use.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The chrome paint, already scaled to physical pixels.
    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Replace the chrome paint; `chrome` is given in density-independent pixels.
    pub fn set_chrome(&mut self, chrome: Chrome) {
        self.chrome = chrome.scaled(self.density);
    }

    /// Display density: physical pixels per density-independent pixel.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Cached labels.
    pub fn labels(&self) -> &LabelCache {
        &self.labels
    }

    /// Drop all cached labels.
    pub fn clear_labels(&mut self) {
        self.labels.clear();
    }

    /// Draw `layers` onto `surface`.
    ///
    /// The surface's transform is restored before returning. Neither `state` nor
    /// `layers` is modified.
    ///
    /// # Panics
    ///
    /// Panics if a previous pass left nodes in the worklist, which can only happen if
    /// that pass unwound out of a host draw call.
    pub fn render<S, T>(
        &mut self,
        surface: &mut S,
        host: &T,
        layers: &LayerTree<T::Id>,
        state: &GestureState,
        options: DrawOptions,
        viewport: Size,
        lookup: &dyn NameLookup,
    ) where
        S: Surface + ?Sized,
        T: DrawElement<S> + ?Sized,
    {
        assert!(
            self.worklist.is_empty(),
            "layer worklist must be empty at the start of a pass"
        );

        let mut frame = SaveGuard::new(surface);
        frame.concat(&view_matrix(&self.camera, state, viewport));

        let root_origin = host.bounds(layers.root().element).origin();
        // Scale the per-level offset by how far the model is turned.
        let step = state.spacing * self.density;
        let show = Vec2::new(state.rotation_y / ROTATION_MAX, state.rotation_x / ROTATION_MAX);

        self.worklist
            .extend(layers.root().children().iter().copied());
        let mut drawn = 0_usize;
        while let Some(idx) = self.worklist.pop_front() {
            let node = layers.node(idx);
            let bounds = host.bounds(node.element);
            {
                let mut layer = SaveGuard::new(&mut *frame);
                let depth = f64::from(node.level) * step;
                layer.translate(Vec2::new(depth * show.x, -depth * show.y));
                layer.translate(bounds.origin() - root_origin);

                layer.stroke_rect(Rect::from_origin_size(Point::ZERO, bounds.size()), &self.chrome);
                if options.contains(DrawOptions::CONTENTS) {
                    host.draw(node.element, &mut *layer);
                }
                if options.contains(DrawOptions::LABELS)
                    && let Some(id) = host.resource_id(node.element)
                {
                    let text = self.labels.label(id, lookup);
                    layer.fill_text(text, self.chrome.label_origin(), &self.chrome);
                }
            }
            self.worklist.extend(node.children().iter().copied());
            drawn += 1;
        }
        trace!(drawn, max_level = layers.max_level(), "rendered layer stack");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::NoNames;
    use crate::projective::Projective;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use understory_layer_stack::{ElementArena, ElementDesc, ElementId, ResourceId};

    #[derive(Clone, Debug, PartialEq)]
    enum Cmd {
        Stroke { at: Projective, rect: Rect },
        Text { text: String, origin: Point },
        Contents(ElementId),
    }

    #[derive(Default)]
    struct Recorder {
        current: Projective,
        saved: Vec<Projective>,
        cmds: Vec<Cmd>,
    }

    impl Surface for Recorder {
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

        fn stroke_rect(&mut self, rect: Rect, _: &Chrome) {
            self.cmds.push(Cmd::Stroke {
                at: self.current,
                rect,
            });
        }

        fn fill_text(&mut self, text: &str, origin: Point, _: &Chrome) {
            self.cmds.push(Cmd::Text {
                text: text.to_string(),
                origin,
            });
        }
    }

    impl DrawElement<Recorder> for ElementArena {
        fn draw(&self, id: ElementId, surface: &mut Recorder) {
            surface.cmds.push(Cmd::Contents(id));
        }
    }

    fn desc(x0: f64, y0: f64, x1: f64, y1: f64) -> ElementDesc {
        ElementDesc {
            bounds: Rect::new(x0, y0, x1, y1),
            ..ElementDesc::default()
        }
    }

    fn close(a: &Projective, b: &Projective) -> bool {
        a.m.iter().zip(b.m.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    /// root
    /// ├── a (overlaps b)
    /// │   └── a1
    /// └── b
    fn scene() -> (ElementArena, [ElementId; 4]) {
        let mut arena = ElementArena::new();
        let root = arena.insert(None, desc(10.0, 20.0, 410.0, 620.0));
        let a = arena.insert(Some(root), desc(10.0, 20.0, 410.0, 120.0));
        let a1 = arena.insert(Some(a), desc(30.0, 40.0, 90.0, 80.0));
        let b = arena.insert(
            Some(root),
            ElementDesc {
                bounds: Rect::new(10.0, 100.0, 410.0, 300.0),
                resource_id: Some(ResourceId(0x2a)),
                ..ElementDesc::default()
            },
        );
        (arena, [root, a, a1, b])
    }

    fn strokes(r: &Recorder) -> Vec<Rect> {
        r.cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::Stroke { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn draws_breadth_first_and_restores() {
        let (arena, [root, a, a1, b]) = scene();
        let layers = LayerTree::snapshot(&arena, root);
        let mut renderer = Renderer::default();
        let mut surface = Recorder::default();

        renderer.render(
            &mut surface,
            &arena,
            &layers,
            &GestureState::new(),
            DrawOptions::CONTENTS,
            Size::new(400.0, 600.0),
            &NoNames,
        );

        let contents: Vec<_> = surface
            .cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::Contents(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(contents, [a, b, a1], "siblings before grandchildren");
        assert!(!contents.contains(&root), "the root is never drawn");
        assert_eq!(
            strokes(&surface),
            [
                Rect::new(0.0, 0.0, 400.0, 100.0),
                Rect::new(0.0, 0.0, 400.0, 200.0),
                Rect::new(0.0, 0.0, 60.0, 40.0),
            ],
            "outlines use local coordinates"
        );
        assert_eq!(surface.current, Projective::IDENTITY);
        assert!(surface.saved.is_empty());
        assert!(renderer.worklist.is_empty());
    }

    #[test]
    fn layers_are_offset_by_level_and_position() {
        let (arena, [root, _, _, b]) = scene();
        let layers = LayerTree::snapshot(&arena, root);
        let mut renderer = Renderer::new(Camera::default(), Chrome::default(), 2.0);
        let mut surface = Recorder::default();
        let mut state = GestureState::new();
        state.rotation_x = -30.0;
        state.rotation_y = 45.0;
        state.spacing = 20.0;
        let viewport = Size::new(400.0, 600.0);

        renderer.render(
            &mut surface,
            &arena,
            &layers,
            &state,
            DrawOptions::empty(),
            viewport,
            &NoNames,
        );

        let view = view_matrix(&Camera::default(), &state, viewport);
        assert_eq!(layers.level_of(b), Some(2), "b is pushed past a's subtree");
        // Level 2 (b): step = 20 * 2 = 40, tx = 80 * 0.75 = 60, ty = 80 * -0.5 = -40 -> (60, 40).
        let expected_b = view
            * Projective::translate(Vec2::new(60.0, 40.0))
            * Projective::translate(Vec2::new(0.0, 80.0));
        // Level 1 (a1): tx = 40 * 0.75 = 30, ty = -20 -> (30, 20), positioned relative to the root.
        let expected_a1 = view
            * Projective::translate(Vec2::new(30.0, 20.0))
            * Projective::translate(Vec2::new(20.0, 20.0));
        let ats: Vec<_> = surface
            .cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::Stroke { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(ats.len(), 3);
        assert!(close(&ats[0], &view), "level 0 at the root origin has no offset");
        assert!(close(&ats[1], &expected_b));
        assert!(close(&ats[2], &expected_a1));
        assert!(
            !surface.cmds.iter().any(|c| matches!(c, Cmd::Contents(_))),
            "contents are skipped when not requested"
        );
    }

    #[test]
    fn labels_only_for_elements_with_ids() {
        let (arena, [root, ..]) = scene();
        let layers = LayerTree::snapshot(&arena, root);
        let mut renderer = Renderer::default();
        let mut surface = Recorder::default();
        let lookup = |id: ResourceId| (id.0 == 0x2a).then(|| "content".to_string());

        for _ in 0..2 {
            renderer.render(
                &mut surface,
                &arena,
                &layers,
                &GestureState::new(),
                DrawOptions::CONTENTS | DrawOptions::LABELS,
                Size::new(400.0, 600.0),
                &lookup,
            );
        }
        let texts: Vec<_> = surface
            .cmds
            .iter()
            .filter_map(|c| match c {
                Cmd::Text { text, origin } => Some((text.as_str(), *origin)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            [("content", Point::new(2.0, 10.0)), ("content", Point::new(2.0, 10.0))]
        );
        assert_eq!(renderer.labels().len(), 1);
    }

    #[test]
    fn unresolved_label_falls_back_to_hex() {
        let (arena, [root, ..]) = scene();
        let layers = LayerTree::snapshot(&arena, root);
        let mut renderer = Renderer::default();
        let mut surface = Recorder::default();
        renderer.render(
            &mut surface,
            &arena,
            &layers,
            &GestureState::new(),
            DrawOptions::LABELS,
            Size::new(400.0, 600.0),
            &NoNames,
        );
        assert!(surface.cmds.contains(&Cmd::Text {
            text: "0x      2a".to_string(),
            origin: Point::new(2.0, 10.0),
        }));
    }

    #[test]
    fn empty_tree_draws_nothing() {
        let mut arena = ElementArena::new();
        let root = arena.insert(None, desc(0.0, 0.0, 10.0, 10.0));
        let layers = LayerTree::snapshot(&arena, root);
        let mut surface = Recorder::default();
        Renderer::default().render(
            &mut surface,
            &arena,
            &layers,
            &GestureState::new(),
            DrawOptions::all(),
            Size::new(10.0, 10.0),
            &NoNames,
        );
        assert!(surface.cmds.is_empty());
        assert_eq!(surface.current, Projective::IDENTITY);
    }
}
