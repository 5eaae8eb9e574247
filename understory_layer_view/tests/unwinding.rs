// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Behavior when a host draw call panics in the middle of a pass.

use std::panic::{self, AssertUnwindSafe};

use kurbo::{Point, Rect, Size};
use understory_layer_gesture::GestureState;
use understory_layer_stack::{ElementArena, ElementDesc, ElementId, ElementTree, LayerTree, ResourceId};
use understory_layer_view::{
    Chrome, DrawElement, DrawOptions, Inspector, InspectorConfig, NoNames, Projective, Renderer,
    Surface,
};

/// A host whose `failing` element panics when asked to draw.
struct Fragile {
    arena: ElementArena,
    failing: Option<ElementId>,
}

impl ElementTree for Fragile {
    type Id = ElementId;

    fn children(&self, id: ElementId) -> &[ElementId] {
        self.arena.children(id)
    }

    fn bounds(&self, id: ElementId) -> Rect {
        self.arena.bounds(id)
    }

    fn is_visible(&self, id: ElementId) -> bool {
        self.arena.is_visible(id)
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.arena.set_visible(id, visible);
    }

    fn resource_id(&self, id: ElementId) -> Option<ResourceId> {
        self.arena.resource_id(id)
    }
}

impl DrawElement<Blank> for Fragile {
    fn draw(&self, id: ElementId, _: &mut Blank) {
        if self.failing == Some(id) {
            panic!("element {id:?} failed to draw");
        }
    }
}

#[derive(Default)]
struct Blank {
    depth: usize,
}

impl Surface for Blank {
    fn save(&mut self) -> usize {
        self.depth += 1;
        self.depth - 1
    }

    fn restore_to_count(&mut self, count: usize) {
        self.depth = count;
    }

    fn concat(&mut self, _: &Projective) {}

    fn stroke_rect(&mut self, _: Rect, _: &Chrome) {}

    fn fill_text(&mut self, _: &str, _: Point, _: &Chrome) {}
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> ElementDesc {
    ElementDesc {
        bounds: Rect::new(x0, y0, x1, y1),
        ..ElementDesc::default()
    }
}

/// Root with two overlapping children; the first has a child of its own.
fn scene() -> (Fragile, ElementId, [ElementId; 3]) {
    let mut arena = ElementArena::new();
    let root = arena.insert(None, rect(0.0, 0.0, 200.0, 200.0));
    let first = arena.insert(Some(root), rect(0.0, 0.0, 200.0, 80.0));
    let leaf = arena.insert(Some(first), rect(10.0, 10.0, 40.0, 40.0));
    let second = arena.insert(Some(root), rect(0.0, 60.0, 200.0, 140.0));
    let host = Fragile {
        arena,
        failing: None,
    };
    (host, root, [first, leaf, second])
}

fn visibility(host: &Fragile) -> Vec<bool> {
    host.arena.ids().map(|id| host.arena.is_visible(id)).collect()
}

#[test]
fn session_restores_visibility_when_draw_unwinds() {
    let (mut host, root, [first, leaf, _]) = scene();
    host.failing = Some(leaf);
    let before = visibility(&host);
    let mut inspector = Inspector::new(InspectorConfig::default());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut session = inspector.session(&mut host, root);
        assert!(!session.host().is_visible(first), "wrapped while the session is open");
        session.draw(&mut Blank::default(), Size::new(200.0, 200.0), &NoNames);
    }));

    assert!(outcome.is_err(), "the failing element panics");
    assert_eq!(visibility(&host), before, "every wrapped element is visible again");
    assert!(!inspector.is_interaction_enabled());
}

#[test]
fn session_dropped_early_restores_visibility() {
    let (mut host, root, [first, leaf, second]) = scene();
    let mut inspector = Inspector::new(InspectorConfig::default());
    {
        let session = inspector.session(&mut host, root);
        assert_eq!(session.layers().map(LayerTree::len), Some(4));
    }
    assert!(host.is_visible(first) && host.is_visible(leaf) && host.is_visible(second));
}

#[test]
#[should_panic(expected = "layer worklist must be empty at the start of a pass")]
fn pass_after_unwound_pass_is_rejected() {
    let (mut host, root, [first, _, _]) = scene();
    host.failing = Some(first);
    let layers = LayerTree::snapshot(&host, root);
    let state = GestureState::new();
    let viewport = Size::new(200.0, 200.0);
    let mut renderer = Renderer::default();

    // The second root child is still queued when the first one panics.
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        renderer.render(
            &mut Blank::default(),
            &host,
            &layers,
            &state,
            DrawOptions::CONTENTS,
            viewport,
            &NoNames,
        );
    }));
    assert!(unwound.is_err(), "the first root child panics");

    host.failing = None;
    renderer.render(
        &mut Blank::default(),
        &host,
        &layers,
        &state,
        DrawOptions::CONTENTS,
        viewport,
        &NoNames,
    );
}
