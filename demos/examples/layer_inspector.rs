// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless exploded-view inspection of a small screen.
//!
//! This example shows how to combine:
//! - `understory_layer_stack` for the host element tree and level assignment,
//! - `understory_layer_gesture` touch events to rotate, zoom, and spread the stack,
//! - `understory_layer_view` to draw it onto a surface that prints what it is asked to do.
//!
//! Run:
//! - `cargo run -p understory_demos --example layer_inspector`

use std::collections::HashMap;

use kurbo::{Point, Rect, Size};
use tracing::Level;
use understory_layer_gesture::{PointerId, PointerSample, TouchEvent, TouchPhase};
use understory_layer_stack::{ElementArena, ElementDesc, ElementId, ElementTree, ResourceId};
use understory_layer_view::{
    Chrome, DrawElement, Inspector, InspectorConfig, LookupError, NameLookup, Projective, Surface,
};

/// The host: an element arena plus a fill color per element.
struct Screen {
    elements: ElementArena,
    fills: HashMap<ElementId, u32>,
}

impl Screen {
    fn add(&mut self, parent: Option<ElementId>, bounds: Rect, fill: u32, id: Option<u32>) -> ElementId {
        let element = self.elements.insert(
            parent,
            ElementDesc {
                bounds,
                resource_id: id.map(ResourceId),
                ..ElementDesc::default()
            },
        );
        self.fills.insert(element, fill);
        element
    }
}

impl ElementTree for Screen {
    type Id = ElementId;

    fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.children(id)
    }

    fn bounds(&self, id: ElementId) -> Rect {
        self.elements.bounds(id)
    }

    fn is_visible(&self, id: ElementId) -> bool {
        self.elements.is_visible(id)
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.elements.set_visible(id, visible);
    }

    fn resource_id(&self, id: ElementId) -> Option<ResourceId> {
        self.elements.resource_id(id)
    }
}

impl DrawElement<Printer> for Screen {
    fn draw(&self, id: ElementId, surface: &mut Printer) {
        let size = self.bounds(id).size();
        let fill = self.fills.get(&id).copied().unwrap_or(0xFFFF_FFFF);
        let quad = surface.project(Rect::from_origin_size(Point::ZERO, size));
        println!("    fill   #{fill:08x} {quad}");
    }
}

/// A surface that tracks its transform and prints every draw call in device space.
#[derive(Default)]
struct Printer {
    current: Projective,
    saved: Vec<Projective>,
}

impl Printer {
    fn project(&self, rect: Rect) -> String {
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        corners
            .iter()
            .map(|&p| {
                let q = self.current.map_point(p);
                format!("({:.1}, {:.1})", q.x, q.y)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Surface for Printer {
    fn save(&mut self) -> usize {
        self.saved.push(self.current);
        self.saved.len() - 1
    }

    fn restore_to_count(&mut self, count: usize) {
        while self.saved.len() > count {
            if let Some(saved) = self.saved.pop() {
                self.current = saved;
            }
        }
    }

    fn concat(&mut self, transform: &Projective) {
        self.current = self.current * *transform;
    }

    fn stroke_rect(&mut self, rect: Rect, chrome: &Chrome) {
        println!("  stroke #{:08x} {}", chrome.color, self.project(rect));
    }

    fn fill_text(&mut self, text: &str, origin: Point, _: &Chrome) {
        let at = self.current.map_point(origin);
        println!("    label {text:?} at ({:.1}, {:.1})", at.x, at.y);
    }
}

/// Resource names known to the host; anything else falls back to hex.
struct Names(HashMap<u32, &'static str>);

impl NameLookup for Names {
    fn entry_name(&self, id: ResourceId) -> Result<String, LookupError> {
        self.0
            .get(&id.0)
            .map(|name| (*name).to_string())
            .ok_or(LookupError::NotFound(id))
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    // A phone-sized screen: toolbar, a card overlapping it, a badge on the card, and a hidden dialog.
    let mut screen = Screen {
        elements: ElementArena::new(),
        fills: HashMap::new(),
    };
    let root = screen.add(None, Rect::new(0.0, 0.0, 360.0, 640.0), 0xFFFA_FAFA, None);
    let toolbar = screen.add(Some(root), Rect::new(0.0, 0.0, 360.0, 56.0), 0xFF3F_51B5, Some(0x7f0a_0001));
    let card = screen.add(Some(root), Rect::new(16.0, 40.0, 344.0, 240.0), 0xFFFF_FFFF, Some(0x7f0a_0002));
    screen.add(Some(card), Rect::new(300.0, 48.0, 336.0, 84.0), 0xFFE9_1E63, Some(0x7f0a_0003));
    screen.add(Some(root), Rect::new(16.0, 400.0, 344.0, 600.0), 0xFF9E_9E9E, None);
    let dialog = screen.add(Some(root), Rect::new(40.0, 200.0, 320.0, 440.0), 0xFF00_0000, None);
    screen.set_visible(dialog, false);

    let names = Names(HashMap::from([(0x7f0a_0001, "toolbar"), (0x7f0a_0002, "card")]));
    let viewport = Size::new(360.0, 640.0);
    let mut inspector = Inspector::new(InspectorConfig::default().with_density(2.0));

    inspector.set_interaction_enabled(&mut screen, root, true);
    inspector.set_draw_labels(true);
    if let Some(layers) = inspector.layers() {
        for (_, node) in layers.iter_breadth_first() {
            println!("{:?} -> level {} (spans {})", node.element, node.level, node.span_layers);
        }
    }
    println!("toolbar suppressed: {}", !screen.is_visible(toolbar));

    // One finger drags right: the stack turns around its vertical axis.
    let finger = PointerId(0);
    for event in [
        TouchEvent::single(TouchPhase::Down, finger, Point::new(100.0, 300.0)),
        TouchEvent::single(TouchPhase::Move, finger, Point::new(160.0, 300.0)),
        TouchEvent::single(TouchPhase::Up, finger, Point::new(160.0, 300.0)),
    ] {
        inspector.on_touch(&event, viewport);
    }

    // Two fingers spread horizontally: the layers move apart.
    let (a, b) = (PointerId(1), PointerId(2));
    let spread = [
        TouchEvent::single(TouchPhase::Down, a, Point::new(150.0, 320.0)),
        TouchEvent::with_action(
            TouchPhase::Down,
            1,
            [
                PointerSample::new(a, Point::new(150.0, 320.0)),
                PointerSample::new(b, Point::new(210.0, 320.0)),
            ],
        ),
        TouchEvent::moved([
            PointerSample::new(a, Point::new(120.0, 322.0)),
            PointerSample::new(b, Point::new(240.0, 321.0)),
        ]),
        TouchEvent::moved([
            PointerSample::new(a, Point::new(90.0, 322.0)),
            PointerSample::new(b, Point::new(270.0, 321.0)),
        ]),
        TouchEvent::with_action(
            TouchPhase::Up,
            0,
            [
                PointerSample::new(a, Point::new(90.0, 322.0)),
                PointerSample::new(b, Point::new(270.0, 321.0)),
            ],
        ),
        TouchEvent::single(TouchPhase::Up, b, Point::new(270.0, 321.0)),
    ];
    for event in &spread {
        inspector.on_touch(event, viewport);
    }

    let state = inspector.gesture_state();
    println!(
        "rotation ({:.1}, {:.1}) zoom {:.2} spacing {:.1}",
        state.rotation_x, state.rotation_y, state.zoom, state.spacing
    );

    let mut surface = Printer::default();
    println!("frame:");
    inspector.draw(&mut surface, &screen, viewport, &names);

    inspector.set_interaction_enabled(&mut screen, root, false);
    println!(
        "restored: toolbar visible {}, dialog visible {}",
        screen.is_visible(toolbar),
        screen.is_visible(dialog)
    );
}
