// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing inspector: one object a UI framework embeds to get the exploded view.

use core::fmt::Debug;

use kurbo::Size;
use tracing::{debug, info};
use understory_layer_gesture::{
    GestureConfig, GestureController, GestureResult, GestureState, TouchEvent,
};
use understory_layer_stack::{ElementTree, LayerTree, Suppression};

use crate::camera::{Camera, DEFAULT_CAMERA_DISTANCE};
use crate::labels::NameLookup;
use crate::render::{DrawElement, DrawOptions, Renderer};
use crate::surface::{Chrome, Surface};

/// Platform parameters for an [`Inspector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InspectorConfig {
    /// Physical pixels per density-independent pixel.
    pub density: f64,
    /// Platform touch slop, in physical pixels.
    pub touch_slop: f64,
    /// Pinhole camera distance, in pixels.
    pub camera_distance: f64,
    /// Outline and label paint, in density-independent pixels.
    pub chrome: Chrome,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            density: 1.0,
            touch_slop: GestureConfig::default().touch_slop,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            chrome: Chrome::default(),
        }
    }
}

impl InspectorConfig {
    /// The same configuration for a display of the given density.
    #[must_use]
    pub fn with_density(self, density: f64) -> Self {
        Self { density, ..self }
    }

    /// The same configuration with a different touch slop.
    #[must_use]
    pub fn with_touch_slop(self, touch_slop: f64) -> Self {
        Self { touch_slop, ..self }
    }
}

/// What the host should do with a touch event it offered to the inspector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TouchDisposition {
    /// The inspector took the event; it must not reach the host's own elements.
    Consumed(GestureResult),
    /// The inspector is disabled; dispatch the event normally.
    PassThrough,
}

/// What happened when the inspector was asked to draw.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DrawDisposition {
    /// The exploded view was drawn in place of the host's own pass.
    Rendered,
    /// The inspector is disabled; the host draws as usual.
    HostDefault,
}

#[derive(Debug)]
struct Active<Id: Copy + Eq + Debug> {
    layers: LayerTree<Id>,
    suppression: Suppression<Id>,
}

/// The exploded 3D view of a host element tree.
///
/// While enabled, the inspector hides every element below the chosen root from the
/// host's own drawing pass, consumes all touch input to steer the view, and draws the
/// stack itself. Disabling it restores each element's visibility before returning.
/// Use [`Inspector::session`] when that must also hold if the host unwinds.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layer_stack::{ElementArena, ElementDesc, ElementTree};
/// use understory_layer_view::{Inspector, InspectorConfig};
///
/// let mut arena = ElementArena::new();
/// let root = arena.insert(None, ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
///     ..ElementDesc::default()
/// });
/// let child = arena.insert(Some(root), ElementDesc {
///     bounds: Rect::new(10.0, 10.0, 50.0, 50.0),
///     ..ElementDesc::default()
/// });
///
/// let mut inspector = Inspector::new(InspectorConfig::default());
/// assert!(inspector.set_interaction_enabled(&mut arena, root, true));
/// assert!(!arena.is_visible(child));
///
/// inspector.set_interaction_enabled(&mut arena, root, false);
/// assert!(arena.is_visible(child));
/// ```
#[derive(Debug)]
pub struct Inspector<Id: Copy + Eq + Debug> {
    controller: GestureController,
    gestures: GestureState,
    renderer: Renderer,
    chrome: Chrome,
    options: DrawOptions,
    active: Option<Active<Id>>,
}

impl<Id: Copy + Eq + Debug> Inspector<Id> {
    /// Create a disabled inspector.
    pub fn new(config: InspectorConfig) -> Self {
        Self {
            controller: GestureController::new(GestureConfig::with_touch_slop(config.touch_slop)),
            gestures: GestureState::new(),
            renderer: Renderer::new(
                Camera::new(config.camera_distance),
                config.chrome,
                config.density,
            ),
            chrome: config.chrome,
            options: DrawOptions::default(),
            active: None,
        }
    }

    /// Turn the exploded view on or off for the subtree under `root`.
    ///
    /// Enabling builds the layers and suppresses the host's drawing of every element
    /// in them. Disabling restores the visibility of every suppressed element.
    ///
    /// Returns `true` if the state changed and the host should redraw.
    pub fn set_interaction_enabled<T>(&mut self, host: &mut T, root: Id, enabled: bool) -> bool
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        if enabled == self.is_interaction_enabled() {
            return false;
        }
        if enabled {
            let (layers, suppression) = LayerTree::build(host, root);
            info!(
                layers = layers.len() - 1,
                max_level = layers.max_level(),
                "layer interaction enabled"
            );
            self.active = Some(Active {
                layers,
                suppression,
            });
        } else {
            self.teardown(host);
        }
        true
    }

    /// Returns true while the exploded view is active.
    pub fn is_interaction_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Returns true if touch events should be routed to [`Inspector::on_touch`]
    /// instead of the host's elements.
    pub fn intercepts_touch(&self) -> bool {
        self.is_interaction_enabled()
    }

    /// Set whether layers draw their contents. When false, only outlines are shown.
    ///
    /// Returns `true` if the setting changed.
    pub fn set_draw_contents(&mut self, draw_contents: bool) -> bool {
        self.set_option(DrawOptions::CONTENTS, draw_contents)
    }

    /// Returns true when layers draw their contents.
    pub fn is_drawing_contents(&self) -> bool {
        self.options.contains(DrawOptions::CONTENTS)
    }

    /// Set whether layers draw name labels.
    ///
    /// Returns `true` if the setting changed.
    pub fn set_draw_labels(&mut self, draw_labels: bool) -> bool {
        self.set_option(DrawOptions::LABELS, draw_labels)
    }

    /// Returns true when layers draw name labels.
    pub fn is_drawing_labels(&self) -> bool {
        self.options.contains(DrawOptions::LABELS)
    }

    /// Current draw options.
    pub fn draw_options(&self) -> DrawOptions {
        self.options
    }

    /// Set the outline and label color, `0xAARRGGBB`.
    pub fn set_chrome_color(&mut self, color: u32) -> bool {
        self.update_chrome(Chrome {
            color,
            ..self.chrome
        })
    }

    /// Set the color of the drop shadow under outlines and labels, `0xAARRGGBB`.
    pub fn set_chrome_shadow_color(&mut self, shadow_color: u32) -> bool {
        self.update_chrome(Chrome {
            shadow_color,
            ..self.chrome
        })
    }

    /// Chrome paint in density-independent pixels.
    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// Feed one touch event.
    pub fn on_touch(&mut self, event: &TouchEvent, viewport: Size) -> TouchDisposition {
        if !self.is_interaction_enabled() {
            return TouchDisposition::PassThrough;
        }
        TouchDisposition::Consumed(self.controller.handle(&mut self.gestures, event, viewport))
    }

    /// Draw the exploded view onto `surface` if enabled.
    ///
    /// `host` must be the tree that was passed to [`Inspector::set_interaction_enabled`].
    pub fn draw<S, T>(
        &mut self,
        surface: &mut S,
        host: &T,
        viewport: Size,
        lookup: &dyn NameLookup,
    ) -> DrawDisposition
    where
        S: Surface + ?Sized,
        T: DrawElement<S, Id = Id> + ?Sized,
    {
        let Some(active) = &self.active else {
            return DrawDisposition::HostDefault;
        };
        self.renderer.render(
            surface,
            host,
            &active.layers,
            &self.gestures,
            self.options,
            viewport,
            lookup,
        );
        DrawDisposition::Rendered
    }

    /// Rebuild the layers after the host tree changed structurally.
    ///
    /// Visibility is restored before the rebuild so that suppressed elements are not
    /// mistaken for hidden ones, then suppressed again. Returns `false` if disabled.
    pub fn refresh_layers<T>(&mut self, host: &mut T) -> bool
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        let Some(active) = self.active.take() else {
            return false;
        };
        let root = active.layers.root().element;
        active.suppression.release(host);
        let (layers, suppression) = LayerTree::build(host, root);
        debug!(layers = layers.len() - 1, "layers refreshed");
        self.active = Some(Active {
            layers,
            suppression,
        });
        true
    }

    /// Disable the exploded view, restoring every suppressed element before returning.
    ///
    /// Safe to call when already disabled.
    pub fn teardown<T>(&mut self, host: &mut T)
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        if let Some(active) = self.active.take() {
            let restored = active.suppression.len();
            active.suppression.release(host);
            info!(restored, "layer interaction disabled");
        }
    }

    /// Enable the exploded view for `root` and bind it to `host` until the returned
    /// session is dropped.
    ///
    /// Dropping the session disables the view and restores every suppressed element,
    /// also when the host unwinds out of a draw or touch callback. Prefer this over
    /// [`Inspector::set_interaction_enabled`] whenever the host tree can stay borrowed
    /// for the whole inspection, since a plain [`Inspector`] dropped while enabled
    /// cannot reach the host and leaves its elements hidden.
    pub fn session<'a, T>(&'a mut self, host: &'a mut T, root: Id) -> InspectorSession<'a, Id, T>
    where
        T: ElementTree<Id = Id> + ?Sized,
    {
        self.teardown(host);
        self.set_interaction_enabled(host, root, true);
        InspectorSession {
            inspector: self,
            host,
        }
    }

    /// Gesture state: pointer slots and the current rotation, zoom, and spacing.
    pub fn gesture_state(&self) -> &GestureState {
        &self.gestures
    }

    /// Reset rotation, zoom, and spacing to their defaults.
    pub fn reset_view(&mut self) {
        self.gestures.reset_view();
    }

    /// The current layers, while enabled.
    pub fn layers(&self) -> Option<&LayerTree<Id>> {
        self.active.as_ref().map(|a| &a.layers)
    }

    /// The renderer, for inspecting its label cache and paint.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    fn set_option(&mut self, option: DrawOptions, on: bool) -> bool {
        if self.options.contains(option) == on {
            return false;
        }
        self.options.set(option, on);
        true
    }

    fn update_chrome(&mut self, chrome: Chrome) -> bool {
        if chrome == self.chrome {
            return false;
        }
        self.chrome = chrome;
        self.renderer.set_chrome(chrome);
        true
    }
}

/// An enabled [`Inspector`] bound to the host tree it suppresses.
///
/// Created by [`Inspector::session`]. The view is torn down when the session ends,
/// including during unwinding.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_layer_stack::{ElementArena, ElementDesc, ElementTree};
/// use understory_layer_view::{Inspector, InspectorConfig};
///
/// let mut arena = ElementArena::new();
/// let root = arena.insert(None, ElementDesc {
///     bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
///     ..ElementDesc::default()
/// });
/// let child = arena.insert(Some(root), ElementDesc::default());
///
/// let mut inspector = Inspector::new(InspectorConfig::default());
/// {
///     let session = inspector.session(&mut arena, root);
///     assert!(!session.host().is_visible(child));
/// }
/// assert!(arena.is_visible(child));
/// assert!(!inspector.is_interaction_enabled());
/// ```
pub struct InspectorSession<'a, Id, T>
where
    Id: Copy + Eq + Debug,
    T: ElementTree<Id = Id> + ?Sized,
{
    inspector: &'a mut Inspector<Id>,
    host: &'a mut T,
}

impl<Id, T> InspectorSession<'_, Id, T>
where
    Id: Copy + Eq + Debug,
    T: ElementTree<Id = Id> + ?Sized,
{
    /// The suppressed host tree.
    pub fn host(&self) -> &T {
        self.host
    }

    /// The bound inspector.
    pub fn inspector(&self) -> &Inspector<Id> {
        self.inspector
    }

    /// The current layers.
    pub fn layers(&self) -> Option<&LayerTree<Id>> {
        self.inspector.layers()
    }

    /// Feed one touch event. See [`Inspector::on_touch`].
    pub fn on_touch(&mut self, event: &TouchEvent, viewport: Size) -> TouchDisposition {
        self.inspector.on_touch(event, viewport)
    }

    /// Draw the exploded view of the bound host. See [`Inspector::draw`].
    pub fn draw<S>(&mut self, surface: &mut S, viewport: Size, lookup: &dyn NameLookup) -> DrawDisposition
    where
        S: Surface + ?Sized,
        T: DrawElement<S>,
    {
        self.inspector.draw(surface, &*self.host, viewport, lookup)
    }

    /// Rebuild the layers of the bound host. See [`Inspector::refresh_layers`].
    pub fn refresh_layers(&mut self) -> bool {
        self.inspector.refresh_layers(&mut *self.host)
    }

    /// Set whether layers draw their contents.
    pub fn set_draw_contents(&mut self, draw_contents: bool) -> bool {
        self.inspector.set_draw_contents(draw_contents)
    }

    /// Set whether layers draw name labels.
    pub fn set_draw_labels(&mut self, draw_labels: bool) -> bool {
        self.inspector.set_draw_labels(draw_labels)
    }

    /// Reset rotation, zoom, and spacing to their defaults.
    pub fn reset_view(&mut self) {
        self.inspector.reset_view();
    }
}

impl<Id, T> Drop for InspectorSession<'_, Id, T>
where
    Id: Copy + Eq + Debug,
    T: ElementTree<Id = Id> + ?Sized,
{
    fn drop(&mut self) {
        self.inspector.teardown(&mut *self.host);
    }
}

impl<Id, T> Debug for InspectorSession<'_, Id, T>
where
    Id: Copy + Eq + Debug,
    T: ElementTree<Id = Id> + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InspectorSession")
            .field("inspector", &self.inspector)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::NoNames;
    use crate::projective::Projective;
    use alloc::vec::Vec;
    use kurbo::{Point, Rect};
    use understory_layer_gesture::{PointerId, TouchPhase};
    use understory_layer_stack::{ElementArena, ElementDesc, ElementId};

    #[derive(Default)]
    struct Counter {
        depth: usize,
        outlines: usize,
        contents: Vec<ElementId>,
    }

    impl Surface for Counter {
        fn save(&mut self) -> usize {
            self.depth += 1;
            self.depth - 1
        }

        fn restore_to_count(&mut self, count: usize) {
            self.depth = count;
        }

        fn concat(&mut self, _: &Projective) {}

        fn stroke_rect(&mut self, _: Rect, _: &Chrome) {
            self.outlines += 1;
        }

        fn fill_text(&mut self, _: &str, _: Point, _: &Chrome) {}
    }

    impl DrawElement<Counter> for ElementArena {
        fn draw(&self, id: ElementId, surface: &mut Counter) {
            surface.contents.push(id);
        }
    }

    fn desc(x0: f64, y0: f64, x1: f64, y1: f64, visible: bool) -> ElementDesc {
        ElementDesc {
            bounds: Rect::new(x0, y0, x1, y1),
            visible,
            ..ElementDesc::default()
        }
    }

    fn scene() -> (ElementArena, ElementId, [ElementId; 3]) {
        let mut arena = ElementArena::new();
        let root = arena.insert(None, desc(0.0, 0.0, 300.0, 300.0, true));
        let a = arena.insert(Some(root), desc(0.0, 0.0, 300.0, 50.0, true));
        let b = arena.insert(Some(root), desc(0.0, 40.0, 300.0, 100.0, true));
        let hidden = arena.insert(Some(root), desc(0.0, 200.0, 300.0, 250.0, false));
        (arena, root, [a, b, hidden])
    }

    #[test]
    fn enable_and_disable_restore_visibility() {
        let (mut arena, root, [a, b, hidden]) = scene();
        let mut inspector = Inspector::new(InspectorConfig::default());

        assert!(inspector.set_interaction_enabled(&mut arena, root, true));
        assert!(!inspector.set_interaction_enabled(&mut arena, root, true), "no change");
        assert!(!arena.is_visible(a) && !arena.is_visible(b));
        assert!(arena.is_visible(root), "the root itself is never suppressed");
        let layers = inspector.layers().expect("enabled");
        assert_eq!(layers.level_of(b), Some(1));
        assert_eq!(layers.level_of(hidden), None);

        assert!(inspector.set_interaction_enabled(&mut arena, root, false));
        assert!(arena.is_visible(a) && arena.is_visible(b));
        assert!(!arena.is_visible(hidden));
        assert!(inspector.layers().is_none());
    }

    #[test]
    fn touches_pass_through_while_disabled() {
        let (mut arena, root, _) = scene();
        let mut inspector = Inspector::new(InspectorConfig::default());
        let viewport = Size::new(300.0, 300.0);
        let down = TouchEvent::single(TouchPhase::Down, PointerId(1), Point::new(10.0, 10.0));
        let drag = TouchEvent::single(TouchPhase::Move, PointerId(1), Point::new(40.0, 10.0));

        assert!(!inspector.intercepts_touch());
        assert_eq!(inspector.on_touch(&down, viewport), TouchDisposition::PassThrough);
        assert_eq!(inspector.gesture_state().active_pointers(), 0);

        inspector.set_interaction_enabled(&mut arena, root, true);
        assert!(inspector.intercepts_touch());
        assert_eq!(
            inspector.on_touch(&down, viewport),
            TouchDisposition::Consumed(GestureResult::Unchanged)
        );
        assert_eq!(
            inspector.on_touch(&drag, viewport),
            TouchDisposition::Consumed(GestureResult::Redraw)
        );
        assert!((inspector.gesture_state().rotation_y - 24.0).abs() < 1e-9);

        inspector.reset_view();
        assert_eq!(inspector.gesture_state().rotation_y, 15.0);
        inspector.teardown(&mut arena);
    }

    #[test]
    fn draw_substitutes_for_host_pass() {
        let (mut arena, root, [a, b, _]) = scene();
        let mut inspector = Inspector::new(InspectorConfig::default());
        let mut surface = Counter::default();
        let viewport = Size::new(300.0, 300.0);

        assert_eq!(
            inspector.draw(&mut surface, &arena, viewport, &NoNames),
            DrawDisposition::HostDefault
        );
        assert_eq!(surface.outlines, 0);

        inspector.set_interaction_enabled(&mut arena, root, true);
        assert_eq!(
            inspector.draw(&mut surface, &arena, viewport, &NoNames),
            DrawDisposition::Rendered
        );
        assert_eq!(surface.outlines, 2);
        assert_eq!(surface.contents, [a, b]);
        assert_eq!(surface.depth, 0);

        assert!(inspector.set_draw_contents(false));
        assert!(!inspector.set_draw_contents(false));
        inspector.draw(&mut surface, &arena, viewport, &NoNames);
        assert_eq!(surface.outlines, 4);
        assert_eq!(surface.contents.len(), 2, "outlines only");
        inspector.teardown(&mut arena);
    }

    #[test]
    fn refresh_picks_up_structural_changes() {
        let (mut arena, root, [a, _, _]) = scene();
        let mut inspector = Inspector::new(InspectorConfig::default());
        assert!(!inspector.refresh_layers(&mut arena), "disabled inspectors do not build");

        inspector.set_interaction_enabled(&mut arena, root, true);
        let late = arena.insert(Some(a), desc(10.0, 10.0, 20.0, 20.0, true));
        assert_eq!(inspector.layers().and_then(|l| l.level_of(late)), None);

        assert!(inspector.refresh_layers(&mut arena));
        let layers = inspector.layers().expect("enabled");
        assert_eq!(layers.level_of(a), Some(0), "suppressed elements are not pruned");
        assert_eq!(layers.level_of(late), Some(1));
        assert!(!arena.is_visible(late));

        inspector.teardown(&mut arena);
        assert!(arena.is_visible(late) && arena.is_visible(a));
        inspector.teardown(&mut arena);
    }

    #[test]
    fn option_and_chrome_setters_report_changes() {
        let mut inspector: Inspector<ElementId> = Inspector::new(InspectorConfig::default().with_density(2.0));
        assert!(inspector.is_drawing_contents());
        assert!(!inspector.is_drawing_labels());
        assert!(inspector.set_draw_labels(true));
        assert_eq!(
            inspector.draw_options(),
            DrawOptions::CONTENTS | DrawOptions::LABELS
        );

        assert!(inspector.set_chrome_color(0xFFFF_0000));
        assert!(!inspector.set_chrome_color(0xFFFF_0000));
        assert!(inspector.set_chrome_shadow_color(0x8000_0000));
        assert_eq!(inspector.chrome().text_size, 10.0);
        assert_eq!(inspector.renderer().chrome().text_size, 20.0);
        assert_eq!(inspector.renderer().chrome().color, 0xFFFF_0000);
    }

    #[test]
    fn session_forwards_and_tears_down_on_drop() {
        let (mut arena, root, [a, b, hidden]) = scene();
        let mut inspector = Inspector::new(InspectorConfig::default());
        let viewport = Size::new(300.0, 300.0);
        {
            let mut session = inspector.session(&mut arena, root);
            assert!(!session.host().is_visible(a) && !session.host().is_visible(b));
            let down = TouchEvent::single(TouchPhase::Down, PointerId(1), Point::new(10.0, 10.0));
            assert_eq!(
                session.on_touch(&down, viewport),
                TouchDisposition::Consumed(GestureResult::Unchanged)
            );
            let mut surface = Counter::default();
            assert_eq!(session.draw(&mut surface, viewport, &NoNames), DrawDisposition::Rendered);
            assert_eq!(surface.outlines, 2);
            assert!(session.refresh_layers());
            assert_eq!(session.layers().map(LayerTree::len), Some(3));
        }
        assert!(!inspector.is_interaction_enabled());
        assert!(arena.is_visible(a) && arena.is_visible(b));
        assert!(!arena.is_visible(hidden));
    }
}
