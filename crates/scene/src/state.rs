use foundation::math::Vec2;
use runtime::{Event, EventBus, Frame, FrameClock};

use crate::clearance::ClearanceTier;
use crate::config::{SceneConfig, Viewport};
use crate::hover::{HoverChange, HoverState, Selection, UiEvent, resolve_click};
use crate::landmark::LandmarkSet;
use crate::paint::Painter;
use crate::render::{FrameParams, FrameSummary, render_frame};

/// Everything the zone map needs between animation callbacks.
///
/// Input handlers and the render loop both go through this type; it raises
/// [`UiEvent`]s for the host instead of touching the DOM.
#[derive(Debug)]
pub struct SceneState {
    config: SceneConfig,
    landmarks: LandmarkSet,
    clearance: ClearanceTier,
    hover: HoverState,
    clock: FrameClock,
    viewport: Viewport,
    events: EventBus<UiEvent>,
}

impl SceneState {
    pub fn new(config: SceneConfig, mut landmarks: LandmarkSet, clearance: ClearanceTier) -> Self {
        landmarks.refresh_access(clearance);
        Self {
            clock: FrameClock::new(config.phase_step),
            config,
            landmarks,
            clearance,
            hover: HoverState::default(),
            viewport: Viewport::default(),
            events: EventBus::new(),
        }
    }

    /// A scene with no landmarks; still renders background and grid.
    pub fn empty(config: SceneConfig) -> Self {
        Self::new(config, LandmarkSet::empty(), ClearanceTier::Guest)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        &self.landmarks
    }

    pub fn clearance(&self) -> ClearanceTier {
        self.clearance
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.hovered()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> f64 {
        self.clock.phase()
    }

    pub fn frame(&self) -> Frame {
        self.clock.frame()
    }

    /// Applies a new viewer tier. Access flags are recomputed here, before
    /// any later hit-test or render sees them.
    pub fn set_clearance(&mut self, clearance: ClearanceTier) {
        self.clearance = clearance;
        self.landmarks.refresh_access(clearance);
        // The intel panel shows access status; redraw it for the same target.
        if let Some(id) = self.hover.hovered().map(str::to_owned) {
            self.emit(UiEvent::HoverChanged { id: Some(id) });
        }
    }

    /// Anchors from the old size are stale until the next render.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.landmarks.invalidate_anchors();
    }

    pub fn pointer_moved(&mut self, pointer: Vec2) -> Option<HoverChange> {
        let radius = self.config.hit_radii.hover(&self.config.camera);
        let change = self.hover.pointer_moved(&self.landmarks, pointer, radius)?;
        self.emit(change.clone().into_event());
        Some(change)
    }

    pub fn pointer_left(&mut self) -> Option<HoverChange> {
        let change = self.hover.pointer_left()?;
        self.emit(change.clone().into_event());
        Some(change)
    }

    pub fn clicked(&mut self, pointer: Vec2) -> Option<Selection> {
        let radius = self.config.hit_radii.click(&self.config.camera);
        let selection = resolve_click(&self.landmarks, pointer, radius)?;
        self.emit(selection.clone().into_event());
        Some(selection)
    }

    /// Draws the current frame. Does not advance the phase; see [`Self::tick`].
    pub fn render<P: Painter + ?Sized>(&mut self, painter: &mut P) -> FrameSummary {
        let params = FrameParams {
            config: &self.config,
            viewport: self.viewport,
            hovered: self.hover.hovered(),
            phase: self.clock.phase(),
        };
        render_frame(&params, &mut self.landmarks, painter)
    }

    /// Moves to the next animation frame; returns the new phase.
    pub fn tick(&mut self) -> f64 {
        self.clock.tick()
    }

    pub fn events(&self) -> &[Event<UiEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event<UiEvent>> {
        self.events.drain()
    }

    fn emit(&mut self, event: UiEvent) {
        self.events.emit(self.clock.frame(), event);
    }
}
