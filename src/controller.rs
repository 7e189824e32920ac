use std::collections::BTreeMap;

use egui::{pos2, Pos2, Rect, TouchPhase, Ui, Vec2};

use crate::disclosure::DisclosureState;
use crate::viewbox::{CameraParams, ViewBox};

/// One touch-contact event, decoupled from egui's event type so the state
/// machine can be driven synthetically in tests.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent {
    pub id: u64,
    pub phase: TouchPhase,
    pub pos: Pos2,
}

/// Everything the controller needs from one frame of raw input.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub pointer: Option<Pos2>,
    pub primary_pressed: bool,
    pub primary_down: bool,
    pub primary_released: bool,
    pub scroll: Vec2,
    pub zoom_modifier: bool,
    pub touches: Vec<TouchEvent>,
}

impl FrameInput {
    pub fn gather(ui: &Ui) -> Self {
        ui.input(|i| Self {
            pointer: i.pointer.latest_pos(),
            primary_pressed: i.pointer.primary_pressed(),
            primary_down: i.pointer.primary_down(),
            primary_released: i.pointer.primary_released(),
            scroll: i.raw_scroll_delta,
            zoom_modifier: i.modifiers.command,
            touches: i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Touch { id, phase, pos, .. } => Some(TouchEvent {
                        id: id.0,
                        phase: *phase,
                        pos: *pos,
                    }),
                    _ => None,
                })
                .collect(),
        })
    }
}

/// Interaction mode; the variants are mutually exclusive at any instant.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    Idle,
    Panning { last: Pos2 },
    Pinching { last_span: f32 },
}

/// Owns the camera and the disclosure state and maps raw input onto them.
pub struct CanvasController {
    pub camera: ViewBox,
    pub disclosure: DisclosureState,
    params: CameraParams,
    mode: DragMode,
    /// Active touch contacts by id; ordered so span pairs are stable.
    touches: BTreeMap<u64, Pos2>,
}

impl CanvasController {
    pub fn new(params: CameraParams) -> Self {
        Self {
            camera: ViewBox::initial(&params),
            disclosure: DisclosureState::default(),
            params,
            mode: DragMode::Idle,
            touches: BTreeMap::new(),
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera = ViewBox::initial(&self.params);
    }

    /// Advance the state machine by one frame of input.
    pub fn apply(&mut self, input: &FrameInput, viewport: Rect) {
        self.track_touches(&input.touches);
        let pinch = self.pinch_contacts();

        match self.mode {
            DragMode::Pinching { last_span } => match pinch {
                Some((span, midpoint)) if span > 0.0 => {
                    // Contacts moving apart shrink the view rectangle.
                    let scale = last_span / span;
                    self.camera
                        .zoom_about_screen(midpoint, scale, viewport, &self.params);
                    self.mode = DragMode::Pinching { last_span: span };
                }
                _ => self.mode = DragMode::Idle,
            },
            DragMode::Panning { last } => {
                if input.primary_released || !input.primary_down {
                    self.mode = DragMode::Idle;
                } else if let Some(pos) = input.pointer {
                    self.camera.pan_by_screen_delta(pos - last, viewport);
                    self.mode = DragMode::Panning { last: pos };
                }
            }
            DragMode::Idle => {
                if let Some((span, _)) = pinch {
                    self.mode = DragMode::Pinching { last_span: span };
                } else if input.primary_pressed {
                    if let Some(pos) = input.pointer {
                        if viewport.contains(pos) {
                            self.mode = DragMode::Panning { last: pos };
                        }
                    }
                }
            }
        }

        if !matches!(self.mode, DragMode::Pinching { .. }) && input.scroll != Vec2::ZERO {
            self.apply_wheel(input, viewport);
        }
    }

    fn apply_wheel(&mut self, input: &FrameInput, viewport: Rect) {
        if input.zoom_modifier {
            let Some(pos) = input.pointer else { return };
            if !viewport.contains(pos) {
                return;
            }
            let step = self.params.wheel_zoom_step;
            let scale = if input.scroll.y < 0.0 { step } else { 1.0 / step };
            self.camera.zoom_about_screen(pos, scale, viewport, &self.params);
        } else {
            self.camera
                .pan_by_screen_delta(input.scroll * self.params.wheel_pan_multiplier, viewport);
        }
    }

    fn track_touches(&mut self, events: &[TouchEvent]) {
        for event in events {
            match event.phase {
                TouchPhase::Start | TouchPhase::Move => {
                    self.touches.insert(event.id, event.pos);
                }
                TouchPhase::End | TouchPhase::Cancel => {
                    self.touches.remove(&event.id);
                }
            }
        }
    }

    /// Span and midpoint of the first two contacts, when two or more are down.
    fn pinch_contacts(&self) -> Option<(f32, Pos2)> {
        let mut contacts = self.touches.values();
        let a = *contacts.next()?;
        let b = *contacts.next()?;
        let span = a.distance(b);
        let midpoint = pos2((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        Some((span, midpoint))
    }
}
