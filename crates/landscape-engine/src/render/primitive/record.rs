use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

use super::{DrawSink, Topology};

/// One `draw_arrays` call with the colour that was current when it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub topology: Topology,
    pub vertices: Vec<Vec2>,
    pub color: Color,
}

impl RecordedDraw {
    pub fn primitive_count(&self) -> usize {
        self.vertices.len() / self.topology.vertices_per_primitive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    SetClearColor(Color),
    Clear,
    SetResolution(Viewport),
    SetColor(Color),
    Draw(RecordedDraw),
}

/// Sink that keeps every call, for inspecting what a frame submits.
#[derive(Debug, Default, Clone)]
pub struct DrawRecorder {
    events: Vec<DrawEvent>,
    color: Color,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    /// Draw calls only, in issue order.
    pub fn draws(&self) -> Vec<&RecordedDraw> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DrawEvent::Draw(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Last resolution pushed, if any.
    pub fn resolution(&self) -> Option<Viewport> {
        self.events.iter().rev().find_map(|e| match e {
            DrawEvent::SetResolution(v) => Some(*v),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&DrawEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Forgets recorded events. The current colour survives, like a uniform.
    pub fn reset(&mut self) {
        self.events.clear();
    }
}

impl DrawSink for DrawRecorder {
    fn set_clear_color(&mut self, color: Color) {
        self.events.push(DrawEvent::SetClearColor(color));
    }

    fn clear(&mut self) {
        self.events.push(DrawEvent::Clear);
    }

    fn set_resolution(&mut self, viewport: Viewport) {
        self.events.push(DrawEvent::SetResolution(viewport));
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.events.push(DrawEvent::SetColor(color));
    }

    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]) {
        self.events.push(DrawEvent::Draw(RecordedDraw {
            topology,
            vertices: vertices.to_vec(),
            color: self.color,
        }));
    }
}
