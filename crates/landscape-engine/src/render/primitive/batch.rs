use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

use super::{DrawSink, Topology};

/// One recorded submission: a contiguous vertex range drawn with one colour.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawOp {
    pub topology: Topology,
    pub first_vertex: u32,
    pub vertex_count: u32,
    /// Index into [`FrameBatch::colors`].
    pub color_slot: u32,
}

/// Records one frame of draw calls for [`PrimitiveRenderer`](super::PrimitiveRenderer).
///
/// All vertex runs are appended to one array so the renderer can upload the
/// frame with a single write. A colour slot is added only when `set_color`
/// ran since the previous draw, so consecutive draws share uniforms.
///
/// `clear` drops everything recorded so far: it would be painted over anyway.
#[derive(Debug, Clone)]
pub struct FrameBatch {
    vertices: Vec<[f32; 2]>,
    colors: Vec<Color>,
    ops: Vec<DrawOp>,

    clear_color: Color,
    cleared: bool,
    resolution: Viewport,

    current_color: Color,
    color_dirty: bool,
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            colors: Vec::new(),
            ops: Vec::new(),
            clear_color: Color::black(),
            cleared: false,
            resolution: Viewport::default(),
            current_color: Color::black(),
            color_dirty: true,
        }
    }
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded geometry, keeping program state (clear colour, current
    /// colour, resolution) like a GL context would between frames.
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.ops.clear();
        self.cleared = false;
        self.color_dirty = true;
    }

    pub fn vertices(&self) -> &[[f32; 2]] {
        &self.vertices
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Clear colour, if `clear` was called this frame.
    pub fn clear_color(&self) -> Option<Color> {
        self.cleared.then_some(self.clear_color)
    }

    pub fn resolution(&self) -> Viewport {
        self.resolution
    }
}

impl DrawSink for FrameBatch {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.ops.clear();
        self.cleared = true;
        self.color_dirty = true;
    }

    fn set_resolution(&mut self, viewport: Viewport) {
        self.resolution = viewport;
    }

    fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.color_dirty = true;
    }

    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]) {
        if vertices.is_empty() {
            return;
        }

        if self.color_dirty || self.colors.is_empty() {
            self.colors.push(self.current_color);
            self.color_dirty = false;
        }

        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend(vertices.iter().map(|&v| <[f32; 2]>::from(v)));

        self.ops.push(DrawOp {
            topology,
            first_vertex,
            vertex_count: vertices.len() as u32,
            color_slot: (self.colors.len() - 1) as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vec2; 3] {
        [Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]
    }

    #[test]
    fn draws_append_contiguous_ranges() {
        let mut b = FrameBatch::new();
        b.set_color(Color::white());
        b.draw_arrays(Topology::Triangles, &tri());
        b.draw_arrays(Topology::Lines, &[Vec2::zero(), Vec2::new(0.0, 3.0)]);

        assert_eq!(b.vertices().len(), 5);
        assert_eq!(b.ops()[0].first_vertex, 0);
        assert_eq!(b.ops()[1].first_vertex, 3);
        assert_eq!(b.ops()[1].vertex_count, 2);
        assert_eq!(b.ops()[1].topology, Topology::Lines);
    }

    #[test]
    fn colour_slots_follow_set_color() {
        let mut b = FrameBatch::new();
        b.set_color(Color::rgb(0.0, 0.3, 0.6));
        b.draw_arrays(Topology::Triangles, &tri());
        b.draw_arrays(Topology::Triangles, &tri());
        b.set_color(Color::rgb(0.0, 0.4, 0.7));
        b.draw_arrays(Topology::Triangles, &tri());

        assert_eq!(b.colors().len(), 2);
        let slots: Vec<u32> = b.ops().iter().map(|op| op.color_slot).collect();
        assert_eq!(slots, vec![0, 0, 1]);
    }

    #[test]
    fn clear_discards_earlier_draws_and_keeps_colour() {
        let mut b = FrameBatch::new();
        b.set_clear_color(Color::rgb(0.0, 0.0, 0.3));
        b.set_color(Color::white());
        b.draw_arrays(Topology::Triangles, &tri());
        assert_eq!(b.clear_color(), None);

        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.clear_color(), Some(Color::rgb(0.0, 0.0, 0.3)));

        b.draw_arrays(Topology::Triangles, &tri());
        assert_eq!(b.colors(), &[Color::white()]);
    }

    #[test]
    fn begin_frame_resets_geometry_not_state() {
        let mut b = FrameBatch::new();
        b.set_resolution(Viewport::new(800.0, 600.0));
        b.clear();
        b.draw_arrays(Topology::Triangles, &tri());

        b.begin_frame();
        assert!(b.is_empty());
        assert!(b.vertices().is_empty());
        assert_eq!(b.clear_color(), None);
        assert_eq!(b.resolution(), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn empty_draw_is_ignored() {
        let mut b = FrameBatch::new();
        b.draw_arrays(Topology::Triangles, &[]);
        assert!(b.is_empty());
        assert!(b.colors().is_empty());
    }
}
