use crate::coords::{Vec2, Viewport};
use crate::paint::Color;

/// How a vertex run is assembled into primitives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Every 3 vertices form a filled triangle.
    Triangles,
    /// Every 2 vertices form a 1px line.
    Lines,
}

impl Topology {
    /// Vertices consumed per primitive.
    #[inline]
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        }
    }

    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Topology::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// Where primitive draws end up.
///
/// This is the program interface of the solid-colour shader: one clear colour,
/// a resolution uniform, a colour uniform and a vertex array of pixel
/// positions. Implementations either record calls for the GPU, rasterise them
/// in software or keep them for inspection.
///
/// Calls take effect in issue order. `set_color` and `set_resolution` persist
/// until overwritten.
pub trait DrawSink {
    /// Colour used by subsequent `clear` calls.
    fn set_clear_color(&mut self, color: Color);

    /// Fills the whole target with the clear colour.
    fn clear(&mut self);

    fn set_resolution(&mut self, viewport: Viewport);

    fn set_color(&mut self, color: Color);

    /// Draws `vertices` with the current colour. `vertices` is only borrowed
    /// for the duration of the call.
    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]);
}

impl<S: DrawSink + ?Sized> DrawSink for &mut S {
    fn set_clear_color(&mut self, color: Color) {
        (**self).set_clear_color(color);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn set_resolution(&mut self, viewport: Viewport) {
        (**self).set_resolution(viewport);
    }

    fn set_color(&mut self, color: Color) {
        (**self).set_color(color);
    }

    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]) {
        (**self).draw_arrays(topology, vertices);
    }
}
