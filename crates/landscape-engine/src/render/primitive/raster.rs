use crate::coords::{Vec2, Viewport};
use crate::paint::{brightness, Color};

use super::{DrawSink, Topology};

/// Software sink: rasterises draws into an RGBA8 pixel buffer.
///
/// Follows the same vertex-stage contract as the GPU program. Positions are
/// mapped from the current resolution onto the buffer, and colours are shaded
/// by the left-to-right brightness gradient. Triangles cover a pixel when its
/// centre lies inside; lines step one pixel at a time. No blending.
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,

    clear_color: Color,
    color: Color,
    resolution: Viewport,
    draw_calls: usize,
}

impl Raster {
    /// A `width` x `height` buffer (each at least 1), initially transparent
    /// black. The resolution defaults to the buffer size.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            clear_color: Color::black(),
            color: Color::black(),
            resolution: Viewport::new(width as f32, height as f32),
            draw_calls: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of `draw_arrays` calls since creation.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// RGBA8 at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.index(x, y);
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    /// Row-major RGBA8 bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn to_device(&self, p: Vec2) -> Vec2 {
        let res = self.resolution;
        Vec2::new(
            p.x / res.width.max(1.0) * self.width as f32,
            p.y / res.height.max(1.0) * self.height as f32,
        )
    }

    /// Shaded colour at device column `px`.
    fn shade(&self, px: u32) -> [u8; 4] {
        let canvas_x = (px as f32 + 0.5) / self.width as f32 * self.resolution.width;
        self.color
            .scale_rgb(brightness(canvas_x, self.resolution.width))
            .to_rgba8()
    }

    fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        let (a, b, c) = (self.to_device(a), self.to_device(b), self.to_device(c));
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return;
        }
        let area = edge(a, b, c);
        if area == 0.0 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as u32).min(self.width);
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as u32).min(self.height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let p = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let w0 = edge(b, c, p);
                let w1 = edge(c, a, p);
                let w2 = edge(a, b, p);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    let rgba = self.shade(px);
                    self.put(px, py, rgba);
                }
            }
        }
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2) {
        let (p0, p1) = (self.to_device(p0), self.to_device(p1));
        if !(p0.is_finite() && p1.is_finite()) {
            return;
        }
        let d = p1 - p0;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as u32;
        let step = d / steps as f32;

        let mut p = p0;
        for _ in 0..steps {
            let (x, y) = (p.x.floor(), p.y.floor());
            if x >= 0.0 && y >= 0.0 && (x as u32) < self.width && (y as u32) < self.height {
                let rgba = self.shade(x as u32);
                self.put(x as u32, y as u32, rgba);
            }
            p = p + step;
        }
    }
}

/// Twice the signed area of `(a, b, p)`.
#[inline]
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

impl DrawSink for Raster {
    fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    fn clear(&mut self) {
        // Clears are not shaded.
        let rgba = self.clear_color.to_rgba8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    fn set_resolution(&mut self, viewport: Viewport) {
        if viewport.is_valid() {
            self.resolution = viewport;
        } else {
            log::warn!("ignoring invalid resolution {viewport:?}");
        }
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]) {
        self.draw_calls += 1;
        match topology {
            Topology::Triangles => {
                for tri in vertices.chunks_exact(3) {
                    self.fill_triangle(tri[0], tri[1], tri[2]);
                }
            }
            Topology::Lines => {
                for seg in vertices.chunks_exact(2) {
                    self.draw_line(seg[0], seg[1]);
                }
            }
        }
    }
}
