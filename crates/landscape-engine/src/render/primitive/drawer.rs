use std::f32::consts::{PI, TAU};

use crate::coords::{Rect, Vec2, Viewport};
use crate::paint::Color;

use super::{DrawSink, Topology};

/// Segments used to approximate a circle unless configured otherwise.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 20;

/// Turns shape calls into vertex runs and submits them to a [`DrawSink`].
///
/// Owns one scratch vertex buffer. Every shape call overwrites it and issues
/// exactly one `draw_arrays`, except [`star`](Self::star) which issues six.
/// The drawer holds no colour state; `set_color` goes straight to the sink.
#[derive(Debug)]
pub struct PrimitiveDrawer<S> {
    sink: S,
    scratch: Vec<Vec2>,
    circle_segments: u32,
}

impl<S: DrawSink> PrimitiveDrawer<S> {
    pub fn new(sink: S) -> Self {
        Self::with_circle_segments(sink, DEFAULT_CIRCLE_SEGMENTS)
    }

    /// `segments` is clamped to at least 3.
    pub fn with_circle_segments(sink: S, segments: u32) -> Self {
        let segments = segments.max(3);
        Self {
            sink,
            scratch: Vec::with_capacity(segments as usize * 3),
            circle_segments: segments,
        }
    }

    pub fn circle_segments(&self) -> u32 {
        self.circle_segments
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ── program state ────────────────────────────────────────────────────

    pub fn set_clear_color(&mut self, color: Color) {
        self.sink.set_clear_color(color);
    }

    pub fn clear(&mut self) {
        self.sink.clear();
    }

    pub fn set_resolution(&mut self, viewport: Viewport) {
        self.sink.set_resolution(viewport);
    }

    pub fn set_color(&mut self, color: Color) {
        self.sink.set_color(color);
    }

    // ── shapes ───────────────────────────────────────────────────────────

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&[a, b, c]);
        self.submit(Topology::Triangles);
    }

    /// Axis-aligned rectangle with top-left `(x, y)`, as two triangles sharing
    /// the `(x + w, y)`–`(x, y + h)` diagonal.
    pub fn rectangle(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&[
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x, y + h),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
        ]);
        self.submit(Topology::Triangles);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        self.rectangle(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
    }

    /// Filled circle as a fan of `circle_segments` triangles, one submission.
    pub fn circle(&mut self, center: Vec2, radius: f32) {
        let n = self.circle_segments;
        let step = TAU / n as f32;

        self.scratch.clear();
        for i in 0..n {
            self.scratch.push(center);
            self.scratch.push(center.polar(radius, i as f32 * step));
            self.scratch.push(center.polar(radius, (i + 1) as f32 * step));
        }
        self.submit(Topology::Triangles);
    }

    pub fn line_segment(&mut self, p1: Vec2, p2: Vec2) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&[p1, p2]);
        self.submit(Topology::Lines);
    }

    /// Filled hexagon around `center` with circumradius `size`, drawn as six
    /// fan triangles submitted one at a time.
    pub fn star(&mut self, center: Vec2, size: f32) {
        let step = PI / 3.0;
        let rim: [Vec2; 6] = std::array::from_fn(|i| center.polar(size, i as f32 * step));

        for i in 0..6 {
            self.triangle(center, rim[i], rim[(i + 1) % 6]);
        }
    }

    fn submit(&mut self, topology: Topology) {
        self.sink.draw_arrays(topology, &self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::primitive::{DrawEvent, DrawRecorder};

    fn drawer() -> PrimitiveDrawer<DrawRecorder> {
        PrimitiveDrawer::new(DrawRecorder::new())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    // ── triangle / rectangle ─────────────────────────────────────────────

    #[test]
    fn triangle_is_one_submission_of_three_vertices() {
        let mut d = drawer();
        d.triangle(Vec2::new(200.0, 100.0), Vec2::new(0.0, 300.0), Vec2::new(400.0, 300.0));

        let draws = d.sink().draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].topology, Topology::Triangles);
        assert_eq!(
            draws[0].vertices,
            vec![Vec2::new(200.0, 100.0), Vec2::new(0.0, 300.0), Vec2::new(400.0, 300.0)]
        );
    }

    #[test]
    fn rectangle_emits_two_triangles_sharing_a_diagonal() {
        let mut d = drawer();
        d.rectangle(10.0, 20.0, 30.0, 40.0);

        let draws = d.sink().draws();
        assert_eq!(draws.len(), 1);
        let v = &draws[0].vertices;
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], Vec2::new(10.0, 20.0));
        assert_eq!(v[1], Vec2::new(40.0, 20.0));
        assert_eq!(v[2], Vec2::new(10.0, 60.0));
        assert_eq!(v[3], Vec2::new(10.0, 60.0));
        assert_eq!(v[4], Vec2::new(40.0, 20.0));
        assert_eq!(v[5], Vec2::new(40.0, 60.0));
    }

    #[test]
    fn fill_rect_matches_rectangle() {
        let mut a = drawer();
        let mut b = drawer();
        a.rectangle(0.0, 400.0, 800.0, 200.0);
        b.fill_rect(Rect::new(0.0, 400.0, 800.0, 200.0));
        assert_eq!(a.sink().draws()[0].vertices, b.sink().draws()[0].vertices);
    }

    // ── circle ───────────────────────────────────────────────────────────

    #[test]
    fn circle_emits_segment_count_fan_triangles() {
        let mut d = drawer();
        let c = Vec2::new(700.0, 100.0);
        d.circle(c, 30.0);

        let draws = d.sink().draws();
        assert_eq!(draws.len(), 1);
        let v = &draws[0].vertices;
        assert_eq!(v.len(), DEFAULT_CIRCLE_SEGMENTS as usize * 3);

        for tri in v.chunks(3) {
            assert_eq!(tri[0], c);
            assert!(close(tri[1].distance(c), 30.0));
            assert!(close(tri[2].distance(c), 30.0));
        }
        // First rim vertex sits on +X; the fan closes back on it.
        assert!(close(v[1].x, 730.0) && close(v[1].y, 100.0));
        let last = v[v.len() - 1];
        assert!(close(last.x, 730.0) && close(last.y, 100.0));
    }

    #[test]
    fn circle_segments_are_configurable() {
        let mut d = PrimitiveDrawer::with_circle_segments(DrawRecorder::new(), 8);
        d.circle(Vec2::zero(), 5.0);
        assert_eq!(d.sink().draws()[0].vertices.len(), 24);

        let d = PrimitiveDrawer::with_circle_segments(DrawRecorder::new(), 1);
        assert_eq!(d.circle_segments(), 3);
    }

    // ── line / star ──────────────────────────────────────────────────────

    #[test]
    fn line_segment_uses_line_topology() {
        let mut d = drawer();
        d.line_segment(Vec2::new(1.0, 2.0), Vec2::new(1.0, 12.0));
        let draws = d.sink().draws();
        assert_eq!(draws[0].topology, Topology::Lines);
        assert_eq!(draws[0].vertices.len(), 2);
    }

    #[test]
    fn star_submits_six_triangles() {
        let mut d = drawer();
        let c = Vec2::new(50.0, 50.0);
        d.star(c, 10.0);

        let draws = d.sink().draws();
        assert_eq!(draws.len(), 6);
        for (i, draw) in draws.iter().enumerate() {
            assert_eq!(draw.vertices.len(), 3);
            assert_eq!(draw.vertices[0], c);
            assert!(close(draw.vertices[1].distance(c), 10.0));
            // Consecutive wedges share a rim vertex.
            let next = &draws[(i + 1) % 6];
            assert!(close(draw.vertices[2].distance(next.vertices[1]), 0.0));
        }
    }

    // ── state forwarding ─────────────────────────────────────────────────

    #[test]
    fn colour_goes_to_the_sink_in_order() {
        let mut d = drawer();
        d.set_color(Color::rgb(0.4, 0.3, 0.2));
        d.triangle(Vec2::zero(), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        d.set_color(Color::white());
        d.rectangle(0.0, 0.0, 1.0, 1.0);

        let draws = d.sink().draws();
        assert_eq!(draws[0].color, Color::rgb(0.4, 0.3, 0.2));
        assert_eq!(draws[1].color, Color::white());
        assert!(matches!(d.sink().events()[0], DrawEvent::SetColor(_)));
    }

    #[test]
    fn drawer_works_through_a_borrowed_sink() {
        let mut recorder = DrawRecorder::new();
        {
            let mut d = PrimitiveDrawer::new(&mut recorder);
            d.clear();
            d.rectangle(0.0, 0.0, 2.0, 2.0);
        }
        assert_eq!(recorder.draws().len(), 1);
        assert_eq!(recorder.events()[0], DrawEvent::Clear);
    }
}
