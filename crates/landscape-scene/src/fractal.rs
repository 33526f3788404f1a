//! Hexagram and the self-similar fractal star built from it.

use std::f32::consts::PI;

use landscape_engine::coords::Vec2;
use landscape_engine::paint::Color;
use landscape_engine::render::primitive::{DrawSink, PrimitiveDrawer};

pub const HEXAGRAM: Color = Color::rgb(1.0, 1.0, 0.0);

/// Six-pointed star: an upward and a downward triangle of circumradius `size`.
pub fn draw_hexagram<S: DrawSink>(d: &mut PrimitiveDrawer<S>, center: Vec2, size: f32) {
    let Vec2 { x, y } = center;
    let half_width = size * (PI / 3.0).sin();

    d.set_color(HEXAGRAM);
    d.triangle(
        Vec2::new(x, y - size),
        Vec2::new(x - half_width, y + size / 2.0),
        Vec2::new(x + half_width, y + size / 2.0),
    );
    d.triangle(
        Vec2::new(x, y + size),
        Vec2::new(x - half_width, y - size / 2.0),
        Vec2::new(x + half_width, y - size / 2.0),
    );
}

/// A hexagram with six half-size copies of the whole figure around it, one
/// at each `k·60°` point of the circumcircle, `depth` levels deep.
///
/// Depth 0 draws nothing. Draw order is depth-first, parent before children,
/// children counter-clockwise on screen starting at +X. Runs on an explicit
/// stack so deep figures cannot overflow the call stack.
pub fn draw_fractal_star<S: DrawSink>(
    d: &mut PrimitiveDrawer<S>,
    center: Vec2,
    size: f32,
    depth: u32,
) {
    let mut stack = vec![(center, size, depth)];

    while let Some((center, size, depth)) = stack.pop() {
        if depth == 0 {
            continue;
        }
        draw_hexagram(d, center, size);

        // Reversed so child 0 is popped first.
        for k in (0..6).rev() {
            let child = center.polar(size, k as f32 * PI / 3.0);
            stack.push((child, size / 2.0, depth - 1));
        }
    }
}

/// Hexagrams drawn by a fractal star of `depth`: `(6^depth - 1) / 5`.
///
/// Saturates at `u64::MAX` once `6^depth` no longer fits (depth 25 and up).
pub fn hexagram_count(depth: u32) -> u64 {
    6u64.checked_pow(depth).map_or(u64::MAX, |p| (p - 1) / 5)
}
