//! Scene objects. Each function sets its own colours and draws at fixed
//! canvas coordinates laid out for an 800x600 canvas; only the river, the
//! ground and the snow stretch with the current width/height.

use landscape_engine::coords::{Rect, Vec2, Viewport};
use landscape_engine::paint::Color;
use landscape_engine::render::primitive::{DrawSink, PrimitiveDrawer};

use crate::{SceneRng, SnowField};

// ── palette ──────────────────────────────────────────────────────────────

pub const MOUNTAIN: Color = Color::rgb(0.4, 0.3, 0.2);
pub const SNOW: Color = Color::rgb(1.0, 1.0, 1.0);
pub const RIVER: Color = Color::rgb(0.0, 0.3, 0.6);
pub const RIPPLE: Color = Color::rgb(0.0, 0.4, 0.7);
pub const GROUND: Color = Color::rgb(0.0, 0.3, 0.0);
pub const BUSH: Color = Color::rgb(0.0, 0.4, 0.0);
pub const HOUSE_BODY: Color = Color::rgb(0.7, 0.3, 0.1);
pub const ROOF: Color = Color::rgb(0.6, 0.4, 0.2);
pub const DOOR: Color = Color::rgb(0.4, 0.2, 0.1);
pub const WINDOW: Color = Color::rgb(1.0, 1.0, 0.6);
pub const CHIMNEY: Color = Color::rgb(0.5, 0.25, 0.1);
pub const FOLIAGE: Color = Color::rgb(0.0, 0.5, 0.0);
pub const TRUNK: Color = Color::rgb(0.4, 0.2, 0.1);
pub const MOON: Color = Color::rgb(1.0, 1.0, 0.9);
pub const STAR: Color = Color::rgb(1.0, 1.0, 1.0);
pub const GRASS: Color = Color::rgb(0.0, 0.5, 0.0);
pub const GRASS_BLADE: Color = Color::rgb(0.0, 0.6, 0.0);

// ── layout ───────────────────────────────────────────────────────────────

pub const RIVER_TOP: f32 = 300.0;
pub const RIVER_HEIGHT: f32 = 100.0;
pub const GROUND_TOP: f32 = 400.0;
pub const GROUND_HEIGHT: f32 = 200.0;

pub const BUSHES: [Vec2; 6] = [
    Vec2::new(70.0, 420.0),
    Vec2::new(200.0, 410.0),
    Vec2::new(350.0, 420.0),
    Vec2::new(500.0, 410.0),
    Vec2::new(650.0, 420.0),
    Vec2::new(780.0, 415.0),
];
pub const BUSH_RADIUS: f32 = 8.0;

pub const MOON_CENTER: Vec2 = Vec2::new(700.0, 100.0);
pub const MOON_RADIUS: f32 = 30.0;

pub const STARS: [Vec2; 9] = [
    Vec2::new(100.0, 50.0),
    Vec2::new(200.0, 80.0),
    Vec2::new(300.0, 30.0),
    Vec2::new(400.0, 70.0),
    Vec2::new(500.0, 50.0),
    Vec2::new(600.0, 90.0),
    Vec2::new(700.0, 40.0),
    Vec2::new(750.0, 60.0),
    Vec2::new(650.0, 120.0),
];
pub const STAR_RADIUS: f32 = 2.0;

/// Left to right; foliage starts 200px below the anchor.
pub const TREES: [Vec2; 5] = [
    Vec2::new(250.0, 120.0),
    Vec2::new(350.0, 120.0),
    Vec2::new(450.0, 140.0),
    Vec2::new(550.0, 130.0),
    Vec2::new(650.0, 150.0),
];

pub const GRASS_BLADES: usize = 10;

// ── objects ──────────────────────────────────────────────────────────────

/// Two brown peaks, then their snow caps.
pub fn draw_mountains<S: DrawSink>(d: &mut PrimitiveDrawer<S>) {
    d.set_color(MOUNTAIN);
    d.triangle(v(200.0, 100.0), v(0.0, 300.0), v(400.0, 300.0));
    d.triangle(v(600.0, 50.0), v(400.0, 300.0), v(800.0, 300.0));

    d.set_color(SNOW);
    d.triangle(v(200.0, 100.0), v(150.0, 150.0), v(250.0, 150.0));
    d.triangle(v(600.0, 50.0), v(520.0, 150.0), v(680.0, 150.0));
}

/// Full-width water band plus `ripples` short highlights at fresh random
/// spots. New ripples every call is what makes the water shimmer.
pub fn draw_river<S: DrawSink>(
    d: &mut PrimitiveDrawer<S>,
    canvas: Viewport,
    ripples: usize,
    rng: &mut SceneRng,
) {
    d.set_color(RIVER);
    d.rectangle(0.0, RIVER_TOP, canvas.width, RIVER_HEIGHT);

    for _ in 0..ripples {
        let x = rng.range(0.0, canvas.width);
        let y = rng.range(RIVER_TOP, RIVER_TOP + RIVER_HEIGHT);
        let w = rng.range(10.0, 30.0);
        let h = rng.range(1.0, 3.0);

        d.set_color(RIPPLE);
        d.rectangle(x, y, w, h);
    }
}

pub fn draw_ground<S: DrawSink>(d: &mut PrimitiveDrawer<S>, canvas: Viewport) {
    d.set_color(GROUND);
    d.rectangle(0.0, GROUND_TOP, canvas.width, GROUND_HEIGHT);

    for bush in BUSHES {
        draw_bush(d, bush);
    }
}

/// Four overlapping circles.
pub fn draw_bush<S: DrawSink>(d: &mut PrimitiveDrawer<S>, at: Vec2) {
    d.set_color(BUSH);
    d.circle(at, BUSH_RADIUS);
    d.circle(at + v(6.0, 4.0), BUSH_RADIUS);
    d.circle(at + v(-6.0, 4.0), BUSH_RADIUS);
    d.circle(at + v(0.0, 6.0), BUSH_RADIUS);
}

/// Body, roof, door, two windows and a chimney.
///
/// The door sits above the body and the chimney inside it; that is the
/// fixed layout, not an offset bug.
pub fn draw_house<S: DrawSink>(d: &mut PrimitiveDrawer<S>) {
    d.set_color(HOUSE_BODY);
    d.rectangle(50.0, 450.0, 100.0, 100.0);

    d.set_color(ROOF);
    d.triangle(v(100.0, 400.0), v(40.0, 450.0), v(160.0, 450.0));

    d.set_color(DOOR);
    d.rectangle(80.0, 400.0, 10.0, 30.0);

    d.set_color(WINDOW);
    d.rectangle(70.0, 470.0, 20.0, 20.0);
    d.rectangle(110.0, 470.0, 20.0, 20.0);

    d.set_color(CHIMNEY);
    d.rectangle(95.0, 510.0, 20.0, 40.0);
}

/// Three stacked foliage triangles and a trunk, hanging off `anchor`.
pub fn draw_tree<S: DrawSink>(d: &mut PrimitiveDrawer<S>, anchor: Vec2) {
    let Vec2 { x, y } = anchor;

    d.set_color(FOLIAGE);
    d.triangle(v(x, y + 200.0), v(x - 30.0, y + 280.0), v(x + 30.0, y + 280.0));
    d.triangle(v(x, y + 240.0), v(x - 40.0, y + 320.0), v(x + 40.0, y + 320.0));
    d.triangle(v(x, y + 280.0), v(x - 50.0, y + 360.0), v(x + 50.0, y + 360.0));

    d.set_color(TRUNK);
    d.rectangle(x - 10.0, y + 360.0, 20.0, 30.0);
}

pub fn draw_trees<S: DrawSink>(d: &mut PrimitiveDrawer<S>) {
    for anchor in TREES {
        draw_tree(d, anchor);
    }
}

pub fn draw_moon<S: DrawSink>(d: &mut PrimitiveDrawer<S>) {
    d.set_color(MOON);
    d.circle(MOON_CENTER, MOON_RADIUS);
}

pub fn draw_stars<S: DrawSink>(d: &mut PrimitiveDrawer<S>) {
    d.set_color(STAR);
    for star in STARS {
        d.circle(star, STAR_RADIUS);
    }
}

/// Draws every flake at its current position, then lets it fall.
pub fn draw_snow<S: DrawSink>(
    d: &mut PrimitiveDrawer<S>,
    snow: &mut SnowField,
    canvas: Viewport,
    rng: &mut SceneRng,
) {
    d.set_color(SNOW);
    for flake in snow.flakes_mut() {
        d.circle(flake.position(), flake.size);
        flake.advance(canvas, rng);
    }
}

/// Green patch with randomly placed vertical blades 5..15px tall.
pub fn draw_grass_patch<S: DrawSink>(d: &mut PrimitiveDrawer<S>, area: Rect, rng: &mut SceneRng) {
    d.set_color(GRASS);
    d.fill_rect(area);

    for _ in 0..GRASS_BLADES {
        let max = area.max();
        let x = rng.range(area.origin.x, max.x);
        let y = rng.range(area.origin.y, max.y);
        let height = rng.range(5.0, 15.0);

        d.set_color(GRASS_BLADE);
        d.line_segment(v(x, y), v(x, y + height));
    }
}

#[inline]
fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}
