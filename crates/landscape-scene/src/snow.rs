use landscape_engine::coords::{Vec2, Viewport};

use crate::SceneRng;

/// One falling flake, in canvas pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    /// Circle radius.
    pub size: f32,
    /// Pixels fallen per frame.
    pub speed: f32,
}

impl Snowflake {
    /// Random flake somewhere on the canvas.
    pub fn spawn(canvas: Viewport, rng: &mut SceneRng) -> Self {
        Self {
            x: rng.range(0.0, canvas.width),
            y: rng.range(0.0, canvas.height),
            size: rng.range(2.0, 5.0),
            speed: rng.range(0.5, 1.5),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Falls by `speed`. Past the bottom edge the flake restarts at the top at
    /// a new random column. Returns whether it wrapped.
    pub fn advance(&mut self, canvas: Viewport, rng: &mut SceneRng) -> bool {
        self.y += self.speed;
        if self.y > canvas.height {
            self.y = 0.0;
            self.x = rng.range(0.0, canvas.width);
            return true;
        }
        false
    }
}

/// Fixed-size pool of flakes, created once and recycled forever.
#[derive(Debug, Clone, Default)]
pub struct SnowField {
    flakes: Vec<Snowflake>,
}

impl SnowField {
    pub fn new(count: usize, canvas: Viewport, rng: &mut SceneRng) -> Self {
        Self {
            flakes: (0..count).map(|_| Snowflake::spawn(canvas, rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.flakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flakes.is_empty()
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn flakes_mut(&mut self) -> &mut [Snowflake] {
        &mut self.flakes
    }

    /// Advances every flake one frame; returns how many wrapped.
    pub fn step(&mut self, canvas: Viewport, rng: &mut SceneRng) -> usize {
        self.flakes
            .iter_mut()
            .map(|f| usize::from(f.advance(canvas, rng)))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn spawned_flakes_respect_ranges() {
        let mut rng = SceneRng::seeded(3);
        let field = SnowField::new(500, CANVAS, &mut rng);
        assert_eq!(field.len(), 500);
        for f in field.flakes() {
            assert!((0.0..800.0).contains(&f.x));
            assert!((0.0..600.0).contains(&f.y));
            assert!((2.0..5.0).contains(&f.size));
            assert!((0.5..1.5).contains(&f.speed));
        }
    }

    #[test]
    fn flake_stays_in_bounds_over_many_frames() {
        let mut rng = SceneRng::seeded(11);
        let mut field = SnowField::new(50, CANVAS, &mut rng);
        let mut wrapped = 0;
        for _ in 0..2_000 {
            wrapped += field.step(CANVAS, &mut rng);
            for f in field.flakes() {
                assert!(f.y >= 0.0 && f.y <= CANVAS.height);
                assert!(f.x >= 0.0 && f.x < CANVAS.width);
            }
        }
        // Slowest flake covers 1000px in 2000 frames: everyone wrapped at least once.
        assert!(wrapped >= 50);
    }

    #[test]
    fn wrap_resets_to_top() {
        let mut rng = SceneRng::seeded(5);
        let mut f = Snowflake { x: 10.0, y: 599.5, size: 3.0, speed: 1.0 };
        assert!(f.advance(CANVAS, &mut rng));
        assert_eq!(f.y, 0.0);
        assert!((0.0..800.0).contains(&f.x));
    }

    #[test]
    fn landing_exactly_on_the_edge_does_not_wrap() {
        let mut rng = SceneRng::seeded(5);
        let mut f = Snowflake { x: 10.0, y: 599.0, size: 3.0, speed: 1.0 };
        assert!(!f.advance(CANVAS, &mut rng));
        assert_eq!(f.y, 600.0);
        assert_eq!(f.x, 10.0);
    }

    #[test]
    fn smaller_canvas_wraps_earlier() {
        let mut rng = SceneRng::seeded(9);
        let mut f = Snowflake { x: 700.0, y: 299.5, size: 2.0, speed: 1.0 };
        assert!(f.advance(Viewport::new(400.0, 300.0), &mut rng));
        assert!(f.x < 400.0);
    }
}
