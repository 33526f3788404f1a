use landscape_engine::coords::Viewport;
use landscape_engine::paint::Color;
use landscape_engine::render::primitive::DEFAULT_CIRCLE_SEGMENTS;

/// Scene tunables. `Default` is the classic 800x600 night scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Canvas size the snow pool is seeded against.
    pub canvas: Viewport,
    pub snowflake_count: usize,
    /// Ripples redrawn on the river every frame.
    pub ripple_count: usize,
    pub circle_segments: u32,
    /// Set once, on the first frame.
    pub clear_color: Color,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Adds the grass patch and the fractal star to the frame.
    pub extras: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Viewport::new(800.0, 600.0),
            snowflake_count: 50,
            ripple_count: 10,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
            clear_color: Color::rgb(0.0, 0.0, 0.3),
            seed: None,
            extras: false,
        }
    }
}
