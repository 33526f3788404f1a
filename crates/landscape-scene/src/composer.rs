//! Frame composition: which objects are drawn, and in which order.
//!
//! Painter's algorithm, no depth buffer. Later layers cover earlier ones, so
//! the order below is the scene's occlusion.

use landscape_engine::coords::{Rect, Vec2, Viewport};
use landscape_engine::render::primitive::{DrawSink, PrimitiveDrawer};

use crate::fractal::draw_fractal_star;
use crate::objects;
use crate::SceneContext;

/// Where the optional fractal star hangs: the sky between the two peaks.
pub const FRACTAL_STAR_CENTER: Vec2 = Vec2::new(400.0, 170.0);
pub const FRACTAL_STAR_SIZE: f32 = 20.0;
pub const FRACTAL_STAR_DEPTH: u32 = 3;

/// Optional grass patch, on the ground below the trees.
pub const GRASS_PATCH: Rect = Rect::new(300.0, 545.0, 200.0, 40.0);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Layer {
    River,
    Mountains,
    Ground,
    Moon,
    Stars,
    FractalStar,
    House,
    Trees,
    GrassPatch,
    Snow,
}

/// The default scene, back to front.
pub const PAINT_ORDER: [Layer; 8] = [
    Layer::River,
    Layer::Mountains,
    Layer::Ground,
    Layer::Moon,
    Layer::Stars,
    Layer::House,
    Layer::Trees,
    Layer::Snow,
];

/// The default scene plus the optional extras, back to front.
pub const PAINT_ORDER_WITH_EXTRAS: [Layer; 10] = [
    Layer::River,
    Layer::Mountains,
    Layer::Ground,
    Layer::Moon,
    Layer::Stars,
    Layer::FractalStar,
    Layer::House,
    Layer::Trees,
    Layer::GrassPatch,
    Layer::Snow,
];

pub fn layers(extras: bool) -> &'static [Layer] {
    if extras {
        &PAINT_ORDER_WITH_EXTRAS
    } else {
        &PAINT_ORDER
    }
}

/// Draws one layer onto a canvas of `canvas` size.
pub fn draw_layer<S: DrawSink>(
    d: &mut PrimitiveDrawer<S>,
    ctx: &mut SceneContext,
    layer: Layer,
    canvas: Viewport,
) {
    match layer {
        Layer::River => {
            let ripples = ctx.config().ripple_count;
            objects::draw_river(d, canvas, ripples, ctx.rng());
        }
        Layer::Mountains => objects::draw_mountains(d),
        Layer::Ground => objects::draw_ground(d, canvas),
        Layer::Moon => objects::draw_moon(d),
        Layer::Stars => objects::draw_stars(d),
        Layer::FractalStar => {
            draw_fractal_star(d, FRACTAL_STAR_CENTER, FRACTAL_STAR_SIZE, FRACTAL_STAR_DEPTH)
        }
        Layer::House => objects::draw_house(d),
        Layer::Trees => objects::draw_trees(d),
        Layer::GrassPatch => objects::draw_grass_patch(d, GRASS_PATCH, ctx.rng()),
        Layer::Snow => {
            let (snow, rng) = ctx.snow_and_rng();
            objects::draw_snow(d, snow, canvas, rng);
        }
    }
}

/// Draws every layer of the scene in paint order.
pub fn compose<S: DrawSink>(d: &mut PrimitiveDrawer<S>, ctx: &mut SceneContext, canvas: Viewport) {
    for &layer in layers(ctx.config().extras) {
        draw_layer(d, ctx, layer, canvas);
    }
}

#[cfg(test)]
mod tests {
    use landscape_engine::render::primitive::DrawRecorder;

    use super::*;
    use crate::SceneConfig;

    const CANVAS: Viewport = Viewport::new(800.0, 600.0);

    fn context(extras: bool) -> SceneContext {
        SceneContext::new(SceneConfig {
            seed: Some(17),
            extras,
            ..SceneConfig::default()
        })
    }

    /// Draw calls each layer issues on its own.
    fn draws_for(layer: Layer, extras: bool) -> usize {
        let mut d = PrimitiveDrawer::new(DrawRecorder::new());
        draw_layer(&mut d, &mut context(extras), layer, CANVAS);
        d.sink().draws().len()
    }

    #[test]
    fn default_order_is_back_to_front() {
        assert_eq!(layers(false), &PAINT_ORDER);
        assert_eq!(layers(false).first(), Some(&Layer::River));
        assert_eq!(layers(false).last(), Some(&Layer::Snow));
        assert!(!layers(false).contains(&Layer::FractalStar));
        assert!(!layers(false).contains(&Layer::GrassPatch));
    }

    #[test]
    fn extras_keep_the_default_relative_order() {
        let filtered: Vec<Layer> = layers(true)
            .iter()
            .copied()
            .filter(|l| !matches!(l, Layer::FractalStar | Layer::GrassPatch))
            .collect();
        assert_eq!(filtered, PAINT_ORDER.to_vec());
    }

    #[test]
    fn per_layer_draw_counts() {
        assert_eq!(draws_for(Layer::River, false), 11);
        assert_eq!(draws_for(Layer::Mountains, false), 4);
        assert_eq!(draws_for(Layer::Ground, false), 25);
        assert_eq!(draws_for(Layer::Moon, false), 1);
        assert_eq!(draws_for(Layer::Stars, false), 9);
        assert_eq!(draws_for(Layer::House, false), 6);
        assert_eq!(draws_for(Layer::Trees, false), 20);
        assert_eq!(draws_for(Layer::Snow, false), 50);
        assert_eq!(draws_for(Layer::FractalStar, true), 86);
        assert_eq!(draws_for(Layer::GrassPatch, true), 11);
    }

    #[test]
    fn compose_draws_every_layer_once() {
        let mut d = PrimitiveDrawer::new(DrawRecorder::new());
        compose(&mut d, &mut context(false), CANVAS);
        assert_eq!(d.sink().draws().len(), 11 + 4 + 25 + 1 + 9 + 6 + 20 + 50);

        let mut d = PrimitiveDrawer::new(DrawRecorder::new());
        compose(&mut d, &mut context(true), CANVAS);
        assert_eq!(d.sink().draws().len(), 126 + 86 + 11);
    }
}
