use landscape_engine::coords::Viewport;
use landscape_engine::render::primitive::{DrawSink, PrimitiveDrawer};

use crate::{composer, SceneContext};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// No frame drawn yet; the clear colour has not been set.
    Uninitialized,
    /// Drawing a frame per refresh. There is no way out of this state.
    Running,
}

/// Drives the scene one frame per display refresh.
///
/// The first frame sets the clear colour; every frame clears, pushes the
/// resolution and composes the scene. Frames cannot fail.
#[derive(Debug)]
pub struct AnimationLoop {
    state: LoopState,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Uninitialized,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draws one frame of the scene onto a canvas of `canvas` size.
    pub fn frame<S: DrawSink>(
        &mut self,
        d: &mut PrimitiveDrawer<S>,
        ctx: &mut SceneContext,
        canvas: Viewport,
    ) {
        if self.state == LoopState::Uninitialized {
            d.set_clear_color(ctx.config().clear_color);
            self.state = LoopState::Running;
            log::info!(
                "animation loop running ({}x{}, {} snowflakes)",
                canvas.width,
                canvas.height,
                ctx.snow().len()
            );
        }

        d.clear();
        d.set_resolution(canvas);
        composer::compose(d, ctx, canvas);

        self.frames += 1;
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use landscape_engine::paint::Color;
    use landscape_engine::render::primitive::{DrawEvent, DrawRecorder};

    use super::*;
    use crate::objects;
    use crate::SceneConfig;

    const CANVAS: Viewport = Viewport::new(800.0, 600.0);

    fn setup() -> (AnimationLoop, PrimitiveDrawer<DrawRecorder>, SceneContext) {
        let ctx = SceneContext::new(SceneConfig {
            seed: Some(5),
            ..SceneConfig::default()
        });
        (AnimationLoop::new(), PrimitiveDrawer::new(DrawRecorder::new()), ctx)
    }

    #[test]
    fn first_frame_starts_the_loop() {
        let (mut anim, mut d, mut ctx) = setup();
        assert_eq!(anim.state(), LoopState::Uninitialized);

        anim.frame(&mut d, &mut ctx, CANVAS);
        assert_eq!(anim.state(), LoopState::Running);
        assert_eq!(anim.frames(), 1);

        let events = d.sink().events();
        assert_eq!(events[0], DrawEvent::SetClearColor(Color::rgb(0.0, 0.0, 0.3)));
        assert_eq!(events[1], DrawEvent::Clear);
        assert_eq!(events[2], DrawEvent::SetResolution(CANVAS));
    }

    #[test]
    fn clear_colour_is_set_once() {
        let (mut anim, mut d, mut ctx) = setup();
        for _ in 0..3 {
            anim.frame(&mut d, &mut ctx, CANVAS);
        }
        let sink = d.sink();
        assert_eq!(sink.count(|e| matches!(e, DrawEvent::SetClearColor(_))), 1);
        assert_eq!(sink.count(|e| *e == DrawEvent::Clear), 3);
        assert_eq!(anim.state(), LoopState::Running);
    }

    #[test]
    fn frame_paints_river_first_and_snow_last() {
        let (mut anim, mut d, mut ctx) = setup();
        anim.frame(&mut d, &mut ctx, CANVAS);

        let draws = d.sink().draws();
        assert_eq!(draws.first().map(|c| c.color), Some(objects::RIVER));
        // 50 flakes close the frame.
        assert!(draws[draws.len() - 50..].iter().all(|c| c.color == objects::SNOW));
        // Trunk of the last tree comes right before the snow.
        assert_eq!(draws[draws.len() - 51].color, objects::TRUNK);
    }

    #[test]
    fn layer_colours_appear_in_paint_order() {
        let (mut anim, mut d, mut ctx) = setup();
        anim.frame(&mut d, &mut ctx, CANVAS);

        let first = |colour: Color| {
            d.sink()
                .draws()
                .iter()
                .position(|c| c.color == colour)
                .unwrap_or(usize::MAX)
        };
        let order = [
            first(objects::RIVER),
            first(objects::MOUNTAIN),
            first(objects::GROUND),
            first(objects::MOON),
            first(objects::HOUSE_BODY),
            first(objects::FOLIAGE),
        ];
        assert!(order.windows(2).all(|w| w[0] < w[1]), "{order:?}");
    }

    #[test]
    fn snow_falls_between_frames() {
        let (mut anim, mut d, mut ctx) = setup();
        let before = ctx.snow().flakes().to_vec();
        anim.frame(&mut d, &mut ctx, CANVAS);
        let moved = ctx
            .snow()
            .flakes()
            .iter()
            .zip(&before)
            .filter(|(now, then)| now.y != then.y)
            .count();
        assert_eq!(moved, before.len());
    }

    #[test]
    fn resolution_tracks_the_canvas() {
        let (mut anim, mut d, mut ctx) = setup();
        anim.frame(&mut d, &mut ctx, CANVAS);
        anim.frame(&mut d, &mut ctx, Viewport::new(1024.0, 768.0));
        assert_eq!(d.sink().resolution(), Some(Viewport::new(1024.0, 768.0)));
    }
}
