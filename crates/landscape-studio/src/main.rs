//! Night landscape viewer.
//!
//! Opens an 800x600 window and animates the scene, or with `--snapshot`
//! renders frames on the CPU and writes the last one as PNG.

mod args;

use std::path::Path;

use anyhow::{Context, Result};

use landscape_engine::core::{App, AppControl, FrameCtx};
use landscape_engine::device::GpuInit;
use landscape_engine::logging::{init_logging, LoggingConfig};
use landscape_engine::render::primitive::{FrameBatch, PrimitiveDrawer, PrimitiveRenderer, Raster};
use landscape_engine::render::program::LinkedProgram;
use landscape_engine::window::{LogicalSize, Runtime, RuntimeConfig};
use landscape_scene::{AnimationLoop, SceneConfig, SceneContext};

use args::{StudioArgs, USAGE};

/// Frames between throughput log lines.
const FPS_LOG_INTERVAL: u64 = 300;

fn main() -> Result<()> {
    let args = StudioArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    init_logging(
        args.log
            .clone()
            .map_or_else(LoggingConfig::default, LoggingConfig::with_filter),
    );

    let config = args.scene_config();

    match &args.snapshot {
        Some(path) => snapshot(config, args.frames, path),
        None => run_window(config, &args),
    }
}

fn run_window(config: SceneConfig, args: &StudioArgs) -> Result<()> {
    // A broken program is fatal: nothing could be drawn.
    let program = LinkedProgram::landscape().context("failed to build the landscape program")?;

    let app = LandscapeApp {
        anim: AnimationLoop::new(),
        drawer: PrimitiveDrawer::with_circle_segments(FrameBatch::new(), config.circle_segments),
        renderer: PrimitiveRenderer::new(program),
        scene: SceneContext::new(config),
    };

    let runtime = RuntimeConfig {
        initial_size: LogicalSize::new(args.width as f64, args.height as f64),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), app)
}

fn snapshot(config: SceneConfig, frames: u32, path: &Path) -> Result<()> {
    let (width, height) = config.canvas.pixel_size();
    let canvas = config.canvas;

    let mut drawer =
        PrimitiveDrawer::with_circle_segments(Raster::new(width, height), config.circle_segments);
    let mut scene = SceneContext::new(config);
    let mut anim = AnimationLoop::new();

    for _ in 0..frames {
        anim.frame(&mut drawer, &mut scene, canvas);
    }

    let raster = drawer.into_sink();
    log::info!("rasterised {frames} frame(s), {} draw calls", raster.draw_calls());

    let image = image::RgbaImage::from_raw(width, height, raster.into_bytes())
        .context("raster size does not match its pixel buffer")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}

struct LandscapeApp {
    anim: AnimationLoop,
    drawer: PrimitiveDrawer<FrameBatch>,
    renderer: PrimitiveRenderer,
    scene: SceneContext,
}

impl App for LandscapeApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let canvas = ctx.viewport();

        self.drawer.sink_mut().begin_frame();
        self.anim.frame(&mut self.drawer, &mut self.scene, canvas);

        let batch = self.drawer.sink();
        let clear = batch.clear_color().unwrap_or(self.scene.config().clear_color);

        if ctx.time.frame_index % FPS_LOG_INTERVAL == 0 {
            log::debug!(
                "frame {}: {:.1} fps, {} draws, {} vertices",
                ctx.time.frame_index,
                ctx.time.fps(),
                batch.ops().len(),
                batch.vertices().len()
            );
        }

        let renderer = &mut self.renderer;
        ctx.render(clear, |rctx, target| renderer.render(rctx, target, batch))
    }
}
