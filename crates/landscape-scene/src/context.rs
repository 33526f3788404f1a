use crate::{SceneConfig, SceneRng, SnowField};

/// Everything the scene keeps between frames: configuration, the random
/// source and the snow pool. Built once and handed to the loop each frame.
#[derive(Debug, Clone)]
pub struct SceneContext {
    config: SceneConfig,
    rng: SceneRng,
    snow: SnowField,
}

impl SceneContext {
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = SceneRng::from_seed(config.seed);
        let snow = SnowField::new(config.snowflake_count, config.canvas, &mut rng);
        log::debug!(
            "scene context: {} snowflakes on {}x{}, seed {:?}",
            snow.len(),
            config.canvas.width,
            config.canvas.height,
            config.seed
        );
        Self { config, rng, snow }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    /// Split borrow for drawing code that needs both at once.
    pub fn snow_and_rng(&mut self) -> (&mut SnowField, &mut SceneRng) {
        (&mut self.snow, &mut self.rng)
    }

    pub fn rng(&mut self) -> &mut SceneRng {
        &mut self.rng
    }
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_comes_from_config() {
        let ctx = SceneContext::new(SceneConfig {
            snowflake_count: 7,
            seed: Some(1),
            ..SceneConfig::default()
        });
        assert_eq!(ctx.snow().len(), 7);
    }

    #[test]
    fn seeded_contexts_agree() {
        let config = SceneConfig {
            seed: Some(99),
            ..SceneConfig::default()
        };
        let a = SceneContext::new(config.clone());
        let b = SceneContext::new(config);
        assert_eq!(a.snow().flakes(), b.snow().flakes());
    }
}
