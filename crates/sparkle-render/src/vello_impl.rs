//! Vello-based renderer implementation.

use crate::renderer::{RenderContext, RenderResult, Renderer, Surface, paint};
use kurbo::{Affine, Circle as KurboCircle, Rect, Size};
use peniko::{Color, Fill};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use vello::Scene;

/// Adapts a vello [`Scene`] to the [`Surface`] capability.
struct SceneSurface<'a> {
    scene: &'a mut Scene,
}

impl Surface for SceneSurface<'_> {
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()> {
        self.scene.reset();
        self.scene.fill(
            Fill::NonZero,
            Affine::IDENTITY,
            background,
            None,
            &Rect::from_origin_size((0.0, 0.0), size),
        );
        Ok(())
    }

    fn fill_circle(&mut self, circle: KurboCircle, color: Color) -> RenderResult<()> {
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, color, None, &circle);
        Ok(())
    }
}

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Random source for sparkle scatter.
    rng: SmallRng,
}

impl VelloRenderer {
    /// Create a new Vello renderer with sparkles seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Create a renderer drawing sparkle positions from `rng`.
    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            scene: Scene::new(),
            rng,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let mut surface = SceneSurface {
            scene: &mut self.scene,
        };
        paint(&mut surface, ctx, &mut self.rng)
    }
}
