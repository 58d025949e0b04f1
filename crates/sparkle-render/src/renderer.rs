//! Renderer trait abstraction and the shared paint pass.

use kurbo::{Circle as KurboCircle, Size};
use peniko::Color;
use rand::Rng;
use sparkle_core::canvas::{Canvas, CanvasDocument};
use sparkle_core::config::SparkleConfig;
use sparkle_core::sparkle::scatter;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// A 2D drawing target.
///
/// This is the whole capability the paint pass needs from a backend.
pub trait Surface {
    /// Clear the whole surface to `background`.
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()>;

    /// Fill a disc with a solid color.
    fn fill_circle(&mut self, circle: KurboCircle, color: Color) -> RenderResult<()>;
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Circles to paint, back to front.
    pub document: &'a CanvasDocument,
    /// Index of the highlighted circle.
    pub selection: Option<usize>,
    /// Sparkle scatter parameters.
    pub sparkle: &'a SparkleConfig,
    /// Surface size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Fill for the selected circle.
    pub selection_color: Color,
    /// Fill for sparkle dots.
    pub sparkle_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a render context for a canvas, taking colors from its config.
    pub fn new<R: Rng>(canvas: &'a Canvas<R>, viewport_size: Size) -> Self {
        let config = canvas.config();
        Self {
            document: canvas.document(),
            selection: canvas.selected_index(),
            sparkle: &config.sparkle,
            viewport_size,
            background_color: config.background_color.into(),
            selection_color: config.highlight_color.into(),
            sparkle_color: config.sparkle_color.into(),
        }
    }
}

/// Paint one frame: clear, then each circle followed by a fresh sparkle scatter.
///
/// Stops at the first surface error.
pub fn paint<S, R>(surface: &mut S, ctx: &RenderContext<'_>, rng: &mut R) -> RenderResult<()>
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    surface.clear(ctx.viewport_size, ctx.background_color)?;
    for (index, circle) in ctx.document.circles().iter().enumerate() {
        let fill = if ctx.selection == Some(index) {
            ctx.selection_color
        } else {
            circle.color().into()
        };
        surface.fill_circle(circle.as_kurbo(), fill)?;

        for sparkle in scatter(circle, ctx.sparkle, rng) {
            let dot = KurboCircle::new(sparkle.center, sparkle.radius);
            surface.fill_circle(dot, ctx.sparkle_color)?;
        }
    }
    Ok(())
}

/// Format a color for CSS (`rgba(r, g, b, a)`).
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!(
        "rgba({}, {}, {}, {})",
        rgba.r,
        rgba.g,
        rgba.b,
        f64::from(rgba.a) / 255.0
    )
}

/// Trait for rendering backends that build a retained scene per frame.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use kurbo::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sparkle_core::config::CanvasConfig;
    use sparkle_core::shapes::SerializableColor;

    fn viewport() -> Size {
        Size::new(800.0, 600.0)
    }

    fn canvas() -> Canvas<StdRng> {
        Canvas::with_rng(CanvasConfig::default(), StdRng::seed_from_u64(5))
    }

    fn render(canvas: &Canvas<StdRng>, seed: u64) -> Vec<DrawCommand> {
        let mut surface = RecordingSurface::new();
        let ctx = RenderContext::new(canvas, viewport());
        paint(&mut surface, &ctx, &mut StdRng::seed_from_u64(seed)).unwrap();
        surface.into_commands()
    }

    fn discs(commands: &[DrawCommand]) -> Vec<(Point, f64, SerializableColor)> {
        commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::FillCircle { center, radius, color } => Some((center, radius, color)),
                DrawCommand::Clear { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_canvas_only_clears() {
        let commands = render(&canvas(), 0);
        assert_eq!(
            commands,
            vec![DrawCommand::Clear {
                size: viewport(),
                color: SerializableColor::white(),
            }]
        );
    }

    #[test]
    fn test_circles_then_sparkles_in_order() {
        let mut canvas = canvas();
        canvas.click(Point::new(100.0, 100.0));
        canvas.click(Point::new(300.0, 200.0));

        let commands = render(&canvas, 1);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));

        let discs = discs(&commands);
        assert_eq!(discs.len(), 2 * (1 + 10));

        let first = &canvas.circles()[0];
        assert_eq!(discs[0], (first.center, 20.0, first.color()));
        for &(center, radius, color) in &discs[1..11] {
            assert!(first.contains(center));
            assert!((1.0..3.0).contains(&radius));
            assert_eq!(color, SerializableColor::white());
        }

        let second = &canvas.circles()[1];
        assert_eq!(discs[11], (second.center, 20.0, second.color()));
        for &(center, _, _) in &discs[12..] {
            assert!(second.contains(center));
        }
    }

    #[test]
    fn test_selected_circle_uses_highlight() {
        let mut canvas = canvas();
        canvas.click(Point::new(100.0, 100.0));
        canvas.click(Point::new(300.0, 200.0));
        canvas.click(Point::new(300.0, 200.0));

        let discs = discs(&render(&canvas, 2));
        assert_eq!(discs[0].2, canvas.circles()[0].color());
        assert_eq!(discs[11].2, SerializableColor::red());
    }

    #[test]
    fn test_sparkles_are_not_stored() {
        let mut canvas = canvas();
        canvas.click(Point::new(100.0, 100.0));
        let before = canvas.circles().to_vec();

        let first = render(&canvas, 3);
        let second = render(&canvas, 4);
        assert_ne!(first, second);
        assert_eq!(canvas.circles(), before.as_slice());
    }

    #[test]
    fn test_same_seed_same_frame() {
        let mut canvas = canvas();
        canvas.click(Point::new(100.0, 100.0));
        assert_eq!(render(&canvas, 8), render(&canvas, 8));
    }

    #[test]
    fn test_configured_sparkle_count() {
        let config = CanvasConfig {
            sparkle: SparkleConfig {
                count: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut canvas = Canvas::with_rng(config, StdRng::seed_from_u64(0));
        canvas.click(Point::new(50.0, 50.0));
        assert_eq!(discs(&render(&canvas, 0)).len(), 4);
    }

    /// Accepts `budget` fills, then rejects every one after.
    struct FlakySurface {
        budget: usize,
        fills: usize,
    }

    impl Surface for FlakySurface {
        fn clear(&mut self, _size: Size, _background: Color) -> RenderResult<()> {
            Ok(())
        }

        fn fill_circle(&mut self, _circle: KurboCircle, _color: Color) -> RenderResult<()> {
            if self.fills == self.budget {
                return Err(RendererError::Surface("out of budget".to_string()));
            }
            self.fills += 1;
            Ok(())
        }
    }

    #[test]
    fn test_surface_error_stops_paint() {
        let mut canvas = canvas();
        canvas.click(Point::new(100.0, 100.0));
        canvas.click(Point::new(300.0, 200.0));

        let mut surface = FlakySurface {
            budget: 3,
            fills: 0,
        };
        let ctx = RenderContext::new(&canvas, viewport());
        let result = paint(&mut surface, &ctx, &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(RendererError::Surface(_))));
        assert_eq!(surface.fills, 3);
    }

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(Color::from_rgba8(255, 0, 16, 255)), "rgba(255, 0, 16, 1)");
        assert_eq!(css_color(Color::from_rgba8(0, 0, 0, 0)), "rgba(0, 0, 0, 0)");
    }
}
