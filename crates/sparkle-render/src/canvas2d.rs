//! Browser `CanvasRenderingContext2d` backend.

use crate::renderer::{RenderResult, RendererError, Surface, css_color};
use kurbo::{Circle as KurboCircle, Size};
use peniko::Color;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws directly into an HTML canvas through its 2D context.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Acquire the 2D context of `canvas`.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> RenderResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RendererError::InitFailed(format!("{:?}", e)))?
            .ok_or_else(|| RendererError::InitFailed("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| {
                RendererError::InitFailed("context is not a CanvasRenderingContext2d".to_string())
            })?;
        Ok(Self { ctx })
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()> {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
        self.ctx.set_fill_style_str(&css_color(background));
        self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_circle(&mut self, circle: KurboCircle, color: Color) -> RenderResult<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU)
            .map_err(|e| RendererError::Surface(format!("arc failed: {:?}", e)))?;
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
        Ok(())
    }
}
