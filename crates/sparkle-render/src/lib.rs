//! Sparkle Render Library
//!
//! Drawing-surface abstraction and backends for Sparkle. Every backend
//! shares the same [`paint`] pass; Vello is the default GPU backend and the
//! browser 2D canvas is used on wasm32.

mod recording;
mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

#[cfg(target_arch = "wasm32")]
mod canvas2d;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, Surface, css_color, paint};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2dSurface;
