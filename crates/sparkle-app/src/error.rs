//! Application-level errors.

use sparkle_core::config::ConfigError;
use sparkle_render::RendererError;
use thiserror::Error;

/// Errors raised while starting or running a host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Browser API error: {0}")]
    Web(String),
}
