//! Sparkle Application
//!
//! Host shells that feed pointer, keyboard and timer events into the
//! core canvas and paint it: a browser shell on the 2D canvas and a
//! native winit + Vello window.

mod error;
pub mod settings;
mod shortcuts;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
mod app;

#[cfg(target_arch = "wasm32")]
mod web;

pub use error::AppError;
pub use shortcuts::{Shortcut, ShortcutRegistry};

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub use app::{App, AppConfig};

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;

/// Seed for the random sources, taken from the wall clock.
pub fn seed_from_clock() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}
