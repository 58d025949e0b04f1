//! Sparkle Core Library
//!
//! Platform-agnostic shape store and interaction logic for the Sparkle
//! drawing toy: click to add circles, drag to move, scroll to resize,
//! Delete to remove.

pub mod canvas;
pub mod config;
pub mod input;
pub mod shapes;
pub mod sparkle;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{CanvasConfig, ConfigError, SparkleConfig};
pub use input::{EventResponse, InputEvent};
pub use shapes::{Circle, ParseColorError, SerializableColor};
pub use sparkle::{Sparkle, scatter};
