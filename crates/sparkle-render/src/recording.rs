//! Surface that records draw calls instead of rasterizing them.

use crate::renderer::{RenderResult, Surface};
use kurbo::{Circle as KurboCircle, Point, Size};
use peniko::Color;
use sparkle_core::shapes::SerializableColor;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Size,
        color: SerializableColor,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: SerializableColor,
    },
}

/// In-memory [`Surface`] used for headless rendering and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Size, background: Color) -> RenderResult<()> {
        // A clear discards everything painted before it.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            size,
            color: background.into(),
        });
        Ok(())
    }

    fn fill_circle(&mut self, circle: KurboCircle, color: Color) -> RenderResult<()> {
        self.commands.push(DrawCommand::FillCircle {
            center: circle.center,
            radius: circle.radius,
            color: color.into(),
        });
        Ok(())
    }
}
