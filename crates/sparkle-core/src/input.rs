//! Host-independent input events.
//!
//! Hosts translate their native events (DOM events, winit window events)
//! into [`InputEvent`]s in surface-local coordinates and feed them to
//! [`Canvas::handle_event`](crate::Canvas::handle_event).

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Pointer and keyboard events the canvas reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Completed click (press and release on the surface).
    Click { position: Point },
    /// Primary button went down.
    Press { position: Point },
    /// Pointer moved.
    Move { position: Point },
    /// Primary button went up.
    Release,
    /// Key pressed, identified by its DOM-style key name (e.g. `"Delete"`).
    Key(String),
    /// Wheel scroll. Negative `delta.y` scrolls up/away.
    Scroll { delta: Vec2 },
}

/// What the host should do after an event has been handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The canvas changed and must be repainted.
    pub redraw: bool,
    /// The host's default action for the event (page scroll) must be suppressed.
    pub prevent_default: bool,
}

impl EventResponse {
    pub const NONE: Self = Self {
        redraw: false,
        prevent_default: false,
    };

    pub fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            prevent_default: false,
        }
    }
}
