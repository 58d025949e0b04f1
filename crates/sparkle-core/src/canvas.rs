//! Canvas document and interaction state.

use crate::config::CanvasConfig;
use crate::input::{EventResponse, InputEvent};
use crate::shapes::{Circle, SerializableColor};
use kurbo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Ordered collection of circles.
///
/// Insertion order is paint order: later circles are drawn on top and win
/// hit tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasDocument {
    circles: Vec<Circle>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a circle on top of the others and return its index.
    pub fn add_circle(&mut self, circle: Circle) -> usize {
        self.circles.push(circle);
        self.circles.len() - 1
    }

    /// Remove a circle, shifting later circles down by one.
    pub fn remove_circle(&mut self, index: usize) -> Option<Circle> {
        (index < self.circles.len()).then(|| self.circles.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Circle> {
        self.circles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Circle> {
        self.circles.get_mut(index)
    }

    /// Circles in paint order (back to front).
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Index of the topmost circle containing `point`.
    pub fn circle_at_point(&self, point: Point) -> Option<usize> {
        self.circles.iter().rposition(|c| c.contains(point))
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }
}

/// Interactive canvas: the circles, the current selection and the drag flag.
///
/// Every handler runs to completion on the caller's thread and reports
/// whether the surface must be repainted. Colors for new circles come from
/// the injected random source `R`.
#[derive(Debug, Clone)]
pub struct Canvas<R = SmallRng> {
    document: CanvasDocument,
    selection: Option<usize>,
    dragging: bool,
    config: CanvasConfig,
    rng: R,
}

impl Canvas<SmallRng> {
    /// Create a canvas whose colors derive from `seed`.
    pub fn seeded(config: CanvasConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Canvas<R> {
    /// Create an empty canvas drawing colors from `rng`.
    pub fn with_rng(config: CanvasConfig, rng: R) -> Self {
        Self {
            document: CanvasDocument::new(),
            selection: None,
            dragging: false,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Circles in paint order.
    pub fn circles(&self) -> &[Circle] {
        self.document.circles()
    }

    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Circle> {
        self.selection.and_then(|i| self.document.get(i))
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Select the topmost circle under `point`, or create a new one there.
    ///
    /// Creating a circle clears the selection. Always requests a redraw.
    pub fn click(&mut self, point: Point) -> bool {
        if let Some(index) = self.document.circle_at_point(point) {
            log::debug!("Selected circle {} at ({}, {})", index, point.x, point.y);
            self.selection = Some(index);
        } else {
            let color = SerializableColor::random_opaque(&mut self.rng);
            let index = self
                .document
                .add_circle(Circle::new(point, self.config.default_radius, color));
            log::debug!(
                "Created circle {} at ({}, {}) with color {}",
                index,
                point.x,
                point.y,
                color.to_hex()
            );
            self.selection = None;
        }
        true
    }

    /// Start dragging if `point` is inside the selected circle.
    ///
    /// This does not change the selection: pressing outside the selected
    /// circle leaves it selected but not draggable.
    pub fn press(&mut self, point: Point) -> bool {
        let Some(selected) = self.selected() else {
            return false;
        };
        if selected.contains(point) {
            log::debug!("Drag started at ({}, {})", point.x, point.y);
            self.dragging = true;
        }
        self.dragging
    }

    /// Move the dragged circle's center to `point`.
    pub fn drag_to(&mut self, point: Point) -> bool {
        if !self.dragging {
            return false;
        }
        let Some(circle) = self.selection.and_then(|i| self.document.get_mut(i)) else {
            return false;
        };
        circle.center = point;
        true
    }

    /// End any drag in progress.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Handle a key press. Only the configured delete key does anything.
    pub fn key_down(&mut self, key: &str) -> bool {
        key == self.config.delete_key && self.delete_selected().is_some()
    }

    /// Remove the selected circle and clear the selection.
    pub fn delete_selected(&mut self) -> Option<Circle> {
        let index = self.selection.take()?;
        self.dragging = false;
        let removed = self.document.remove_circle(index);
        if removed.is_some() {
            log::debug!("Deleted circle {}", index);
        }
        removed
    }

    /// Resize the selected circle by one step; negative `delta_y` grows it.
    ///
    /// Without a selection the event is left to the host (no redraw, default
    /// scroll behaviour kept).
    pub fn scroll(&mut self, delta_y: f64) -> EventResponse {
        let step = if delta_y < 0.0 {
            self.config.resize_step
        } else {
            -self.config.resize_step
        };
        let min_radius = self.config.min_radius;
        let Some(circle) = self.selection.and_then(|i| self.document.get_mut(i)) else {
            return EventResponse::NONE;
        };
        circle.resize_by(step, min_radius);
        log::debug!("Resized selected circle to {}", circle.radius());
        EventResponse {
            redraw: true,
            prevent_default: true,
        }
    }

    /// Dispatch an input event to the matching handler.
    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::Click { position } => EventResponse::redraw(self.click(position)),
            InputEvent::Press { position } => {
                self.press(position);
                EventResponse::NONE
            }
            InputEvent::Move { position } => EventResponse::redraw(self.drag_to(position)),
            InputEvent::Release => {
                self.release();
                EventResponse::NONE
            }
            InputEvent::Key(key) => EventResponse::redraw(self.key_down(&key)),
            InputEvent::Scroll { delta } => self.scroll(delta.y),
        }
    }
}
