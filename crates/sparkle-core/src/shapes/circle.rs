//! Circle shape.

use super::SerializableColor;
use kurbo::{Circle as KurboCircle, Point};
use serde::{Deserialize, Serialize};

/// A filled circle.
///
/// The fill color is fixed at creation. The radius only changes through
/// [`Circle::resize_by`], which enforces a lower bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point in surface coordinates.
    #[serde(flatten)]
    pub center: Point,
    radius: f64,
    color: SerializableColor,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64, color: SerializableColor) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Grow (positive `delta`) or shrink the radius, never going below `min_radius`.
    pub fn resize_by(&mut self, delta: f64, min_radius: f64) {
        self.radius = (self.radius + delta).max(min_radius);
    }

    /// Check whether a point lies inside the circle. The edge counts as inside.
    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64, radius: f64) -> Circle {
        Circle::new(Point::new(x, y), radius, SerializableColor::white())
    }

    #[test]
    fn test_contains_center() {
        assert!(circle(50.0, 50.0, 20.0).contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_contains_edge() {
        let c = circle(0.0, 0.0, 10.0);
        assert!(c.contains(Point::new(10.0, 0.0)));
        assert!(c.contains(Point::new(0.0, -10.0)));
        assert!(!c.contains(Point::new(15.0, 0.0)));
        assert!(!c.contains(Point::new(7.5, 7.5)));
    }

    #[test]
    fn test_resize_clamps() {
        let mut c = circle(0.0, 0.0, 20.0);
        c.resize_by(2.0, 5.0);
        assert!((c.radius() - 22.0).abs() < f64::EPSILON);
        c.resize_by(-100.0, 5.0);
        assert!((c.radius() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_flat() {
        let color = SerializableColor::rgb(0xAB, 0xCD, 0xEF);
        let c = Circle::new(Point::new(100.0, 100.0), 20.0, color);
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"x": 100.0, "y": 100.0, "radius": 20.0, "color": "#ABCDEF"})
        );
    }
}
