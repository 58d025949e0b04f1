//! Decorative sparkle dots scattered inside circles.
//!
//! Sparkles are never stored; a fresh scatter is drawn on every render pass
//! so the pattern animates while the canvas is idle.

use crate::config::SparkleConfig;
use crate::shapes::Circle;
use kurbo::Point;
use rand::Rng;
use std::f64::consts::TAU;

/// A single sparkle dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sparkle {
    pub center: Point,
    pub radius: f64,
}

/// Scatter `config.count` dots inside `circle`.
///
/// Each dot picks a uniform angle, then scales the x and y offsets by two
/// independent factors in `[0, radius)`. An empty size range yields dots of
/// `min_size`.
pub fn scatter<R: Rng + ?Sized>(
    circle: &Circle,
    config: &SparkleConfig,
    rng: &mut R,
) -> Vec<Sparkle> {
    let radius = circle.radius();
    (0..config.count)
        .map(|_| {
            let angle = rng.random_range(0.0..TAU);
            let dx = angle.cos() * rng.random::<f64>() * radius;
            let dy = angle.sin() * rng.random::<f64>() * radius;
            let size = if config.min_size < config.max_size {
                rng.random_range(config.min_size..config.max_size)
            } else {
                config.min_size
            };
            Sparkle {
                center: Point::new(circle.center.x + dx, circle.center.y + dy),
                radius: size,
            }
        })
        .collect()
}
