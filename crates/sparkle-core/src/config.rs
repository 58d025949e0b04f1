//! Tunable parameters for the canvas and its render pass.

use crate::shapes::{ParseColorError, SerializableColor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("default_radius ({default}) is below min_radius ({min})")]
    DefaultBelowMin { default: f64, min: f64 },
    #[error("sparkle count {count} exceeds the limit of {max}")]
    TooManySparkles { count: usize, max: usize },
    #[error("sparkle size range [{min}, {max}) is empty")]
    EmptySparkleRange { min: f64, max: f64 },
    #[error("redraw_interval_ms must be non-zero")]
    ZeroInterval,
    #[error("delete_key must not be empty")]
    EmptyDeleteKey,
    #[error(transparent)]
    Color(#[from] ParseColorError),
}

/// Upper bound on sparkles per circle per frame.
pub const MAX_SPARKLES: usize = 1000;

/// Sparkle scatter parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    /// Dots painted per circle per render.
    pub count: usize,
    /// Smallest dot radius (inclusive).
    pub min_size: f64,
    /// Largest dot radius (exclusive).
    pub max_size: f64,
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: 10,
            min_size: 1.0,
            max_size: 3.0,
        }
    }
}

/// Canvas configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Radius given to newly created circles.
    pub default_radius: f64,
    /// Lower bound for any circle radius.
    pub min_radius: f64,
    /// Radius change per scroll event.
    pub resize_step: f64,
    /// Key identifier that removes the selected circle.
    pub delete_key: String,
    /// Fill used for the selected circle.
    pub highlight_color: SerializableColor,
    /// Fill used for sparkle dots.
    pub sparkle_color: SerializableColor,
    /// Color the surface is cleared to.
    pub background_color: SerializableColor,
    /// Period of the idle re-render that animates sparkles.
    pub redraw_interval_ms: u32,
    pub sparkle: SparkleConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_radius: 20.0,
            min_radius: 5.0,
            resize_step: 2.0,
            delete_key: "Delete".to_string(),
            highlight_color: SerializableColor::red(),
            sparkle_color: SerializableColor::white(),
            background_color: SerializableColor::white(),
            redraw_interval_ms: 300,
            sparkle: SparkleConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter describes valid geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("min_radius", self.min_radius)?;
        positive("default_radius", self.default_radius)?;
        positive("resize_step", self.resize_step)?;
        if self.default_radius < self.min_radius {
            return Err(ConfigError::DefaultBelowMin {
                default: self.default_radius,
                min: self.min_radius,
            });
        }
        if self.sparkle.count > MAX_SPARKLES {
            return Err(ConfigError::TooManySparkles {
                count: self.sparkle.count,
                max: MAX_SPARKLES,
            });
        }
        positive("sparkle.min_size", self.sparkle.min_size)?;
        if self.sparkle.max_size.is_nan() || self.sparkle.min_size >= self.sparkle.max_size {
            return Err(ConfigError::EmptySparkleRange {
                min: self.sparkle.min_size,
                max: self.sparkle.max_size,
            });
        }
        if self.redraw_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.delete_key.is_empty() {
            return Err(ConfigError::EmptyDeleteKey);
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.default_radius - 20.0).abs() < f64::EPSILON);
        assert!((config.min_radius - 5.0).abs() < f64::EPSILON);
        assert!((config.resize_step - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.sparkle.count, 10);
        assert_eq!(config.redraw_interval_ms, 300);
        assert_eq!(config.delete_key, "Delete");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{"resize_step": 4, "sparkle": {"count": 3}, "highlight_color": "#00ff00"}"##;
        let config = CanvasConfig::from_json(json).unwrap();
        assert!((config.resize_step - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.sparkle.count, 3);
        assert!((config.sparkle.max_size - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.highlight_color, SerializableColor::rgb(0, 255, 0));
        assert!((config.default_radius - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CanvasConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(CanvasConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(CanvasConfig::from_json("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"highlight_color": "red"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        let config = CanvasConfig {
            min_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "min_radius", .. })
        ));

        let config = CanvasConfig {
            default_radius: 3.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::DefaultBelowMin { .. })));

        let config = CanvasConfig {
            resize_step: -2.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "resize_step", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_sparkle_range() {
        let config = CanvasConfig {
            sparkle: SparkleConfig {
                count: 10,
                min_size: 3.0,
                max_size: 3.0,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptySparkleRange { .. })));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let config = CanvasConfig {
            redraw_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_rejects_empty_delete_key() {
        let config = CanvasConfig {
            delete_key: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyDeleteKey)));
    }

    #[test]
    fn test_sparkle_count_limit() {
        let mut config = CanvasConfig::default();
        config.sparkle.count = MAX_SPARKLES;
        assert!(config.validate().is_ok());

        config.sparkle.count = MAX_SPARKLES + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManySparkles { count: 1001, max: 1000 })
        ));
    }
}
