//! Loading configuration from the host: URL parameters on the web, a JSON
//! file on native.

use sparkle_core::config::{CanvasConfig, ConfigError};
use sparkle_core::shapes::SerializableColor;

/// Split a query string or hash (`?a=1&b=2` / `#a=1`) into key/value pairs.
/// Pairs without a value are skipped.
pub fn parse_params(s: &str) -> Vec<(&str, &str)> {
    let s = s.trim_start_matches(['?', '#']);
    s.split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .collect()
}

/// Apply overrides such as `?radius=30&step=4&sparkles=20` to `config`.
///
/// Recognised keys: `radius`, `min`, `step`, `sparkles`, `interval`,
/// `highlight` (hex color, `#` optional). Unknown keys are ignored and
/// unparsable numbers are skipped with a warning. The result is validated.
pub fn apply_params(config: &mut CanvasConfig, query: &str) -> Result<(), ConfigError> {
    for (key, value) in parse_params(query) {
        match key {
            "radius" => set_number(&mut config.default_radius, key, value),
            "min" => set_number(&mut config.min_radius, key, value),
            "step" => set_number(&mut config.resize_step, key, value),
            "sparkles" => set_number(&mut config.sparkle.count, key, value),
            "interval" => set_number(&mut config.redraw_interval_ms, key, value),
            "highlight" => {
                let hex = format!("#{}", value.trim_start_matches('#').trim_start_matches("%23"));
                config.highlight_color = SerializableColor::try_from(hex)?;
            }
            _ => {}
        }
    }
    config.validate()
}

fn set_number<T: std::str::FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => log::warn!("Ignoring {}={}: not a number", key, value),
    }
}

/// Read and validate a JSON config file.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config_file(
    path: impl AsRef<std::path::Path>,
) -> Result<CanvasConfig, crate::AppError> {
    let json = std::fs::read_to_string(path)?;
    Ok(CanvasConfig::from_json(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        assert_eq!(
            parse_params("?radius=30&step=&x&sparkles=5"),
            vec![("radius", "30"), ("sparkles", "5")]
        );
        assert_eq!(parse_params("#interval=100"), vec![("interval", "100")]);
        assert!(parse_params("").is_empty());
    }

    #[test]
    fn test_apply_params() {
        let mut config = CanvasConfig::default();
        let query = "?radius=30&min=4&step=3&sparkles=0&interval=50&highlight=00ff00";
        apply_params(&mut config, query).unwrap();
        assert!((config.default_radius - 30.0).abs() < f64::EPSILON);
        assert!((config.min_radius - 4.0).abs() < f64::EPSILON);
        assert!((config.resize_step - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.sparkle.count, 0);
        assert_eq!(config.redraw_interval_ms, 50);
        assert_eq!(config.highlight_color, SerializableColor::rgb(0, 255, 0));
    }

    #[test]
    fn test_encoded_hash_in_color() {
        let mut config = CanvasConfig::default();
        apply_params(&mut config, "?highlight=%230000ff").unwrap();
        assert_eq!(config.highlight_color, SerializableColor::rgb(0, 0, 255));
    }

    #[test]
    fn test_bad_number_is_skipped() {
        let mut config = CanvasConfig::default();
        apply_params(&mut config, "?radius=big&unknown=1").unwrap();
        assert_eq!(config, CanvasConfig::default());
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let mut config = CanvasConfig::default();
        assert!(matches!(
            apply_params(&mut config, "?radius=2"),
            Err(ConfigError::DefaultBelowMin { .. })
        ));
        let mut config = CanvasConfig::default();
        assert!(matches!(
            apply_params(&mut config, "?highlight=nope"),
            Err(ConfigError::Color(_))
        ));
    }

    #[test]
    fn test_huge_sparkle_count_is_rejected() {
        let mut config = CanvasConfig::default();
        assert!(matches!(
            apply_params(&mut config, "?sparkles=100000000"),
            Err(ConfigError::TooManySparkles { .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"resize_step": 6}"#).unwrap();
        let config = load_config_file(file.path()).unwrap();
        assert!((config.resize_step - 6.0).abs() < f64::EPSILON);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_config_file_errors() {
        assert!(matches!(
            load_config_file("/nonexistent/sparkle.json"),
            Err(crate::AppError::Io(_))
        ));

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"min_radius": -1}"#).unwrap();
        assert!(matches!(
            load_config_file(file.path()),
            Err(crate::AppError::Config(ConfigError::NotPositive { .. }))
        ));
    }
}
