//! Pointer and keyboard controls, for help output.

use sparkle_core::config::CanvasConfig;

/// A control binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub input: String,
    pub description: &'static str,
}

impl Shortcut {
    pub fn new(input: impl Into<String>, description: &'static str) -> Self {
        Self {
            input: input.into(),
            description,
        }
    }

    /// Format the binding for display (e.g., "Click            Add or select a circle").
    pub fn format(&self) -> String {
        format!("{:16} {}", self.input, self.description)
    }
}

/// Registry of all controls.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all controls for a configuration (the delete key is configurable).
    pub fn all(config: &CanvasConfig) -> Vec<Shortcut> {
        vec![
            Shortcut::new("Click", "Add a circle, or select the one under the pointer"),
            Shortcut::new("Drag", "Move the selected circle"),
            Shortcut::new("Scroll up", "Grow the selected circle"),
            Shortcut::new("Scroll down", "Shrink the selected circle"),
            Shortcut::new(config.delete_key.as_str(), "Delete the selected circle"),
        ]
    }

    /// Log all controls at info level.
    pub fn log_all(config: &CanvasConfig) {
        log::info!("Controls:");
        for shortcut in Self::all(config) {
            log::info!("  {}", shortcut.format());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_key_follows_config() {
        let config = CanvasConfig {
            delete_key: "Backspace".to_string(),
            ..Default::default()
        };
        let all = ShortcutRegistry::all(&config);
        assert_eq!(all.len(), 5);
        assert_eq!(all[4].input, "Backspace");
    }

    #[test]
    fn test_format_pads_input() {
        let shortcut = Shortcut::new("Drag", "Move");
        assert_eq!(shortcut.format(), "Drag             Move");
    }
}
