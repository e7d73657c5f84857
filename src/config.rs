//! Remediation configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser viewport used when measuring rendered slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Tuning knobs for the fix pipeline.
///
/// Every field has a working default, so `FixConfig::default()` is a
/// usable configuration. Deserializes from a partial JSON object; missing
/// keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixConfig {
    /// Measure-and-remediate rounds before giving up
    pub max_iterations: usize,

    /// List length above which a split is attempted
    pub list_max_items: usize,

    /// Visible character count above which a paragraph split is attempted
    pub paragraph_max_chars: usize,

    /// Safety margin applied to the measured fit ratio when scaling
    pub font_step: f64,

    /// Smallest font scale global scaling will emit
    pub font_min: f64,

    /// Scratch directory for rendered HTML and probe scripts
    pub temp_dir: PathBuf,

    /// Viewport for the measurement browser
    pub viewport: Viewport,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            list_max_items: 10,
            paragraph_max_chars: 600,
            font_step: 0.95,
            font_min: 0.7,
            temp_dir: PathBuf::from(".slidefit-temp"),
            viewport: Viewport::default(),
        }
    }
}

impl FixConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the list length threshold.
    pub fn with_list_max_items(mut self, list_max_items: usize) -> Self {
        self.list_max_items = list_max_items;
        self
    }

    /// Set the paragraph length threshold.
    pub fn with_paragraph_max_chars(mut self, paragraph_max_chars: usize) -> Self {
        self.paragraph_max_chars = paragraph_max_chars;
        self
    }

    /// Set the scaling safety margin.
    pub fn with_font_step(mut self, font_step: f64) -> Self {
        self.font_step = font_step;
        self
    }

    /// Set the smallest font scale.
    pub fn with_font_min(mut self, font_min: f64) -> Self {
        self.font_min = font_min;
        self
    }

    /// Set the scratch directory.
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Set the measurement viewport.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FixConfig::default();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.list_max_items, 10);
        assert_eq!(config.paragraph_max_chars, 600);
        assert_eq!(config.font_step, 0.95);
        assert_eq!(config.font_min, 0.7);
        assert_eq!(config.temp_dir, PathBuf::from(".slidefit-temp"));
        assert_eq!(config.viewport, Viewport { width: 1920, height: 1080 });
    }

    #[test]
    fn test_builder_chain() {
        let config = FixConfig::new()
            .with_max_iterations(5)
            .with_list_max_items(8)
            .with_font_min(0.5)
            .with_temp_dir("/tmp/scratch")
            .with_viewport(1280, 720);
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.list_max_items, 8);
        assert_eq!(config.font_min, 0.5);
        assert_eq!(config.temp_dir, PathBuf::from("/tmp/scratch"));
        assert_eq!(config.viewport.width, 1280);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: FixConfig =
            serde_json::from_str(r#"{"maxIterations": 7, "fontMin": 0.6}"#).unwrap();
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.font_min, 0.6);
        assert_eq!(config.list_max_items, 10);
        assert_eq!(config.paragraph_max_chars, 600);
    }

    #[test]
    fn test_viewport_json() {
        let config: FixConfig =
            serde_json::from_str(r#"{"viewport": {"width": 1280, "height": 960}}"#).unwrap();
        assert_eq!(config.viewport, Viewport { width: 1280, height: 960 });
    }
}
