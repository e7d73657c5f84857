//! Config file loading and discovery.

use serde::Deserialize;
use slidefit::{FixConfig, Viewport};
use std::fs;
use std::path::{Path, PathBuf};

/// File picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "slidefit.config.json";

/// Optional overrides read from a JSON config file.
///
/// Every field may be omitted; missing fields keep whatever value the
/// merge target already has.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub max_iterations: Option<usize>,
    pub list_max_items: Option<usize>,
    pub paragraph_max_chars: Option<usize>,
    pub font_step: Option<f64>,
    pub font_min: Option<f64>,
    pub temp_dir: Option<PathBuf>,
    pub viewport: Option<Viewport>,
}

impl FileConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let config: FileConfig = serde_json::from_str(&text)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Lay the file's settings over `config`.
    pub fn apply(self, mut config: FixConfig) -> FixConfig {
        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.list_max_items {
            config.list_max_items = v;
        }
        if let Some(v) = self.paragraph_max_chars {
            config.paragraph_max_chars = v;
        }
        if let Some(v) = self.font_step {
            config.font_step = v;
        }
        if let Some(v) = self.font_min {
            config.font_min = v;
        }
        if let Some(v) = self.temp_dir {
            config.temp_dir = v;
        }
        if let Some(v) = self.viewport {
            config.viewport = v;
        }
        config
    }
}

/// Path of `slidefit.config.json` in the working directory, if one exists.
pub fn discover() -> Option<PathBuf> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}
