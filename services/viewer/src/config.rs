//! Viewer configuration.
//!
//! File-based settings (YAML) with command-line overrides layered on top,
//! resolved into one immutable record before the pipeline runs. The core
//! stays a pure function of its inputs; nothing here is global.

use std::path::Path;

use serde::{Deserialize, Serialize};

use healpix_common::{ScaleRange, ViewerError, ViewerResult};

/// On-disk configuration schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Orders to drop from the native map resolution.
    #[serde(default)]
    pub order_reduce: u32,

    /// Render the map with relief.
    #[serde(default)]
    pub use_relief: bool,

    /// Colour map name handed to the renderer.
    #[serde(default = "default_colourmap")]
    pub colourmap_type: String,

    /// Fixed colour-scale input bounds; absent means autoscale.
    #[serde(default)]
    pub colourmap_input_range: Option<[f32; 2]>,

    /// Fixed relief-scale input bounds; absent means autoscale.
    #[serde(default)]
    pub reliefmap_input_range: Option<[f32; 2]>,

    /// Relief-scale output bounds.
    #[serde(default = "default_relief_output")]
    pub reliefmap_output_range: Option<[f32; 2]>,
}

fn default_colourmap() -> String {
    "plasma".to_string()
}

fn default_relief_output() -> Option<[f32; 2]> {
    Some([0.0, 0.1])
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            order_reduce: 0,
            use_relief: false,
            colourmap_type: default_colourmap(),
            colourmap_input_range: None,
            reliefmap_input_range: None,
            reliefmap_output_range: default_relief_output(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::config(format!("reading {}: {}", path.display(), e)))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| ViewerError::config(format!("parsing {}: {}", path.display(), e)))?;
        config.validate().map_err(ViewerError::ConfigError)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        for (name, pair) in [
            ("colourmap_input_range", self.colourmap_input_range),
            ("reliefmap_input_range", self.reliefmap_input_range),
            ("reliefmap_output_range", self.reliefmap_output_range),
        ] {
            ScaleRange::from_pair(pair)
                .validate()
                .map_err(|e| format!("{}: {}", name, e))?;
        }
        if self.colourmap_type.is_empty() {
            return Err("colourmap_type must not be empty".to_string());
        }
        Ok(())
    }

    /// Layer command-line overrides on top and freeze the result.
    pub fn resolve(
        &self,
        order_reduce: Option<u32>,
        colourmap: Option<String>,
        relief: bool,
    ) -> ViewerSettings {
        ViewerSettings {
            order_reduce: order_reduce.unwrap_or(self.order_reduce),
            use_relief: self.use_relief || relief,
            colourmap_type: colourmap.unwrap_or_else(|| self.colourmap_type.clone()),
            colour_input: ScaleRange::from_pair(self.colourmap_input_range),
            relief_input: ScaleRange::from_pair(self.reliefmap_input_range),
            relief_output: ScaleRange::from_pair(self.reliefmap_output_range),
        }
    }
}

/// Immutable resolved settings the pipeline consumes.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub order_reduce: u32,
    pub use_relief: bool,
    pub colourmap_type: String,
    pub colour_input: ScaleRange,
    pub relief_input: ScaleRange,
    pub relief_output: ScaleRange,
}
