//! Hand-off to the scene renderer.
//!
//! The 3D window, colour mapping, and label drawing belong to the external
//! rendering collaborator; this module assembles exactly the inputs that
//! collaborator consumes and resolves the scale configuration against the
//! reduced map at presentation time.

use anyhow::Result;
use tracing::info;

use healpix_common::ValueRange;
use map_reducer::ReducedMap;

use crate::config::ViewerSettings;

/// Everything the renderer needs for one map.
#[derive(Debug, Clone)]
pub struct SceneInput {
    /// NESTED-ordered pixel values at `order`.
    pub values: Vec<f32>,

    /// HEALPix order of `values`.
    pub order: u32,

    /// Range of `values`, as computed by the reducer.
    pub data_range: ValueRange,

    pub colourmap_type: String,
    pub use_relief: bool,

    /// Resolved colour-scale input bounds.
    pub colour_input: (f32, f32),

    /// Resolved relief-scale input bounds.
    pub relief_input: (f32, f32),

    /// Resolved relief-scale output bounds.
    pub relief_output: (f32, f32),

    /// Scene annotation, e.g. `"3rd order HEALPix data from sky.json"`.
    pub label: String,
}

impl SceneInput {
    /// Resolve the scale settings against the reduced map and package the
    /// renderer inputs. Each autoscale range is computed here, from the
    /// final pixel values; explicit bounds pass through untouched.
    pub fn compose(map_path: &str, map: ReducedMap, settings: &ViewerSettings) -> Self {
        let order = map.target_order();
        let data_range = map.range();
        let values = map.into_values();

        let colour_input = settings.colour_input.resolve(&values);
        let relief_input = settings.relief_input.resolve(&values);
        let relief_output = settings.relief_output.resolve(&values);

        let label = format!("{} order HEALPix data from {}", order_label(order), map_path);

        Self {
            values,
            order,
            data_range,
            colourmap_type: settings.colourmap_type.clone(),
            use_relief: settings.use_relief,
            colour_input,
            relief_input,
            relief_output,
            label,
        }
    }
}

/// Ordinal form of a map order for scene labels.
fn order_label(order: u32) -> String {
    let suffix = match order {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", order, suffix)
}

/// Consumer of composed scenes. The production implementation is the 3D
/// scene window; [`SummarySink`] stands in when only the pipeline runs.
pub trait SceneSink {
    fn present(&self, scene: &SceneInput) -> Result<()>;
}

/// Logs the scene parameters instead of opening a window.
pub struct SummarySink;

impl SceneSink for SummarySink {
    fn present(&self, scene: &SceneInput) -> Result<()> {
        info!(
            order = scene.order,
            pixels = scene.values.len(),
            colourmap = %scene.colourmap_type,
            relief = scene.use_relief,
            "Scene ready"
        );
        info!(
            min = scene.data_range.min,
            max = scene.data_range.max,
            "Pixel data range"
        );
        info!(
            colour_input = ?scene.colour_input,
            relief_input = ?scene.relief_input,
            relief_output = ?scene.relief_output,
            "Resolved scales"
        );
        info!(label = %scene.label, "Scene label");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use healpix_common::{PixelOrdering, ScaleRange};
    use map_reducer::{reduce_map, testdata, ReductionConfig};

    fn settings() -> ViewerSettings {
        ViewerSettings {
            order_reduce: 0,
            use_relief: true,
            colourmap_type: "plasma".to_string(),
            colour_input: ScaleRange::Auto,
            relief_input: ScaleRange::Explicit {
                min: -0.002,
                max: 0.002,
            },
            relief_output: ScaleRange::Explicit { min: 0.0, max: 0.1 },
        }
    }

    #[test]
    fn test_compose_resolves_scales_at_presentation() {
        let raw = testdata::index_map(2, PixelOrdering::Nested);
        let reduced = reduce_map(raw, &ReductionConfig::new(0)).unwrap();
        let scene = SceneInput::compose("sky.json", reduced, &settings());

        assert_eq!(scene.order, 1);
        assert_eq!(scene.values.len(), 48);
        // Auto range comes from the data, explicit bounds verbatim
        assert_eq!(scene.colour_input, (0.0, 47.0));
        assert_eq!(scene.relief_input, (-0.002, 0.002));
        assert_eq!(scene.relief_output, (0.0, 0.1));
        assert!(scene.use_relief);
    }

    #[test]
    fn test_scene_label() {
        let raw = testdata::constant_map(2, PixelOrdering::Nested, 1.0);
        let reduced = reduce_map(raw, &ReductionConfig::new(0)).unwrap();
        let scene = SceneInput::compose("maps/cmb.json", reduced, &settings());
        assert_eq!(scene.label, "1st order HEALPix data from maps/cmb.json");
    }

    #[test]
    fn test_order_label_suffixes() {
        assert_eq!(order_label(1), "1st");
        assert_eq!(order_label(2), "2nd");
        assert_eq!(order_label(3), "3rd");
        assert_eq!(order_label(4), "4th");
        assert_eq!(order_label(11), "11th");
    }
}
