//! Map sources.
//!
//! The native sky-map format (FITS) is the contract of an external reader;
//! the pipeline only needs the tuple that reader produces. [`MapFile`] is
//! that tuple and [`JsonMapSource`] reads it from the JSON interchange
//! layout used by tooling and tests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use healpix_common::ViewerResult;

/// Reader output: resolution, metadata tags, and the per-pixel values in
/// the file's native ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub nside: u32,

    /// Raw ordering tag, e.g. "RING" or "NESTED".
    pub ordering: String,

    /// Coordinate system tag, e.g. "C" or "GALACTIC".
    #[serde(default)]
    pub coordsys: String,

    pub values: Vec<f32>,
}

/// Anything that can produce a sky map for the pipeline.
///
/// Failures surface as [`healpix_common::ViewerError`]: an unreadable file
/// is a map-read error, a file that parses but does not describe a map is a
/// metadata error.
pub trait MapSource {
    fn read(&self) -> ViewerResult<MapFile>;
}

/// Reads a map from the JSON interchange format.
pub struct JsonMapSource {
    path: PathBuf,
}

impl JsonMapSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MapSource for JsonMapSource {
    fn read(&self) -> ViewerResult<MapFile> {
        let content = std::fs::read_to_string(&self.path)?;
        let map = serde_json::from_str(&content)?;
        Ok(map)
    }
}
