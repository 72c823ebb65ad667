//! Pixel ordering schemes for HEALPix maps.

use serde::{Deserialize, Serialize};

/// The two canonical HEALPix pixel orderings.
///
/// `Nested` numbers pixels along the quadtree subdivision of the 12 base
/// faces, so the four children of any pixel are index-contiguous at the next
/// finer order. `Ring` numbers pixels by isolatitude ring, west to east
/// within a ring, north pole to south pole overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelOrdering {
    Ring,
    Nested,
}

impl PixelOrdering {
    /// Normalize the ordering tag found in map file metadata.
    ///
    /// Readers emit `"RING"` or `"NESTED"`; only a leading `R`/`r` selects
    /// ring ordering, every other tag is treated as nested.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().chars().next() {
            Some('R') | Some('r') => Self::Ring,
            _ => Self::Nested,
        }
    }

    /// Get the canonical metadata tag for this ordering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ring => "RING",
            Self::Nested => "NESTED",
        }
    }
}

impl std::fmt::Display for PixelOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
