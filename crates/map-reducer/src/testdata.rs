//! Synthetic map generation for tests and benches.
//!
//! Maps are tiny (nside 2 to 8, 48 to 768 pixels) in unit tests; benches
//! scale the same generators up.

use healpix_common::{PixelOrdering, Resolution};

use crate::raw::RawMap;

/// Map with every pixel set to `value`.
///
/// # Panics
/// Panics on an invalid `nside`; generators are only called with
/// powers of two.
pub fn constant_map(nside: u32, ordering: PixelOrdering, value: f32) -> RawMap {
    let npix = Resolution::from_nside(nside)
        .expect("test nside must be a power of two")
        .npix();
    RawMap::new(nside, ordering, vec![value; npix]).expect("pixel count matches nside")
}

/// Map where pixel `i` of the native ordering holds the value `i`.
/// This pattern makes it easy to verify index correspondences after a
/// reduction.
pub fn index_map(nside: u32, ordering: PixelOrdering) -> RawMap {
    let npix = Resolution::from_nside(nside)
        .expect("test nside must be a power of two")
        .npix();
    let values = (0..npix).map(|i| i as f32).collect();
    RawMap::new(nside, ordering, values).expect("pixel count matches nside")
}
