//! Raw map input, exactly as produced by the external file reader.

use healpix_common::{PixelOrdering, Resolution};

use crate::error::{ReduceError, Result};

/// An immutable sky map in its native ordering at its native resolution.
///
/// Built once from reader output and consumed by value by the reducer, so
/// its backing storage is released as soon as the reduced array exists.
#[derive(Debug, Clone)]
pub struct RawMap {
    resolution: Resolution,
    ordering: PixelOrdering,
    values: Vec<f32>,
}

impl RawMap {
    /// Build a raw map, validating that `nside` is a power of two and that
    /// the value array covers every pixel.
    pub fn new(nside: u32, ordering: PixelOrdering, values: Vec<f32>) -> Result<Self> {
        let resolution =
            Resolution::from_nside(nside).map_err(|_| ReduceError::InvalidNside(nside))?;
        let expected = resolution.npix();
        if values.len() != expected {
            return Err(ReduceError::PixelCountMismatch {
                nside,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            resolution,
            ordering,
            values,
        })
    }

    /// Build a raw map straight from the reader's untyped metadata tag.
    pub fn from_reader_parts(nside: u32, ordering_tag: &str, values: Vec<f32>) -> Result<Self> {
        Self::new(nside, PixelOrdering::from_tag(ordering_tag), values)
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Order of the native resolution.
    pub fn source_order(&self) -> u32 {
        self.resolution.order()
    }

    pub fn ordering(&self) -> PixelOrdering {
        self.ordering
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub(crate) fn into_values(self) -> Vec<f32> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_pixel_count() {
        let err = RawMap::new(2, PixelOrdering::Nested, vec![0.0; 47]).unwrap_err();
        match err {
            ReduceError::PixelCountMismatch {
                nside,
                expected,
                actual,
            } => {
                assert_eq!(nside, 2);
                assert_eq!(expected, 48);
                assert_eq!(actual, 47);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_new_validates_nside() {
        assert!(matches!(
            RawMap::new(3, PixelOrdering::Nested, vec![0.0; 108]),
            Err(ReduceError::InvalidNside(3))
        ));
    }

    #[test]
    fn test_from_reader_parts_normalizes_tag() {
        let map = RawMap::from_reader_parts(2, "RING", vec![0.0; 48]).unwrap();
        assert_eq!(map.ordering(), PixelOrdering::Ring);
        assert_eq!(map.source_order(), 1);

        let map = RawMap::from_reader_parts(2, "NESTED", vec![0.0; 48]).unwrap();
        assert_eq!(map.ordering(), PixelOrdering::Nested);
    }
}
