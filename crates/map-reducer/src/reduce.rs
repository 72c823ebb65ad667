//! The reordering / resolution-reduction transform.

use healpix_common::{PixelOrdering, Resolution, ValueRange};
use healpix_index::IndexMapper;
use rayon::prelude::*;
use tracing::debug;

use crate::config::ReductionConfig;
use crate::error::Result;
use crate::raw::RawMap;

/// A NESTED-ordered map at the target order, with its value range.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ReducedMap {
    target_order: u32,
    values: Vec<f32>,
    range: ValueRange,
}

impl ReducedMap {
    /// Order of the reduced map.
    pub fn target_order(&self) -> u32 {
        self.target_order
    }

    /// NESTED-ordered pixel values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Range of the finalized pixel values.
    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn pixel_count(&self) -> usize {
        self.values.len()
    }

    /// Take ownership of the pixel array.
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Reduce `raw` to NESTED ordering at `source_order - order_reduce`.
///
/// Each output pixel is the arithmetic mean of its `4^order_reduce`
/// descendants at the source resolution. NESTED numbering keeps those
/// descendants index-contiguous, so target bucket `t` covers exactly the
/// source NESTED indices `[t * 4^k, (t + 1) * 4^k)`; this is why the
/// aggregation runs in NESTED space. RING input is resolved through the
/// index bijection pixel by pixel; the bucket shift is applied to the
/// NESTED index only.
///
/// With `order_reduce = 0` and NESTED input the values pass through
/// untouched. The raw map is consumed and its storage released as soon as
/// the output array exists.
///
/// Buckets are summed independently in a fixed per-bucket order, so the
/// result is deterministic; note that summing the same pixels in a
/// different order (e.g. a future blocked accumulation) could differ in the
/// last float bit.
pub fn reduce_map(raw: RawMap, config: &ReductionConfig) -> Result<ReducedMap> {
    // Fail fast, before any allocation.
    let source_order = raw.source_order();
    let target_order = config.target_order(source_order)?;

    let resolution = raw.resolution();
    let ordering = raw.ordering();
    let values = raw.into_values();

    let values = if config.order_reduce == 0 && ordering == PixelOrdering::Nested {
        values
    } else {
        let downscale = config.downscale_factor();
        let weight = 1.0 / downscale as f32;
        let n_out = Resolution::from_order(target_order).npix();
        let shift = 2 * config.order_reduce;

        let out = match ordering {
            PixelOrdering::Nested => gather(&values, n_out, shift, downscale, weight, |i| i),
            PixelOrdering::Ring => {
                let mapper = IndexMapper::new(resolution);
                gather(&values, n_out, shift, downscale, weight, move |i_nest| {
                    mapper.nest_to_ring(i_nest as u64) as usize
                })
            }
        };
        drop(values);
        out
    };

    let range = ValueRange::from_values(&values);
    debug!(
        source_order,
        target_order,
        pixels = values.len(),
        %range,
        "reduced map"
    );

    Ok(ReducedMap {
        target_order,
        values,
        range,
    })
}

/// Average the children of every target bucket. `source_index` locates the
/// value of a source NESTED index in the input array (identity for NESTED
/// input, the ring bijection otherwise). Buckets are independent, so the
/// loop parallelizes without synchronisation.
fn gather<F>(
    values: &[f32],
    n_out: usize,
    shift: u32,
    downscale: usize,
    weight: f32,
    source_index: F,
) -> Vec<f32>
where
    F: Fn(usize) -> usize + Sync,
{
    (0..n_out)
        .into_par_iter()
        .map(|bucket| {
            let base = bucket << shift;
            let mut acc = 0.0f32;
            for i_nest in base..base + downscale {
                acc += values[source_index(i_nest)] * weight;
            }
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReduceError;
    use crate::testdata;

    #[test]
    fn test_identity_reduction_is_pass_through() {
        let raw = testdata::index_map(4, PixelOrdering::Nested);
        let expected = raw.values().to_vec();
        let reduced = reduce_map(raw, &ReductionConfig::new(0)).unwrap();
        assert_eq!(reduced.target_order(), 2);
        assert_eq!(reduced.values(), expected.as_slice());
    }

    #[test]
    fn test_ring_input_is_reordered_not_averaged() {
        // values[i_ring] = i_ring, so after reordering the value at each
        // NESTED index must be its RING counterpart
        let raw = testdata::index_map(2, PixelOrdering::Ring);
        let reduced = reduce_map(raw, &ReductionConfig::new(0)).unwrap();
        let mapper = IndexMapper::new(Resolution::from_nside(2).unwrap());
        assert_eq!(reduced.pixel_count(), 48);
        for (i_nest, &v) in reduced.values().iter().enumerate() {
            assert_eq!(v, mapper.nest_to_ring(i_nest as u64) as f32);
        }
    }

    #[test]
    fn test_mean_of_contiguous_children() {
        // nside 8 (order 3) reduced by 2: bucket t averages source indices
        // [64t, 64t + 64), whose mean is 64t + 31.5
        let raw = testdata::index_map(8, PixelOrdering::Nested);
        let reduced = reduce_map(raw, &ReductionConfig::new(2)).unwrap();
        assert_eq!(reduced.target_order(), 1);
        assert_eq!(reduced.pixel_count(), 48);
        for (t, &v) in reduced.values().iter().enumerate() {
            let expected = 64.0 * t as f32 + 31.5;
            assert!((v - expected).abs() < 1e-3, "bucket {}: {} vs {}", t, v, expected);
        }
    }

    #[test]
    fn test_single_hot_pixel_lands_in_its_bucket() {
        let npix = Resolution::from_nside(4).unwrap().npix();
        for hot in [0usize, 37, 191] {
            let mut values = vec![0.0f32; npix];
            values[hot] = 1.0;
            let raw = RawMap::new(4, PixelOrdering::Nested, values).unwrap();
            let reduced = reduce_map(raw, &ReductionConfig::new(1)).unwrap();
            for (t, &v) in reduced.values().iter().enumerate() {
                let expected = if t == hot >> 2 { 0.25 } else { 0.0 };
                assert_eq!(v, expected, "hot {} bucket {}", hot, t);
            }
        }
    }

    #[test]
    fn test_excessive_reduction_is_rejected() {
        let raw = testdata::constant_map(8, PixelOrdering::Nested, 1.0);
        match reduce_map(raw, &ReductionConfig::new(3)) {
            Err(ReduceError::ExcessiveReduction {
                source_order,
                order_reduce,
            }) => {
                assert_eq!(source_order, 3);
                assert_eq!(order_reduce, 3);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_range_tracks_output_values() {
        let npix = Resolution::from_nside(2).unwrap().npix();
        let mut values = vec![0.0f32; npix];
        values[0] = -2.0;
        values[47] = 5.0;
        let raw = RawMap::new(2, PixelOrdering::Nested, values).unwrap();
        let reduced = reduce_map(raw, &ReductionConfig::new(0)).unwrap();
        assert_eq!(reduced.range().min, -2.0);
        assert_eq!(reduced.range().max, 5.0);
    }
}
