//! Configuration for the reduction step.

use serde::{Deserialize, Serialize};

use crate::error::{ReduceError, Result};

/// How far to reduce a map below its native resolution.
///
/// Each step of `order_reduce` folds four child pixels into one parent, so
/// the output has `4^order_reduce` times fewer pixels than the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Number of orders to drop; 0 keeps the native resolution.
    #[serde(default)]
    pub order_reduce: u32,
}

impl ReductionConfig {
    pub fn new(order_reduce: u32) -> Self {
        Self { order_reduce }
    }

    /// Order of the output map, or the rejection when the request would
    /// drop below order 1.
    pub fn target_order(&self, source_order: u32) -> Result<u32> {
        if self.order_reduce >= source_order {
            return Err(ReduceError::ExcessiveReduction {
                source_order,
                order_reduce: self.order_reduce,
            });
        }
        Ok(source_order - self.order_reduce)
    }

    /// Number of source pixels folding into one target pixel.
    pub fn downscale_factor(&self) -> usize {
        1usize << (2 * self.order_reduce)
    }
}
