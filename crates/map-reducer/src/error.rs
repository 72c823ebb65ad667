//! Error types for map reduction.

use thiserror::Error;

/// Errors that can occur while building or reducing a map.
#[derive(Error, Debug)]
pub enum ReduceError {
    /// The requested order reduction would drop the map below order 1, the
    /// minimum meaningful resolution of 48 pixels.
    #[error("reducing a map of order {source_order} by {order_reduce} orders would drop below order 1")]
    ExcessiveReduction {
        source_order: u32,
        order_reduce: u32,
    },

    /// The declared nside is not a usable resolution.
    #[error("nside {0} is not a supported resolution (power of two up to 2^29)")]
    InvalidNside(u32),

    /// The value array does not cover every pixel of the declared
    /// resolution.
    #[error("map has {actual} values but nside {nside} requires {expected}")]
    PixelCountMismatch {
        nside: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for map reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;
