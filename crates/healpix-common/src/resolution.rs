//! HEALPix resolution arithmetic.
//!
//! The resolution parameter `nside` must be a power of two. The map order is
//! `log2(nside)` and the pixel count at a given resolution is
//! `12 * nside^2`.

use crate::error::{ViewerError, ViewerResult};

/// Number of base pixels the sphere is divided into at order 0.
pub const N_BASE_PIXELS: u64 = 12;

/// Highest supported order. Beyond this, `12 * nside^2` no longer fits the
/// signed 64-bit index arithmetic used by the pixel schemes.
pub const MAX_ORDER: u32 = 29;

/// A validated HEALPix resolution.
///
/// Wraps an `nside` that is known to be a power of two no larger than
/// `2^MAX_ORDER`, so downstream index arithmetic never has to re-check it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    nside: u32,
}

impl Resolution {
    /// Validate an `nside` read from file metadata.
    pub fn from_nside(nside: u32) -> ViewerResult<Self> {
        if nside == 0 || !nside.is_power_of_two() {
            return Err(ViewerError::invalid_metadata(format!(
                "nside {} is not a power of two",
                nside
            )));
        }
        if nside > 1 << MAX_ORDER {
            return Err(ViewerError::invalid_metadata(format!(
                "nside {} exceeds the maximum supported order {}",
                nside, MAX_ORDER
            )));
        }
        Ok(Self { nside })
    }

    /// Resolution at a given order (`nside = 2^order`).
    ///
    /// # Panics
    /// Panics if `order > MAX_ORDER`; orders are produced by this crate's
    /// own arithmetic, so a larger value is a programming error.
    pub fn from_order(order: u32) -> Self {
        assert!(order <= MAX_ORDER, "order {} exceeds MAX_ORDER", order);
        Self { nside: 1 << order }
    }

    /// The resolution parameter.
    pub fn nside(&self) -> u32 {
        self.nside
    }

    /// Map order, found by counting right-shifts of `nside` until it
    /// reaches zero.
    pub fn order(&self) -> u32 {
        let mut ord = 0;
        let mut n = self.nside;
        while (n >> 1) != 0 {
            n >>= 1;
            ord += 1;
        }
        ord
    }

    /// Total number of pixels on the sphere at this resolution.
    pub fn npix(&self) -> usize {
        N_BASE_PIXELS as usize * self.nside as usize * self.nside as usize
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nside={}", self.nside)
    }
}
