//! HEALPix map reduction pipeline.
//!
//! Turns a raw sky map, in whatever ordering the file reader hands over,
//! into the NESTED-ordered, optionally resolution-reduced pixel array the
//! scene renderer consumes, together with the range of the output values.
//!
//! # Architecture
//!
//! ```text
//! Map file (external reader)
//!      │  (nside, ordering tag, values)
//!      ▼
//! RawMap::new ── validates nside and pixel count
//!      │
//!      ▼
//! reduce_map(raw, config)
//!      │
//!      ├─► order_reduce = 0, NESTED input: pass-through move
//!      │
//!      ├─► otherwise: gather the 4^k NESTED-contiguous children of
//!      │   each target bucket (RING input resolved through IndexMapper)
//!      │
//!      └─► ValueRange pass over the finalized values
//!               │
//!               ▼
//!          ReducedMap → renderer
//! ```

pub mod config;
pub mod error;
pub mod raw;
pub mod reduce;
pub mod testdata;

pub use config::ReductionConfig;
pub use error::{ReduceError, Result};
pub use raw::RawMap;
pub use reduce::{reduce_map, ReducedMap};
