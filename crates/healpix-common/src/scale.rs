//! Value-range scaling for colour and relief mapping.

use serde::{Deserialize, Serialize};

/// How to derive the bounds of a scaling step.
///
/// `Auto` defers to the data: the bounds are computed from the map values at
/// presentation time. `Explicit` bounds are used verbatim and are never
/// derived from the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScaleRange {
    #[default]
    Auto,
    Explicit { min: f32, max: f32 },
}

impl ScaleRange {
    /// Interpret an optional `[min, max]` pair from configuration; absent
    /// means autoscale.
    pub fn from_pair(pair: Option<[f32; 2]>) -> Self {
        match pair {
            Some([min, max]) => Self::Explicit { min, max },
            None => Self::Auto,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolve the bounds against a data sample. `Auto` computes the
    /// sample's min/max; explicit bounds pass through unchanged. A sample
    /// with no finite values resolves to `(0.0, 0.0)`.
    pub fn resolve(&self, values: &[f32]) -> (f32, f32) {
        match *self {
            Self::Explicit { min, max } => (min, max),
            Self::Auto => {
                let range = ValueRange::from_values(values);
                if range.is_empty() {
                    (0.0, 0.0)
                } else {
                    (range.min, range.max)
                }
            }
        }
    }

    /// Validate explicit bounds.
    pub fn validate(&self) -> Result<(), String> {
        if let Self::Explicit { min, max } = self {
            if !min.is_finite() || !max.is_finite() {
                return Err("scale bounds must be finite".to_string());
            }
            if min > max {
                return Err(format!("scale bounds are reversed: {} > {}", min, max));
            }
        }
        Ok(())
    }
}

/// Running minimum/maximum over a stream of finalized pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// An empty range; any update replaces both bounds.
    pub fn empty() -> Self {
        Self {
            min: f32::MAX,
            max: f32::MIN,
        }
    }

    /// Fold a value into the range. NaN values are skipped so a single bad
    /// pixel cannot blank the range.
    pub fn update(&mut self, value: f32) {
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Range over a whole slice.
    pub fn from_values(values: &[f32]) -> Self {
        let mut range = Self::empty();
        for &v in values {
            range.update(v);
        }
        range
    }

    /// True if no finite value has been folded in yet.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
