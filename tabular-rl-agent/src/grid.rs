//! Uniform discretization grid over a box observation space

use tabular_rl_core::{BoxObservationSpace, RLError, Result};

/// Discretization grid derived from per-dimension bounds and a uniform
/// bucket count
///
/// Bucket width per dimension is `(high - low) / buckets`. Indices are
/// computed by truncation toward zero, so an observation outside
/// `[low, high)` maps outside `[0, buckets)` and is reported as an error
/// rather than clamped.
#[derive(Debug, Clone)]
pub struct DiscretizationGrid {
    low: Vec<f64>,
    width: Vec<f64>,
    buckets: usize,
}

impl DiscretizationGrid {
    /// Build a grid over the given space with `buckets` buckets per
    /// dimension
    ///
    /// Rejects non-finite bounds and zero-width dimensions, which would
    /// make the bucket width degenerate.
    pub fn new(space: &BoxObservationSpace, buckets: usize) -> Result<Self> {
        if buckets == 0 {
            return Err(RLError::Config("bucket count must be positive".into()));
        }
        if space.dim() == 0 {
            return Err(RLError::Config("observation space has no dimensions".into()));
        }

        let mut width = Vec::with_capacity(space.dim());
        for (d, (&low, &high)) in space.low.iter().zip(&space.high).enumerate() {
            if !low.is_finite() || !high.is_finite() {
                return Err(RLError::Config(format!(
                    "observation bounds must be finite, dimension {d} is [{low}, {high}]"
                )));
            }
            let w = (high - low) / buckets as f64;
            if !(w > 0.0) {
                return Err(RLError::Config(format!(
                    "zero-width observation dimension {d}: [{low}, {high}]"
                )));
            }
            width.push(w);
        }

        Ok(Self {
            low: space.low.clone(),
            width,
            buckets,
        })
    }

    /// Dimensionality of the grid
    #[must_use]
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Buckets per dimension
    #[must_use]
    pub fn buckets(&self) -> usize {
        self.buckets
    }

    /// Map an observation to its per-dimension bucket indices
    ///
    /// Errors if the observation has the wrong length or any dimension
    /// falls outside the grid.
    pub fn bucket_index(&self, observation: &[f64]) -> Result<Vec<usize>> {
        if observation.len() != self.low.len() {
            return Err(RLError::DimensionMismatch {
                expected: self.low.len(),
                actual: observation.len(),
            });
        }

        let mut index = Vec::with_capacity(observation.len());
        for (d, ((&value, &low), &width)) in observation
            .iter()
            .zip(&self.low)
            .zip(&self.width)
            .enumerate()
        {
            // Truncation toward zero, matching an integer cast
            let bucket = ((value - low) / width).trunc() as i64;
            if bucket < 0 || bucket as usize >= self.buckets {
                return Err(RLError::ObservationOutOfRange {
                    dim: d,
                    value,
                    bucket,
                    buckets: self.buckets,
                });
            }
            index.push(bucket as usize);
        }
        Ok(index)
    }
}
