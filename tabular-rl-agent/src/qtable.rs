//! Dense action-value table with checked indexing
//!
//! The table is a flat row-major array over `[bucket_1, .., bucket_D,
//! action]`. Every access goes through a bounds-checked offset computation:
//! an out-of-range bucket index surfaces as an error instead of wrapping
//! into an unrelated cell.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use tabular_rl_core::{RLError, Result};

/// Standard deviation of the random table initialization
const INIT_STD_DEV: f64 = 0.1;

/// Dense Q-value table over discretized states and discrete actions
#[derive(Debug, Clone)]
pub struct QTable {
    data: Vec<f64>,
    /// Axis sizes: D bucket axes followed by the action axis
    dims: Vec<usize>,
    /// Row-major strides matching `dims`
    strides: Vec<usize>,
}

impl QTable {
    /// Create a table of shape `[buckets; dims] + [actions]`, initialized
    /// with independent Normal(0.0, 0.1) samples
    ///
    /// The small random init breaks ties among untried state-action pairs
    /// without biasing early exploration.
    pub fn new<R: Rng + ?Sized>(
        dims: usize,
        buckets: usize,
        actions: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if dims == 0 || buckets == 0 || actions == 0 {
            return Err(RLError::Config(format!(
                "Q-table shape must be non-degenerate, got dims={dims} buckets={buckets} \
                 actions={actions}"
            )));
        }

        let mut shape = vec![buckets; dims];
        shape.push(actions);

        let mut strides = vec![1usize; shape.len()];
        for axis in (0..shape.len() - 1).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }

        let len = strides[0] * shape[0];
        let normal = Normal::new(0.0, INIT_STD_DEV)
            .map_err(|e| RLError::Config(format!("table init distribution: {e}")))?;
        let data = (0..len).map(|_| normal.sample(rng)).collect();

        Ok(Self {
            data,
            dims: shape,
            strides,
        })
    }

    /// Number of actions (size of the last axis)
    #[must_use]
    pub fn actions(&self) -> usize {
        self.dims[self.dims.len() - 1]
    }

    /// Flat offset of a full index `[bucket_1, .., bucket_D, action]`
    ///
    /// Errors if any coordinate falls outside its axis.
    fn offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != self.dims.len() {
            return Err(RLError::DimensionMismatch {
                expected: self.dims.len(),
                actual: index.len(),
            });
        }
        let action_axis = self.dims.len() - 1;
        let mut flat = 0usize;
        for (axis, (&i, (&dim, &stride))) in index
            .iter()
            .zip(self.dims.iter().zip(&self.strides))
            .enumerate()
        {
            if i >= dim {
                // The last axis indexes actions, not buckets
                if axis == action_axis {
                    return Err(RLError::InvalidAction(format!(
                        "action {i} out of range 0..{dim}"
                    )));
                }
                return Err(RLError::ObservationOutOfRange {
                    dim: axis,
                    value: i as f64,
                    bucket: i as i64,
                    buckets: dim,
                });
            }
            flat += i * stride;
        }
        Ok(flat)
    }

    /// Flat offset of a bucket index plus an action
    fn cell_offset(&self, bucket: &[usize], action: usize) -> Result<usize> {
        let mut index = bucket.to_vec();
        index.push(action);
        self.offset(&index)
    }

    /// Read a single Q-value
    pub fn get(&self, bucket: &[usize], action: usize) -> Result<f64> {
        Ok(self.data[self.cell_offset(bucket, action)?])
    }

    /// Write a single Q-value
    pub fn set(&mut self, bucket: &[usize], action: usize, value: f64) -> Result<()> {
        let offset = self.cell_offset(bucket, action)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Add `delta` to a single Q-value
    pub fn add(&mut self, bucket: &[usize], action: usize, delta: f64) -> Result<()> {
        let offset = self.cell_offset(bucket, action)?;
        self.data[offset] += delta;
        Ok(())
    }

    /// Maximum Q-value at a bucket across the action axis
    pub fn max_over_actions(&self, bucket: &[usize]) -> Result<f64> {
        let start = self.cell_offset(bucket, 0)?;
        let row = &self.data[start..start + self.actions()];
        Ok(row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// Action with the maximum Q-value at a bucket
    ///
    /// Stable: ties break toward the lowest action index.
    pub fn argmax_action(&self, bucket: &[usize]) -> Result<usize> {
        let start = self.cell_offset(bucket, 0)?;
        let row = &self.data[start..start + self.actions()];

        let mut best = 0usize;
        for (action, &value) in row.iter().enumerate() {
            if value > row[best] {
                best = action;
            }
        }
        Ok(best)
    }

    /// Snapshot of the raw table contents, row-major
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
