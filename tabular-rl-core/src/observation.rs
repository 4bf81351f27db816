//! Observation spaces
//!
//! Observations themselves are plain `&[f64]` vectors; this module only
//! describes the space they are drawn from.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Box observation space: per-dimension lower and upper bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxObservationSpace {
    /// Lower bounds
    pub low: Vec<f64>,
    /// Upper bounds
    pub high: Vec<f64>,
}

impl BoxObservationSpace {
    /// Create a new box observation space
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> crate::Result<Self> {
        if low.len() != high.len() {
            return Err(crate::RLError::DimensionMismatch {
                expected: low.len(),
                actual: high.len(),
            });
        }
        Ok(Self { low, high })
    }

    /// Dimensionality of the space
    #[must_use]
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Check whether an observation lies within the bounds
    #[must_use]
    pub fn contains(&self, observation: &[f64]) -> bool {
        observation.len() == self.low.len()
            && observation
                .iter()
                .zip(&self.low)
                .zip(&self.high)
                .all(|((x, l), h)| x >= l && x <= h)
    }

    /// Sample a uniformly random observation from the space
    #[must_use]
    pub fn sample(&self) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        self.low
            .iter()
            .zip(&self.high)
            .map(|(l, h)| rng.gen_range(*l..*h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_bounds() {
        assert!(BoxObservationSpace::new(vec![0.0], vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn contains_checks_bounds_and_length() {
        let space = BoxObservationSpace::new(vec![0.0, -1.0], vec![1.0, 1.0]).unwrap();
        assert!(space.contains(&[0.5, 0.0]));
        assert!(!space.contains(&[1.5, 0.0]));
        assert!(!space.contains(&[0.5]));
    }

    #[test]
    fn sample_lies_within_bounds() {
        let space = BoxObservationSpace::new(vec![-2.0, 0.0], vec![2.0, 0.5]).unwrap();
        for _ in 0..50 {
            assert!(space.contains(&space.sample()));
        }
    }
}
