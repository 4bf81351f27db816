//! Action representations and action spaces

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Discrete action, identified by its index in the action space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteAction(pub usize);

impl DiscreteAction {
    /// Get the action index
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for DiscreteAction {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Discrete action space with actions `0..n`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteSpace {
    /// Number of discrete actions
    pub n: usize,
}

impl DiscreteSpace {
    /// Create a new discrete action space
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Sample a uniformly random action
    #[must_use]
    pub fn sample(&self) -> DiscreteAction {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Sample a uniformly random action using the given rng
    ///
    /// Seeded callers use this so sampling stays reproducible.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> DiscreteAction {
        DiscreteAction(rng.gen_range(0..self.n))
    }

    /// Check whether an action is valid within this space
    #[must_use]
    pub fn contains(&self, action: DiscreteAction) -> bool {
        action.0 < self.n
    }
}

/// Continuous action space (box)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousSpace {
    /// Lower bounds for each dimension
    pub low: Vec<f64>,
    /// Upper bounds for each dimension
    pub high: Vec<f64>,
}

impl ContinuousSpace {
    /// Create a new continuous action space
    pub fn new(low: Vec<f64>, high: Vec<f64>) -> crate::Result<Self> {
        if low.len() != high.len() {
            return Err(crate::RLError::DimensionMismatch {
                expected: low.len(),
                actual: high.len(),
            });
        }
        Ok(Self { low, high })
    }
}

/// Closed set of supported action space variants
///
/// Agents validate the variant at construction time and reject the ones
/// they cannot drive, instead of discovering an unsupported space mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Finite set of indexed actions
    Discrete(DiscreteSpace),
    /// Bounded continuous actions
    Continuous(ContinuousSpace),
}

impl ActionSpace {
    /// Shorthand for a discrete space with `n` actions
    #[must_use]
    pub fn discrete(n: usize) -> Self {
        Self::Discrete(DiscreteSpace::new(n))
    }

    /// Get the discrete space, if this is a discrete variant
    #[must_use]
    pub fn as_discrete(&self) -> Option<&DiscreteSpace> {
        match self {
            Self::Discrete(space) => Some(space),
            Self::Continuous(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn discrete_sample_stays_in_range() {
        let space = DiscreteSpace::new(3);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let action = space.sample_with(&mut rng);
            assert!(space.contains(action));
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let space = DiscreteSpace::new(5);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| space.sample_with(&mut rng).0).collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn continuous_rejects_mismatched_bounds() {
        assert!(ContinuousSpace::new(vec![0.0, 0.0], vec![1.0]).is_err());
    }

    #[test]
    fn as_discrete_distinguishes_variants() {
        let discrete = ActionSpace::discrete(2);
        assert_eq!(discrete.as_discrete().map(|s| s.n), Some(2));

        let continuous =
            ActionSpace::Continuous(ContinuousSpace::new(vec![-1.0], vec![1.0]).unwrap());
        assert!(continuous.as_discrete().is_none());
    }
}
