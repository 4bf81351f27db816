//! Environment traits and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ActionSpace, BoxObservationSpace, DiscreteAction, Reward};

/// Result of a single environment step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Observation from the environment
    pub observation: Vec<f64>,
    /// Reward signal
    pub reward: Reward,
    /// Whether the episode is done
    pub done: bool,
    /// Whether the episode was truncated (e.g., time limit)
    pub truncated: bool,
}

/// Core environment trait
///
/// Environments may be arbitrarily expensive to step (simulators, external
/// processes), so the stepping surface is async. Callers drive them in
/// strict lockstep: reset, then act/step until `done` or `truncated`.
#[async_trait]
pub trait Environment: Send + Sync {
    /// Get the observation space
    fn observation_space(&self) -> BoxObservationSpace;

    /// Get the action space
    fn action_space(&self) -> ActionSpace;

    /// Reset the environment, returning the initial observation
    async fn reset(&mut self) -> crate::Result<Vec<f64>>;

    /// Take a step in the environment
    async fn step(&mut self, action: DiscreteAction) -> crate::Result<Step>;

    /// Render the environment (optional)
    async fn render(&self) -> crate::Result<()> {
        Ok(())
    }

    /// Close the environment
    async fn close(&mut self) -> crate::Result<()> {
        Ok(())
    }
}
