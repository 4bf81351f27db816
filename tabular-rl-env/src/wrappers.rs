//! Environment wrappers

use async_trait::async_trait;

use tabular_rl_core::{
    ActionSpace, BoxObservationSpace, DiscreteAction, Environment, Result, Step,
};

/// Time limit wrapper
///
/// Truncates episodes after `max_steps`, regardless of the inner
/// environment's own termination.
pub struct TimeLimit<E> {
    /// Inner environment
    pub env: E,
    /// Maximum steps per episode
    pub max_steps: usize,
    steps: usize,
}

impl<E> TimeLimit<E> {
    /// Wrap an environment with a step limit
    pub fn new(env: E, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            steps: 0,
        }
    }
}

#[async_trait]
impl<E> Environment for TimeLimit<E>
where
    E: Environment,
{
    fn observation_space(&self) -> BoxObservationSpace {
        self.env.observation_space()
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    async fn reset(&mut self) -> Result<Vec<f64>> {
        self.steps = 0;
        self.env.reset().await
    }

    async fn step(&mut self, action: DiscreteAction) -> Result<Step> {
        self.steps += 1;
        let mut step = self.env.step(action).await?;

        if self.steps >= self.max_steps && !step.done {
            step.truncated = true;
        }

        Ok(step)
    }

    async fn render(&self) -> Result<()> {
        self.env.render().await
    }

    async fn close(&mut self) -> Result<()> {
        self.env.close().await
    }
}
