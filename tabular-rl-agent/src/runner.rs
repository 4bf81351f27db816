//! Episode runner and step observers
//!
//! The runner owns the control flow the agent is driven by: per episode it
//! initializes the agent, resets the environment, then alternates
//! act / step / feedback in strict lockstep until the episode ends or a
//! step cap is hit. Observers are notified once per step and keep their own
//! accumulator state, independent of the agent.

use tracing::info;

use tabular_rl_core::{Agent, DiscreteAction, Environment, Result};

/// Per-step event handed to observers
#[derive(Debug, Clone)]
pub struct StepEvent<'a> {
    /// Zero-based episode index
    pub episode: usize,
    /// Zero-based step index within the episode
    pub step: usize,
    /// Observation the agent acted on
    pub observation: &'a [f64],
    /// Action the agent took
    pub action: DiscreteAction,
    /// Reward the environment returned
    pub reward: f64,
    /// Whether the episode ended on this step
    pub done: bool,
}

/// Listener invoked once per environment step
pub trait StepObserver: Send {
    /// Handle a completed step
    fn on_step(&mut self, event: &StepEvent<'_>);
}

impl<F> StepObserver for F
where
    F: FnMut(&StepEvent<'_>) + Send,
{
    fn on_step(&mut self, event: &StepEvent<'_>) {
        self(event);
    }
}

/// Observer that accumulates episode reward and logs it at episode end
#[derive(Debug, Default)]
pub struct RewardTracker {
    episode_reward: f64,
    totals: Vec<f64>,
}

impl RewardTracker {
    /// Create a new tracker
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals of the episodes observed so far
    #[must_use]
    pub fn episode_totals(&self) -> &[f64] {
        &self.totals
    }
}

impl StepObserver for RewardTracker {
    fn on_step(&mut self, event: &StepEvent<'_>) {
        self.episode_reward += event.reward;
        if event.done {
            info!(
                episode = event.episode,
                total_reward = self.episode_reward,
                steps = event.step + 1,
                "episode finished"
            );
            self.totals.push(self.episode_reward);
            self.episode_reward = 0.0;
        }
    }
}

/// Drive an agent through `episodes` episodes of an environment
///
/// `max_steps` caps each episode when set. Returns the total reward per
/// episode. Errors from the agent or the environment abort the run.
pub async fn run_loop<E: Environment>(
    env: &mut E,
    agent: &mut dyn Agent,
    episodes: usize,
    max_steps: Option<usize>,
    observers: &mut [&mut dyn StepObserver],
) -> Result<Vec<f64>> {
    let mut episode_rewards = Vec::with_capacity(episodes);

    for episode in 0..episodes {
        agent.initialize_episode(episode);
        let mut observation = env.reset().await?;
        let mut total_reward = 0.0;
        let mut step_index = 0usize;

        loop {
            let action = agent.act(&observation)?;
            let step = env.step(action).await?;
            let done = step.done
                || step.truncated
                || max_steps.map_or(false, |cap| step_index + 1 >= cap);

            agent.feedback(&step.observation, step.reward.value(), done)?;
            total_reward += step.reward.value();

            let event = StepEvent {
                episode,
                step: step_index,
                observation: &observation,
                action,
                reward: step.reward.value(),
                done,
            };
            for observer in observers.iter_mut() {
                observer.on_step(&event);
            }

            if done {
                break;
            }
            observation = step.observation;
            step_index += 1;
        }

        episode_rewards.push(total_reward);
    }

    Ok(episode_rewards)
}
