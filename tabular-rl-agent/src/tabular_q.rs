//! Tabular Q-learning agent
//!
//! Discretizes a bounded continuous observation space into uniform buckets
//! and learns a dense value table over (bucket, action) pairs with one-step
//! Bellman backups. Exploration follows an epsilon-greedy policy whose
//! epsilon and learning rate decay exponentially per episode.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use tabular_rl_core::{
    ActionSpace, Agent, BoxObservationSpace, DiscreteAction, DiscreteSpace, RLError, Result,
};

use crate::grid::DiscretizationGrid;
use crate::qtable::QTable;
use crate::schedule::{DecaySchedule, Schedule};

/// Configuration for the tabular Q-learner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabularQConfig {
    /// Number of training episodes the rate schedules decay over
    pub total_episodes: usize,
    /// Discount factor for future reward
    pub discount: f64,
    /// Learning rate at episode 0
    pub init_learning_rate: f64,
    /// Learning rate after the last episode
    pub final_learning_rate: f64,
    /// Exploration rate at episode 0
    pub init_exploration_rate: f64,
    /// Exploration rate after the last episode
    pub final_exploration_rate: f64,
    /// Buckets per observation dimension
    pub buckets_per_dim: usize,
    /// Random seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for TabularQConfig {
    fn default() -> Self {
        Self {
            total_episodes: 100_000,
            discount: 0.99,
            init_learning_rate: 0.1,
            final_learning_rate: 0.01,
            init_exploration_rate: 1.0,
            final_exploration_rate: 0.1,
            buckets_per_dim: 50,
            seed: None,
        }
    }
}

/// Tabular Q-learning agent over a discretized box observation space
#[derive(Debug)]
pub struct TabularQLearner {
    action_space: DiscreteSpace,
    grid: DiscretizationGrid,
    q_table: QTable,

    discount: f64,
    learning_rate_schedule: DecaySchedule,
    exploration_schedule: DecaySchedule,
    learning_rate: f64,
    exploration_rate: f64,

    /// Most recent (observation, action) pair returned by `act`
    pending: Option<(Vec<f64>, DiscreteAction)>,
    learning: bool,
    rng: StdRng,
}

impl TabularQLearner {
    /// Create a new agent for the given spaces
    ///
    /// Rejects non-discrete action spaces, degenerate observation bounds,
    /// a zero bucket count, and a zero episode count with
    /// [`RLError::Config`].
    pub fn new(
        action_space: &ActionSpace,
        observation_space: &BoxObservationSpace,
        config: TabularQConfig,
    ) -> Result<Self> {
        let action_space = action_space
            .as_discrete()
            .ok_or_else(|| RLError::Config("action space must be discrete".into()))?
            .clone();
        if action_space.n == 0 {
            return Err(RLError::Config("action space has no actions".into()));
        }

        let grid = DiscretizationGrid::new(observation_space, config.buckets_per_dim)?;

        let learning_rate_schedule = DecaySchedule::over_episodes(
            config.init_learning_rate,
            config.final_learning_rate,
            config.total_episodes,
        )?;
        let exploration_schedule = DecaySchedule::over_episodes(
            config.init_exploration_rate,
            config.final_exploration_rate,
            config.total_episodes,
        )?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let q_table = QTable::new(grid.dim(), grid.buckets(), action_space.n, &mut rng)?;

        Ok(Self {
            action_space,
            grid,
            q_table,
            discount: config.discount,
            learning_rate: learning_rate_schedule.value(0),
            exploration_rate: exploration_schedule.value(0),
            learning_rate_schedule,
            exploration_schedule,
            pending: None,
            learning: true,
            rng,
        })
    }

    /// Current exploration rate (epsilon)
    #[must_use]
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Current learning rate
    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Q-value currently stored for an observation/action pair
    pub fn q_value(&self, observation: &[f64], action: DiscreteAction) -> Result<f64> {
        let bucket = self.grid.bucket_index(observation)?;
        self.q_table.get(&bucket, action.0)
    }

    /// Force the exploration rate, bypassing the schedule
    ///
    /// Test hook; the next `initialize_episode` overwrites it.
    pub fn force_exploration_rate(&mut self, epsilon: f64) {
        self.exploration_rate = epsilon;
    }

    fn greedy_action(&self, observation: &[f64]) -> Result<DiscreteAction> {
        let bucket = self.grid.bucket_index(observation)?;
        Ok(DiscreteAction(self.q_table.argmax_action(&bucket)?))
    }
}

impl Agent for TabularQLearner {
    fn initialize_episode(&mut self, episode: usize) {
        // Recomputed from the index, not accumulated, so replaying an
        // episode index yields identical rates.
        self.exploration_rate = self.exploration_schedule.value(episode);
        self.learning_rate = self.learning_rate_schedule.value(episode);
        debug!(
            episode,
            epsilon = self.exploration_rate,
            learning_rate = self.learning_rate,
            "episode initialized"
        );
    }

    fn act(&mut self, observation: &[f64]) -> Result<DiscreteAction> {
        // Checked up front so a bad observation is reported against this
        // call, not against the pending transition in the next feedback
        if observation.len() != self.grid.dim() {
            return Err(RLError::DimensionMismatch {
                expected: self.grid.dim(),
                actual: observation.len(),
            });
        }

        let explore = self.learning && self.rng.gen::<f64>() < self.exploration_rate;
        let action = if explore {
            self.action_space.sample_with(&mut self.rng)
        } else {
            self.greedy_action(observation)?
        };

        self.pending = Some((observation.to_vec(), action));
        Ok(action)
    }

    fn feedback(
        &mut self,
        resulting: &[f64],
        reward: f64,
        episode_done: bool,
    ) -> Result<()> {
        let (observation, action) = self.pending.take().ok_or(RLError::NoPendingTransition)?;

        let target = if episode_done {
            // No bootstrapping past a terminal transition
            reward
        } else {
            let next_bucket = self.grid.bucket_index(resulting)?;
            reward + self.discount * self.q_table.max_over_actions(&next_bucket)?
        };

        let bucket = self.grid.bucket_index(&observation)?;
        let current = self.q_table.get(&bucket, action.0)?;
        self.q_table
            .add(&bucket, action.0, self.learning_rate * (target - current))
    }

    fn set_learning(&mut self, enabled: bool) {
        self.learning = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn space_1d() -> BoxObservationSpace {
        BoxObservationSpace::new(vec![0.0], vec![1.0]).unwrap()
    }

    fn small_config() -> TabularQConfig {
        TabularQConfig {
            total_episodes: 100,
            buckets_per_dim: 10,
            seed: Some(3),
            ..TabularQConfig::default()
        }
    }

    fn learner() -> TabularQLearner {
        TabularQLearner::new(&ActionSpace::discrete(2), &space_1d(), small_config()).unwrap()
    }

    #[test]
    fn rejects_continuous_action_space() {
        let continuous = ActionSpace::Continuous(
            tabular_rl_core::ContinuousSpace::new(vec![-1.0], vec![1.0]).unwrap(),
        );
        let err = TabularQLearner::new(&continuous, &space_1d(), small_config()).unwrap_err();
        assert!(matches!(err, RLError::Config(_)));
    }

    #[test]
    fn rejects_empty_action_space() {
        let err =
            TabularQLearner::new(&ActionSpace::discrete(0), &space_1d(), small_config())
                .unwrap_err();
        assert!(matches!(err, RLError::Config(_)));
    }

    #[test]
    fn rejects_zero_buckets_and_zero_episodes() {
        let mut config = small_config();
        config.buckets_per_dim = 0;
        assert!(TabularQLearner::new(&ActionSpace::discrete(2), &space_1d(), config).is_err());

        let mut config = small_config();
        config.total_episodes = 0;
        assert!(TabularQLearner::new(&ActionSpace::discrete(2), &space_1d(), config).is_err());
    }

    #[test]
    fn rejects_infinite_observation_bounds() {
        let space = BoxObservationSpace::new(vec![f64::NEG_INFINITY], vec![1.0]).unwrap();
        assert!(
            TabularQLearner::new(&ActionSpace::discrete(2), &space, small_config()).is_err()
        );
    }

    #[test]
    fn schedules_hit_their_boundary_values() {
        let mut agent = learner();

        agent.initialize_episode(0);
        assert_relative_eq!(agent.exploration_rate(), 1.0);
        assert_relative_eq!(agent.learning_rate(), 0.1);

        // After the full decay horizon both rates land on their finals
        agent.initialize_episode(100);
        assert_relative_eq!(agent.exploration_rate(), 0.1, max_relative = 1e-10);
        assert_relative_eq!(agent.learning_rate(), 0.01, max_relative = 1e-10);
    }

    #[test]
    fn initialize_episode_is_idempotent() {
        let mut agent = learner();
        agent.initialize_episode(42);
        let (eps, lr) = (agent.exploration_rate(), agent.learning_rate());
        agent.initialize_episode(42);
        assert_eq!(agent.exploration_rate(), eps);
        assert_eq!(agent.learning_rate(), lr);
    }

    #[test]
    fn terminal_feedback_targets_the_raw_reward() {
        let mut agent = learner();
        agent.initialize_episode(0);
        agent.set_learning(false);

        let obs = [0.35];
        let action = agent.act(&obs).unwrap();
        let old = agent.q_value(&obs, action).unwrap();

        // Done: target is exactly the reward, whatever the table holds at
        // the resulting observation
        agent.feedback(&[0.95], 5.0, true).unwrap();

        let expected = old + agent.learning_rate() * (5.0 - old);
        assert_relative_eq!(agent.q_value(&obs, action).unwrap(), expected);
    }

    #[test]
    fn non_terminal_feedback_bootstraps_from_the_next_bucket() {
        let mut config = small_config();
        config.discount = 0.9;
        let mut agent =
            TabularQLearner::new(&ActionSpace::discrete(2), &space_1d(), config).unwrap();
        agent.initialize_episode(0);
        agent.set_learning(false);

        let obs = [0.15];
        let next = [0.85];
        let action = agent.act(&obs).unwrap();
        let old = agent.q_value(&obs, action).unwrap();

        // Pin the resulting bucket's max to 2.0
        agent.q_table.set(&[8], 0, 2.0).unwrap();
        agent.q_table.set(&[8], 1, -1.0).unwrap();

        agent.feedback(&next, 1.0, false).unwrap();

        let target = 1.0 + 0.9 * 2.0;
        let expected = old + agent.learning_rate() * (target - old);
        assert_relative_eq!(agent.q_value(&obs, action).unwrap(), expected);
    }

    #[test]
    fn update_touches_exactly_one_cell() {
        let mut agent = learner();
        agent.initialize_episode(0);
        agent.set_learning(false);

        let before = agent.q_table.as_slice().to_vec();
        let action = agent.act(&[0.35]).unwrap();
        agent.feedback(&[0.45], 1.0, false).unwrap();
        let after = agent.q_table.as_slice();

        let changed: Vec<usize> = before
            .iter()
            .zip(after)
            .enumerate()
            .filter(|(_, (b, a))| b != a)
            .map(|(i, _)| i)
            .collect();
        // Bucket 3, the taken action
        assert_eq!(changed, vec![3 * 2 + action.0]);
    }

    #[test]
    fn feedback_without_act_is_an_error() {
        let mut agent = learner();
        assert!(matches!(
            agent.feedback(&[0.5], 0.0, false).unwrap_err(),
            RLError::NoPendingTransition
        ));
    }

    #[test]
    fn feedback_consumes_the_pending_transition() {
        let mut agent = learner();
        agent.initialize_episode(0);
        agent.act(&[0.5]).unwrap();
        agent.feedback(&[0.5], 0.0, false).unwrap();
        assert!(matches!(
            agent.feedback(&[0.5], 0.0, false).unwrap_err(),
            RLError::NoPendingTransition
        ));
    }

    #[test]
    fn act_rejects_wrong_length_observations_even_when_exploring() {
        let mut agent = learner();
        agent.force_exploration_rate(1.0);

        assert!(matches!(
            agent.act(&[0.5, 0.5]).unwrap_err(),
            RLError::DimensionMismatch { expected: 1, actual: 2 }
        ));
        // The bad observation was not recorded as a pending transition
        assert!(matches!(
            agent.feedback(&[0.5], 0.0, false).unwrap_err(),
            RLError::NoPendingTransition
        ));
    }

    #[test]
    fn out_of_range_observation_is_surfaced_from_act() {
        let mut agent = learner();
        agent.set_learning(false);
        assert!(matches!(
            agent.act(&[1.5]).unwrap_err(),
            RLError::ObservationOutOfRange { .. }
        ));
    }

    #[test]
    fn out_of_range_resulting_observation_is_surfaced_from_feedback() {
        let mut agent = learner();
        agent.initialize_episode(0);
        agent.set_learning(false);
        agent.act(&[0.5]).unwrap();
        assert!(matches!(
            agent.feedback(&[-0.5], 1.0, false).unwrap_err(),
            RLError::ObservationOutOfRange { .. }
        ));
    }

    #[test]
    fn disabled_learning_never_explores() {
        let mut agent = learner();
        agent.set_learning(false);
        agent.force_exploration_rate(1.0);

        let greedy = agent.greedy_action(&[0.35]).unwrap();
        for _ in 0..50 {
            assert_eq!(agent.act(&[0.35]).unwrap(), greedy);
        }
    }

    #[test]
    fn seeded_runs_produce_identical_tables() {
        let run = || {
            let mut agent = learner();
            agent.initialize_episode(0);
            for step in 0..200 {
                let obs = [f64::from(step % 10) / 10.0 + 0.05];
                let next = [f64::from((step + 1) % 10) / 10.0 + 0.05];
                agent.act(&obs).unwrap();
                agent.feedback(&next, -1.0, step % 40 == 39).unwrap();
            }
            agent.q_table.as_slice().to_vec()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn learning_drives_values_toward_reward() {
        let mut agent = learner();
        agent.set_learning(false);
        agent.initialize_episode(0);

        // Repeated terminal reward of 5.0 from the same state/action pulls
        // that cell toward 5.0
        for _ in 0..500 {
            let action = agent.act(&[0.35]).unwrap();
            agent.feedback(&[0.35], 5.0, true).unwrap();
            let value = agent.q_value(&[0.35], action).unwrap();
            assert!(value <= 5.0 + 1.0);
        }
        let greedy = agent.greedy_action(&[0.35]).unwrap();
        let value = agent.q_value(&[0.35], greedy).unwrap();
        assert!((value - 5.0).abs() < 0.1);
    }
}
