//! Classic control environments

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tabular_rl_core::{
    ActionSpace, BoxObservationSpace, DiscreteAction, Environment, RLError, Result, Reward,
    Step,
};

/// Margin added to declared upper bounds
///
/// State variables clamp to their limits inclusively, and a discretizing
/// agent treats an observation equal to the upper bound as out of range.
const BOUND_PAD: f64 = 1e-6;

/// Mountain Car environment
///
/// An underpowered car in a valley must rock back and forth to reach the
/// goal on the right hill. Reward is -1 per step until the goal, 0 at the
/// goal.
pub struct MountainCarEnv {
    state: MountainCarState,
    config: MountainCarConfig,
    steps: usize,
    rng: StdRng,
}

#[derive(Debug, Clone)]
struct MountainCarState {
    position: f64,
    velocity: f64,
}

#[derive(Debug, Clone)]
struct MountainCarConfig {
    min_position: f64,
    max_position: f64,
    max_speed: f64,
    goal_position: f64,
    goal_velocity: f64,
    force: f64,
    gravity: f64,
    max_steps: usize,
}

impl Default for MountainCarConfig {
    fn default() -> Self {
        Self {
            min_position: -1.2,
            max_position: 0.6,
            max_speed: 0.07,
            goal_position: 0.5,
            goal_velocity: 0.0,
            force: 0.001,
            gravity: 0.0025,
            max_steps: 200,
        }
    }
}

impl MountainCarEnv {
    /// Create a new Mountain Car environment; `seed` fixes reset
    /// randomness
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            state: MountainCarState {
                position: -0.5,
                velocity: 0.0,
            },
            config: MountainCarConfig::default(),
            steps: 0,
            rng: seeded_rng(seed),
        }
    }

    fn observation(&self) -> Vec<f64> {
        vec![self.state.position, self.state.velocity]
    }
}

#[async_trait]
impl Environment for MountainCarEnv {
    fn observation_space(&self) -> BoxObservationSpace {
        BoxObservationSpace::new(
            vec![self.config.min_position, -self.config.max_speed],
            vec![
                self.config.max_position + BOUND_PAD,
                self.config.max_speed + BOUND_PAD,
            ],
        )
        .expect("static bounds")
    }

    fn action_space(&self) -> ActionSpace {
        // 0: push left, 1: no push, 2: push right
        ActionSpace::discrete(3)
    }

    async fn reset(&mut self) -> Result<Vec<f64>> {
        self.state = MountainCarState {
            position: self.rng.gen_range(-0.6..-0.4),
            velocity: 0.0,
        };
        self.steps = 0;
        Ok(self.observation())
    }

    async fn step(&mut self, action: DiscreteAction) -> Result<Step> {
        let force = match action.0 {
            0 => -1.0,
            1 => 0.0,
            2 => 1.0,
            n => return Err(RLError::InvalidAction(format!("action {n} out of range"))),
        };

        self.state.velocity +=
            force * self.config.force + self.state.position.cos() * (-self.config.gravity);
        self.state.velocity = self
            .state
            .velocity
            .clamp(-self.config.max_speed, self.config.max_speed);

        self.state.position += self.state.velocity;
        self.state.position = self
            .state
            .position
            .clamp(self.config.min_position, self.config.max_position);

        // Stop dead against the left wall
        if self.state.position <= self.config.min_position {
            self.state.velocity = 0.0;
        }

        self.steps += 1;

        let done = self.state.position >= self.config.goal_position
            && self.state.velocity >= self.config.goal_velocity;
        let truncated = self.steps >= self.config.max_steps && !done;
        let reward = if done { 0.0 } else { -1.0 };

        Ok(Step {
            observation: self.observation(),
            reward: Reward(reward),
            done,
            truncated,
        })
    }
}

/// CartPole environment
///
/// Balance a pole on a cart by pushing the cart left or right; +1 reward
/// for every surviving step.
pub struct CartPoleEnv {
    state: CartPoleState,
    config: CartPoleConfig,
    steps: usize,
    rng: StdRng,
}

#[derive(Debug, Clone)]
struct CartPoleState {
    x: f64,
    x_dot: f64,
    theta: f64,
    theta_dot: f64,
}

#[derive(Debug, Clone)]
struct CartPoleConfig {
    gravity: f64,
    mass_cart: f64,
    mass_pole: f64,
    length: f64,
    force_mag: f64,
    max_steps: usize,
    x_threshold: f64,
    theta_threshold: f64,
    /// Declared bound on cart and pole velocities
    ///
    /// The true dynamics keep velocities well inside this; a finite bound
    /// is required for bucket discretization.
    velocity_bound: f64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_cart: 1.0,
            mass_pole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            max_steps: 500,
            x_threshold: 2.4,
            theta_threshold: 0.209, // ~12 degrees
            velocity_bound: 10.0,
        }
    }
}

impl CartPoleEnv {
    /// Create a new CartPole environment; `seed` fixes reset randomness
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            state: CartPoleState {
                x: 0.0,
                x_dot: 0.0,
                theta: 0.0,
                theta_dot: 0.0,
            },
            config: CartPoleConfig::default(),
            steps: 0,
            rng: seeded_rng(seed),
        }
    }

    fn observation(&self) -> Vec<f64> {
        vec![
            self.state.x,
            self.state.x_dot,
            self.state.theta,
            self.state.theta_dot,
        ]
    }

    fn is_done(&self) -> bool {
        self.state.x.abs() > self.config.x_threshold
            || self.state.theta.abs() > self.config.theta_threshold
    }
}

#[async_trait]
impl Environment for CartPoleEnv {
    fn observation_space(&self) -> BoxObservationSpace {
        let high = vec![
            self.config.x_threshold * 2.0,
            self.config.velocity_bound,
            self.config.theta_threshold * 2.0,
            self.config.velocity_bound,
        ];
        let low = high.iter().map(|&x| -x).collect();
        BoxObservationSpace::new(low, high).expect("static bounds")
    }

    fn action_space(&self) -> ActionSpace {
        // 0: push left, 1: push right
        ActionSpace::discrete(2)
    }

    async fn reset(&mut self) -> Result<Vec<f64>> {
        self.state = CartPoleState {
            x: self.rng.gen_range(-0.05..0.05),
            x_dot: self.rng.gen_range(-0.05..0.05),
            theta: self.rng.gen_range(-0.05..0.05),
            theta_dot: self.rng.gen_range(-0.05..0.05),
        };
        self.steps = 0;
        Ok(self.observation())
    }

    async fn step(&mut self, action: DiscreteAction) -> Result<Step> {
        let force = match action.0 {
            0 => -self.config.force_mag,
            1 => self.config.force_mag,
            n => return Err(RLError::InvalidAction(format!("action {n} out of range"))),
        };

        let cos_theta = self.state.theta.cos();
        let sin_theta = self.state.theta.sin();

        let total_mass = self.config.mass_cart + self.config.mass_pole;
        let pole_mass_length = self.config.mass_pole * self.config.length;

        let temp =
            (force + pole_mass_length * self.state.theta_dot.powi(2) * sin_theta) / total_mass;
        let theta_acc = (self.config.gravity * sin_theta - cos_theta * temp)
            / (self.config.length
                * (4.0 / 3.0 - self.config.mass_pole * cos_theta.powi(2) / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        let dt = 0.02;
        self.state.x += dt * self.state.x_dot;
        self.state.x_dot += dt * x_acc;
        self.state.theta += dt * self.state.theta_dot;
        self.state.theta_dot += dt * theta_acc;

        self.steps += 1;

        let done = self.is_done();
        let truncated = self.steps >= self.config.max_steps && !done;

        Ok(Step {
            observation: self.observation(),
            reward: Reward(1.0),
            done,
            truncated,
        })
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
