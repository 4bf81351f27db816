//! Tabular Q-learning agent for this workspace
//!
//! This crate provides:
//! - The tabular Q-learner: bucket discretization over a box observation
//!   space, epsilon-greedy action selection, one-step Bellman backups
//! - Exponentially decaying per-episode rate schedules
//! - The episode runner and step observer interface

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod grid;
pub mod qtable;
pub mod runner;
pub mod schedule;
pub mod tabular_q;

// Re-export the agent
pub use tabular_q::{TabularQConfig, TabularQLearner};

// Re-export utilities
pub use grid::DiscretizationGrid;
pub use qtable::QTable;
pub use runner::{run_loop, RewardTracker, StepEvent, StepObserver};
pub use schedule::{DecaySchedule, Schedule};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{run_loop, RewardTracker, TabularQConfig, TabularQLearner};
    pub use tabular_rl_core::prelude::*;
}
