//! Classic control environments for the tabular RL workspace
//!
//! Reference environments used to drive and test the agents: MountainCar,
//! CartPole, and a time-limit wrapper.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classic;
pub mod wrappers;

// Re-export environments
pub use classic::{CartPoleEnv, MountainCarEnv};
pub use wrappers::TimeLimit;

// Re-export core types
pub use tabular_rl_core::{
    ActionSpace, BoxObservationSpace, DiscreteAction, Environment, Reward, Step,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CartPoleEnv, MountainCarEnv, TimeLimit};
    pub use tabular_rl_core::prelude::*;
}
