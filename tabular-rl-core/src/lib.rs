//! Core traits and types for tabular reinforcement learning
//!
//! This crate provides the foundational abstractions shared by the
//! agents and environments in this workspace: action and observation
//! spaces, rewards, the environment contract, and the agent contract.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod environment;
pub mod error;
pub mod observation;
pub mod reward;

// Re-export core traits and types
pub use action::{ActionSpace, ContinuousSpace, DiscreteAction, DiscreteSpace};
pub use agent::Agent;
pub use environment::{Environment, Step};
pub use error::{RLError, Result};
pub use observation::BoxObservationSpace;
pub use reward::Reward;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ActionSpace, Agent, BoxObservationSpace, DiscreteAction, DiscreteSpace, Environment,
        Result, Reward, Step,
    };
}
