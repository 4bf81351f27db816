//! Agent contract
//!
//! Agents are synchronous: every call runs to completion before the caller
//! touches the environment again. The driver owns the control flow; the
//! agent only sees the per-step observation/reward stream.

use crate::DiscreteAction;

/// Core agent trait for episodic, step-driven learners
pub trait Agent: Send {
    /// Prepare for an episode, given its zero-based index
    ///
    /// Idempotent in the episode index: calling this twice with the same
    /// index leaves the agent in the same state both times. Does not reset
    /// learned state.
    fn initialize_episode(&mut self, episode: usize);

    /// Select an action for the given observation
    ///
    /// Records the `(observation, action)` pair as the pending transition
    /// consumed by the next [`feedback`](Agent::feedback) call.
    fn act(&mut self, observation: &[f64]) -> crate::Result<DiscreteAction>;

    /// Consume the outcome of the pending action
    ///
    /// `resulting` is the observation produced by applying the pending
    /// action. Errors if no action is pending.
    fn feedback(&mut self, resulting: &[f64], reward: f64, episode_done: bool)
        -> crate::Result<()>;

    /// Enable or disable learning
    ///
    /// With learning disabled the agent acts greedily and never explores;
    /// used to switch from training to evaluation.
    fn set_learning(&mut self, enabled: bool);
}
