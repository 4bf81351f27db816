//! Example: tabular Q-learner on MountainCar
//!
//! Trains with decaying epsilon-greedy exploration, then replays a few
//! greedy episodes with learning disabled.

use tabular_rl_agent::{run_loop, RewardTracker, TabularQConfig, TabularQLearner};
use tabular_rl_core::{Agent, Environment};
use tabular_rl_env::MountainCarEnv;

const TRAIN_EPISODES: usize = 100_000;
const MAX_STEPS_PER_EPISODE: usize = 1_000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut env = MountainCarEnv::new(None);
    let config = TabularQConfig {
        total_episodes: TRAIN_EPISODES,
        ..TabularQConfig::default()
    };
    let mut agent =
        TabularQLearner::new(&env.action_space(), &env.observation_space(), config)?;

    // Training phase
    let mut tracker = RewardTracker::new();
    run_loop(
        &mut env,
        &mut agent,
        TRAIN_EPISODES,
        Some(MAX_STEPS_PER_EPISODE),
        &mut [&mut tracker],
    )
    .await?;

    let trained = tracker.episode_totals();
    let tail_avg: f64 =
        trained.iter().rev().take(100).sum::<f64>() / trained.len().min(100) as f64;
    println!("Finished training; average reward over last 100 episodes: {tail_avg:.2}");

    // Evaluation phase: greedy policy only
    agent.set_learning(false);
    let rewards = run_loop(&mut env, &mut agent, 2, None, &mut []).await?;
    for (episode, reward) in rewards.iter().enumerate() {
        println!("Evaluation episode {episode}: total reward {reward:.2}");
    }

    env.close().await?;
    Ok(())
}
