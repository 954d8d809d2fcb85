//! Self-play loop for generating training data.
//!
//! Each episode owns its environment and its policy, so a batch runs on
//! the rayon pool with no shared mutable state. Episode `i` is dealt from
//! `seed_offset + i`; the batch result is ordered by that index and is the
//! same whether it ran on one thread or many.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::env::{EnvConfig, RegicideEnv};
use super::policy::Policy;
use super::trajectory::{Step, Trajectory};

/// Configuration for self-play.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    /// Episodes per batch.
    pub episodes: usize,

    /// Maximum moves per episode (0 = unlimited).
    pub max_steps: usize,

    /// Seed offset (combined with episode index for unique seeds).
    pub seed_offset: u64,

    pub env: EnvConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            max_steps: 500,
            seed_offset: 0,
            env: EnvConfig::default(),
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_env(mut self, env: EnvConfig) -> Self {
        self.env = env;
        self
    }

    /// Deal seed of episode `index`.
    pub fn episode_seed(&self, index: usize) -> u64 {
        self.seed_offset.wrapping_add(index as u64)
    }
}

/// Play one episode to completion or to the step cap.
pub fn run_episode<P: Policy + ?Sized>(
    env_config: &EnvConfig,
    policy: &mut P,
    seed: u64,
    max_steps: usize,
) -> Trajectory {
    let mut env = RegicideEnv::new(*env_config, seed);
    let mut trajectory = Trajectory::new(seed);

    while !env.is_done() && (max_steps == 0 || trajectory.len() < max_steps) {
        let legal = env.legal_moves();
        let Some(mv) = policy.select(env.state(), &legal) else {
            debug!(seed, step = trajectory.len(), "policy declined to move");
            break;
        };

        let observation = env.observation();
        let seat = env.state().turn();
        let Ok(transition) = env.step(mv) else {
            break;
        };

        trajectory.push(Step {
            observation,
            action: mv.encode(),
            reward: transition.reward,
            next_observation: transition.observation,
            done: transition.done,
            seat,
        });
    }

    trajectory.outcome = env.state().outcome();
    trajectory.enemies_defeated = env.state().enemies_defeated();
    debug!(
        seed,
        steps = trajectory.len(),
        outcome = ?trajectory.outcome,
        reward = trajectory.total_reward,
        "episode finished"
    );
    trajectory
}

/// Play `config.episodes` episodes in parallel.
///
/// `make_policy` receives each episode's seed and builds its policy.
pub fn run_batch<P, F>(config: &SelfPlayConfig, make_policy: F) -> Vec<Trajectory>
where
    P: Policy,
    F: Fn(u64) -> P + Sync + Send,
{
    let trajectories: Vec<Trajectory> = (0..config.episodes)
        .into_par_iter()
        .map(|i| {
            let seed = config.episode_seed(i);
            let mut policy = make_policy(seed);
            run_episode(&config.env, &mut policy, seed, config.max_steps)
        })
        .collect();

    let summary = BatchSummary::from_trajectories(&trajectories);
    info!(
        episodes = summary.episodes,
        victories = summary.victories,
        mean_reward = summary.mean_reward,
        mean_steps = summary.mean_steps,
        "self-play batch finished"
    );
    trajectories
}

/// Aggregate statistics over a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub episodes: usize,
    pub victories: usize,
    /// Episodes with no outcome.
    pub truncated: usize,
    pub mean_reward: f32,
    pub mean_steps: f32,
    pub mean_enemies_defeated: f32,
}

impl BatchSummary {
    pub fn from_trajectories(trajectories: &[Trajectory]) -> Self {
        if trajectories.is_empty() {
            return Self::default();
        }
        let n = trajectories.len() as f32;
        let mean = |f: fn(&Trajectory) -> f32| trajectories.iter().map(f).sum::<f32>() / n;

        Self {
            episodes: trajectories.len(),
            victories: trajectories.iter().filter(|t| t.summary().is_victory()).count(),
            truncated: trajectories.iter().filter(|t| t.is_truncated()).count(),
            mean_reward: mean(|t| t.total_reward),
            mean_steps: mean(|t| t.len() as f32),
            mean_enemies_defeated: mean(|t| f32::from(t.enemies_defeated)),
        }
    }
}
