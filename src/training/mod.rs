//! Training infrastructure for learner integration.
//!
//! This module wraps the engine in a reset/step environment and provides
//! the self-play loop that turns policies into recorded episodes.
//!
//! ## Overview
//!
//! - **RegicideEnv**: reset/step interface with configurable rewards
//! - **Policy**: random, first-legal, and model-greedy move selection
//! - **Trajectory**: one episode's transitions and outcome
//! - **ExperienceBuffer**: collects and samples from trajectories
//! - **run_batch**: parallel self-play over a range of seeds
//!
//! ## Usage
//!
//! ```
//! use regicide_env::training::{run_batch, ExperienceBuffer, SelfPlayConfig, UniformRandomPolicy};
//!
//! let config = SelfPlayConfig::default().with_episodes(4).with_max_steps(200);
//! let trajectories = run_batch(&config, UniformRandomPolicy::new);
//!
//! let mut buffer = ExperienceBuffer::new(1000);
//! for t in trajectories {
//!     buffer.push(t);
//! }
//! let batch = buffer.sample_batch(32, 7);
//! assert!(batch.len() <= 32);
//! ```

pub mod env;
pub mod policy;
pub mod self_play;
pub mod trajectory;

pub use env::{EnvConfig, EnvError, RegicideEnv, RewardConfig, Transition};
pub use policy::{FirstLegalPolicy, ModelPolicy, Policy, UniformRandomPolicy};
pub use self_play::{run_batch, run_episode, BatchSummary, SelfPlayConfig};
pub use trajectory::{EpisodeSummary, ExperienceBuffer, Step, Trajectory};
