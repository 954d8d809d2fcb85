//! Trajectory and experience buffer for training data collection.
//!
//! A trajectory records one self-play episode, capturing:
//! - The observation at each decision point and the seat that acted
//! - The action id taken and the reward it earned
//! - The observation that followed, and whether the episode ended there

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, GameRng, Outcome, Seat};
use crate::nn::Observation;

/// One transition of an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub observation: Observation,
    pub action: ActionId,
    pub reward: f32,
    pub next_observation: Observation,
    pub done: bool,
    /// Seat that chose the action.
    pub seat: Seat,
}

/// A complete self-play episode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub steps: Vec<Step>,

    /// Seed the game was dealt from.
    pub seed: u64,

    /// `None` when the episode was cut short by the step cap or a
    /// rejected move.
    pub outcome: Option<Outcome>,

    pub total_reward: f32,

    pub enemies_defeated: u8,
}

impl Trajectory {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Add a step and accumulate its reward.
    pub fn push(&mut self, step: Step) {
        self.total_reward += step.reward;
        self.steps.push(step);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps chosen by one seat.
    pub fn seat_steps(&self, seat: Seat) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.seat == seat)
    }

    /// Ended without an outcome.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.outcome.is_none()
    }

    /// Compact binary encoding for storing self-play data.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    #[must_use]
    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            seed: self.seed,
            steps: self.len(),
            total_reward: self.total_reward,
            outcome: self.outcome,
            enemies_defeated: self.enemies_defeated,
        }
    }
}

/// Compact per-episode statistics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub steps: usize,
    pub total_reward: f32,
    pub outcome: Option<Outcome>,
    pub enemies_defeated: u8,
}

impl EpisodeSummary {
    #[must_use]
    pub fn is_victory(&self) -> bool {
        self.outcome == Some(Outcome::Victory)
    }
}

/// Buffer for storing trajectories during training.
///
/// Uses a FIFO strategy: when full, oldest trajectories are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    trajectories: VecDeque<Trajectory>,
    max_trajectories: usize,
}

impl ExperienceBuffer {
    /// Create a new experience buffer.
    pub fn new(max_trajectories: usize) -> Self {
        Self {
            trajectories: VecDeque::with_capacity(max_trajectories),
            max_trajectories,
        }
    }

    /// Add a trajectory to the buffer.
    ///
    /// If the buffer is full, the oldest trajectory is removed.
    pub fn push(&mut self, trajectory: Trajectory) {
        if self.max_trajectories == 0 {
            return;
        }
        if self.trajectories.len() >= self.max_trajectories {
            self.trajectories.pop_front();
        }
        self.trajectories.push_back(trajectory);
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_trajectories
    }

    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    /// Total number of steps across all trajectories.
    pub fn total_steps(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    /// Sample up to `batch_size` distinct steps.
    ///
    /// Uses the provided RNG seed for reproducibility.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<Step> {
        let all: Vec<&Step> = self.trajectories.iter().flat_map(|t| &t.steps).collect();
        if all.is_empty() || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);

        // Fisher-Yates over the first `limit` positions
        let mut indices: Vec<usize> = (0..all.len()).collect();
        let n = indices.len();
        let limit = batch_size.min(n);
        for i in 0..limit {
            let j = i + rng.below(n - i);
            indices.swap(i, j);
        }

        indices[..limit].iter().map(|&i| all[i].clone()).collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_step(raw: u16, reward: f32, seat: Seat) -> Step {
        Step {
            observation: Observation::default(),
            action: ActionId::new(raw).unwrap(),
            reward,
            next_observation: Observation::default(),
            done: false,
            seat,
        }
    }

    fn make_trajectory(seed: u64, len: u16) -> Trajectory {
        let mut traj = Trajectory::new(seed);
        for i in 0..len {
            let seat = if i % 2 == 0 { Seat::One } else { Seat::Two };
            traj.push(make_step(i, 1.0, seat));
        }
        traj
    }

    #[test]
    fn test_trajectory_accumulates_reward() {
        let mut traj = Trajectory::new(42);
        assert!(traj.is_empty());
        assert!(traj.is_truncated());

        traj.push(make_step(0, 2.0, Seat::One));
        traj.push(make_step(1, -1.0, Seat::Two));
        traj.outcome = Some(Outcome::Victory);

        assert_eq!(traj.len(), 2);
        assert_eq!(traj.total_reward, 1.0);
        assert!(!traj.is_truncated());
    }

    #[test]
    fn test_seat_steps() {
        let traj = make_trajectory(1, 5);
        assert_eq!(traj.seat_steps(Seat::One).count(), 3);
        assert_eq!(traj.seat_steps(Seat::Two).count(), 2);
    }

    #[test]
    fn test_summary() {
        let mut traj = make_trajectory(9, 4);
        traj.enemies_defeated = 12;
        traj.outcome = Some(Outcome::Victory);

        let summary = traj.summary();
        assert_eq!(summary.seed, 9);
        assert_eq!(summary.steps, 4);
        assert_eq!(summary.total_reward, 4.0);
        assert!(summary.is_victory());
    }

    #[test]
    fn test_experience_buffer_fifo_order() {
        let mut buffer = ExperienceBuffer::new(3);
        for seed in 1..=5 {
            buffer.push(Trajectory::new(seed));
        }

        let seeds: Vec<_> = buffer.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, vec![3, 4, 5]);
        assert_eq!(buffer.capacity(), 3);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_capacity_buffer_stays_empty() {
        let mut buffer = ExperienceBuffer::new(0);
        buffer.push(Trajectory::new(1));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sample_batch() {
        let mut buffer = ExperienceBuffer::new(10);
        buffer.push(make_trajectory(1, 6));
        buffer.push(make_trajectory(2, 4));
        assert_eq!(buffer.total_steps(), 10);

        let batch = buffer.sample_batch(5, 123);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch, buffer.sample_batch(5, 123));

        assert_eq!(buffer.sample_batch(100, 123).len(), 10);
        assert!(buffer.sample_batch(0, 123).is_empty());
        assert!(ExperienceBuffer::default().sample_batch(4, 1).is_empty());
    }

    #[test]
    fn test_trajectory_serialization() {
        let mut traj = make_trajectory(42, 2);
        traj.outcome = Some(Outcome::NoLegalMoves);

        let json = serde_json::to_string(&traj).unwrap();
        let back: Trajectory = serde_json::from_str(&json).unwrap();
        assert_eq!(traj, back);

        let bytes = traj.to_bytes().unwrap();
        assert_eq!(Trajectory::from_bytes(&bytes).unwrap(), traj);
        assert!(Trajectory::from_bytes(&bytes[..3]).is_err());
    }
}
