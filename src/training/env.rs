//! Reinforcement learning environment.
//!
//! `RegicideEnv` wraps the engine in the usual `reset` / `step` loop: the
//! caller submits a move (or its action id) and gets back the next
//! observation, a scalar reward, and whether the episode is over.
//!
//! ## Rewards
//!
//! | Event                                          | Default   |
//! |------------------------------------------------|-----------|
//! | enemy defeated                                 | tier + 1  |
//! | hand exhausted, unwinnable defense, stuck      | -1        |
//! | rejected move, invalid sacrifice under Defeat  | -999999   |
//!
//! A loss in the same step as an enemy defeat replaces the defeat reward.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::{DefeatCause, EngineConfig, GameState, Move, MoveError, Outcome};
use crate::nn::{ActionMask, Observation};
use crate::rules::{Regicide, StepReport};

/// Reward values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Multiplied by `tier + 1` when an enemy is defeated.
    pub enemy_defeated: f32,
    /// Extra reward when the last king falls.
    pub victory: f32,
    /// Any loss other than an invalid sacrifice.
    pub loss: f32,
    /// A rejected move, or an invalid sacrifice that ended the game.
    pub invalid_move: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            enemy_defeated: 1.0,
            victory: 0.0,
            loss: -1.0,
            invalid_move: -999_999.0,
        }
    }
}

impl RewardConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_enemy_defeated(mut self, scale: f32) -> Self {
        self.enemy_defeated = scale;
        self
    }

    #[must_use]
    pub fn with_victory(mut self, reward: f32) -> Self {
        self.victory = reward;
        self
    }

    #[must_use]
    pub fn with_loss(mut self, reward: f32) -> Self {
        self.loss = reward;
        self
    }

    #[must_use]
    pub fn with_invalid_move(mut self, reward: f32) -> Self {
        self.invalid_move = reward;
        self
    }

    /// Reward for an accepted move.
    #[must_use]
    pub fn for_report(&self, report: &StepReport) -> f32 {
        match report.outcome {
            Some(Outcome::Defeat(DefeatCause::InvalidSacrifice)) => return self.invalid_move,
            Some(Outcome::Defeat(_) | Outcome::NoLegalMoves) => return self.loss,
            _ => {}
        }

        let mut reward = 0.0;
        if let Some((_, level)) = report.defeated_enemy() {
            reward += self.enemy_defeated * f32::from(level + 1);
        }
        if report.outcome == Some(Outcome::Victory) {
            reward += self.victory;
        }
        reward
    }
}

/// Environment configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub engine: EngineConfig,
    pub rewards: RewardConfig,
    /// End the episode when a move is rejected.
    pub terminate_on_invalid: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            rewards: RewardConfig::default(),
            terminate_on_invalid: true,
        }
    }
}

impl EnvConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    #[must_use]
    pub fn with_terminate_on_invalid(mut self, terminate: bool) -> Self {
        self.terminate_on_invalid = terminate;
        self
    }
}

/// Errors from driving the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("the episode is over; call reset")]
    EpisodeFinished,
}

/// Result of one `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Observation after the move.
    pub observation: Observation,
    pub reward: f32,
    /// The episode is over, by outcome or by a rejected move.
    pub done: bool,
    pub outcome: Option<Outcome>,
    /// What happened, when the move was accepted.
    pub report: Option<StepReport>,
    /// Why the move was refused, when it was not.
    pub rejected: Option<MoveError>,
}

/// Regicide environment.
#[derive(Clone, Debug)]
pub struct RegicideEnv {
    engine: Regicide,
    config: EnvConfig,
    state: GameState,
    aborted: bool,
}

impl RegicideEnv {
    /// Create an environment with a game dealt from `seed`.
    #[must_use]
    pub fn new(config: EnvConfig, seed: u64) -> Self {
        let engine = Regicide::new(config.engine);
        Self {
            state: engine.new_game(seed),
            engine,
            config,
            aborted: false,
        }
    }

    /// Deal a new game and return its first observation.
    pub fn reset(&mut self, seed: u64) -> Observation {
        self.state = self.engine.new_game(seed);
        self.aborted = false;
        self.observation()
    }

    /// Submit a move for the acting seat.
    pub fn step(&mut self, action: impl Into<Move>) -> Result<Transition, EnvError> {
        if self.is_done() {
            return Err(EnvError::EpisodeFinished);
        }

        let mv = action.into();
        let transition = match self.engine.apply(&mut self.state, mv) {
            Ok(report) => Transition {
                observation: self.observation(),
                reward: self.config.rewards.for_report(&report),
                done: self.state.is_terminal(),
                outcome: report.outcome,
                report: Some(report),
                rejected: None,
            },
            Err(err) => {
                debug!(%err, ?mv, "move rejected");
                self.aborted = self.config.terminate_on_invalid;
                Transition {
                    observation: self.observation(),
                    reward: self.config.rewards.invalid_move,
                    done: self.aborted,
                    outcome: None,
                    report: None,
                    rejected: Some(err),
                }
            }
        };
        Ok(transition)
    }

    /// Observation of the current state.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// Legal moves for the acting seat.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.aborted {
            return Vec::new();
        }
        self.engine.legal_moves(&self.state)
    }

    /// Legality mask over action ids.
    #[must_use]
    pub fn action_mask(&self) -> ActionMask {
        ActionMask::from_moves(&self.legal_moves())
    }

    /// Text dump of the current state.
    #[must_use]
    pub fn render(&self) -> String {
        self.state.to_string()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.aborted || self.state.is_terminal()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &Regicide {
        &self.engine
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }
}
