//! # regicide-env
//!
//! A deterministic two-player Regicide engine built for reinforcement
//! learning self-play.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every game owns a seeded ChaCha8 stream. The same
//!    seed and the same moves always reach the same state.
//!
//! 2. **Fixed Action Space**: A move is two 7-slot masks (attack cards and
//!    sacrificed cards), packed into one of 16384 action ids.
//!
//! 3. **Complete Enumeration**: `legal_moves` lists exactly the moves
//!    `apply` accepts, so a learner can mask its outputs and never pick an
//!    illegal id.
//!
//! ## Modules
//!
//! - `cards`: Card identity, suits, the player pool and the enemy tiers
//! - `zones`: Tavern, discard, play area and the two hands
//! - `core`: Seats, state, moves, RNG, configuration, errors
//! - `rules`: Combo validation, sacrifices, the turn engine, move enumeration
//! - `effects`: Suit powers and damage projection
//! - `nn`: Observations, encoders and legality masks
//! - `training`: Environment, policies and parallel self-play

pub mod cards;
pub mod core;
pub mod effects;
pub mod nn;
pub mod rules;
pub mod training;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionId, DefeatCause, EngineConfig, GameRng, GameState, InvalidSacrificePolicy,
    Move, MoveError, Outcome, SacrificeSearch, Scenario, Seat, SelectionMask, ACTION_SPACE_SIZE,
};

pub use crate::cards::{Card, CardKind, Suit, SuitSet};

pub use crate::rules::{Engagement, Regicide, StepReport};

pub use crate::effects::{EffectLog, SuitEffect};

pub use crate::nn::{ActionMask, Observation, RegicideEncoder, StateEncoder};

pub use crate::training::{EnvConfig, RegicideEnv, RewardConfig, SelfPlayConfig};
