//! Core engine types: seats, state, moves, RNG, configuration, errors.
//!
//! Everything here is rules-agnostic plumbing; the rules themselves live
//! in `rules` and `effects`.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod scenario;
pub mod seat;
pub mod state;

pub use action::{ActionId, Move, SelectionMask, ACTION_SPACE_SIZE};
pub use config::{EngineConfig, InvalidSacrificePolicy, SacrificeSearch};
pub use error::{ComboViolation, ConservationError, DefeatCause, MoveError, Outcome, SacrificeViolation};
pub use rng::GameRng;
pub use scenario::Scenario;
pub use seat::Seat;
pub use state::{ActiveEnemy, GameState};
