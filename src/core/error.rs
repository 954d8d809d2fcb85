//! Validation failures and terminal outcomes.
//!
//! Rejected moves are reported through `MoveError` and never mutate the
//! game. Game endings are not errors: they are `Outcome` values stored on
//! the state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::zones::PileKind;

/// Why an attack selection is not a legal combo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ComboViolation {
    #[error("hand slot {index} is out of range for a hand of {hand_size}")]
    IndexOutOfRange { index: usize, hand_size: usize },

    #[error("hand slot {index} selected more than once")]
    DuplicateIndex { index: usize },

    #[error("animal companions can only be played with one other card")]
    CompanionOverPairing,

    #[error("combo cards must share a rank or pair one card with an animal companion")]
    MismatchedRanks,

    #[error("combo attack of {sum} exceeds the limit of 10")]
    SumExceeded { sum: i32 },
}

/// Why a sacrifice selection is not acceptable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SacrificeViolation {
    #[error("hand slot {index} is out of range for a hand of {hand_size}")]
    IndexOutOfRange { index: usize, hand_size: usize },

    #[error("hand slot {index} selected more than once")]
    DuplicateIndex { index: usize },

    #[error("the defending hand holds {available} health against an attack of {required}, so no sacrifice can be made")]
    Unwinnable { available: i32, required: i32 },

    #[error("sacrificed cards absorb {health} damage but the enemy deals {required}")]
    Insufficient { health: i32, required: i32 },

    #[error("no sacrifice is required this turn")]
    NotRequired,

    #[error("hand slot {index} is not needed to absorb the attack")]
    NotMinimal { index: usize },
}

/// A rejected move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveError {
    #[error("invalid attack: {0}")]
    InvalidAttackSelection(#[from] ComboViolation),

    #[error("invalid sacrifice: {0}")]
    InvalidSacrificeSelection(#[from] SacrificeViolation),

    #[error("the game is already over ({0})")]
    GameOver(Outcome),
}

/// Why the players lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefeatCause {
    /// The defending hand cannot absorb the enemy's attack.
    UnwinnableDefense,
    /// A seat had no cards left to act with.
    HandExhausted,
    /// An invalid sacrifice was submitted under the `Defeat` policy.
    InvalidSacrifice,
}

/// Terminal result of an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// All twelve enemies defeated.
    Victory,
    /// A loss condition was reached.
    Defeat(DefeatCause),
    /// The position admits no legal move.
    NoLegalMoves,
}

impl Outcome {
    #[must_use]
    pub fn is_victory(self) -> bool {
        matches!(self, Outcome::Victory)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Victory => f.write_str("victory"),
            Outcome::Defeat(DefeatCause::UnwinnableDefense) => f.write_str("defeat: unwinnable defense"),
            Outcome::Defeat(DefeatCause::HandExhausted) => f.write_str("defeat: hand exhausted"),
            Outcome::Defeat(DefeatCause::InvalidSacrifice) => f.write_str("defeat: invalid sacrifice"),
            Outcome::NoLegalMoves => f.write_str("no legal moves"),
        }
    }
}

/// Card conservation was broken. Always a bug in the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConservationError {
    #[error("expected {expected} cards in play, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("card {card:?} appears twice (second copy in {pile:?})")]
    Duplicate { card: CardId, pile: Option<PileKind> },
}
