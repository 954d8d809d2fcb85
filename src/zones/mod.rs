//! Card piles: tavern, discard, play area, and the two hands.
//!
//! Piles are plain ordered containers. Which cards move where, and when,
//! is decided by the rules engine and the suit effect resolver.

pub mod piles;

pub use piles::{PileKind, Piles, TavernPosition, MAX_HAND_SIZE};
pub(crate) use piles::RawPiles;
