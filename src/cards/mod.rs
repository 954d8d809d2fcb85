//! Card system: identity, variants, and the per-episode pool.
//!
//! ## Key Types
//!
//! - `Card`: suit + rank + `CardKind` (standard, companion, enemy)
//! - `CardId`: dense identity in `0..52`
//! - `SuitSet`: compact suit set iterated in effect-resolution order
//! - `EnemyQueue`: royal enemies remaining in each tier

pub mod card;
pub mod catalog;
pub mod suit_set;

pub use card::{Card, CardId, CardKind, Suit};
pub use catalog::{player_cards, tier_rank, EnemyQueue, DECK_SIZE, ENEMY_COUNT, PLAYER_CARD_COUNT, TIER_COUNT};
pub use suit_set::SuitSet;
