//! Regicide rules.
//!
//! - `combo`: which card selections form a legal attack
//! - `sacrifice`: whether a sacrifice covers the enemy's attack
//! - `legal`: enumeration of every legal move
//! - `engine`: the turn state machine that applies moves
//!
//! Only `Regicide::apply` mutates a `GameState`; everything else here is a
//! pure function of the piles and the enemy.

pub mod combo;
pub mod engine;
pub mod legal;
pub mod sacrifice;

pub use combo::{validate_attack, validate_attack_mask, Combo, COMBO_LIMIT};
pub use engine::{DefenseRequirement, Engagement, MovePlan, Regicide, StepReport};
pub use legal::{attack_candidates, legal_moves, moves_for_piles};
pub use sacrifice::{available_health, check_slots, validate_sacrifice, validate_sacrifice_mask, Sacrifice};
