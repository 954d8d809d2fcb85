//! Suit powers.
//!
//! - `project`: pure combat projection of an attack
//! - `project_hand`: the hand left to defend with after an attack
//! - `resolve`: applies suit effects to the piles and the active enemy
//! - `EffectLog`: what each suit did, for reports and logging
//!
//! ## Suit Immunity
//!
//! An enemy ignores the power of its own suit. The suppressed suit is
//! recorded in the log instead of being silently skipped.

mod effect;
mod resolver;

pub use effect::{EffectLog, SuitEffect};
pub use resolver::{active_suits, project, project_hand, resolve, EnemyFate, Projection};
