//! Suit effect resolution.
//!
//! Effects run once per distinct suit in the attack, in alphabetical suit
//! order (clubs, diamonds, hearts, spades). A suit matching the enemy's own
//! suit is suppressed.
//!
//! `project` computes the combat result of an attack without touching any
//! state, and `project_hand` the hand left to defend with. The engine uses
//! both to validate a whole move before committing, and the legal move
//! enumerator uses them to size sacrifices.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::effect::{EffectLog, SuitEffect};
use crate::cards::{Card, Suit, SuitSet};
use crate::core::ActiveEnemy;
use crate::zones::{Piles, MAX_HAND_SIZE};

/// How the enemy ends up after an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyFate {
    /// Health remains above zero.
    Survives,
    /// Health is exactly zero.
    PerfectKill,
    /// Health is below zero.
    Destroyed,
}

impl EnemyFate {
    fn from_health(health: i32) -> Self {
        match health {
            h if h > 0 => EnemyFate::Survives,
            0 => EnemyFate::PerfectKill,
            _ => EnemyFate::Destroyed,
        }
    }

    #[must_use]
    pub fn is_defeated(self) -> bool {
        self != EnemyFate::Survives
    }
}

/// Combat result of an attack, computed ahead of time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Projection {
    /// Total damage, including the clubs bonus.
    pub damage: i32,
    /// Enemy health afterwards.
    pub enemy_health: i32,
    /// Enemy attack afterwards, including spade reductions.
    pub enemy_attack: i32,
    pub fate: EnemyFate,
}

impl Projection {
    /// Health the acting seat must sacrifice; zero when the enemy dies or
    /// has no attack left.
    #[must_use]
    pub fn required_defense(&self) -> i32 {
        if self.fate.is_defeated() {
            0
        } else {
            self.enemy_attack
        }
    }
}

/// Suits of `played` that take effect against `enemy`.
#[must_use]
pub fn active_suits(enemy: &ActiveEnemy, played: SuitSet) -> SuitSet {
    let mut suits = played;
    suits.remove(enemy.card().suit());
    suits
}

/// Project an attack of total value `attack` with suits `played`.
#[must_use]
pub fn project(enemy: &ActiveEnemy, played: SuitSet, attack: i32) -> Projection {
    let suits = active_suits(enemy, played);

    let damage = if suits.contains(Suit::Clubs) { attack * 2 } else { attack };
    let enemy_attack = if suits.contains(Suit::Spades) {
        (enemy.attack() - attack).max(0)
    } else {
        enemy.attack()
    };
    let enemy_health = enemy.health() - damage;

    Projection {
        damage,
        enemy_health,
        enemy_attack,
        fate: EnemyFate::from_health(enemy_health),
    }
}

/// The acting hand once the cards at `slots` are played and their suit
/// effects resolve: the untouched cards in order, then any diamond draws.
///
/// Diamonds resolve before hearts, so the draws come off the tavern as it
/// stands now.
#[must_use]
pub fn project_hand(
    piles: &Piles,
    enemy: &ActiveEnemy,
    slots: &[usize],
    played: SuitSet,
    attack: i32,
) -> SmallVec<[Card; MAX_HAND_SIZE]> {
    if !active_suits(enemy, played).contains(Suit::Diamonds) {
        return piles
            .player_hand()
            .iter()
            .enumerate()
            .filter(|(slot, _)| !slots.contains(slot))
            .map(|(_, card)| *card)
            .collect();
    }

    let mut scratch = piles.clone();
    scratch.take_from_player_hand(slots);
    scratch.deal_alternating(attack.max(0) as usize);
    scratch.player_hand().iter().copied().collect()
}

/// Resolve the suit effects of an attack.
///
/// Direct damage is applied by the caller; this adds the clubs bonus and
/// runs every other suit power. Diamonds draw into `piles.player_hand`
/// first, so the acting seat must still be the player.
pub fn resolve(piles: &mut Piles, enemy: &mut ActiveEnemy, played: SuitSet, attack: i32) -> EffectLog {
    let immune = enemy.card().suit();
    let mut log = EffectLog::new();

    for suit in played.iter() {
        if suit == immune {
            trace!(%suit, enemy = %enemy.card(), "suit suppressed by immunity");
            log.push(SuitEffect::Suppressed { suit });
            continue;
        }

        let effect = match suit {
            Suit::Clubs => {
                enemy.take_damage(attack);
                SuitEffect::Doubled { bonus: attack }
            }
            Suit::Diamonds => {
                let (player, ally) = piles.deal_alternating(attack.max(0) as usize);
                SuitEffect::Drew { player, ally }
            }
            Suit::Hearts => {
                let moved = piles.recycle_discard(attack.max(0) as usize);
                SuitEffect::Recycled { moved }
            }
            Suit::Spades => {
                let before = enemy.attack();
                enemy.reduce_attack(attack);
                SuitEffect::Shielded {
                    reduced: before - enemy.attack(),
                    attack: enemy.attack(),
                }
            }
        };
        trace!(?effect, "suit effect");
        log.push(effect);
    }

    log
}
