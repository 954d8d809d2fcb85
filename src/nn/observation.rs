//! The fixed-width observation record.
//!
//! ## Layout
//!
//! | Index  | Field                                        |
//! |--------|----------------------------------------------|
//! | 0      | enemies left, including the active one       |
//! | 1..4   | suit codes still queued in the tier          |
//! | 4      | active enemy suit code                       |
//! | 5      | active enemy health                          |
//! | 6      | active enemy attack                          |
//! | 7      | discard size                                 |
//! | 8      | tavern size                                  |
//! | 9..16  | acting hand suit codes                       |
//! | 16..23 | acting hand ranks (companion 1, king 13)     |
//! | 23     | waiting hand size                            |
//!
//! Suit codes are hearts 1, diamonds 2, spades 3, clubs 4. Unused slots
//! are 0.

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::zones::MAX_HAND_SIZE;

/// Number of values in a flattened observation.
pub const OBSERVATION_LEN: usize = 24;

/// Suits that can still be queued in a tier once one is active.
const QUEUED_SUITS: usize = 3;

/// What the acting seat sees. Hashable so tabular learners can key on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Observation {
    pub enemies_left: u8,
    pub suits_remaining: [u8; QUEUED_SUITS],
    pub enemy_suit: u8,
    pub enemy_health: i32,
    pub enemy_attack: i32,
    pub discard_count: u8,
    pub tavern_count: u8,
    pub hand_suits: [u8; MAX_HAND_SIZE],
    pub hand_ranks: [u8; MAX_HAND_SIZE],
    pub ally_hand_size: u8,
}

impl Observation {
    /// Observe `state` from the acting seat.
    ///
    /// Enemy fields are 0 once no enemy is in play.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut obs = Self {
            enemies_left: state.enemies_left(),
            discard_count: state.piles().discard().len() as u8,
            tavern_count: state.piles().tavern_len() as u8,
            ally_hand_size: state.ally_hand().len() as u8,
            ..Self::default()
        };

        for (slot, suit) in obs.suits_remaining.iter_mut().zip(state.suits_remaining().iter()) {
            *slot = suit.code();
        }

        if let Some(enemy) = state.enemy() {
            obs.enemy_suit = enemy.card().suit().code();
            obs.enemy_health = enemy.health().max(0);
            obs.enemy_attack = enemy.attack();
        }

        for (slot, card) in state.player_hand().iter().enumerate().take(MAX_HAND_SIZE) {
            obs.hand_suits[slot] = card.suit().code();
            obs.hand_ranks[slot] = card.rank();
        }

        obs
    }

    /// Flatten in layout order.
    #[must_use]
    pub fn to_vector(&self) -> [i32; OBSERVATION_LEN] {
        let mut out = [0i32; OBSERVATION_LEN];
        out[0] = i32::from(self.enemies_left);
        for (i, &code) in self.suits_remaining.iter().enumerate() {
            out[1 + i] = i32::from(code);
        }
        out[4] = i32::from(self.enemy_suit);
        out[5] = self.enemy_health;
        out[6] = self.enemy_attack;
        out[7] = i32::from(self.discard_count);
        out[8] = i32::from(self.tavern_count);
        for slot in 0..MAX_HAND_SIZE {
            out[9 + slot] = i32::from(self.hand_suits[slot]);
            out[16 + slot] = i32::from(self.hand_ranks[slot]);
        }
        out[23] = i32::from(self.ally_hand_size);
        out
    }

    /// Number of cards in the acting hand.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_ranks.iter().take_while(|&&r| r != 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Suit};
    use crate::core::Scenario;

    #[test]
    fn test_fresh_deal() {
        let state = GameState::deal(12);
        let obs = Observation::from_state(&state);

        assert_eq!(obs.enemies_left, 12);
        assert_eq!(obs.enemy_health, 20);
        assert_eq!(obs.enemy_attack, 10);
        assert_eq!(obs.tavern_count, 26);
        assert_eq!(obs.discard_count, 0);
        assert_eq!(obs.ally_hand_size, 7);
        assert_eq!(obs.hand_size(), 7);
        assert!(obs.suits_remaining.iter().all(|&c| c != 0));
        assert!(!obs.suits_remaining.contains(&obs.enemy_suit));
    }

    #[test]
    fn test_layout() {
        let state = Scenario::new(3)
            .enemy(Card::enemy(Suit::Diamonds, Card::QUEEN))
            .suits_remaining(&[Suit::Clubs])
            .enemy_health(17)
            .player_hand(&[Card::companion(Suit::Spades), Card::enemy(Suit::Hearts, Card::JACK)])
            .ally_hand(&[Card::standard(Suit::Clubs, 4)])
            .build();

        let v = Observation::from_state(&state).to_vector();
        assert_eq!(v[0], 6);
        assert_eq!(&v[1..4], &[4, 0, 0]);
        assert_eq!(v[4], 2);
        assert_eq!((v[5], v[6]), (17, 15));
        assert_eq!(&v[9..12], &[3, 1, 0]);
        assert_eq!(&v[16..19], &[1, 11, 0]);
        assert_eq!(v[23], 1);
    }

    #[test]
    fn test_equal_states_hash_equal() {
        use std::collections::HashSet;

        let a = Observation::from_state(&GameState::deal(5));
        let b = Observation::from_state(&GameState::deal(5));
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
