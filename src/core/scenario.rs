//! Fixture construction for specific game positions.
//!
//! `Scenario` starts from a normal deal and rearranges it. Every change
//! moves cards between piles rather than creating or dropping them, so a
//! built state still holds the full 52-card pool and can be stepped like
//! any other.
//!
//! ```
//! use regicide_env::cards::{Card, Suit};
//! use regicide_env::core::Scenario;
//!
//! let state = Scenario::new(1)
//!     .enemy(Card::enemy(Suit::Hearts, Card::JACK))
//!     .player_hand(&[Card::standard(Suit::Clubs, 5)])
//!     .build();
//!
//! assert_eq!(state.player_hand(), &[Card::standard(Suit::Clubs, 5)]);
//! assert_eq!(state.enemy().unwrap().health(), 20);
//! ```

use super::seat::Seat;
use super::state::{ActiveEnemy, GameState};
use crate::cards::{Card, Suit, SuitSet, ENEMY_COUNT};
use crate::zones::{RawPiles, MAX_HAND_SIZE};

/// Builder that rearranges a dealt game into a chosen position.
///
/// Methods panic on impossible requests (such as a hand larger than
/// seven), the same way the other builders in this crate do.
#[derive(Clone, Debug)]
pub struct Scenario {
    state: GameState,
}

impl Scenario {
    /// Start from a normal deal with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::deal(seed),
        }
    }

    /// Start from an existing state.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Set the acting hand exactly. Its previous cards go under the tavern.
    #[must_use]
    pub fn player_hand(mut self, cards: &[Card]) -> Self {
        assert!(cards.len() <= MAX_HAND_SIZE, "Hand cannot exceed {MAX_HAND_SIZE} cards");
        let raw = self.state.piles.raw_mut();
        let old = std::mem::take(raw.player_hand);
        for card in old {
            raw.tavern.push_front(card);
        }
        for &card in cards {
            let card = self.extract(card);
            self.state.piles.raw_mut().player_hand.push(card);
        }
        self
    }

    /// Set the waiting hand exactly. Its previous cards go under the tavern.
    #[must_use]
    pub fn ally_hand(mut self, cards: &[Card]) -> Self {
        assert!(cards.len() <= MAX_HAND_SIZE, "Hand cannot exceed {MAX_HAND_SIZE} cards");
        let raw = self.state.piles.raw_mut();
        let old = std::mem::take(raw.ally_hand);
        for card in old {
            raw.tavern.push_front(card);
        }
        for &card in cards {
            let card = self.extract(card);
            self.state.piles.raw_mut().ally_hand.push(card);
        }
        self
    }

    /// Set the discard exactly (bottom first). Previous discards go under
    /// the tavern.
    #[must_use]
    pub fn discard(mut self, cards: &[Card]) -> Self {
        let raw = self.state.piles.raw_mut();
        let old = std::mem::take(raw.discard);
        for card in old {
            raw.tavern.push_front(card);
        }
        for &card in cards {
            let card = self.extract(card);
            self.state.piles.raw_mut().discard.push(card);
        }
        self
    }

    /// Set the tavern exactly (bottom first). Previous tavern cards go to
    /// the bottom of the discard.
    #[must_use]
    pub fn tavern(mut self, cards: &[Card]) -> Self {
        let raw = self.state.piles.raw_mut();
        let mut moved: Vec<Card> = raw.tavern.drain(..).collect();
        moved.append(raw.discard);
        *raw.discard = moved;
        for &card in cards {
            let card = self.extract(card);
            self.state.piles.raw_mut().tavern.push_back(card);
        }
        self
    }

    /// Fight `enemy` next, at full health.
    ///
    /// Every enemy of a lower tier is treated as already defeated and
    /// placed in the discard.
    #[must_use]
    pub fn enemy(mut self, enemy: Card) -> Self {
        assert!(enemy.is_enemy(), "{enemy} is not an enemy card");
        let level = enemy.rank() - Card::JACK;

        if let Some(active) = self.state.enemy.take() {
            self.state.enemies.put_back(active.card());
        }
        for lower in 0..level {
            for suit in Suit::ALL {
                if let Some(card) = self.state.enemies.take(lower, suit) {
                    self.state.piles.push_discard([card]);
                }
            }
        }

        let enemy = self.extract(enemy);
        self.state.level = level;
        self.state.enemy = Some(ActiveEnemy::new(enemy));
        self.sync_defeated();
        self
    }

    /// Keep only `suits` queued in the current tier; the others count as
    /// defeated and go to the discard.
    #[must_use]
    pub fn suits_remaining(mut self, suits: &[Suit]) -> Self {
        let keep: SuitSet = suits.iter().copied().collect();
        let level = self.state.level;
        for suit in Suit::ALL {
            if !keep.contains(suit) {
                if let Some(card) = self.state.enemies.take(level, suit) {
                    self.state.piles.push_discard([card]);
                }
            }
        }
        self.sync_defeated();
        self
    }

    /// Override the active enemy's remaining health.
    ///
    /// # Panics
    ///
    /// Panics if the position has no active enemy.
    #[must_use]
    pub fn enemy_health(mut self, health: i32) -> Self {
        self.active_enemy().set_health(health);
        self
    }

    /// Override the active enemy's attack. Panics without an active enemy.
    #[must_use]
    pub fn enemy_attack(mut self, attack: i32) -> Self {
        self.active_enemy().set_attack(attack);
        self
    }

    /// Set whose turn it is.
    #[must_use]
    pub fn turn(mut self, seat: Seat) -> Self {
        self.state.turn = seat;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> GameState {
        debug_assert_eq!(self.state.verify_conservation(), Ok(()));
        self.state
    }

    fn active_enemy(&mut self) -> &mut ActiveEnemy {
        self.state.enemy.as_mut().expect("Scenario has no active enemy")
    }

    fn sync_defeated(&mut self) {
        let active = usize::from(self.state.enemy.is_some());
        self.state.enemies_defeated = (ENEMY_COUNT - self.state.enemies.len() - active) as u8;
    }

    /// Remove `card` from wherever it currently is.
    fn extract(&mut self, card: Card) -> Card {
        if self.state.enemy.is_some_and(|e| e.card() == card) {
            self.state.enemy = None;
            return card;
        }
        if card.is_enemy() && self.state.enemies.take(card.rank() - Card::JACK, card.suit()).is_some() {
            return card;
        }

        let RawPiles {
            tavern,
            discard,
            played,
            player_hand,
            ally_hand,
        } = self.state.piles.raw_mut();

        if let Some(pos) = tavern.iter().position(|&c| c == card) {
            tavern.remove(pos);
            return card;
        }
        for pile in [discard, played, player_hand, ally_hand] {
            if let Some(pos) = pile.iter().position(|&c| c == card) {
                pile.remove(pos);
                return card;
            }
        }
        panic!("{card} is not available to place");
    }
}
