//! Deterministic, per-game random number generation.
//!
//! Every `GameState` owns its own `GameRng`; there is no process-wide
//! generator. Randomness enters a game in two places only: the shuffle of
//! the player cards at the deal and the suit of each enemy drawn. Two
//! states built from the same seed therefore play out identically under
//! the same moves, and can run on separate threads without sharing
//! anything.
//!
//! ```
//! use regicide_env::cards::{player_cards, Suit, SuitSet};
//! use regicide_env::core::GameRng;
//!
//! let (mut a, mut b) = (GameRng::new(7), GameRng::new(7));
//! let (mut deck_a, mut deck_b) = (player_cards(), player_cards());
//! a.shuffle(&mut deck_a);
//! b.shuffle(&mut deck_b);
//! assert_eq!(deck_a, deck_b);
//!
//! let suits: SuitSet = [Suit::Clubs, Suit::Spades].into_iter().collect();
//! assert_eq!(a.pick_suit(suits), b.pick_suit(suits));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::cards::{Suit, SuitSet};

/// Seedable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..bound`. `bound` must be positive.
    pub fn below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Uniform choice from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Uniform choice among the suits of `suits`, in resolution order.
    #[must_use]
    pub fn pick_suit(&mut self, suits: SuitSet) -> Option<Suit> {
        if suits.is_empty() {
            return None;
        }
        let index = self.below(suits.len());
        suits.nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::player_cards;

    #[test]
    fn test_same_seed_same_deck() {
        let mut deck1 = player_cards();
        let mut deck2 = player_cards();
        GameRng::new(42).shuffle(&mut deck1);
        GameRng::new(42).shuffle(&mut deck2);
        assert_eq!(deck1, deck2);

        let mut deck3 = player_cards();
        GameRng::new(43).shuffle(&mut deck3);
        assert_ne!(deck1, deck3);
    }

    #[test]
    fn test_shuffle_keeps_every_card() {
        let mut deck = player_cards();
        GameRng::new(9).shuffle(&mut deck);

        assert_ne!(deck, player_cards());
        let mut ids: Vec<_> = deck.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        let mut expected: Vec<_> = player_cards().iter().map(|c| c.id()).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_pick_suit_reaches_every_suit() {
        let all: SuitSet = Suit::ALL.into_iter().collect();
        let mut rng = GameRng::new(5);
        let mut seen = SuitSet::default();
        for _ in 0..200 {
            let suit = rng.pick_suit(all).unwrap();
            seen.insert(suit);
        }
        assert_eq!(seen, all);

        let one: SuitSet = [Suit::Hearts].into_iter().collect();
        assert_eq!(rng.pick_suit(one), Some(Suit::Hearts));
        assert_eq!(rng.pick_suit(SuitSet::default()), None);
    }

    #[test]
    fn test_below_and_choose() {
        let mut rng = GameRng::new(1);
        assert!((0..500).all(|_| rng.below(7) < 7));
        assert_eq!(rng.below(1), 0);

        let items = [1, 2, 3];
        assert!(items.contains(rng.choose(&items).unwrap()));
        assert!(rng.choose::<i32>(&[]).is_none());
    }
}
