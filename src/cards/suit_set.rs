//! Compact set of suits.

use serde::{Deserialize, Serialize};

use super::card::Suit;

/// A set of suits stored as a 4-bit mask.
///
/// Iteration always yields suits in alphabetical order (clubs, diamonds,
/// hearts, spades), which fixes the order suit effects resolve in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuitSet(u8);

impl SuitSet {
    /// The empty set.
    pub const EMPTY: SuitSet = SuitSet(0);

    /// All four suits.
    pub const ALL: SuitSet = SuitSet(0b1111);

    #[must_use]
    pub const fn contains(self, suit: Suit) -> bool {
        self.0 & (1 << suit.index()) != 0
    }

    pub fn insert(&mut self, suit: Suit) {
        self.0 |= 1 << suit.index();
    }

    /// Remove a suit. Returns true if it was present.
    pub fn remove(&mut self, suit: Suit) -> bool {
        let present = self.contains(suit);
        self.0 &= !(1 << suit.index());
        present
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate in alphabetical suit order.
    pub fn iter(self) -> impl Iterator<Item = Suit> {
        Suit::ALL.into_iter().filter(move |&s| self.contains(s))
    }

    /// Get the `n`-th suit in iteration order.
    #[must_use]
    pub fn nth(self, n: usize) -> Option<Suit> {
        self.iter().nth(n)
    }
}

impl FromIterator<Suit> for SuitSet {
    fn from_iter<I: IntoIterator<Item = Suit>>(iter: I) -> Self {
        let mut set = SuitSet::EMPTY;
        for suit in iter {
            set.insert(suit);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut set = SuitSet::EMPTY;
        set.insert(Suit::Spades);
        set.insert(Suit::Hearts);
        set.insert(Suit::Spades);

        assert_eq!(set.len(), 2);
        assert!(set.contains(Suit::Hearts));
        assert!(!set.contains(Suit::Clubs));

        assert!(set.remove(Suit::Hearts));
        assert!(!set.remove(Suit::Hearts));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iteration_is_alphabetical() {
        let set: SuitSet = [Suit::Spades, Suit::Clubs, Suit::Hearts].into_iter().collect();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![Suit::Clubs, Suit::Hearts, Suit::Spades]);
        assert_eq!(set.nth(1), Some(Suit::Hearts));
        assert_eq!(set.nth(3), None);
    }

    #[test]
    fn test_all() {
        assert_eq!(SuitSet::ALL.len(), 4);
        assert!(SuitSet::EMPTY.is_empty());
    }
}
