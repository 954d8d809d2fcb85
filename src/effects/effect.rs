//! Suit effect records.
//!
//! Each suit in a played attack does one thing. The resolver reports what
//! actually happened as a `SuitEffect`, so callers can log or inspect a
//! step without diffing the state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Suit;

/// What one suit did during an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitEffect {
    /// Clubs: extra damage on top of the direct hit.
    Doubled { bonus: i32 },

    /// Diamonds: cards drawn into each hand.
    Drew { player: usize, ally: usize },

    /// Hearts: discard cards moved under the tavern.
    Recycled { moved: usize },

    /// Spades: enemy attack lowered, and the attack left afterwards.
    Shielded { reduced: i32, attack: i32 },

    /// The enemy shares this suit, so its effect was blocked.
    Suppressed { suit: Suit },
}

impl SuitEffect {
    /// The suit that produced this effect.
    #[must_use]
    pub fn suit(&self) -> Suit {
        match self {
            SuitEffect::Doubled { .. } => Suit::Clubs,
            SuitEffect::Drew { .. } => Suit::Diamonds,
            SuitEffect::Recycled { .. } => Suit::Hearts,
            SuitEffect::Shielded { .. } => Suit::Spades,
            SuitEffect::Suppressed { suit } => *suit,
        }
    }
}

/// Effects of one attack, in resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLog {
    entries: SmallVec<[SuitEffect; 4]>,
}

impl EffectLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, effect: SuitEffect) {
        self.entries.push(effect);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SuitEffect> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suit blocked by enemy immunity, if any.
    #[must_use]
    pub fn suppressed(&self) -> Option<Suit> {
        self.entries.iter().find_map(|e| match e {
            SuitEffect::Suppressed { suit } => Some(*suit),
            _ => None,
        })
    }

    /// Cards drawn by diamonds as `(player, ally)`; zero when none.
    #[must_use]
    pub fn drawn(&self) -> (usize, usize) {
        self.entries
            .iter()
            .find_map(|e| match e {
                SuitEffect::Drew { player, ally } => Some((*player, *ally)),
                _ => None,
            })
            .unwrap_or((0, 0))
    }

    /// Cards recycled by hearts.
    #[must_use]
    pub fn recycled(&self) -> usize {
        self.entries
            .iter()
            .find_map(|e| match e {
                SuitEffect::Recycled { moved } => Some(*moved),
                _ => None,
            })
            .unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a EffectLog {
    type Item = &'a SuitEffect;
    type IntoIter = std::slice::Iter<'a, SuitEffect>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
