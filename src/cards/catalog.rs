//! Card pool construction.
//!
//! Each episode builds its own pool: 40 player cards (a companion and the
//! numbers 2..=10 in every suit) and 12 royal enemies split into three
//! tiers. Nothing here is shared between games.

use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use super::suit_set::SuitSet;

/// Total cards in a game.
pub const DECK_SIZE: usize = 52;

/// Player cards (companions and numbers).
pub const PLAYER_CARD_COUNT: usize = 40;

/// Number of enemy tiers: jacks, queens, kings.
pub const TIER_COUNT: usize = 3;

/// Total enemies to defeat.
pub const ENEMY_COUNT: usize = 12;

/// Build the 40 player cards in catalog order (unshuffled).
#[must_use]
pub fn player_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(PLAYER_CARD_COUNT);
    for suit in Suit::ALL {
        cards.push(Card::companion(suit));
        for rank in 2..=10 {
            cards.push(Card::standard(suit, rank));
        }
    }
    cards
}

/// Enemy rank for a tier (0 = jacks, 1 = queens, 2 = kings).
#[must_use]
pub const fn tier_rank(level: u8) -> u8 {
    Card::JACK + level
}

/// Remaining royal enemies, one row of suit variants per tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyQueue {
    tiers: [Vec<Card>; TIER_COUNT],
}

impl EnemyQueue {
    /// Build a full queue: four suits in each of the three tiers.
    #[must_use]
    pub fn full() -> Self {
        let tier = |level: u8| -> Vec<Card> {
            Suit::ALL.iter().map(|&s| Card::enemy(s, tier_rank(level))).collect()
        };
        Self {
            tiers: [tier(0), tier(1), tier(2)],
        }
    }

    /// Remove the enemy of `suit` from tier `level`.
    ///
    /// Returns `None` if it was already taken.
    pub fn take(&mut self, level: u8, suit: Suit) -> Option<Card> {
        let tier = self.tiers.get_mut(level as usize)?;
        let pos = tier.iter().position(|c| c.suit() == suit)?;
        Some(tier.remove(pos))
    }

    /// Return an enemy card to its tier.
    pub(crate) fn put_back(&mut self, card: Card) {
        debug_assert!(card.is_enemy(), "only enemies can be queued, got {card}");
        let level = (card.rank() - Card::JACK) as usize;
        self.tiers[level].push(card);
    }

    /// Suits still queued in a tier.
    #[must_use]
    pub fn suits_in_tier(&self, level: u8) -> SuitSet {
        self.tiers
            .get(level as usize)
            .map(|tier| tier.iter().map(|c| c.suit()).collect())
            .unwrap_or_default()
    }

    /// Number of enemies still queued across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every queued enemy.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.tiers.iter().flatten()
    }
}
