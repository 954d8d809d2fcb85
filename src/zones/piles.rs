//! Pile storage and movement.
//!
//! `Piles` holds every card that is not the active enemy or still queued:
//! the tavern, the discard, the play area, and both hands.
//!
//! ## Ordering
//!
//! - Tavern: `front` is the bottom, `back` is the top (draw end).
//! - Discard: the last element is the top (most recently discarded).
//! - Hands: slot order is the index space used by selection masks.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;

/// Maximum cards in either hand.
pub const MAX_HAND_SIZE: usize = 7;

/// Identifies a pile, for logging and conservation reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Tavern,
    Discard,
    Played,
    PlayerHand,
    AllyHand,
}

/// Position for returning a card to the tavern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TavernPosition {
    /// Draw end.
    Top,
    /// Far end; drawn last.
    Bottom,
}

/// The card piles of one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piles {
    tavern: VecDeque<Card>,
    discard: Vec<Card>,
    played: Vec<Card>,
    player_hand: Vec<Card>,
    ally_hand: Vec<Card>,
}

impl Piles {
    /// Create piles from an initial deal.
    ///
    /// `tavern` is given bottom-first.
    #[must_use]
    pub fn new(tavern: Vec<Card>, player_hand: Vec<Card>, ally_hand: Vec<Card>) -> Self {
        Self {
            tavern: tavern.into(),
            discard: Vec::new(),
            played: Vec::new(),
            player_hand,
            ally_hand,
        }
    }

    // === Views ===

    /// Tavern cards, bottom first.
    pub fn tavern(&self) -> impl Iterator<Item = &Card> + '_ {
        self.tavern.iter()
    }

    #[must_use]
    pub fn tavern_len(&self) -> usize {
        self.tavern.len()
    }

    /// Discard cards, bottom first.
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    #[must_use]
    pub fn played(&self) -> &[Card] {
        &self.played
    }

    /// Hand of the seat about to act.
    #[must_use]
    pub fn player_hand(&self) -> &[Card] {
        &self.player_hand
    }

    /// Hand of the waiting seat.
    #[must_use]
    pub fn ally_hand(&self) -> &[Card] {
        &self.ally_hand
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn len_of(&self, pile: PileKind) -> usize {
        match pile {
            PileKind::Tavern => self.tavern.len(),
            PileKind::Discard => self.discard.len(),
            PileKind::Played => self.played.len(),
            PileKind::PlayerHand => self.player_hand.len(),
            PileKind::AllyHand => self.ally_hand.len(),
        }
    }

    /// Every card held in any pile, tagged with its pile.
    pub fn iter_all(&self) -> impl Iterator<Item = (PileKind, &Card)> + '_ {
        self.tavern
            .iter()
            .map(|c| (PileKind::Tavern, c))
            .chain(self.discard.iter().map(|c| (PileKind::Discard, c)))
            .chain(self.played.iter().map(|c| (PileKind::Played, c)))
            .chain(self.player_hand.iter().map(|c| (PileKind::PlayerHand, c)))
            .chain(self.ally_hand.iter().map(|c| (PileKind::AllyHand, c)))
    }

    // === Tavern ===

    /// Draw the top tavern card.
    pub fn draw_tavern(&mut self) -> Option<Card> {
        self.tavern.pop_back()
    }

    /// Return a card to the tavern.
    pub fn push_tavern(&mut self, card: Card, position: TavernPosition) {
        match position {
            TavernPosition::Top => self.tavern.push_back(card),
            TavernPosition::Bottom => self.tavern.push_front(card),
        }
    }

    /// Move up to `count` cards from the top of the discard under the
    /// tavern, keeping their relative order. Returns how many moved.
    pub fn recycle_discard(&mut self, count: usize) -> usize {
        let moved = count.min(self.discard.len());
        let start = self.discard.len() - moved;
        for card in self.discard.drain(start..).rev() {
            self.tavern.push_front(card);
        }
        moved
    }

    // === Hands ===

    /// Draw for both hands in turn, player first, until `count` cards have
    /// been drawn, both hands hold `MAX_HAND_SIZE`, or the tavern runs out.
    ///
    /// Returns `(player_drawn, ally_drawn)`.
    pub fn deal_alternating(&mut self, count: usize) -> (usize, usize) {
        let mut drawn = [0usize; 2];
        let mut remaining = count;

        while remaining > 0 && !self.tavern.is_empty() {
            let player_full = self.player_hand.len() >= MAX_HAND_SIZE;
            let ally_full = self.ally_hand.len() >= MAX_HAND_SIZE;
            if player_full && ally_full {
                break;
            }

            for (slot, hand) in [&mut self.player_hand, &mut self.ally_hand].into_iter().enumerate() {
                if remaining == 0 || hand.len() >= MAX_HAND_SIZE {
                    continue;
                }
                let Some(card) = self.tavern.pop_back() else {
                    break;
                };
                hand.push(card);
                drawn[slot] += 1;
                remaining -= 1;
            }
        }

        (drawn[0], drawn[1])
    }

    /// Remove the cards at `slots` from the player hand.
    ///
    /// Slots must be distinct and in range. Cards are returned in slot order
    /// and the remaining hand keeps its relative order.
    pub fn take_from_player_hand(&mut self, slots: &[usize]) -> SmallVec<[Card; MAX_HAND_SIZE]> {
        let mut sorted: SmallVec<[usize; MAX_HAND_SIZE]> = SmallVec::from_slice(slots);
        sorted.sort_unstable();
        let taken: SmallVec<[Card; MAX_HAND_SIZE]> = sorted.iter().map(|&i| self.player_hand[i]).collect();
        for &i in sorted.iter().rev() {
            self.player_hand.remove(i);
        }
        taken
    }

    /// Swap the two hands.
    pub fn swap_hands(&mut self) {
        std::mem::swap(&mut self.player_hand, &mut self.ally_hand);
    }

    // === Play area and discard ===

    /// Commit cards to the play area.
    pub fn push_played(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.played.extend(cards);
    }

    /// Move the whole play area onto the discard.
    pub fn discard_played(&mut self) {
        self.discard.append(&mut self.played);
    }

    /// Put cards on top of the discard.
    pub fn push_discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }

    /// Mutable access to the raw piles, for fixture construction.
    pub(crate) fn raw_mut(&mut self) -> RawPiles<'_> {
        RawPiles {
            tavern: &mut self.tavern,
            discard: &mut self.discard,
            played: &mut self.played,
            player_hand: &mut self.player_hand,
            ally_hand: &mut self.ally_hand,
        }
    }
}

/// Direct pile handles used by the scenario builder.
pub(crate) struct RawPiles<'a> {
    pub tavern: &'a mut VecDeque<Card>,
    pub discard: &'a mut Vec<Card>,
    pub played: &'a mut Vec<Card>,
    pub player_hand: &'a mut Vec<Card>,
    pub ally_hand: &'a mut Vec<Card>,
}
