//! Attack combo validation.
//!
//! A selection of one card is always legal, and so is the empty selection
//! (a yield). Larger selections must be either:
//! - cards of one rank whose attack sums to at most 10, or
//! - exactly one animal companion plus one other card.
//!
//! Companions never appear in selections of three or more cards.

use smallvec::SmallVec;

use crate::cards::{Card, SuitSet};
use crate::core::{ComboViolation, SelectionMask};
use crate::zones::MAX_HAND_SIZE;

/// Highest total attack a same-rank combo may have.
pub const COMBO_LIMIT: i32 = 10;

/// A validated attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combo {
    /// Hand slots, ascending.
    pub slots: SmallVec<[usize; MAX_HAND_SIZE]>,
    /// Selected cards, in slot order.
    pub cards: SmallVec<[Card; MAX_HAND_SIZE]>,
    /// Total attack value.
    pub attack: i32,
    /// Distinct suits played.
    pub suits: SuitSet,
}

impl Combo {
    /// Check if this attack plays no cards.
    #[must_use]
    pub fn is_yield(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Validate an attack given as hand slots.
pub fn validate_attack(hand: &[Card], slots: &[usize]) -> Result<Combo, ComboViolation> {
    let mut seen: SmallVec<[bool; MAX_HAND_SIZE]> = SmallVec::from_elem(false, hand.len());
    for &index in slots {
        if index >= hand.len() {
            return Err(ComboViolation::IndexOutOfRange {
                index,
                hand_size: hand.len(),
            });
        }
        if seen[index] {
            return Err(ComboViolation::DuplicateIndex { index });
        }
        seen[index] = true;
    }

    let mut sorted: SmallVec<[usize; MAX_HAND_SIZE]> = SmallVec::from_slice(slots);
    sorted.sort_unstable();
    let cards: SmallVec<[Card; MAX_HAND_SIZE]> = sorted.iter().map(|&i| hand[i]).collect();
    let attack = cards.iter().map(|c| c.attack()).sum();

    if cards.len() >= 2 {
        check_shape(&cards, attack)?;
    }

    Ok(Combo {
        slots: sorted,
        suits: cards.iter().map(|c| c.suit()).collect(),
        cards,
        attack,
    })
}

/// Validate an attack given as a selection mask.
pub fn validate_attack_mask(hand: &[Card], mask: SelectionMask) -> Result<Combo, ComboViolation> {
    validate_attack(hand, &mask.slots())
}

fn check_shape(cards: &[Card], attack: i32) -> Result<(), ComboViolation> {
    let companions = cards.iter().filter(|c| c.is_companion()).count();

    if companions > 0 && cards.len() > 2 {
        return Err(ComboViolation::CompanionOverPairing);
    }

    let same_rank = cards.iter().all(|c| c.rank() == cards[0].rank());
    let companion_pair = cards.len() == 2 && companions >= 1;
    if !same_rank && !companion_pair {
        return Err(ComboViolation::MismatchedRanks);
    }

    if companions == 0 && attack > COMBO_LIMIT {
        return Err(ComboViolation::SumExceeded { sum: attack });
    }
    Ok(())
}
