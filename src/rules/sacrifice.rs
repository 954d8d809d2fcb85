//! Sacrifice sufficiency.
//!
//! When an enemy survives an attack with attack above zero, the acting
//! seat discards cards whose combined health covers that attack. The
//! sacrifice is taken from the defending hand: the cards left after the
//! attack, followed by anything diamonds drew into it.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{SacrificeViolation, SelectionMask};
use crate::zones::MAX_HAND_SIZE;

/// A validated sacrifice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sacrifice {
    /// Hand slots, ascending.
    pub slots: SmallVec<[usize; MAX_HAND_SIZE]>,
    /// Combined health of the sacrificed cards.
    pub health: i32,
}

/// Combined health of every card in `hand`.
#[must_use]
pub fn available_health(hand: &[Card]) -> i32 {
    hand.iter().map(|card| card.health()).sum()
}

/// Combined health of the cards selected by `mask`. Out-of-range slots
/// are ignored.
#[must_use]
pub fn mask_health(hand: &[Card], mask: SelectionMask) -> i32 {
    hand.iter()
        .enumerate()
        .filter(|(slot, _)| mask.contains(*slot))
        .map(|(_, card)| card.health())
        .sum()
}

/// Check that `slots` are distinct and index into `hand`.
pub fn check_slots(hand: &[Card], slots: &[usize]) -> Result<(), SacrificeViolation> {
    let mut seen: SmallVec<[bool; MAX_HAND_SIZE]> = SmallVec::from_elem(false, hand.len());
    for &index in slots {
        if index >= hand.len() {
            return Err(SacrificeViolation::IndexOutOfRange {
                index,
                hand_size: hand.len(),
            });
        }
        if seen[index] {
            return Err(SacrificeViolation::DuplicateIndex { index });
        }
        seen[index] = true;
    }
    Ok(())
}

/// Validate a sacrifice given as slots of the defending hand against an
/// enemy attack of `required`.
pub fn validate_sacrifice(hand: &[Card], slots: &[usize], required: i32) -> Result<Sacrifice, SacrificeViolation> {
    check_slots(hand, slots)?;

    let health = slots.iter().map(|&i| hand[i].health()).sum();
    if health < required {
        return Err(SacrificeViolation::Insufficient { health, required });
    }

    let mut sorted: SmallVec<[usize; MAX_HAND_SIZE]> = SmallVec::from_slice(slots);
    sorted.sort_unstable();
    Ok(Sacrifice { slots: sorted, health })
}

/// Validate a sacrifice given as a selection mask.
pub fn validate_sacrifice_mask(
    hand: &[Card],
    mask: SelectionMask,
    required: i32,
) -> Result<Sacrifice, SacrificeViolation> {
    validate_sacrifice(hand, &mask.slots(), required)
}

/// Check that every card of a sufficient sacrifice is needed.
#[must_use]
pub fn is_minimal(hand: &[Card], mask: SelectionMask, required: i32) -> bool {
    first_unneeded(hand, mask, required).is_none()
}

/// First slot of `mask` that could be dropped while still meeting
/// `required`.
#[must_use]
pub fn first_unneeded(hand: &[Card], mask: SelectionMask, required: i32) -> Option<usize> {
    let total = mask_health(hand, mask);
    mask.slots()
        .into_iter()
        .filter(|&slot| slot < hand.len())
        .find(|&slot| total - hand[slot].health() >= required)
}
