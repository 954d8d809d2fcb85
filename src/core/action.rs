//! Move representation and the flat action codec.
//!
//! A move is a pair of 7-slot selection masks: the cards to attack with
//! and the cards to sacrifice. The attack mask indexes the acting hand as
//! it is now; the defense mask indexes the hand left to defend with once
//! the attack and its diamond draws resolve. Neither hand exceeds seven
//! cards.
//!
//! ## Action ids
//!
//! The learning agent sees moves as integers in `0..ACTION_SPACE_SIZE`.
//! The 14 bits are the attack slots followed by the defense slots, most
//! significant first: attack slot `i` is bit `13 - i` and defense slot `i`
//! is bit `6 - i`.
//!
//! ```
//! use regicide_env::core::{ActionId, Move, SelectionMask};
//!
//! let mv = Move::new(SelectionMask::from_slots(&[0]).unwrap(), SelectionMask::EMPTY);
//! let id = mv.encode();
//! assert_eq!(id, ActionId::new(1 << 13).unwrap());
//! assert_eq!(Move::decode(id), mv);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::zones::MAX_HAND_SIZE;

/// Number of distinct action ids (2^14).
pub const ACTION_SPACE_SIZE: usize = 1 << (2 * MAX_HAND_SIZE);

const SLOT_BITS: u8 = (1 << MAX_HAND_SIZE) - 1;

/// A subset of hand slots `0..7`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionMask(u8);

impl SelectionMask {
    /// No slots selected.
    pub const EMPTY: SelectionMask = SelectionMask(0);

    /// Create from raw bits, where bit `i` is slot `i`.
    ///
    /// Returns `None` if a bit above slot 6 is set.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !SLOT_BITS != 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Create from a list of slots. Repeated slots collapse.
    ///
    /// Returns `None` if any slot is 7 or more.
    #[must_use]
    pub fn from_slots(slots: &[usize]) -> Option<Self> {
        let mut bits = 0u8;
        for &slot in slots {
            if slot >= MAX_HAND_SIZE {
                return None;
            }
            bits |= 1 << slot;
        }
        Some(Self(bits))
    }

    /// Every slot below `len`.
    #[must_use]
    pub fn first(len: usize) -> Self {
        let len = len.min(MAX_HAND_SIZE);
        Self(((1u16 << len) - 1) as u8)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        slot < MAX_HAND_SIZE && self.0 & (1 << slot) != 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn overlaps(self, other: SelectionMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Slots in this mask that are not in `other`.
    #[must_use]
    pub const fn without(self, other: SelectionMask) -> SelectionMask {
        SelectionMask(self.0 & !other.0)
    }

    /// Selected slots in ascending order.
    #[must_use]
    pub fn slots(self) -> SmallVec<[usize; MAX_HAND_SIZE]> {
        (0..MAX_HAND_SIZE).filter(|&i| self.contains(i)).collect()
    }

    /// Every subset of this mask, including the empty one and itself.
    pub fn subsets(self) -> impl Iterator<Item = SelectionMask> {
        let full = self.0;
        let mut next = Some(full);
        std::iter::from_fn(move || {
            let current = next?;
            next = if current == 0 { None } else { Some((current - 1) & full) };
            Some(SelectionMask(current))
        })
    }
}

/// A flat action id in `0..ACTION_SPACE_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(u16);

impl ActionId {
    /// Create an action id. Returns `None` if out of range.
    #[must_use]
    pub const fn new(raw: u16) -> Option<Self> {
        if (raw as usize) < ACTION_SPACE_SIZE {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Raw id value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Id as an index into action-value tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over the whole action space.
    pub fn all() -> impl Iterator<Item = ActionId> {
        (0..ACTION_SPACE_SIZE as u16).map(ActionId)
    }
}

/// One turn's submission: attack cards and sacrifice cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Slots played as the attack.
    pub attack: SelectionMask,
    /// Slots sacrificed to absorb the enemy's attack.
    pub defense: SelectionMask,
}

impl Move {
    /// Play nothing and sacrifice nothing.
    pub const YIELD: Move = Move {
        attack: SelectionMask::EMPTY,
        defense: SelectionMask::EMPTY,
    };

    /// Create a move.
    #[must_use]
    pub const fn new(attack: SelectionMask, defense: SelectionMask) -> Self {
        Self { attack, defense }
    }

    /// Create a move from slot lists.
    ///
    /// Returns `None` if any slot is 7 or more.
    #[must_use]
    pub fn from_slots(attack: &[usize], defense: &[usize]) -> Option<Self> {
        Some(Self::new(
            SelectionMask::from_slots(attack)?,
            SelectionMask::from_slots(defense)?,
        ))
    }

    /// Check if both halves are empty.
    #[must_use]
    pub const fn is_yield(self) -> bool {
        self.attack.is_empty() && self.defense.is_empty()
    }

    /// Pack into a flat action id.
    #[must_use]
    pub fn encode(self) -> ActionId {
        let mut raw = 0u16;
        for slot in 0..MAX_HAND_SIZE {
            if self.attack.contains(slot) {
                raw |= 1 << (2 * MAX_HAND_SIZE - 1 - slot);
            }
            if self.defense.contains(slot) {
                raw |= 1 << (MAX_HAND_SIZE - 1 - slot);
            }
        }
        ActionId(raw)
    }

    /// Unpack a flat action id.
    #[must_use]
    pub fn decode(id: ActionId) -> Self {
        let mut attack = 0u8;
        let mut defense = 0u8;
        for slot in 0..MAX_HAND_SIZE {
            if id.0 & (1 << (2 * MAX_HAND_SIZE - 1 - slot)) != 0 {
                attack |= 1 << slot;
            }
            if id.0 & (1 << (MAX_HAND_SIZE - 1 - slot)) != 0 {
                defense |= 1 << slot;
            }
        }
        Self::new(SelectionMask(attack), SelectionMask(defense))
    }
}

impl From<Move> for ActionId {
    fn from(mv: Move) -> Self {
        mv.encode()
    }
}

impl From<ActionId> for Move {
    fn from(id: ActionId) -> Self {
        Move::decode(id)
    }
}
