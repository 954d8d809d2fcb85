//! Legality masks over the flat action space.
//!
//! The codec maps every 14-bit pattern to a move, legal or not. A learner
//! picks among legal ids only by masking its value vector with the
//! enumerated moves: illegal ids get `ILLEGAL_VALUE` and are never chosen.

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, Move, ACTION_SPACE_SIZE};
use crate::nn::traits::EncodedState;

/// Sentinel value for illegal action ids.
pub const ILLEGAL_VALUE: f32 = f32::NEG_INFINITY;

const WORDS: usize = ACTION_SPACE_SIZE / 64;

/// Bitmap of legal action ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMask {
    words: Vec<u64>,
    count: usize,
}

impl Default for ActionMask {
    fn default() -> Self {
        Self {
            words: vec![0; WORDS],
            count: 0,
        }
    }
}

impl ActionMask {
    /// Mask allowing exactly `moves`.
    #[must_use]
    pub fn from_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> Self {
        let mut mask = Self::default();
        for mv in moves {
            mask.allow(mv.encode());
        }
        mask
    }

    /// Mark an id as legal.
    pub fn allow(&mut self, id: ActionId) {
        let (word, bit) = (id.index() / 64, id.index() % 64);
        if self.words[word] & (1 << bit) == 0 {
            self.words[word] |= 1 << bit;
            self.count += 1;
        }
    }

    #[must_use]
    pub fn is_legal(&self, id: ActionId) -> bool {
        self.words[id.index() / 64] & (1 << (id.index() % 64)) != 0
    }

    /// Number of legal ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Legal ids in ascending order.
    pub fn legal_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        ActionId::all().filter(|&id| self.is_legal(id))
    }

    /// The mask as a 0/1 tensor of shape `[ACTION_SPACE_SIZE]`.
    #[must_use]
    pub fn to_tensor(&self) -> EncodedState {
        let tensor = ActionId::all()
            .map(|id| if self.is_legal(id) { 1.0 } else { 0.0 })
            .collect();
        EncodedState::new(tensor, vec![ACTION_SPACE_SIZE])
    }
}

/// Replace the values of illegal ids with `ILLEGAL_VALUE`.
///
/// Values beyond the action space are dropped; missing values count as
/// illegal.
#[must_use]
pub fn mask_values(values: &[f32], mask: &ActionMask) -> Vec<f32> {
    ActionId::all()
        .map(|id| match values.get(id.index()) {
            Some(&v) if mask.is_legal(id) => v,
            _ => ILLEGAL_VALUE,
        })
        .collect()
}

/// Legal id with the highest value. Ties go to the lowest id.
///
/// `None` when no id is legal. NaN values never win.
#[must_use]
pub fn greedy_action(values: &[f32], mask: &ActionMask) -> Option<ActionId> {
    let mut best: Option<(ActionId, f32)> = None;
    for id in mask.legal_ids() {
        let value = values.get(id.index()).copied().unwrap_or(ILLEGAL_VALUE);
        if value.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| value > b) {
            best = Some((id, value));
        }
    }
    best.map(|(id, _)| id)
}
