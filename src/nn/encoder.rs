//! State encoding for model input.
//!
//! Transforms a game state into the flat tensor a learner consumes.

use crate::core::{GameState, ACTION_SPACE_SIZE};
use crate::nn::observation::{Observation, OBSERVATION_LEN};
use crate::nn::traits::EncodedState;

/// Encodes game state into tensors for model input.
///
/// Each encoder defines:
/// - How to convert state to a tensor from the acting seat's view
/// - The shape of the output tensor
/// - The size of the action space
pub trait StateEncoder: Send + Sync {
    /// Encode the game state as the acting seat sees it.
    ///
    /// The waiting hand's contents are hidden; only its size is visible.
    fn encode(&self, state: &GameState) -> EncodedState;

    fn output_shape(&self) -> Vec<usize>;

    /// Length of the value vector a model should produce.
    fn action_space_size(&self) -> usize;
}

/// Encodes the 24-field `Observation`.
///
/// Values are raw by default. With normalization on, each field is scaled
/// into `[0, 1]` by its largest possible value.
#[derive(Clone, Debug, Default)]
pub struct RegicideEncoder {
    normalize: bool,
}

/// Largest value of each observation field, in layout order.
const FIELD_MAX: [f32; OBSERVATION_LEN] = [
    12.0, 4.0, 4.0, 4.0, 4.0, 40.0, 20.0, 52.0, 52.0, //
    4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, //
    13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, //
    7.0,
];

impl RegicideEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale every field into `[0, 1]`.
    #[must_use]
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Encode an observation already taken from a state.
    #[must_use]
    pub fn encode_observation(&self, obs: &Observation) -> EncodedState {
        let tensor = obs
            .to_vector()
            .iter()
            .zip(FIELD_MAX)
            .map(|(&v, max)| {
                let v = v as f32;
                if self.normalize {
                    (v / max).clamp(0.0, 1.0)
                } else {
                    v
                }
            })
            .collect();
        EncodedState::new(tensor, vec![OBSERVATION_LEN])
    }
}

impl StateEncoder for RegicideEncoder {
    fn encode(&self, state: &GameState) -> EncodedState {
        self.encode_observation(&Observation::from_state(state))
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_LEN]
    }

    fn action_space_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let encoder = RegicideEncoder::new();
        assert_eq!(encoder.output_shape(), vec![24]);
        assert_eq!(encoder.action_space_size(), 16384);
    }

    #[test]
    fn test_raw_encoding_matches_observation() {
        let state = GameState::deal(21);
        let encoded = RegicideEncoder::new().encode(&state);
        let raw = Observation::from_state(&state).to_vector();

        assert_eq!(encoded.shape, vec![OBSERVATION_LEN]);
        for (a, b) in encoded.tensor.iter().zip(raw) {
            assert_eq!(*a, b as f32);
        }
    }

    #[test]
    fn test_normalized_range() {
        for seed in 0..10 {
            let state = GameState::deal(seed);
            let encoded = RegicideEncoder::new().with_normalization(true).encode(&state);

            assert!(encoded.tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
            assert_eq!(encoded.get(0), Some(1.0));
        }
    }
}
