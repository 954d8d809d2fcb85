//! Model traits for action-value prediction.
//!
//! These traits define the interface between the engine and a learner
//! (a lookup table, a network behind FFI, or a test stub). The engine never
//! trains anything; it only asks for values and masks the illegal ones.

use serde::{Deserialize, Serialize};

/// Encoded game state as a flat tensor for model input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Create a new encoded state.
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Predicts one value per action id.
///
/// The output length should equal `ACTION_SPACE_SIZE`. Values for illegal
/// actions are ignored by `nn::mask`, so models need not zero them.
pub trait ActionValueModel: Send + Sync {
    /// Predict action values for the given state.
    fn action_values(&self, encoded: &EncodedState) -> Vec<f32>;

    /// Batch prediction for multiple states.
    fn action_values_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.action_values(e)).collect()
    }
}

/// Model that values every action at zero (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct ZeroValues {
    action_space_size: usize,
}

impl ZeroValues {
    pub fn new(action_space_size: usize) -> Self {
        Self { action_space_size }
    }
}

impl ActionValueModel for ZeroValues {
    fn action_values(&self, _encoded: &EncodedState) -> Vec<f32> {
        vec![0.0; self.action_space_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_state_new() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
        assert_eq!(state.len(), 4);
        assert_eq!(state.shape, vec![2, 2]);
        assert_eq!(state.get(3), Some(4.0));
        assert_eq!(state.get(4), None);
    }

    #[test]
    fn test_encoded_state_zeros() {
        let state = EncodedState::zeros(vec![24]);
        assert_eq!(state.len(), 24);
        assert!(state.tensor.iter().all(|&v| v == 0.0));
        assert!(EncodedState::zeros(vec![0]).is_empty());
    }

    #[test]
    fn test_zero_values_batch() {
        let model = ZeroValues::new(8);
        let states = vec![EncodedState::zeros(vec![24]), EncodedState::zeros(vec![24])];

        let values = model.action_values_batch(&states);
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.len() == 8 && v.iter().all(|&x| x == 0.0)));
    }

    #[test]
    fn test_serialization() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0], vec![3]);
        let json = serde_json::to_string(&state).unwrap();
        let back: EncodedState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
