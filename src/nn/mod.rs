//! Learner-facing encodings.
//!
//! ## Overview
//!
//! - **Observation**: the 24-field record the acting seat sees
//! - **Encoding**: `StateEncoder` trait and `RegicideEncoder`
//! - **Masking**: `ActionMask`, `mask_values`, `greedy_action`
//! - **Models**: `ActionValueModel` trait and the `ZeroValues` baseline
//!
//! ## Usage
//!
//! ```
//! use regicide_env::core::ACTION_SPACE_SIZE;
//! use regicide_env::nn::{greedy_action, ActionMask, RegicideEncoder, StateEncoder};
//! use regicide_env::rules::Regicide;
//!
//! let engine = Regicide::default();
//! let state = engine.new_game(42);
//!
//! let encoded = RegicideEncoder::new().encode(&state);
//! assert_eq!(encoded.shape, vec![24]);
//!
//! let mask = ActionMask::from_moves(&engine.legal_moves(&state));
//! let values = vec![0.0; ACTION_SPACE_SIZE];
//! assert!(greedy_action(&values, &mask).is_some());
//! ```

pub mod encoder;
pub mod mask;
pub mod observation;
pub mod traits;

pub use encoder::{RegicideEncoder, StateEncoder};
pub use mask::{greedy_action, mask_values, ActionMask, ILLEGAL_VALUE};
pub use observation::{Observation, OBSERVATION_LEN};
pub use traits::{ActionValueModel, EncodedState, ZeroValues};
