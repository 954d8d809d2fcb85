//! Move selection policies for self-play.
//!
//! A policy sees the state and the enumerated legal moves and picks one.
//! Policies never see moves outside the legal list, so every move they
//! return is accepted by the engine.

use crate::core::{GameRng, GameState, Move};
use crate::nn::{greedy_action, ActionMask, ActionValueModel, RegicideEncoder, StateEncoder};

/// Chooses a move from the legal list.
///
/// Learners plug in here. `Observation` is `Hash + Eq`, so a tabular
/// learner can key its values on it directly; the update rule stays with
/// the caller.
///
/// ```
/// use regicide_env::core::{ActionId, GameRng, GameState, Move};
/// use regicide_env::nn::Observation;
/// use regicide_env::training::{run_episode, EnvConfig, Policy};
/// use rustc_hash::FxHashMap;
///
/// struct Tabular {
///     values: FxHashMap<(Observation, ActionId), f32>,
///     explore_percent: usize,
///     rng: GameRng,
/// }
///
/// impl Policy for Tabular {
///     fn select(&mut self, state: &GameState, legal: &[Move]) -> Option<Move> {
///         if self.rng.below(100) < self.explore_percent {
///             return self.rng.choose(legal).copied();
///         }
///         let obs = Observation::from_state(state);
///         let value = |mv: &Move| self.values.get(&(obs, mv.encode())).copied().unwrap_or(0.0);
///         legal.iter().copied().max_by(|a, b| value(a).total_cmp(&value(b)))
///     }
/// }
///
/// let mut policy = Tabular {
///     values: FxHashMap::default(),
///     explore_percent: 10,
///     rng: GameRng::new(0),
/// };
/// let trajectory = run_episode(&EnvConfig::default(), &mut policy, 0, 500);
///
/// // One TD(0) pass over the episode.
/// for step in &trajectory.steps {
///     let next_best = if step.done {
///         0.0
///     } else {
///         policy
///             .values
///             .iter()
///             .filter(|((obs, _), _)| *obs == step.next_observation)
///             .map(|(_, v)| *v)
///             .fold(0.0, f32::max)
///     };
///     let q = policy.values.entry((step.observation, step.action)).or_insert(0.0);
///     *q += 0.1 * (step.reward + 0.9 * next_best - *q);
/// }
/// assert!(!policy.values.is_empty());
/// ```
pub trait Policy: Send {
    /// Pick a move. `None` when `legal` is empty.
    fn select(&mut self, state: &GameState, legal: &[Move]) -> Option<Move>;
}

// =============================================================================
// Baselines
// =============================================================================

/// Uniform random choice among legal moves.
#[derive(Clone, Debug)]
pub struct UniformRandomPolicy {
    rng: GameRng,
}

impl UniformRandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for UniformRandomPolicy {
    fn select(&mut self, _state: &GameState, legal: &[Move]) -> Option<Move> {
        self.rng.choose(legal).copied()
    }
}

/// Always the first legal move, which is the lowest action id.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegalPolicy;

impl Policy for FirstLegalPolicy {
    fn select(&mut self, _state: &GameState, legal: &[Move]) -> Option<Move> {
        legal.first().copied()
    }
}

// =============================================================================
// Model-driven
// =============================================================================

/// Greedy over a model's action values, restricted to legal ids.
#[derive(Clone, Debug)]
pub struct ModelPolicy<M> {
    model: M,
    encoder: RegicideEncoder,
}

impl<M: ActionValueModel> ModelPolicy<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            encoder: RegicideEncoder::new(),
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: RegicideEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

impl<M: ActionValueModel> Policy for ModelPolicy<M> {
    fn select(&mut self, state: &GameState, legal: &[Move]) -> Option<Move> {
        let values = self.model.action_values(&self.encoder.encode(state));
        let mask = ActionMask::from_moves(legal);
        greedy_action(&values, &mask).map(Move::decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ACTION_SPACE_SIZE;
    use crate::nn::{EncodedState, ZeroValues};
    use crate::rules::Regicide;

    #[test]
    fn test_random_policy_is_seeded() {
        let engine = Regicide::default();
        let state = engine.new_game(3);
        let legal = engine.legal_moves(&state);

        let picks = |seed| {
            let mut policy = UniformRandomPolicy::new(seed);
            (0..10).map(|_| policy.select(&state, &legal)).collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
        assert!(picks(5).iter().all(|m| m.is_some_and(|m| legal.contains(&m))));
    }

    #[test]
    fn test_empty_legal_list() {
        let state = GameState::deal(0);
        assert_eq!(UniformRandomPolicy::new(1).select(&state, &[]), None);
        assert_eq!(FirstLegalPolicy.select(&state, &[]), None);
    }

    #[test]
    fn test_zero_model_picks_lowest_id() {
        let engine = Regicide::default();
        let state = engine.new_game(8);
        let legal = engine.legal_moves(&state);

        let lowest = legal.iter().copied().min_by_key(|m| m.encode());

        let mut policy = ModelPolicy::new(ZeroValues::new(ACTION_SPACE_SIZE));
        assert_eq!(policy.select(&state, &legal), lowest);
        assert_eq!(FirstLegalPolicy.select(&state, &legal), lowest);
    }

    struct Prefers(Move);

    impl ActionValueModel for Prefers {
        fn action_values(&self, _encoded: &EncodedState) -> Vec<f32> {
            let mut values = vec![0.0; ACTION_SPACE_SIZE];
            values[self.0.encode().index()] = 1.0;
            values[ACTION_SPACE_SIZE - 1] = 99.0;
            values
        }
    }

    #[test]
    fn test_model_policy_respects_mask() {
        let engine = Regicide::default();
        let state = engine.new_game(8);
        let legal = engine.legal_moves(&state);
        let target = *legal.last().unwrap();

        let mut policy = ModelPolicy::new(Prefers(target));
        assert_eq!(policy.select(&state, &legal), Some(target));
    }
}
