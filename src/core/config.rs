//! Engine configuration.
//!
//! Rules that earlier Regicide environments left inconsistent are made
//! explicit here:
//! - `InvalidSacrificePolicy`: what an insufficient or malformed sacrifice does
//! - `SacrificeSearch`: which sacrifice subsets the enumerator offers

use serde::{Deserialize, Serialize};

/// What happens when a move's sacrifice half is invalid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidSacrificePolicy {
    /// Reject the whole move without changing the game; the caller may retry.
    #[default]
    Reject,
    /// End the episode immediately as `Defeat(InvalidSacrifice)`.
    Defeat,
}

/// Which sufficient sacrifice subsets count as legal moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SacrificeSearch {
    /// Any subset whose health meets the enemy's attack.
    #[default]
    AnySufficient,
    /// Only subsets where every card is needed to meet the attack.
    MinimalOnly,
}

/// Configuration for the rules engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Handling of invalid sacrifice selections.
    pub invalid_sacrifice: InvalidSacrificePolicy,

    /// Sacrifice subsets offered by the legal move enumerator.
    pub sacrifice_search: SacrificeSearch,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invalid sacrifice policy.
    #[must_use]
    pub fn with_invalid_sacrifice(mut self, policy: InvalidSacrificePolicy) -> Self {
        self.invalid_sacrifice = policy;
        self
    }

    /// Set the sacrifice search policy.
    #[must_use]
    pub fn with_sacrifice_search(mut self, search: SacrificeSearch) -> Self {
        self.sacrifice_search = search;
        self
    }

    /// Reproduce the original environment: an invalid sacrifice loses.
    #[must_use]
    pub fn reference() -> Self {
        Self::new().with_invalid_sacrifice(InvalidSacrificePolicy::Defeat)
    }
}
