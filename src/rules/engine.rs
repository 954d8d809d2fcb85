//! The turn state machine.
//!
//! One call to `Regicide::apply` runs a whole cycle for the acting seat:
//! attack, suit effects, enemy resolution, sacrifice, then the hand swap.
//!
//! ## Validation
//!
//! An attack's combat result is fully determined before anything moves
//! (see `effects::project`), so the whole move is validated up front and
//! a rejected move leaves the state untouched. The only exception is the
//! `InvalidSacrificePolicy::Defeat` policy, where a bad sacrifice ends the
//! episode instead of being rejected.
//!
//! ## Slot indexing
//!
//! The attack half of a move indexes the hand as it is before the attack.
//! The defense half indexes the defending hand: the cards the attack left
//! behind, in order, followed by whatever diamonds drew into it. The tavern
//! order is known, so that hand is projected up front like everything else
//! (see `effects::project_hand`).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::combo::{validate_attack_mask, Combo};
use super::legal::legal_moves;
use super::sacrifice::{available_health, check_slots, first_unneeded, validate_sacrifice_mask, Sacrifice};
use crate::cards::Card;
use crate::core::{
    DefeatCause, EngineConfig, GameState, InvalidSacrificePolicy, Move, MoveError, Outcome,
    SacrificeSearch, SacrificeViolation,
};
use crate::effects::{project, project_hand, resolve, EffectLog, EnemyFate, Projection};
use crate::zones::{TavernPosition, MAX_HAND_SIZE};

/// What the defending seat owes after an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenseRequirement {
    /// The enemy dies or has no attack left.
    NotRequired,
    /// Sacrifice at least this much health.
    Required(i32),
    /// The defending hand cannot cover the attack.
    Unwinnable { required: i32, available: i32 },
}

/// A fully validated move, ready to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub combo: Combo,
    pub projection: Projection,
    pub requirement: DefenseRequirement,
    /// The hand the defense half indexes. Empty when no defense is owed.
    pub defending: SmallVec<[Card; MAX_HAND_SIZE]>,
    /// Present only when a sacrifice is required and winnable.
    pub sacrifice: Option<Sacrifice>,
}

/// How the engagement with the current enemy went this cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engagement {
    /// The enemy was killed.
    EnemyDefeated { enemy: Card, perfect_kill: bool, level: u8 },
    /// The enemy survived with no attack left.
    DefenseSkipped,
    /// The enemy survived and these cards were sacrificed.
    Defended { sacrificed: SmallVec<[Card; MAX_HAND_SIZE]> },
    /// The enemy survived and the hand could not absorb its attack.
    Overwhelmed,
    /// No combat happened: the episode ended before the attack.
    Forfeited,
}

/// Everything that happened during one accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Cards committed to the attack.
    pub played: SmallVec<[Card; MAX_HAND_SIZE]>,
    /// Damage dealt, including the clubs bonus.
    pub damage: i32,
    pub effects: EffectLog,
    pub engagement: Engagement,
    /// Set when this move ended the episode.
    pub outcome: Option<Outcome>,
}

impl StepReport {
    fn forfeited(outcome: Outcome) -> Self {
        Self {
            played: SmallVec::new(),
            damage: 0,
            effects: EffectLog::new(),
            engagement: Engagement::Forfeited,
            outcome: Some(outcome),
        }
    }

    /// The enemy defeated by this move, with its tier.
    #[must_use]
    pub fn defeated_enemy(&self) -> Option<(Card, u8)> {
        match self.engagement {
            Engagement::EnemyDefeated { enemy, level, .. } => Some((enemy, level)),
            _ => None,
        }
    }
}

/// Regicide rules engine.
///
/// Stateless apart from its configuration; every game lives in its own
/// `GameState`, so one engine can drive any number of games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regicide {
    config: EngineConfig,
}

impl Regicide {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Deal a new game.
    ///
    /// A deal where the first seat already has no legal move is returned
    /// as terminal with `Outcome::NoLegalMoves`.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        let mut state = GameState::deal(seed);
        self.check_stuck(&mut state);
        debug!(seed, enemy = ?state.enemy().map(|e| e.card()), "new game");
        state
    }

    /// Legal moves for the acting seat, sorted by action id.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        legal_moves(state, self.config.sacrifice_search)
    }

    /// Validate a move without applying it.
    pub fn validate(&self, state: &GameState, mv: Move) -> Result<MovePlan, MoveError> {
        if let Some(outcome) = state.outcome() {
            return Err(MoveError::GameOver(outcome));
        }
        let Some(enemy) = state.enemy() else {
            unreachable!("running game without an active enemy");
        };
        let hand = state.player_hand();

        let combo = validate_attack_mask(hand, mv.attack)?;
        let projection = project(enemy, combo.suits, combo.attack);
        let required = projection.required_defense();
        if required == 0 {
            if !mv.defense.is_empty() {
                return Err(SacrificeViolation::NotRequired.into());
            }
            return Ok(MovePlan {
                combo,
                projection,
                requirement: DefenseRequirement::NotRequired,
                defending: SmallVec::new(),
                sacrifice: None,
            });
        }

        let defending = project_hand(state.piles(), enemy, &combo.slots, combo.suits, combo.attack);
        let available = available_health(&defending);
        let (requirement, sacrifice) = if available < required {
            // Nothing can be sacrificed, so only the empty defense is accepted.
            check_slots(&defending, &mv.defense.slots())?;
            if !mv.defense.is_empty() {
                return Err(SacrificeViolation::Unwinnable { available, required }.into());
            }
            (DefenseRequirement::Unwinnable { required, available }, None)
        } else {
            let sacrifice = validate_sacrifice_mask(&defending, mv.defense, required)?;
            if self.config.sacrifice_search == SacrificeSearch::MinimalOnly {
                if let Some(index) = first_unneeded(&defending, mv.defense, required) {
                    return Err(SacrificeViolation::NotMinimal { index }.into());
                }
            }
            (DefenseRequirement::Required(required), Some(sacrifice))
        };

        Ok(MovePlan {
            combo,
            projection,
            requirement,
            defending,
            sacrifice,
        })
    }

    /// Apply a move for the acting seat.
    ///
    /// Returns an error, with the state unchanged, if the move is rejected.
    pub fn apply(&self, state: &mut GameState, mv: Move) -> Result<StepReport, MoveError> {
        if let Some(outcome) = state.outcome() {
            return Err(MoveError::GameOver(outcome));
        }
        if state.player_hand().is_empty() {
            return Ok(self.forfeit(state, DefeatCause::HandExhausted));
        }

        let plan = match self.validate(state, mv) {
            Ok(plan) => plan,
            Err(MoveError::InvalidSacrificeSelection(violation))
                if self.config.invalid_sacrifice == InvalidSacrificePolicy::Defeat =>
            {
                debug!(%violation, "invalid sacrifice ends the game");
                return Ok(self.forfeit(state, DefeatCause::InvalidSacrifice));
            }
            Err(err) => return Err(err),
        };

        let report = self.execute(state, plan);
        debug_assert_eq!(state.verify_conservation(), Ok(()));
        Ok(report)
    }

    fn forfeit(&self, state: &mut GameState, cause: DefeatCause) -> StepReport {
        let outcome = Outcome::Defeat(cause);
        state.outcome = Some(outcome);
        state.step_count += 1;
        debug!(%outcome, step = state.step_count, "game over");
        StepReport::forfeited(outcome)
    }

    fn execute(&self, state: &mut GameState, plan: MovePlan) -> StepReport {
        let MovePlan {
            combo,
            projection,
            defending,
            sacrifice,
            ..
        } = plan;

        let played = state.piles.take_from_player_hand(&combo.slots);
        state.piles.push_played(played.iter().copied());

        let Some(enemy) = state.enemy.as_mut() else {
            unreachable!("validated move without an active enemy");
        };
        enemy.take_damage(combo.attack);
        let effects = resolve(&mut state.piles, enemy, combo.suits, combo.attack);
        debug_assert_eq!(enemy.health(), projection.enemy_health);
        debug_assert_eq!(enemy.attack(), projection.enemy_attack);
        trace!(
            played = ?played,
            damage = projection.damage,
            health = enemy.health(),
            attack = enemy.attack(),
            "attack resolved"
        );

        let engagement = if projection.fate.is_defeated() {
            self.defeat_enemy(state, projection.fate)
        } else if projection.enemy_attack == 0 {
            Engagement::DefenseSkipped
        } else if let Some(sacrifice) = sacrifice {
            debug_assert_eq!(state.piles.player_hand(), defending.as_slice());
            let sacrificed = state.piles.take_from_player_hand(&sacrifice.slots);
            trace!(sacrificed = ?sacrificed, health = sacrifice.health, "sacrificed");
            state.piles.push_discard(sacrificed.iter().copied());
            Engagement::Defended { sacrificed }
        } else {
            state.outcome = Some(Outcome::Defeat(DefeatCause::UnwinnableDefense));
            Engagement::Overwhelmed
        };

        state.step_count += 1;
        if state.outcome.is_none() {
            self.end_turn(state);
        }
        if let Some(outcome) = state.outcome {
            debug!(%outcome, step = state.step_count, defeated = state.enemies_defeated, "game over");
        }

        StepReport {
            played,
            damage: projection.damage,
            effects,
            engagement,
            outcome: state.outcome,
        }
    }

    fn defeat_enemy(&self, state: &mut GameState, fate: EnemyFate) -> Engagement {
        let Some(enemy) = state.enemy.take() else {
            unreachable!("defeating an enemy that is not in play");
        };
        let card = enemy.card();
        let level = state.level;
        let perfect_kill = fate == EnemyFate::PerfectKill;

        if perfect_kill {
            state.piles.push_tavern(card, TavernPosition::Bottom);
        } else {
            state.piles.push_discard([card]);
        }
        state.piles.discard_played();
        state.enemies_defeated += 1;
        debug!(enemy = %card, perfect_kill, level, "enemy defeated");

        if state.draw_enemy() {
            if state.level != level {
                debug!(level = state.level, "tier cleared");
            }
        } else {
            state.outcome = Some(Outcome::Victory);
        }

        Engagement::EnemyDefeated {
            enemy: card,
            perfect_kill,
            level,
        }
    }

    fn end_turn(&self, state: &mut GameState) {
        state.piles.swap_hands();
        state.turn = state.turn.other();

        if state.player_hand().is_empty() {
            state.outcome = Some(Outcome::Defeat(DefeatCause::HandExhausted));
            return;
        }
        self.check_stuck(state);
    }

    fn check_stuck(&self, state: &mut GameState) {
        if !state.is_terminal() && self.legal_moves(state).is_empty() {
            state.outcome = Some(Outcome::NoLegalMoves);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::core::{Scenario, Seat};
    use crate::effects::SuitEffect;

    fn num(suit: Suit, rank: u8) -> Card {
        Card::standard(suit, rank)
    }

    fn mv(attack: &[usize], defense: &[usize]) -> Move {
        Move::from_slots(attack, defense).unwrap()
    }

    fn jack_of_hearts() -> Card {
        Card::enemy(Suit::Hearts, Card::JACK)
    }

    #[test]
    fn test_clubs_doubles_and_defense_required() {
        let engine = Regicide::default();
        let mut state = Scenario::new(1)
            .enemy(jack_of_hearts())
            .player_hand(&[num(Suit::Clubs, 5), num(Suit::Spades, 10)])
            .build();

        let plan = engine.validate(&state, mv(&[0], &[0])).unwrap();
        assert_eq!(plan.projection.enemy_health, 10);
        assert_eq!(plan.requirement, DefenseRequirement::Required(10));

        let report = engine.apply(&mut state, mv(&[0], &[0])).unwrap();
        assert_eq!(report.damage, 10);
        assert!(matches!(report.engagement, Engagement::Defended { .. }));
        assert_eq!(state.enemy().unwrap().health(), 10);
        assert_eq!(state.turn(), Seat::Two);
        assert_eq!(state.step_count(), 1);
    }

    #[test]
    fn test_rejected_move_leaves_state() {
        let engine = Regicide::default();
        let mut state = Scenario::new(1)
            .enemy(jack_of_hearts())
            .player_hand(&[num(Suit::Clubs, 5), num(Suit::Spades, 10), num(Suit::Diamonds, 3)])
            .build();
        let before = state.clone();

        let err = engine.apply(&mut state, mv(&[0], &[1])).unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidSacrificeSelection(SacrificeViolation::Insufficient { health: 3, required: 10 })
        );
        assert_eq!(state.piles(), before.piles());
        assert_eq!(state.step_count(), 0);

        let err = engine.apply(&mut state, mv(&[0, 1], &[])).unwrap_err();
        assert!(matches!(err, MoveError::InvalidAttackSelection(_)));
    }

    #[test]
    fn test_defeat_policy_ends_game() {
        let engine = Regicide::new(EngineConfig::reference());
        let mut state = Scenario::new(1)
            .enemy(jack_of_hearts())
            .player_hand(&[num(Suit::Clubs, 5), num(Suit::Spades, 10), num(Suit::Diamonds, 3)])
            .build();

        let report = engine.apply(&mut state, mv(&[0], &[1])).unwrap();
        assert_eq!(report.outcome, Some(Outcome::Defeat(DefeatCause::InvalidSacrifice)));
        assert_eq!(report.engagement, Engagement::Forfeited);
        // The attack is not applied.
        assert_eq!(state.enemy().unwrap().health(), 20);
        assert_eq!(state.player_hand().len(), 3);

        assert_eq!(
            engine.apply(&mut state, Move::YIELD),
            Err(MoveError::GameOver(Outcome::Defeat(DefeatCause::InvalidSacrifice)))
        );
    }

    #[test]
    fn test_defense_when_not_required() {
        let engine = Regicide::default();
        let mut state = Scenario::new(2)
            .enemy(jack_of_hearts())
            .enemy_health(5)
            .player_hand(&[num(Suit::Spades, 5), num(Suit::Clubs, 2)])
            .build();

        assert_eq!(
            engine.apply(&mut state, mv(&[0], &[1])),
            Err(MoveError::InvalidSacrificeSelection(SacrificeViolation::NotRequired))
        );
    }

    #[test]
    fn test_perfect_kill_goes_under_tavern() {
        let engine = Regicide::default();
        let mut state = Scenario::new(2)
            .enemy(jack_of_hearts())
            .enemy_health(5)
            .player_hand(&[num(Suit::Spades, 5), num(Suit::Clubs, 2)])
            .ally_hand(&[num(Suit::Clubs, 9)])
            .build();

        let report = engine.apply(&mut state, mv(&[0], &[])).unwrap();
        assert_eq!(
            report.engagement,
            Engagement::EnemyDefeated {
                enemy: jack_of_hearts(),
                perfect_kill: true,
                level: 0
            }
        );
        assert_eq!(state.piles().tavern().next(), Some(&jack_of_hearts()));
        assert_eq!(state.piles().discard().last(), Some(&num(Suit::Spades, 5)));
        assert!(state.piles().played().is_empty());
        assert_eq!(state.enemies_defeated(), 1);
        assert_eq!(state.enemy().unwrap().card().rank(), Card::JACK);
    }

    #[test]
    fn test_overkill_goes_to_discard() {
        let engine = Regicide::default();
        let mut state = Scenario::new(2)
            .enemy(jack_of_hearts())
            .enemy_health(3)
            .player_hand(&[num(Suit::Spades, 5), num(Suit::Clubs, 2)])
            .build();

        engine.apply(&mut state, mv(&[0], &[])).unwrap();
        assert_eq!(state.piles().discard(), &[jack_of_hearts(), num(Suit::Spades, 5)]);
    }

    #[test]
    fn test_unwinnable_defense() {
        let engine = Regicide::default();
        let mut state = Scenario::new(3)
            .enemy(Card::enemy(Suit::Clubs, Card::QUEEN))
            .enemy_attack(12)
            .player_hand(&[num(Suit::Hearts, 3), num(Suit::Diamonds, 5)])
            .build();

        let plan = engine.validate(&state, Move::YIELD).unwrap();
        assert_eq!(
            plan.requirement,
            DefenseRequirement::Unwinnable { required: 12, available: 8 }
        );

        assert_eq!(
            engine.validate(&state, mv(&[], &[0, 1])),
            Err(MoveError::InvalidSacrificeSelection(SacrificeViolation::Unwinnable {
                available: 8,
                required: 12
            }))
        );
        assert_eq!(
            engine.validate(&state, mv(&[0], &[1])),
            Err(MoveError::InvalidSacrificeSelection(SacrificeViolation::IndexOutOfRange {
                index: 1,
                hand_size: 1
            }))
        );

        let report = engine.apply(&mut state, Move::YIELD).unwrap();
        assert_eq!(report.engagement, Engagement::Overwhelmed);
        assert_eq!(state.outcome(), Some(Outcome::Defeat(DefeatCause::UnwinnableDefense)));
    }

    #[test]
    fn test_spades_can_skip_defense() {
        let engine = Regicide::default();
        let mut state = Scenario::new(3)
            .enemy(jack_of_hearts())
            .enemy_attack(4)
            .player_hand(&[num(Suit::Spades, 4), num(Suit::Clubs, 2)])
            .ally_hand(&[num(Suit::Clubs, 9)])
            .build();

        let report = engine.apply(&mut state, mv(&[0], &[])).unwrap();
        assert_eq!(report.engagement, Engagement::DefenseSkipped);
        assert!(report
            .effects
            .iter()
            .any(|e| matches!(e, SuitEffect::Shielded { attack: 0, .. })));
        assert_eq!(state.piles().played(), &[num(Suit::Spades, 4)]);
    }

    #[test]
    fn test_sacrifice_indexes_defending_hand() {
        let engine = Regicide::default();
        let mut state = Scenario::new(5)
            .enemy(jack_of_hearts())
            .player_hand(&[
                num(Suit::Spades, 2),
                num(Suit::Diamonds, 3),
                num(Suit::Clubs, 10),
                num(Suit::Hearts, 9),
            ])
            .ally_hand(&[num(Suit::Clubs, 9)])
            .build();

        // Attack with the 3 of diamonds; the 10 of clubs is now slot 1.
        let plan = engine.validate(&state, mv(&[1], &[1])).unwrap();
        assert_eq!(plan.defending.len(), 5);
        assert_eq!(
            plan.defending[..3],
            [num(Suit::Spades, 2), num(Suit::Clubs, 10), num(Suit::Hearts, 9)]
        );

        let report = engine.apply(&mut state, mv(&[1], &[1])).unwrap();
        let Engagement::Defended { sacrificed } = report.engagement else {
            panic!("expected a sacrifice, got {:?}", report.engagement);
        };
        assert_eq!(sacrificed.as_slice(), &[num(Suit::Clubs, 10)]);

        // Seat one drew two of the three diamond cards and kept its 2 and 9.
        assert_eq!(report.effects.drawn(), (2, 1));
        assert_eq!(state.ally_hand().len(), 4);
        assert_eq!(state.ally_hand()[..2], [num(Suit::Spades, 2), num(Suit::Hearts, 9)]);
    }

    #[test]
    fn test_diamond_draws_can_cover_the_attack() {
        let engine = Regicide::default();
        let mut state = Scenario::new(4)
            .enemy(Card::enemy(Suit::Clubs, Card::JACK))
            .player_hand(&[num(Suit::Diamonds, 5)])
            .ally_hand(&[num(Suit::Clubs, 2)])
            .tavern(&[
                num(Suit::Hearts, 2),
                num(Suit::Hearts, 3),
                num(Suit::Hearts, 4),
                num(Suit::Spades, 9),
                num(Suit::Spades, 10),
            ])
            .build();

        let plan = engine.validate(&state, mv(&[0], &[0])).unwrap();
        assert_eq!(plan.requirement, DefenseRequirement::Required(10));
        assert_eq!(
            plan.defending.as_slice(),
            &[num(Suit::Spades, 10), num(Suit::Hearts, 4), num(Suit::Hearts, 2)]
        );

        // The yield keeps only the 5, which cannot cover 10.
        let moves = engine.legal_moves(&state);
        assert!(moves.contains(&Move::YIELD));
        assert_eq!(moves.iter().filter(|m| m.attack == mv(&[0], &[]).attack).count(), 4);

        let report = engine.apply(&mut state, mv(&[0], &[0])).unwrap();
        assert_eq!(report.effects.drawn(), (3, 2));
        assert_eq!(
            report.engagement,
            Engagement::Defended {
                sacrificed: [num(Suit::Spades, 10)].into_iter().collect()
            }
        );
        assert_eq!(report.outcome, None);
        assert_eq!(state.ally_hand(), &[num(Suit::Hearts, 4), num(Suit::Hearts, 2)]);
        assert_eq!(state.player_hand().len(), 3);
    }

    #[test]
    fn test_hand_exhausted_after_swap() {
        let engine = Regicide::default();
        let mut state = Scenario::new(6)
            .enemy(jack_of_hearts())
            .enemy_attack(0)
            .player_hand(&[num(Suit::Spades, 2)])
            .ally_hand(&[])
            .build();

        let report = engine.apply(&mut state, mv(&[0], &[])).unwrap();
        assert_eq!(report.outcome, Some(Outcome::Defeat(DefeatCause::HandExhausted)));
    }

    #[test]
    fn test_empty_hand_at_start() {
        let engine = Regicide::default();
        let mut state = Scenario::new(6).player_hand(&[]).build();

        let report = engine.apply(&mut state, Move::YIELD).unwrap();
        assert_eq!(report.engagement, Engagement::Forfeited);
        assert_eq!(state.outcome(), Some(Outcome::Defeat(DefeatCause::HandExhausted)));
    }

    #[test]
    fn test_victory_on_last_king() {
        let engine = Regicide::default();
        let king = Card::enemy(Suit::Spades, Card::KING);
        let mut state = Scenario::new(7)
            .enemy(king)
            .suits_remaining(&[])
            .enemy_health(4)
            .player_hand(&[num(Suit::Hearts, 4)])
            .build();

        let report = engine.apply(&mut state, mv(&[0], &[])).unwrap();
        assert_eq!(report.defeated_enemy(), Some((king, 2)));
        assert_eq!(report.outcome, Some(Outcome::Victory));
        assert_eq!(state.enemies_defeated(), 12);
        assert_eq!(state.level(), 3);
        assert!(state.enemy().is_none());
        state.verify_conservation().unwrap();
    }

    #[test]
    fn test_minimal_only_rejects_extra_cards() {
        let engine = Regicide::new(EngineConfig::new().with_sacrifice_search(SacrificeSearch::MinimalOnly));
        let mut state = Scenario::new(8)
            .enemy(jack_of_hearts())
            .player_hand(&[num(Suit::Clubs, 2), num(Suit::Spades, 10), num(Suit::Diamonds, 2)])
            .build();

        assert_eq!(
            engine.apply(&mut state, mv(&[], &[1, 2])),
            Err(MoveError::InvalidSacrificeSelection(SacrificeViolation::NotMinimal { index: 2 }))
        );
    }
}
