//! Game state: piles, enemies, turn marker, and the owned RNG.
//!
//! ## Lifecycle
//!
//! A `GameState` is created by dealing a fresh, independently shuffled
//! pool (`GameState::deal`), mutated only by the rules engine one move at a
//! time, and dropped when the episode ends. Each state owns its `GameRng`,
//! so many states can be stepped on separate threads without sharing
//! anything.
//!
//! ## Card conservation
//!
//! The tavern, discard, play area, both hands, the active enemy, and the
//! enemy queue always hold exactly the 52 cards of the pool, each once.
//! `verify_conservation` checks this; the engine asserts it in debug
//! builds after every step.

use serde::{Deserialize, Serialize};

use super::error::{ConservationError, Outcome};
use super::rng::GameRng;
use super::seat::Seat;
use crate::cards::{player_cards, Card, EnemyQueue, SuitSet, DECK_SIZE, ENEMY_COUNT, TIER_COUNT};
use crate::zones::{Piles, MAX_HAND_SIZE};

/// The enemy currently being fought, with its depleted stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveEnemy {
    card: Card,
    health: i32,
    attack: i32,
}

impl ActiveEnemy {
    /// Start an engagement at full health and attack.
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            card,
            health: card.health(),
            attack: card.attack(),
        }
    }

    #[must_use]
    pub fn card(&self) -> Card {
        self.card
    }

    /// Remaining health. Negative once overkilled.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Current attack after spade reductions.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub(crate) fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    pub(crate) fn reduce_attack(&mut self, amount: i32) {
        self.attack = (self.attack - amount).max(0);
    }

    pub(crate) fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    pub(crate) fn set_attack(&mut self, attack: i32) {
        self.attack = attack.max(0);
    }
}

/// Complete state of one Regicide episode.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) piles: Piles,
    pub(crate) enemies: EnemyQueue,
    pub(crate) enemy: Option<ActiveEnemy>,
    pub(crate) turn: Seat,
    pub(crate) level: u8,
    pub(crate) enemies_defeated: u8,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) step_count: u32,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Deal a new game.
    ///
    /// The 40 player cards are shuffled; the last 14 become the two hands
    /// (7 each) and the rest the tavern. The first jack is drawn at random.
    #[must_use]
    pub fn deal(seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut cards = player_cards();
        rng.shuffle(&mut cards);

        let hands = cards.split_off(cards.len() - 2 * MAX_HAND_SIZE);
        let (player_hand, ally_hand) = hands.split_at(MAX_HAND_SIZE);

        let mut state = Self {
            piles: Piles::new(cards, player_hand.to_vec(), ally_hand.to_vec()),
            enemies: EnemyQueue::full(),
            enemy: None,
            turn: Seat::One,
            level: 0,
            enemies_defeated: 0,
            outcome: None,
            step_count: 0,
            rng,
        };
        state.draw_enemy();
        state
    }

    // === Accessors ===

    /// Seat whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Current tier: 0 = jacks, 1 = queens, 2 = kings. Reaches 3 when the
    /// kings are cleared and the game is won.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Suits still queued in the current tier (the active enemy excluded).
    #[must_use]
    pub fn suits_remaining(&self) -> SuitSet {
        self.enemies.suits_in_tier(self.level)
    }

    /// Enemy being fought. `None` only after victory.
    #[must_use]
    pub fn enemy(&self) -> Option<&ActiveEnemy> {
        self.enemy.as_ref()
    }

    #[must_use]
    pub fn enemies_defeated(&self) -> u8 {
        self.enemies_defeated
    }

    /// Enemies not yet defeated, including the active one.
    #[must_use]
    pub fn enemies_left(&self) -> u8 {
        ENEMY_COUNT as u8 - self.enemies_defeated
    }

    #[must_use]
    pub fn enemy_queue(&self) -> &EnemyQueue {
        &self.enemies
    }

    #[must_use]
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    /// Hand of the acting seat.
    #[must_use]
    pub fn player_hand(&self) -> &[Card] {
        self.piles.player_hand()
    }

    /// Hand of the waiting seat.
    #[must_use]
    pub fn ally_hand(&self) -> &[Card] {
        self.piles.ally_hand()
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of accepted moves so far.
    #[must_use]
    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    // === Enemy lifecycle ===

    /// Put the next enemy into play.
    ///
    /// Moves up a tier when the current one is exhausted. Returns false,
    /// with the level past the last tier, when no enemies remain at all.
    pub(crate) fn draw_enemy(&mut self) -> bool {
        let suit = loop {
            if let Some(suit) = self.rng.pick_suit(self.suits_remaining()) {
                break suit;
            }
            self.level += 1;
            if self.level as usize >= TIER_COUNT {
                self.enemy = None;
                return false;
            }
        };
        let Some(card) = self.enemies.take(self.level, suit) else {
            unreachable!("{suit} listed in tier {} but not queued", self.level);
        };
        self.enemy = Some(ActiveEnemy::new(card));
        true
    }

    // === Invariants ===

    /// Check that all 52 cards are present exactly once.
    pub fn verify_conservation(&self) -> Result<(), ConservationError> {
        let mut seen = 0u64;
        let mut found = 0usize;

        let mut record = |card: &Card, pile| -> Result<(), ConservationError> {
            let bit = 1u64 << card.id().raw();
            if seen & bit != 0 {
                return Err(ConservationError::Duplicate { card: card.id(), pile });
            }
            seen |= bit;
            found += 1;
            Ok(())
        };

        for (pile, card) in self.piles.iter_all() {
            record(card, Some(pile))?;
        }
        if let Some(enemy) = &self.enemy {
            record(&enemy.card, None)?;
        }
        for card in self.enemies.iter() {
            record(card, None)?;
        }

        if found != DECK_SIZE {
            return Err(ConservationError::WrongCount {
                expected: DECK_SIZE,
                found,
            });
        }
        Ok(())
    }
}

fn join_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(", ")
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suits: Vec<_> = self.suits_remaining().iter().map(|s| s.name()).collect();

        writeln!(f, "== Regicide: {} to act ==", self.turn)?;
        writeln!(f, "enemies left: {}  (tier {})", self.enemies_left(), self.level)?;
        writeln!(f, "suits remaining: {}", suits.join(", "))?;
        writeln!(f, "tavern: {}  discard: {}", self.piles.tavern_len(), self.piles.discard().len())?;

        match &self.enemy {
            Some(enemy) => writeln!(
                f,
                "enemy: {}  health {}  attack {}",
                enemy.card,
                enemy.health,
                enemy.attack
            )?,
            None => writeln!(f, "enemy: none")?,
        }

        if !self.piles.played().is_empty() {
            writeln!(f, "played: {}", join_cards(self.piles.played()))?;
        }

        writeln!(f, "hand ({}/{}):", self.player_hand().len(), MAX_HAND_SIZE)?;
        for (slot, card) in self.player_hand().iter().enumerate() {
            writeln!(f, "  {slot}) {card}")?;
        }
        write!(f, "ally hand: {}/{}", self.ally_hand().len(), MAX_HAND_SIZE)?;

        if let Some(outcome) = self.outcome {
            write!(f, "\nresult: {outcome}")?;
        }
        Ok(())
    }
}
