//! Legal move enumeration.
//!
//! Attacks are generated by shape instead of brute force: the yield,
//! every single card, every companion pair, and every same-rank group
//! whose attack fits under the combo limit. Each attack is projected
//! against the enemy, then paired with the sacrifices that project
//! requires, drawn from the projected defending hand.
//!
//! An attack the defending hand cannot survive is offered once, with an
//! empty sacrifice, since no choice of cards changes the result.

use rustc_hash::FxHashSet;

use super::combo::{validate_attack_mask, COMBO_LIMIT};
use super::sacrifice::{available_health, is_minimal, mask_health};
use crate::cards::Card;
use crate::core::{ActiveEnemy, GameState, Move, SacrificeSearch, SelectionMask};
use crate::effects::{project, project_hand};
use crate::zones::Piles;

/// Every legal move for the acting seat, sorted by action id.
///
/// Empty once the game is over or the acting hand is empty.
#[must_use]
pub fn legal_moves(state: &GameState, search: SacrificeSearch) -> Vec<Move> {
    if state.is_terminal() {
        return Vec::new();
    }
    let Some(enemy) = state.enemy() else {
        return Vec::new();
    };
    if state.player_hand().is_empty() {
        return Vec::new();
    }
    moves_for_piles(state.piles(), enemy, search)
}

/// Every legal move for the acting hand in `piles` against `enemy`,
/// sorted by action id.
#[must_use]
pub fn moves_for_piles(piles: &Piles, enemy: &ActiveEnemy, search: SacrificeSearch) -> Vec<Move> {
    let hand = piles.player_hand();
    let mut moves = Vec::new();

    for attack in attack_candidates(hand) {
        let Ok(combo) = validate_attack_mask(hand, attack) else {
            continue;
        };
        let required = project(enemy, combo.suits, combo.attack).required_defense();
        if required == 0 {
            moves.push(Move::new(attack, SelectionMask::EMPTY));
            continue;
        }

        let defending = project_hand(piles, enemy, &combo.slots, combo.suits, combo.attack);
        if available_health(&defending) < required {
            moves.push(Move::new(attack, SelectionMask::EMPTY));
            continue;
        }

        for defense in SelectionMask::first(defending.len()).subsets() {
            if mask_health(&defending, defense) < required {
                continue;
            }
            if search == SacrificeSearch::MinimalOnly && !is_minimal(&defending, defense, required) {
                continue;
            }
            moves.push(Move::new(attack, defense));
        }
    }

    moves.sort_unstable_by_key(|mv| mv.encode());
    moves
}

/// Candidate attack masks by shape, without duplicates.
///
/// Every returned mask is a legal combo for `hand`.
#[must_use]
pub fn attack_candidates(hand: &[Card]) -> Vec<SelectionMask> {
    let mut seen: FxHashSet<SelectionMask> = FxHashSet::default();
    let mut out = Vec::new();
    let mut push = |slots: &[usize]| {
        if let Some(mask) = SelectionMask::from_slots(slots) {
            if seen.insert(mask) {
                out.push(mask);
            }
        }
    };

    push(&[]);
    for slot in 0..hand.len() {
        push(&[slot]);
    }

    for (i, card) in hand.iter().enumerate() {
        if !card.is_companion() {
            continue;
        }
        for j in 0..hand.len() {
            if j != i {
                push(&[i.min(j), i.max(j)]);
            }
        }
    }

    // Same-rank groups of two or more number cards.
    let everything = SelectionMask::first(hand.len());
    for group in everything.subsets() {
        if group.len() < 2 {
            continue;
        }
        let slots = group.slots();
        let first = hand[slots[0]];
        if first.is_companion() {
            continue;
        }
        let same_rank = slots.iter().all(|&s| hand[s].rank() == first.rank());
        let attack: i32 = slots.iter().map(|&s| hand[s].attack()).sum();
        if same_rank && attack <= COMBO_LIMIT {
            push(&slots);
        }
    }

    out
}
