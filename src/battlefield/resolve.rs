//! Pure battlefield resolution functions.
//!
//! Every function here is a total function over immutable inputs: no RNG,
//! no side effects, no mutation of arguments. The combat protocol calls
//! into this module for all numeric outcomes; nothing else computes damage
//! or HP.
//!
//! ## Invariants
//!
//! - An attack that lands deals at least 1 damage, regardless of defense.
//! - Negative damage input is clamped to zero, never treated as healing.
//! - HP is floored at 0 and never driven negative.

use crate::core::{Actor, Card, CardStats};

use super::state::{BattlefieldSide, BattlefieldState};

/// Damage an attacking card deals against an optional defender.
///
/// With no defender on the struck side the full attack value lands.
/// Otherwise defense reduces it, floored at 1 so an attack is never a
/// no-op.
///
/// ```
/// use cardclash_core::battlefield::calculate_damage;
/// use cardclash_core::core::CardStats;
///
/// assert_eq!(calculate_damage(CardStats::new(10, 0, 0), Some(CardStats::new(0, 8, 0))), 2);
/// assert_eq!(calculate_damage(CardStats::new(5, 0, 0), Some(CardStats::new(0, 8, 0))), 1);
/// assert_eq!(calculate_damage(CardStats::new(20, 0, 0), None), 20);
/// ```
#[must_use]
pub fn calculate_damage(attacker: CardStats, defender: Option<CardStats>) -> i32 {
    match defender {
        Some(defender) => (attacker.attack - defender.defense).max(1),
        None => attacker.attack,
    }
}

/// Place a card on one side, returning the new state.
///
/// Only the target side's `active_card` changes; the other side is
/// structurally preserved.
#[must_use]
pub fn place_card_on_side(state: &BattlefieldState, actor: Actor, card: Card) -> BattlefieldState {
    let side = BattlefieldSide {
        active_card: Some(card),
        ..state.side(actor).clone()
    };
    state.with_side(actor, side)
}

/// Apply damage to one side, returning the new state.
///
/// Damage is clamped to >= 0 first, then HP floors at 0.
#[must_use]
pub fn apply_damage_to_side(
    state: &BattlefieldState,
    actor: Actor,
    damage: i32,
) -> BattlefieldState {
    let damage = damage.max(0);
    let current = state.side(actor);
    let side = BattlefieldSide {
        hp: (current.hp - damage).max(0),
        ..current.clone()
    };
    state.with_side(actor, side)
}

/// Remove both active cards, leaving HP untouched.
#[must_use]
pub fn clear_battlefield(state: &BattlefieldState) -> BattlefieldState {
    BattlefieldState {
        player_side: BattlefieldSide {
            active_card: None,
            ..state.player_side.clone()
        },
        opponent_side: BattlefieldSide {
            active_card: None,
            ..state.opponent_side.clone()
        },
    }
}

/// Canonical fresh battlefield: both sides at 100/100, no cards in play.
#[must_use]
pub fn reset_battlefield() -> BattlefieldState {
    BattlefieldState::default()
}

/// Whether a side has been defeated.
#[must_use]
pub fn has_lost(side: &BattlefieldSide) -> bool {
    side.hp <= 0
}

/// Whether both sides fell simultaneously.
#[must_use]
pub fn is_draw(state: &BattlefieldState) -> bool {
    has_lost(&state.player_side) && has_lost(&state.opponent_side)
}
