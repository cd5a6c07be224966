//! The combat protocol state machine.
//!
//! States form a fixed loop with one terminal:
//!
//! ```text
//! Idle -> PlayerTurn/OpponentTurn -> CardPlay -> Resolve -> CheckWin
//!      -> PlayerTurn/OpponentTurn (no winner) | End (winner)
//! ```
//!
//! The machine is an explicit tagged union of state names plus a pure
//! `(state, context, event) -> (state, context)` transition function. No
//! hidden interpreter internals, no reentrant suspension points: each
//! event is processed to completion before the next can be accepted.
//!
//! ## Failure semantics
//!
//! Transitions are total over `(state, event)`. An event that is not
//! valid for the current state is ignored rather than rejected, which
//! keeps the protocol robust against out-of-order external callers
//! (late animation callbacks, double-sent UI events).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::battlefield::{
    apply_damage_to_side, calculate_damage, has_lost, is_draw, place_card_on_side,
    reset_battlefield,
};
use crate::core::{Actor, Card, CombatOutcome};

use super::context::{CombatContext, OPENING_HAND_SIZE};

/// Protocol state names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatState {
    /// Pre-combat. Only `StartCombat` is accepted.
    Idle,
    /// Waiting for the player's card.
    PlayerTurn,
    /// Waiting for the opponent's card (scripted or built-in AI).
    OpponentTurn,
    /// A card has been selected; the attack cue is playing.
    CardPlay,
    /// Damage has been computed; waiting for acknowledgement.
    Resolve,
    /// Waiting for the winner verdict via `CheckComplete`.
    CheckWin,
    /// Terminal. No outgoing transitions, context is frozen.
    End,
}

impl CombatState {
    /// The turn state belonging to an actor.
    #[must_use]
    pub const fn turn_of(actor: Actor) -> Self {
        match actor {
            Actor::Player => CombatState::PlayerTurn,
            Actor::Opponent => CombatState::OpponentTurn,
        }
    }
}

/// Events the protocol consumes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Shuffle, deal, and enter the first turn state. Valid only in `Idle`.
    StartCombat,
    /// The acting side plays a card from their hand.
    PlayCard(Card),
    /// The attack cue finished; resolve the exchange.
    AnimationComplete,
    /// The damage cue finished; move on to the win check.
    DamageApplied,
    /// The built-in AI finished deliberating; it picks a card itself.
    AiActionComplete,
    /// Verdict from [`evaluate_winner`], supplied by the caller.
    CheckComplete(Option<CombatOutcome>),
}

/// Result of one transition step.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: CombatState,
    pub context: CombatContext,
    /// False when the event was ignored as invalid for the state.
    pub applied: bool,
}

/// Pure transition function over `(state, context, event)`.
///
/// Returns the successor state and context. Invalid `(state, event)`
/// pairs return the inputs unchanged with `applied = false`.
#[must_use]
pub fn transition(state: CombatState, context: CombatContext, event: CombatEvent) -> Transition {
    match (state, event) {
        (CombatState::Idle, CombatEvent::StartCombat) => start_combat(context),

        (CombatState::PlayerTurn, CombatEvent::PlayCard(card))
            if context.current_turn == Actor::Player =>
        {
            enter_card_play(context, card)
        }
        (CombatState::OpponentTurn, CombatEvent::PlayCard(card))
            if context.current_turn == Actor::Opponent =>
        {
            enter_card_play(context, card)
        }
        (CombatState::OpponentTurn, CombatEvent::AiActionComplete) => ai_pick_and_play(context),

        (CombatState::CardPlay, CombatEvent::AnimationComplete) => resolve_exchange(context),

        (CombatState::Resolve, CombatEvent::DamageApplied) => Transition {
            state: CombatState::CheckWin,
            context,
            applied: true,
        },

        (CombatState::CheckWin, CombatEvent::CheckComplete(None)) => alternate_turn(context),
        (CombatState::CheckWin, CombatEvent::CheckComplete(Some(winner))) => {
            finish_combat(context, winner)
        }

        (state, event) => {
            debug!(?state, ?event, "combat event ignored");
            Transition {
                state,
                context,
                applied: false,
            }
        }
    }
}

/// The `CheckWin` predicate composition: draw is checked before either
/// single loss so simultaneous falls are never misreported.
#[must_use]
pub fn evaluate_winner(context: &CombatContext) -> Option<CombatOutcome> {
    if is_draw(&context.battlefield) {
        Some(CombatOutcome::Draw)
    } else if has_lost(&context.battlefield.player_side) {
        Some(CombatOutcome::Opponent)
    } else if has_lost(&context.battlefield.opponent_side) {
        Some(CombatOutcome::Player)
    } else {
        None
    }
}

fn start_combat(mut context: CombatContext) -> Transition {
    context.battlefield = reset_battlefield();
    context.sync_hp_from_battlefield();
    context.winner = None;
    context.selected_card = None;
    context.last_damage = None;

    let mut rng = context.rng.clone();
    rng.shuffle(&mut context.player_deck);
    rng.shuffle(&mut context.opponent_deck);
    context.rng = rng;

    for _ in 0..OPENING_HAND_SIZE {
        context.draw_card(Actor::Player);
        context.draw_card(Actor::Opponent);
    }

    Transition {
        state: CombatState::turn_of(context.current_turn),
        context,
        applied: true,
    }
}

fn enter_card_play(mut context: CombatContext, card: Card) -> Transition {
    let attacker = context.current_turn;

    // Played from hand when present; a card the hand does not hold is
    // still accepted so scripted opponents can inject plays.
    let hand = context.hand_mut(attacker);
    if let Some(pos) = hand.iter().position(|c| c.id == card.id) {
        hand.remove(pos);
    }

    context.battlefield = place_card_on_side(&context.battlefield, attacker, card.clone());
    context.selected_card = Some(card);

    Transition {
        state: CombatState::CardPlay,
        context,
        applied: true,
    }
}

fn ai_pick_and_play(mut context: CombatContext) -> Transition {
    let mut rng = context.rng.clone();
    let pick = rng.choose_index(context.opponent_hand.len());
    context.rng = rng;

    match pick {
        Some(index) => {
            let card = context.opponent_hand[index].clone();
            enter_card_play(context, card)
        }
        None => {
            // AI with an empty hand has nothing to play; stay put.
            debug!("ai has no cards to play");
            Transition {
                state: CombatState::OpponentTurn,
                context,
                applied: false,
            }
        }
    }
}

fn resolve_exchange(mut context: CombatContext) -> Transition {
    let attacker = context.current_turn;
    let defender = attacker.other();

    let Some(selected) = context.selected_card.clone() else {
        // CardPlay without a recorded card is a protocol bug upstream;
        // treat as out-of-order rather than resolving garbage.
        debug!("resolve with no selected card ignored");
        return Transition {
            state: CombatState::CardPlay,
            context,
            applied: false,
        };
    };

    let defender_stats = context
        .battlefield
        .side(defender)
        .active_card
        .as_ref()
        .map(|card| card.stats);

    let damage = calculate_damage(selected.stats, defender_stats);
    context.battlefield = apply_damage_to_side(&context.battlefield, defender, damage);
    context.sync_hp_from_battlefield();
    context.last_damage = Some(damage);

    Transition {
        state: CombatState::Resolve,
        context,
        applied: true,
    }
}

fn alternate_turn(mut context: CombatContext) -> Transition {
    let next = context.current_turn.other();
    context.current_turn = next;
    context.selected_card = None;
    context.draw_card(next);

    Transition {
        state: CombatState::turn_of(next),
        context,
        applied: true,
    }
}

fn finish_combat(mut context: CombatContext, winner: CombatOutcome) -> Transition {
    context.winner = Some(winner);

    Transition {
        state: CombatState::End,
        context,
        applied: true,
    }
}
