//! Combat-animation bridge.
//!
//! Observes the combat protocol's snapshot stream and forwards animation
//! cues to an external avatar renderer behind the [`AnimationTrigger`]
//! trait. The bridge decides *which* cue fires and *when*; what a cue
//! looks like is entirely the renderer's business.
//!
//! Cue derivation is a pure function ([`cues_for_snapshot`]) so the
//! mapping can be unit-tested without a trigger; the subscription wiring
//! around it performs the side effects exactly once per transition.
//!
//! ## Failure semantics
//!
//! Missing a cue is never combat-critical. A malformed snapshot (a
//! `CardPlay` with no recorded card) is logged and skipped; nothing in
//! this module panics or propagates errors outward.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::combat::{CombatService, CombatSnapshot, CombatState, Subscription};
use crate::core::{Actor, CombatOutcome};

/// Animation cue names consumed by the external renderer.
///
/// Produced here as trigger arguments, never interpreted further by this
/// core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Attack,
    Defend,
    Damaged,
    Victory,
    Defeat,
}

/// External avatar renderer interface.
pub trait AnimationTrigger {
    fn play_animation(&mut self, avatar_id: &str, state: AnimationState);
}

/// Avatar identifiers the bridge addresses cues to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarIds {
    pub player: String,
    pub ai: String,
}

impl Default for AvatarIds {
    fn default() -> Self {
        Self {
            player: "player-avatar".to_string(),
            ai: "ai-avatar".to_string(),
        }
    }
}

/// One cue addressed to a side. Order within a snapshot's cue list is
/// significant (victory before defeat).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationCue {
    pub target: Actor,
    pub state: AnimationState,
}

/// Cue list for a snapshot, in firing order.
pub type CueList = SmallVec<[AnimationCue; 2]>;

/// Derive the cues a snapshot produces.
///
/// - `CardPlay`: the acting side attacks.
/// - `Resolve`: the side *not* acting takes the damaged cue. Cosmetic
///   only; the numeric damage is not re-validated here.
/// - `End`: winner's victory cue strictly before loser's defeat cue.
///   A draw (or an `End` without a winner) fires nothing.
#[must_use]
pub fn cues_for_snapshot(snapshot: &CombatSnapshot) -> CueList {
    let mut cues = CueList::new();
    let context = &snapshot.context;

    match snapshot.state {
        CombatState::CardPlay => {
            if context.selected_card.is_none() {
                warn!(state = ?snapshot.state, "malformed snapshot: no selected card, cue skipped");
                return cues;
            }
            cues.push(AnimationCue {
                target: context.current_turn,
                state: AnimationState::Attack,
            });
        }
        CombatState::Resolve => {
            cues.push(AnimationCue {
                target: context.current_turn.other(),
                state: AnimationState::Damaged,
            });
        }
        CombatState::End => match context.winner {
            Some(CombatOutcome::Player) => {
                cues.push(AnimationCue {
                    target: Actor::Player,
                    state: AnimationState::Victory,
                });
                cues.push(AnimationCue {
                    target: Actor::Opponent,
                    state: AnimationState::Defeat,
                });
            }
            Some(CombatOutcome::Opponent) => {
                cues.push(AnimationCue {
                    target: Actor::Player,
                    state: AnimationState::Defeat,
                });
                cues.push(AnimationCue {
                    target: Actor::Opponent,
                    state: AnimationState::Victory,
                });
            }
            Some(CombatOutcome::Draw) => {}
            None => {
                warn!("malformed snapshot: End without winner, cue skipped");
            }
        },
        _ => {}
    }

    cues
}

/// Subscribes once to a combat service and forwards cues to the trigger.
///
/// Must be detached during scene cleanup so a disposed renderer never
/// receives cues.
pub struct CombatAnimationBridge {
    subscription: Subscription,
}

impl CombatAnimationBridge {
    /// Subscribe to `service`, forwarding cues to `trigger`.
    pub fn attach(
        service: &CombatService,
        trigger: Rc<RefCell<dyn AnimationTrigger>>,
        avatars: AvatarIds,
    ) -> Self {
        let subscription = service.subscribe(Box::new(move |snapshot| {
            for cue in cues_for_snapshot(snapshot) {
                let avatar_id = match cue.target {
                    Actor::Player => avatars.player.as_str(),
                    Actor::Opponent => avatars.ai.as_str(),
                };
                trigger.borrow_mut().play_animation(avatar_id, cue.state);
            }
        }));
        Self { subscription }
    }

    /// Stop forwarding cues. Idempotent.
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }

    /// Whether the bridge is still wired to the snapshot stream.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{CombatContext, CombatSetup};
    use crate::core::{Card, CardCategory, CardId};

    fn snapshot(state: CombatState, mutate: impl FnOnce(&mut CombatContext)) -> CombatSnapshot {
        let mut context = CombatContext::new(CombatSetup::new(Vec::new(), Vec::new(), 1));
        mutate(&mut context);
        CombatSnapshot { state, context }
    }

    #[test]
    fn test_card_play_cue_follows_turn() {
        let snap = snapshot(CombatState::CardPlay, |ctx| {
            ctx.selected_card = Some(Card::new(CardId::new(1), "C", CardCategory::Beast));
            ctx.current_turn = Actor::Player;
        });
        let cues = cues_for_snapshot(&snap);
        assert_eq!(
            cues.as_slice(),
            &[AnimationCue {
                target: Actor::Player,
                state: AnimationState::Attack
            }]
        );

        let snap = snapshot(CombatState::CardPlay, |ctx| {
            ctx.selected_card = Some(Card::new(CardId::new(1), "C", CardCategory::Beast));
            ctx.current_turn = Actor::Opponent;
        });
        assert_eq!(cues_for_snapshot(&snap)[0].target, Actor::Opponent);
    }

    #[test]
    fn test_malformed_card_play_is_skipped() {
        let snap = snapshot(CombatState::CardPlay, |ctx| {
            ctx.selected_card = None;
        });
        assert!(cues_for_snapshot(&snap).is_empty());
    }

    #[test]
    fn test_resolve_damages_the_struck_side() {
        let snap = snapshot(CombatState::Resolve, |ctx| {
            ctx.current_turn = Actor::Player;
        });
        assert_eq!(
            cues_for_snapshot(&snap).as_slice(),
            &[AnimationCue {
                target: Actor::Opponent,
                state: AnimationState::Damaged
            }]
        );
    }

    #[test]
    fn test_end_cue_order_player_win() {
        let snap = snapshot(CombatState::End, |ctx| {
            ctx.winner = Some(CombatOutcome::Player);
        });
        let cues = cues_for_snapshot(&snap);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].state, AnimationState::Victory);
        assert_eq!(cues[0].target, Actor::Player);
        assert_eq!(cues[1].state, AnimationState::Defeat);
        assert_eq!(cues[1].target, Actor::Opponent);
    }

    #[test]
    fn test_end_cue_order_opponent_win() {
        let snap = snapshot(CombatState::End, |ctx| {
            ctx.winner = Some(CombatOutcome::Opponent);
        });
        let cues = cues_for_snapshot(&snap);
        assert_eq!(cues[0].state, AnimationState::Defeat);
        assert_eq!(cues[0].target, Actor::Player);
        assert_eq!(cues[1].state, AnimationState::Victory);
        assert_eq!(cues[1].target, Actor::Opponent);
    }

    #[test]
    fn test_draw_and_missing_winner_fire_nothing() {
        let snap = snapshot(CombatState::End, |ctx| {
            ctx.winner = Some(CombatOutcome::Draw);
        });
        assert!(cues_for_snapshot(&snap).is_empty());

        let snap = snapshot(CombatState::End, |ctx| {
            ctx.winner = None;
        });
        assert!(cues_for_snapshot(&snap).is_empty());
    }

    #[test]
    fn test_turn_states_fire_nothing() {
        for state in [
            CombatState::Idle,
            CombatState::PlayerTurn,
            CombatState::OpponentTurn,
            CombatState::CheckWin,
        ] {
            assert!(cues_for_snapshot(&snapshot(state, |_| {})).is_empty());
        }
    }
}
