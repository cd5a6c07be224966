//! Battlefield snapshot types.
//!
//! A `BattlefieldState` is an immutable value: every mutator in
//! [`crate::battlefield::resolve`] returns a fresh state and leaves its
//! input untouched. That keeps combat resolution pure and trivially
//! replayable from recorded snapshots.

use serde::{Deserialize, Serialize};

use crate::core::{Actor, Card};

/// Starting and maximum HP for a fresh battlefield side.
pub const DEFAULT_MAX_HP: i32 = 100;

/// One side of the battlefield: the card currently in play and the HP pool.
///
/// Damage functions only enforce the floor at 0; there is no heal
/// operation, so `hp > max_hp` cannot arise through this module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldSide {
    /// Card currently in play, if any.
    pub active_card: Option<Card>,

    /// Current hit points. Never negative.
    pub hp: i32,

    /// Maximum hit points. Always positive.
    pub max_hp: i32,
}

impl BattlefieldSide {
    /// Create a fresh side at full HP with no card in play.
    #[must_use]
    pub fn new(max_hp: i32) -> Self {
        debug_assert!(max_hp > 0, "max_hp must be positive");
        Self {
            active_card: None,
            hp: max_hp,
            max_hp,
        }
    }
}

impl Default for BattlefieldSide {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HP)
    }
}

/// Complete battlefield snapshot: both sides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattlefieldState {
    pub player_side: BattlefieldSide,
    pub opponent_side: BattlefieldSide,
}

impl BattlefieldState {
    /// Borrow the side belonging to an actor.
    #[must_use]
    pub fn side(&self, actor: Actor) -> &BattlefieldSide {
        match actor {
            Actor::Player => &self.player_side,
            Actor::Opponent => &self.opponent_side,
        }
    }

    /// Copy this state with one side replaced.
    ///
    /// The other side is structurally preserved.
    #[must_use]
    pub fn with_side(&self, actor: Actor, side: BattlefieldSide) -> Self {
        match actor {
            Actor::Player => Self {
                player_side: side,
                opponent_side: self.opponent_side.clone(),
            },
            Actor::Opponent => Self {
                player_side: self.player_side.clone(),
                opponent_side: side,
            },
        }
    }
}
