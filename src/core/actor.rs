//! Combat actors and terminal outcomes.
//!
//! Combat is strictly two-sided: the local player against one opponent
//! (human or the built-in AI). `Actor` names the side whose turn it is;
//! `CombatOutcome` names how a finished combat ended.

use serde::{Deserialize, Serialize};

/// One of the two sides in a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    Player,
    Opponent,
}

impl Actor {
    /// The other side.
    ///
    /// ```
    /// use cardclash_core::core::Actor;
    ///
    /// assert_eq!(Actor::Player.other(), Actor::Opponent);
    /// assert_eq!(Actor::Opponent.other(), Actor::Player);
    /// ```
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Actor::Player => Actor::Opponent,
            Actor::Opponent => Actor::Player,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Player => write!(f, "player"),
            Actor::Opponent => write!(f, "opponent"),
        }
    }
}

/// Result of a completed combat.
///
/// An undecided combat is represented as `Option::<CombatOutcome>::None`,
/// never as a variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The player won.
    Player,
    /// The opponent won.
    Opponent,
    /// Both sides fell simultaneously.
    Draw,
}

impl CombatOutcome {
    /// Check whether a given actor won.
    #[must_use]
    pub fn is_winner(self, actor: Actor) -> bool {
        match (self, actor) {
            (CombatOutcome::Player, Actor::Player) => true,
            (CombatOutcome::Opponent, Actor::Opponent) => true,
            _ => false,
        }
    }
}
