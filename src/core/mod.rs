//! Core types: cards, actors, outcomes, deterministic RNG.
//!
//! These are the value types every other module builds on. Nothing here
//! performs resolution or drives time; that lives in `battlefield`,
//! `combat`, and `scheduler`.

pub mod actor;
pub mod card;
pub mod rng;

pub use actor::{Actor, CombatOutcome};
pub use card::{Card, CardCategory, CardId, CardRarity, CardStats};
pub use rng::{CombatRng, CombatRngState};
