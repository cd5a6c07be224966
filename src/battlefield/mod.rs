//! Battlefield state and pure damage resolution.
//!
//! All mutators return a fresh `BattlefieldState`; see
//! [`resolve`] for the invariants.

pub mod resolve;
pub mod state;

pub use resolve::{
    apply_damage_to_side, calculate_damage, clear_battlefield, has_lost, is_draw,
    place_card_on_side, reset_battlefield,
};
pub use state::{BattlefieldSide, BattlefieldState, DEFAULT_MAX_HP};
