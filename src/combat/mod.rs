//! The turn-based combat protocol.
//!
//! - [`machine`]: tagged-union states and the pure transition function.
//! - [`context`]: the mutable state a combat owns.
//! - [`service`]: subscription surface consumed by the animation bridge.

pub mod context;
pub mod machine;
pub mod service;

pub use context::{CombatContext, CombatSetup, Hand, OPENING_HAND_SIZE};
pub use machine::{evaluate_winner, transition, CombatEvent, CombatState, Transition};
pub use service::{CombatService, CombatSnapshot, SnapshotCallback, Subscription};
