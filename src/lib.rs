//! # cardclash-core
//!
//! Orchestration core for a turn-based card-combat game: frame
//! scheduling, battlefield resolution, the combat protocol, the
//! combat-animation bridge, and scene lifecycle management.
//!
//! ## Design Principles
//!
//! 1. **Two clocks, never mixed**: continuous per-frame time flows
//!    through the `scheduler`; discrete combat turns flow through the
//!    `combat` protocol. Neither drives the other.
//!
//! 2. **Pure cores, thin shells**: damage math, protocol transitions,
//!    cue derivation, and transition progress are pure functions; the
//!    stateful wrappers around them only own data and fan out callbacks.
//!
//! 3. **Determinism**: a `CombatSetup` (decks plus seed) replays the
//!    identical combat. All randomness goes through the seeded
//!    [`CombatRng`].
//!
//! 4. **Renderer-agnostic**: animation, transition effects, and frame
//!    sources sit behind traits ([`AnimationTrigger`],
//!    [`TransitionPlayer`], the timestamp-explicit scheduler methods);
//!    the core never touches a display.
//!
//! ## Modules
//!
//! - `core`: cards, actors, outcomes, deterministic RNG
//! - `battlefield`: battlefield state and pure damage resolution
//! - `combat`: the turn protocol state machine and its service wrapper
//! - `bridge`: combat-snapshot to animation-cue mapping
//! - `scheduler`: per-frame driver, metrics, and pacing helpers
//! - `scene`: scene registry, transitions, and the combat screen

pub mod battlefield;
pub mod bridge;
pub mod combat;
pub mod core;
pub mod scene;
pub mod scheduler;

// Re-export commonly used types
pub use crate::core::{
    Actor, Card, CardCategory, CardId, CardRarity, CardStats, CombatOutcome, CombatRng,
    CombatRngState,
};

pub use crate::battlefield::{
    apply_damage_to_side, calculate_damage, BattlefieldSide, BattlefieldState, DEFAULT_MAX_HP,
};

pub use crate::combat::{
    transition, CombatContext, CombatEvent, CombatService, CombatSetup, CombatSnapshot,
    CombatState, Subscription, OPENING_HAND_SIZE,
};

pub use crate::bridge::{
    cues_for_snapshot, AnimationCue, AnimationState, AnimationTrigger, AvatarIds,
    CombatAnimationBridge, CueList,
};

pub use crate::scheduler::{
    Clock, FrameMetrics, FrameScheduler, FrameSchedulerConfig, MonotonicClock,
    FRAME_SAMPLE_WINDOW, MAX_DELTA_SECONDS,
};

pub use crate::scene::{
    CombatScene, NoopTransitionPlayer, Scene, SceneError, SceneLoadError, SceneManager,
    SceneTransitionConfig, TransitionDirection, TransitionKind, TransitionPlayer,
};
