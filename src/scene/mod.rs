//! Scene lifecycle: registration, transitions, and the combat screen.
//!
//! The manager owns scene instances and drives the load/enter/exit/
//! cleanup contract; transition effects are pure progress math handed to
//! an external player. [`CombatScene`] is the built-in screen that wires
//! the scheduler, protocol, and bridge together.

pub mod combat_scene;
pub mod manager;
pub mod transition;

pub use combat_scene::{CombatScene, CombatVisualState};
pub use manager::{Scene, SceneError, SceneLoadError, SceneManager};
pub use transition::{
    progress, NoopTransitionPlayer, SceneTransitionConfig, TransitionDirection, TransitionKind,
    TransitionPlayer,
};
