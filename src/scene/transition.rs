//! Scene transition effects.
//!
//! Effects are cosmetic: the manager computes pure progress values and
//! hands them to a [`TransitionPlayer`] collaborator; what a fade or
//! wipe looks like on screen is the player's business. The default
//! player does nothing, which is the correct behavior for headless
//! hosts and tests.

use serde::{Deserialize, Serialize};

/// Visual style of a scene transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    Fade,
    Wipe,
    None,
}

/// Direction of the effect relative to the scene switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionDirection {
    /// Covering the outgoing scene.
    Out,
    /// Revealing the incoming scene.
    In,
}

/// Caller-supplied transition configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneTransitionConfig {
    pub kind: TransitionKind,

    /// Effect duration in seconds, per direction. Must be positive for
    /// a visible effect; zero completes the switch immediately.
    pub duration_seconds: f64,

    /// Opaque target reference for the player (a selector, a layer
    /// name); never interpreted by this core.
    pub container: String,
}

impl Default for SceneTransitionConfig {
    fn default() -> Self {
        Self {
            kind: TransitionKind::Fade,
            duration_seconds: 0.4,
            container: "#scene-root".to_string(),
        }
    }
}

impl TransitionKind {
    /// Overlay coverage in `[0, 1]` for a given progress.
    ///
    /// `Out` ramps coverage up to fully hide the old scene; `In` ramps
    /// it back down to reveal the new one. `None` never covers.
    #[must_use]
    pub fn coverage(self, direction: TransitionDirection, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        match (self, direction) {
            (TransitionKind::None, _) => 0.0,
            (_, TransitionDirection::Out) => progress,
            (_, TransitionDirection::In) => 1.0 - progress,
        }
    }
}

/// Fraction of an effect completed after `elapsed` seconds.
///
/// Saturates at 1.0; a non-positive duration is treated as already
/// complete.
#[must_use]
pub fn progress(elapsed_seconds: f64, duration_seconds: f64) -> f64 {
    if duration_seconds <= 0.0 {
        return 1.0;
    }
    (elapsed_seconds / duration_seconds).clamp(0.0, 1.0)
}

/// External effect renderer driven by the scene manager.
pub trait TransitionPlayer {
    /// Called every frame an effect is active with the current coverage.
    fn apply(&mut self, config: &SceneTransitionConfig, direction: TransitionDirection, coverage: f64);
}

/// Player that renders nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTransitionPlayer;

impl TransitionPlayer for NoopTransitionPlayer {
    fn apply(
        &mut self,
        _config: &SceneTransitionConfig,
        _direction: TransitionDirection,
        _coverage: f64,
    ) {
    }
}
