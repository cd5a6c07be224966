//! Scene lifecycle manager.
//!
//! Registers named scenes and orchestrates transitions between them with
//! single-flight mutual exclusion: at most one transition is ever in
//! flight, and overlapping requests are rejected rather than queued.
//! Interleaving `exit`/`cleanup`/`load`/`enter` across two scenes would
//! corrupt renderer and audio state owned by those scenes.
//!
//! The ordered protocol for a transition is:
//!
//! ```text
//! exit(current) -> play out effect -> cleanup(current)
//!   -> load(next) -> current = next -> enter(next) -> play in effect
//! ```
//!
//! Effects are time-based, so a transition with a visible effect spans
//! multiple [`SceneManager::update`] calls; the in-flight flag stays set
//! until the in effect finishes. With `TransitionKind::None` (or a zero
//! duration) the whole sequence completes inside `transition_to` and a
//! `load` failure surfaces there; otherwise it surfaces from the
//! `update` call that performs the load. On every path the in-flight
//! flag is cleared before the error propagates.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{info, warn};

use super::transition::{
    progress, NoopTransitionPlayer, SceneTransitionConfig, TransitionDirection, TransitionKind,
    TransitionPlayer,
};

/// Error type scene `load` implementations return.
pub type SceneLoadError = Box<dyn std::error::Error + Send + Sync>;

/// Lifecycle contract implemented by out-of-scope screens.
///
/// The registry holds at most one active instance at a time; hooks are
/// always invoked in the order documented on [`SceneManager`].
pub trait Scene {
    /// Registry key. Must be stable for the life of the handle.
    fn name(&self) -> &str;

    /// Acquire resources. Called once per activation, before `enter`.
    fn load(&mut self) -> Result<(), SceneLoadError> {
        Ok(())
    }

    /// The scene became active.
    fn enter(&mut self) {}

    /// The scene is about to be deactivated.
    fn exit(&mut self) {}

    /// Per-frame update with the bounded delta in seconds.
    fn update(&mut self, delta_seconds: f64) {
        let _ = delta_seconds;
    }

    /// Release resources. Called after `exit`, never while active.
    fn cleanup(&mut self) {}
}

/// Scene management errors.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A transition is already in flight; overlapping requests are
    /// rejected, not queued.
    #[error("a scene transition is already in progress")]
    TransitionInProgress,

    /// No scene registered under this name.
    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    /// The active scene cannot be unregistered; transition away first.
    #[error("scene '{0}' is active and cannot be unregistered")]
    ActiveSceneInUse(String),

    /// The incoming scene's `load` failed. The in-flight flag has
    /// already been released when this propagates.
    #[error("failed to load scene '{scene}'")]
    LoadFailed {
        scene: String,
        #[source]
        source: SceneLoadError,
    },
}

enum TransitionPhase {
    Out,
    In,
}

struct PendingTransition {
    target: String,
    config: SceneTransitionConfig,
    phase: TransitionPhase,
    elapsed_seconds: f64,
}

/// Registry of named scenes plus the single-flight transition driver.
///
/// Held and passed by the owning top-level controller; never ambient
/// global state.
pub struct SceneManager {
    scenes: FxHashMap<String, Box<dyn Scene>>,
    active: Option<String>,
    pending: Option<PendingTransition>,
    default_config: SceneTransitionConfig,
    player: Box<dyn TransitionPlayer>,
}

impl SceneManager {
    /// Manager with the default transition config and a no-op effect
    /// player.
    #[must_use]
    pub fn new() -> Self {
        Self::with_player(SceneTransitionConfig::default(), Box::new(NoopTransitionPlayer))
    }

    /// Manager with an explicit effect player (the external renderer's
    /// overlay hook).
    #[must_use]
    pub fn with_player(
        default_config: SceneTransitionConfig,
        player: Box<dyn TransitionPlayer>,
    ) -> Self {
        Self {
            scenes: FxHashMap::default(),
            active: None,
            pending: None,
            default_config,
            player,
        }
    }

    /// Register a scene under its own name.
    ///
    /// Re-registering a name replaces the previous handle.
    pub fn register_scene(&mut self, scene: Box<dyn Scene>) {
        let name = scene.name().to_string();
        if self.scenes.insert(name.clone(), scene).is_some() {
            warn!(scene = %name, "scene re-registered, previous handle replaced");
        }
    }

    /// Remove a scene from the registry.
    ///
    /// Unregistering the active scene is a logic bug and errors;
    /// transition away first. Unknown names are ignored.
    pub fn unregister_scene(&mut self, name: &str) -> Result<(), SceneError> {
        if self.active.as_deref() == Some(name) {
            return Err(SceneError::ActiveSceneInUse(name.to_string()));
        }
        self.scenes.remove(name);
        Ok(())
    }

    /// Begin a transition to `name`, optionally overriding the default
    /// effect.
    ///
    /// Errors if a transition is already in flight or the name is
    /// unregistered. A request for the already-active scene is a silent
    /// no-op. See the module docs for when a `load` failure surfaces.
    pub fn transition_to(
        &mut self,
        name: &str,
        kind: Option<TransitionKind>,
    ) -> Result<(), SceneError> {
        if self.pending.is_some() {
            return Err(SceneError::TransitionInProgress);
        }
        if !self.scenes.contains_key(name) {
            return Err(SceneError::UnknownScene(name.to_string()));
        }
        if self.active.as_deref() == Some(name) {
            return Ok(());
        }

        let mut config = self.default_config.clone();
        if let Some(kind) = kind {
            config.kind = kind;
        }

        info!(
            from = self.active.as_deref().unwrap_or("<none>"),
            to = %name,
            kind = ?config.kind,
            "scene transition started"
        );

        if let Some(current) = self.active.as_deref() {
            if let Some(scene) = self.scenes.get_mut(current) {
                scene.exit();
            }
        }

        if config.kind == TransitionKind::None || config.duration_seconds <= 0.0 {
            // No visible effect: run the rest of the sequence inline.
            // The flag is only set across the fallible part so it is
            // released on both the success and the error path.
            self.pending = Some(PendingTransition {
                target: name.to_string(),
                config,
                phase: TransitionPhase::In,
                elapsed_seconds: 0.0,
            });
            let result = self.complete_switch();
            self.pending = None;
            return result;
        }

        self.pending = Some(PendingTransition {
            target: name.to_string(),
            config,
            phase: TransitionPhase::Out,
            elapsed_seconds: 0.0,
        });
        Ok(())
    }

    /// Advance the in-flight transition, or forward the delta to the
    /// active scene when none is in flight.
    ///
    /// Silently does nothing with no active scene and no transition.
    pub fn update(&mut self, delta_seconds: f64) -> Result<(), SceneError> {
        if self.pending.is_some() {
            return self.advance_transition(delta_seconds);
        }

        if let Some(active) = self.active.as_deref() {
            let name = active.to_string();
            if let Some(scene) = self.scenes.get_mut(&name) {
                scene.update(delta_seconds);
            }
        }
        Ok(())
    }

    /// Force `exit` + `cleanup` on the active scene and empty the
    /// registry.
    pub fn dispose(&mut self) {
        self.pending = None;
        if let Some(active) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&active) {
                scene.exit();
                scene.cleanup();
            }
            info!(scene = %active, "active scene disposed");
        }
        self.scenes.clear();
    }

    /// Whether a transition is currently in flight.
    #[must_use]
    pub fn is_transition_in_progress(&self) -> bool {
        self.pending.is_some()
    }

    /// Name of the active scene, if any.
    #[must_use]
    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether a name is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Number of registered scenes.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    fn advance_transition(&mut self, delta_seconds: f64) -> Result<(), SceneError> {
        let Some(pending) = self.pending.as_mut() else {
            return Ok(());
        };

        pending.elapsed_seconds += delta_seconds.max(0.0);
        let fraction = progress(pending.elapsed_seconds, pending.config.duration_seconds);
        let direction = match pending.phase {
            TransitionPhase::Out => TransitionDirection::Out,
            TransitionPhase::In => TransitionDirection::In,
        };
        let coverage = pending.config.kind.coverage(direction, fraction);
        self.player.apply(&pending.config, direction, coverage);

        if fraction < 1.0 {
            return Ok(());
        }

        match direction {
            TransitionDirection::Out => {
                // Out effect finished: swap the scenes underneath it.
                if let Some(pending) = self.pending.as_mut() {
                    pending.phase = TransitionPhase::In;
                    pending.elapsed_seconds = 0.0;
                }
                let result = self.complete_switch();
                if result.is_err() {
                    self.pending = None;
                }
                result
            }
            TransitionDirection::In => {
                let target = self
                    .pending
                    .take()
                    .map(|pending| pending.target)
                    .unwrap_or_default();
                info!(scene = %target, "scene transition finished");
                Ok(())
            }
        }
    }

    /// Cleanup the outgoing scene, load the incoming one, and enter it.
    fn complete_switch(&mut self) -> Result<(), SceneError> {
        let target = match self.pending.as_ref() {
            Some(pending) => pending.target.clone(),
            None => return Ok(()),
        };

        if let Some(current) = self.active.take() {
            if let Some(scene) = self.scenes.get_mut(&current) {
                scene.cleanup();
            }
        }

        let scene = self
            .scenes
            .get_mut(&target)
            .ok_or_else(|| SceneError::UnknownScene(target.clone()))?;
        scene.load().map_err(|source| {
            warn!(scene = %target, error = %source, "scene load failed");
            SceneError::LoadFailed {
                scene: target.clone(),
                source,
            }
        })?;

        self.active = Some(target.clone());
        if let Some(scene) = self.scenes.get_mut(&target) {
            scene.enter();
        }
        Ok(())
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
