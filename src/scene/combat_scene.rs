//! The built-in combat scene.
//!
//! Owns the two notions of time the core must reconcile: one
//! [`FrameScheduler`] for continuous per-frame work (camera easing,
//! animation playback) and one [`CombatService`] for discrete turn
//! events. The scheduler is started on `enter` and stopped on
//! `cleanup`; pausing it suspends only the continuous work, combat
//! events stay available throughout.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::bridge::{AnimationTrigger, AvatarIds, CombatAnimationBridge};
use crate::combat::{CombatEvent, CombatService, CombatSetup};
use crate::scheduler::{FrameScheduler, FrameSchedulerConfig};

use super::manager::{Scene, SceneLoadError};

/// Continuous visual state advanced by the scheduler's tick callback.
///
/// Deliberately blind to combat semantics: it only knows elapsed time
/// and an easing factor the renderer reads for camera settle-in.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombatVisualState {
    /// Seconds of (unpaused) scene time.
    pub elapsed_seconds: f64,

    /// Camera settle factor easing toward 1.0.
    pub camera_ease: f64,
}

impl CombatVisualState {
    /// Advance by one frame delta.
    fn advance(&mut self, delta_seconds: f64) {
        self.elapsed_seconds += delta_seconds;
        // Exponential-style settle: proportional approach, stable for
        // any bounded delta.
        self.camera_ease += (1.0 - self.camera_ease) * (delta_seconds * 4.0).min(1.0);
    }
}

/// Combat screen implementing the [`Scene`] contract.
pub struct CombatScene {
    name: String,
    setup: CombatSetup,
    trigger: Rc<RefCell<dyn AnimationTrigger>>,
    avatars: AvatarIds,
    scheduler: FrameScheduler,
    visual: Rc<RefCell<CombatVisualState>>,
    service: Option<CombatService>,
    bridge: Option<CombatAnimationBridge>,
}

impl CombatScene {
    /// Create the scene. The combat protocol instance itself is built
    /// fresh on every `load`, never reused across activations.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        setup: CombatSetup,
        trigger: Rc<RefCell<dyn AnimationTrigger>>,
        avatars: AvatarIds,
    ) -> Self {
        let visual = Rc::new(RefCell::new(CombatVisualState::default()));
        let tick_state = Rc::clone(&visual);
        let scheduler = FrameScheduler::new(FrameSchedulerConfig::new(move |delta| {
            tick_state.borrow_mut().advance(delta);
        }));

        Self {
            name: name.into(),
            setup,
            trigger,
            avatars,
            scheduler,
            visual,
            service: None,
            bridge: None,
        }
    }

    /// Send a combat event into the owned protocol instance.
    ///
    /// Available even while the scheduler is paused; discrete events do
    /// not ride the frame clock. Returns false when no combat is loaded
    /// or the event was ignored as out-of-order.
    pub fn send_combat_event(&mut self, event: CombatEvent) -> bool {
        match self.service.as_mut() {
            Some(service) => service.send(event),
            None => false,
        }
    }

    /// The owned combat service, while loaded.
    #[must_use]
    pub fn combat(&self) -> Option<&CombatService> {
        self.service.as_ref()
    }

    /// Current continuous visual state.
    #[must_use]
    pub fn visual_state(&self) -> CombatVisualState {
        *self.visual.borrow()
    }

    /// The owned frame scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Suspend continuous per-frame work. Combat events keep flowing.
    pub fn pause_visuals(&mut self) {
        self.scheduler.pause();
    }

    /// Resume continuous per-frame work.
    pub fn resume_visuals(&mut self) {
        self.scheduler.resume();
    }
}

impl Scene for CombatScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> Result<(), SceneLoadError> {
        let service = CombatService::new(self.setup.clone());
        let bridge = CombatAnimationBridge::attach(
            &service,
            Rc::clone(&self.trigger),
            self.avatars.clone(),
        );
        self.service = Some(service);
        self.bridge = Some(bridge);
        *self.visual.borrow_mut() = CombatVisualState::default();
        Ok(())
    }

    fn enter(&mut self) {
        self.scheduler.start();
        if let Some(service) = self.service.as_mut() {
            service.send(CombatEvent::StartCombat);
        }
        info!(scene = %self.name, "combat started");
    }

    fn exit(&mut self) {
        self.scheduler.pause();
    }

    fn update(&mut self, _delta_seconds: f64) {
        // The scheduler re-times the frame itself so its pause/resume
        // stays independent of the host loop's delta.
        self.scheduler.tick();
    }

    fn cleanup(&mut self) {
        self.scheduler.stop();
        if let Some(bridge) = self.bridge.take() {
            bridge.detach();
        }
        if let Some(service) = self.service.take() {
            info!(
                scene = %self.name,
                final_state = ?service.state(),
                snapshots = service.history().len(),
                "combat disposed"
            );
        }
    }
}
