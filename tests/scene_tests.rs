//! Scene lifecycle integration tests.
//!
//! Exercise the manager with real scene implementations, including the
//! built-in combat scene, across instant and effect-driven transitions.

use std::cell::RefCell;
use std::rc::Rc;

use cardclash_core::bridge::{AnimationState, AnimationTrigger, AvatarIds};
use cardclash_core::combat::{CombatEvent, CombatSetup, CombatState};
use cardclash_core::core::{Card, CardCategory, CardId, CardStats, CombatOutcome};
use cardclash_core::scene::{
    CombatScene, Scene, SceneError, SceneLoadError, SceneManager, SceneTransitionConfig,
    TransitionDirection, TransitionKind, TransitionPlayer,
};

#[derive(Default)]
struct RecordingTrigger {
    calls: Vec<(String, AnimationState)>,
}

impl AnimationTrigger for RecordingTrigger {
    fn play_animation(&mut self, avatar_id: &str, state: AnimationState) {
        self.calls.push((avatar_id.to_string(), state));
    }
}

/// Effect player that records the coverage curve it was asked to render.
#[derive(Default)]
struct RecordingPlayer {
    frames: Rc<RefCell<Vec<(TransitionDirection, f64)>>>,
}

impl TransitionPlayer for RecordingPlayer {
    fn apply(
        &mut self,
        _config: &SceneTransitionConfig,
        direction: TransitionDirection,
        coverage: f64,
    ) {
        self.frames.borrow_mut().push((direction, coverage));
    }
}

struct ProbeScene {
    name: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl ProbeScene {
    fn new(name: &str, log: &Rc<RefCell<Vec<String>>>) -> Box<Self> {
        Box::new(Self {
            name: name.to_string(),
            log: Rc::clone(log),
        })
    }
}

impl Scene for ProbeScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&mut self) -> Result<(), SceneLoadError> {
        self.log.borrow_mut().push(format!("{}:load", self.name));
        Ok(())
    }

    fn enter(&mut self) {
        self.log.borrow_mut().push(format!("{}:enter", self.name));
    }

    fn exit(&mut self) {
        self.log.borrow_mut().push(format!("{}:exit", self.name));
    }

    fn cleanup(&mut self) {
        self.log.borrow_mut().push(format!("{}:cleanup", self.name));
    }
}

fn deck(base: u32, attack: i32) -> Vec<Card> {
    (base..base + 10)
        .map(|i| {
            Card::new(CardId::new(i), format!("Card {i}"), CardCategory::Machine)
                .with_stats(CardStats::new(attack, 0, 0))
        })
        .collect()
}

// =============================================================================
// Manager + Combat Scene
// =============================================================================

#[test]
fn test_manager_activates_combat_scene() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let trigger = Rc::new(RefCell::new(RecordingTrigger::default()));

    let mut manager = SceneManager::new();
    manager.register_scene(ProbeScene::new("menu", &log));
    manager.register_scene(Box::new(CombatScene::new(
        "combat",
        CombatSetup::new(deck(0, 5), deck(100, 5), 42),
        Rc::<RefCell<RecordingTrigger>>::clone(&trigger),
        AvatarIds::default(),
    )));

    manager.transition_to("menu", Some(TransitionKind::None)).unwrap();
    manager.transition_to("combat", Some(TransitionKind::None)).unwrap();

    assert_eq!(manager.active_scene(), Some("combat"));
    assert_eq!(
        *log.borrow(),
        vec!["menu:load", "menu:enter", "menu:exit", "menu:cleanup"]
    );
    // Combat started on enter; the first turn fires no cue yet.
    assert!(trigger.borrow().calls.is_empty());
}

#[test]
fn test_combat_scene_full_match_through_trigger() {
    let trigger = Rc::new(RefCell::new(RecordingTrigger::default()));
    let mut scene = CombatScene::new(
        "combat",
        CombatSetup::new(deck(0, 200), deck(100, 1), 42),
        Rc::<RefCell<RecordingTrigger>>::clone(&trigger),
        AvatarIds::default(),
    );

    scene.load().unwrap();
    scene.enter();

    for _ in 0..500 {
        let state = match scene.combat() {
            Some(service) => service.state(),
            None => break,
        };
        let event = match state {
            CombatState::PlayerTurn => {
                let played = scene.combat().unwrap().context().player_hand[0].clone();
                CombatEvent::PlayCard(played)
            }
            CombatState::OpponentTurn => CombatEvent::AiActionComplete,
            CombatState::CardPlay => CombatEvent::AnimationComplete,
            CombatState::Resolve => CombatEvent::DamageApplied,
            CombatState::CheckWin => {
                let verdict = scene.combat().unwrap().evaluate_winner();
                CombatEvent::CheckComplete(verdict)
            }
            CombatState::Idle => CombatEvent::StartCombat,
            CombatState::End => break,
        };
        scene.send_combat_event(event);
        scene.update(0.016);
    }

    let service = scene.combat().unwrap();
    assert_eq!(service.state(), CombatState::End);
    assert_eq!(service.context().winner, Some(CombatOutcome::Player));

    let trigger = trigger.borrow();
    let last_two = &trigger.calls[trigger.calls.len() - 2..];
    assert_eq!(
        last_two,
        &[
            ("player-avatar".to_string(), AnimationState::Victory),
            ("ai-avatar".to_string(), AnimationState::Defeat),
        ]
    );
}

// =============================================================================
// Effect-Driven Transitions
// =============================================================================

#[test]
fn test_fade_coverage_rises_then_falls() {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let player = RecordingPlayer {
        frames: Rc::clone(&frames),
    };
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut manager =
        SceneManager::with_player(SceneTransitionConfig::default(), Box::new(player));
    manager.register_scene(ProbeScene::new("menu", &log));

    manager.transition_to("menu", Some(TransitionKind::Fade)).unwrap();
    for _ in 0..10 {
        manager.update(0.1).unwrap();
    }
    assert!(!manager.is_transition_in_progress());

    let frames = frames.borrow();
    let out_frames: Vec<f64> = frames
        .iter()
        .filter(|(direction, _)| *direction == TransitionDirection::Out)
        .map(|(_, coverage)| *coverage)
        .collect();
    let in_frames: Vec<f64> = frames
        .iter()
        .filter(|(direction, _)| *direction == TransitionDirection::In)
        .map(|(_, coverage)| *coverage)
        .collect();

    // Out ramps coverage up to 1, In ramps it back down to 0.
    assert!(out_frames.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(out_frames.last().copied(), Some(1.0));
    assert!(in_frames.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(in_frames.last().copied(), Some(0.0));

    // The scene switch happened between the two phases.
    assert_eq!(*log.borrow(), vec!["menu:load", "menu:enter"]);
}

#[test]
fn test_single_flight_with_combat_scene() {
    let trigger = Rc::new(RefCell::new(RecordingTrigger::default()));
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut manager = SceneManager::new();
    manager.register_scene(ProbeScene::new("menu", &log));
    manager.register_scene(Box::new(CombatScene::new(
        "combat",
        CombatSetup::new(deck(0, 5), deck(100, 5), 42),
        trigger,
        AvatarIds::default(),
    )));

    manager.transition_to("menu", Some(TransitionKind::None)).unwrap();
    manager.transition_to("combat", Some(TransitionKind::Fade)).unwrap();

    let err = manager.transition_to("menu", None).unwrap_err();
    assert!(matches!(err, SceneError::TransitionInProgress));

    for _ in 0..10 {
        manager.update(0.1).unwrap();
    }
    assert_eq!(manager.active_scene(), Some("combat"));

    // Settled: a new transition is accepted again.
    manager.transition_to("menu", Some(TransitionKind::None)).unwrap();
    assert_eq!(manager.active_scene(), Some("menu"));
}

#[test]
fn test_dispose_tears_down_combat() {
    let trigger = Rc::new(RefCell::new(RecordingTrigger::default()));
    let mut manager = SceneManager::new();
    manager.register_scene(Box::new(CombatScene::new(
        "combat",
        CombatSetup::new(deck(0, 5), deck(100, 5), 42),
        trigger,
        AvatarIds::default(),
    )));

    manager.transition_to("combat", Some(TransitionKind::None)).unwrap();
    assert_eq!(manager.active_scene(), Some("combat"));

    manager.dispose();
    assert_eq!(manager.active_scene(), None);
    assert_eq!(manager.scene_count(), 0);
}
