//! Combat service: the protocol's public subscription surface.
//!
//! Wraps the pure transition function with owned `(state, context)` and a
//! snapshot stream. After every processed event the service emits an
//! immutable [`CombatSnapshot`] to all subscribers and appends it to a
//! persistent history (`im::Vector`, O(1) clone) so whole combats can be
//! captured and replayed in tests.
//!
//! Scheduling is single-threaded cooperative; subscribers are plain
//! `FnMut` callbacks invoked synchronously during `send`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::CombatOutcome;

use super::context::{CombatContext, CombatSetup};
use super::machine::{evaluate_winner, transition, CombatEvent, CombatState};

/// Immutable `(state, context)` pair emitted after each processed event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub state: CombatState,
    pub context: CombatContext,
}

/// Subscriber callback. Receives every snapshot the service emits.
pub type SnapshotCallback = Box<dyn FnMut(&CombatSnapshot)>;

struct Subscriber {
    active: Rc<Cell<bool>>,
    callback: SnapshotCallback,
}

/// Handle returned by [`CombatService::subscribe`].
///
/// `unsubscribe` is idempotent and safe to call from inside a snapshot
/// callback; the entry is tombstoned and pruned on the next `send`.
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Stop receiving snapshots. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        self.active.set(false);
    }

    /// Whether this subscription still delivers snapshots.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Owns the combat state machine and fans transitions out to subscribers.
pub struct CombatService {
    state: CombatState,
    context: CombatContext,
    subscribers: RefCell<Vec<Subscriber>>,
    history: Vector<CombatSnapshot>,
}

impl CombatService {
    /// Create a service in `Idle` with the given setup.
    #[must_use]
    pub fn new(setup: CombatSetup) -> Self {
        Self {
            state: CombatState::Idle,
            context: CombatContext::new(setup),
            subscribers: RefCell::new(Vec::new()),
            history: Vector::new(),
        }
    }

    /// Current protocol state.
    #[must_use]
    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Current combat context.
    #[must_use]
    pub fn context(&self) -> &CombatContext {
        &self.context
    }

    /// Every snapshot emitted so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<CombatSnapshot> {
        &self.history
    }

    /// Register a snapshot callback.
    pub fn subscribe(&self, callback: SnapshotCallback) -> Subscription {
        let active = Rc::new(Cell::new(true));
        self.subscribers.borrow_mut().push(Subscriber {
            active: Rc::clone(&active),
            callback,
        });
        Subscription { active }
    }

    /// Process one event.
    ///
    /// Returns true when the event caused a transition. Ignored events
    /// emit no snapshot; the protocol treats them as no-ops.
    pub fn send(&mut self, event: CombatEvent) -> bool {
        self.subscribers
            .borrow_mut()
            .retain(|sub| sub.active.get());

        let result = transition(self.state, self.context.clone(), event);
        if !result.applied {
            return false;
        }

        self.state = result.state;
        self.context = result.context;

        let snapshot = CombatSnapshot {
            state: self.state,
            context: self.context.clone(),
        };
        self.history.push_back(snapshot.clone());

        for sub in self.subscribers.borrow_mut().iter_mut() {
            if sub.active.get() {
                (sub.callback)(&snapshot);
            }
        }
        true
    }

    /// Run the `CheckWin` predicate over the current context.
    ///
    /// The caller feeds the verdict back via
    /// `CombatEvent::CheckComplete`, keeping the machine pure.
    #[must_use]
    pub fn evaluate_winner(&self) -> Option<CombatOutcome> {
        evaluate_winner(&self.context)
    }
}
