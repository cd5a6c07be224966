//! Combat context: everything the protocol owns while a combat runs.
//!
//! Created fresh when the protocol starts, mutated only through protocol
//! transitions, discarded when the owning scene is cleaned up. Once a
//! winner is recorded the context is frozen; the terminal state accepts
//! no further events.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::battlefield::{reset_battlefield, BattlefieldState, DEFAULT_MAX_HP};
use crate::core::{Actor, Card, CombatOutcome, CombatRng};

/// Cards dealt to each hand at `StartCombat`.
pub const OPENING_HAND_SIZE: usize = 4;

/// Hands stay small; inline storage avoids a heap hit per clone in the
/// common case.
pub type Hand = SmallVec<[Card; 8]>;

/// Deck lists and seed used to build a fresh context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatSetup {
    pub player_deck: Vec<Card>,
    pub opponent_deck: Vec<Card>,
    /// RNG seed; the same setup replays the identical combat.
    pub seed: u64,
    /// Side that acts first.
    pub first_turn: Actor,
}

impl CombatSetup {
    /// Create a setup with the player acting first.
    #[must_use]
    pub fn new(player_deck: Vec<Card>, opponent_deck: Vec<Card>, seed: u64) -> Self {
        Self {
            player_deck,
            opponent_deck,
            seed,
            first_turn: Actor::Player,
        }
    }

    /// Set which side acts first (builder pattern).
    #[must_use]
    pub fn with_first_turn(mut self, first_turn: Actor) -> Self {
        self.first_turn = first_turn;
        self
    }
}

/// Mutable combat state owned by the protocol.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatContext {
    /// Player HP, mirrored from the battlefield after each resolve.
    pub player_hp: i32,

    /// Opponent HP, mirrored from the battlefield after each resolve.
    pub opponent_hp: i32,

    /// Side whose action slot it is.
    pub current_turn: Actor,

    /// Card recorded on entering `CardPlay`, cleared when the turn
    /// alternates.
    pub selected_card: Option<Card>,

    /// Damage dealt by the most recent resolve. Cosmetic consumers (cue
    /// timing, UI) read this; it is the defense-reduced figure from
    /// `calculate_damage`, the single source of truth.
    pub last_damage: Option<i32>,

    pub player_hand: Hand,
    pub opponent_hand: Hand,

    /// Draw piles, top of deck at the end.
    pub player_deck: Vec<Card>,
    pub opponent_deck: Vec<Card>,

    /// Battlefield snapshot the resolve step reads and writes.
    pub battlefield: BattlefieldState,

    /// Terminal result, `None` while combat is undecided.
    pub winner: Option<CombatOutcome>,

    /// Deterministic RNG for shuffling and the built-in AI.
    pub rng: CombatRng,
}

impl CombatContext {
    /// Build the pre-combat context: decks loaded but unshuffled, hands
    /// empty. `StartCombat` shuffles and deals.
    #[must_use]
    pub fn new(setup: CombatSetup) -> Self {
        Self {
            player_hp: DEFAULT_MAX_HP,
            opponent_hp: DEFAULT_MAX_HP,
            current_turn: setup.first_turn,
            selected_card: None,
            last_damage: None,
            player_hand: Hand::new(),
            opponent_hand: Hand::new(),
            player_deck: setup.player_deck,
            opponent_deck: setup.opponent_deck,
            battlefield: reset_battlefield(),
            winner: None,
            rng: CombatRng::new(setup.seed),
        }
    }

    /// Borrow an actor's hand.
    #[must_use]
    pub fn hand(&self, actor: Actor) -> &Hand {
        match actor {
            Actor::Player => &self.player_hand,
            Actor::Opponent => &self.opponent_hand,
        }
    }

    /// Mutably borrow an actor's hand.
    pub fn hand_mut(&mut self, actor: Actor) -> &mut Hand {
        match actor {
            Actor::Player => &mut self.player_hand,
            Actor::Opponent => &mut self.opponent_hand,
        }
    }

    /// Borrow an actor's deck.
    #[must_use]
    pub fn deck(&self, actor: Actor) -> &[Card] {
        match actor {
            Actor::Player => &self.player_deck,
            Actor::Opponent => &self.opponent_deck,
        }
    }

    /// HP of an actor as mirrored in this context.
    #[must_use]
    pub fn hp(&self, actor: Actor) -> i32 {
        match actor {
            Actor::Player => self.player_hp,
            Actor::Opponent => self.opponent_hp,
        }
    }

    /// Draw one card from an actor's deck into their hand.
    ///
    /// No-op on an empty deck; running out of cards is not a loss
    /// condition here.
    pub fn draw_card(&mut self, actor: Actor) -> Option<&Card> {
        let card = match actor {
            Actor::Player => self.player_deck.pop(),
            Actor::Opponent => self.opponent_deck.pop(),
        }?;
        let hand = self.hand_mut(actor);
        hand.push(card);
        hand.last()
    }

    /// Mirror the battlefield HP pools into the flat HP fields.
    pub fn sync_hp_from_battlefield(&mut self) {
        self.player_hp = self.battlefield.player_side.hp;
        self.opponent_hp = self.battlefield.opponent_side.hp;
    }
}
