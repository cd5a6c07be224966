//! Card value type - immutable combat card data.
//!
//! A `Card` carries everything the combat protocol needs to resolve an
//! exchange: identity, display name, classification tags, and the stat
//! block. Artwork is an opaque reference for the out-of-scope renderer;
//! this core never loads or interprets it.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Broad gameplay classification of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Beast,
    Machine,
    Elemental,
    Spirit,
}

/// Scarcity tag. Cosmetic to this core; rarity never affects resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Stat block used by battlefield resolution.
///
/// `attack` and `defense` feed `calculate_damage`; `speed` is carried for
/// collaborators (turn-order UI, animation timing) and is not read by the
/// resolution functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStats {
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl CardStats {
    /// Create a new stat block.
    #[must_use]
    pub const fn new(attack: i32, defense: i32, speed: i32) -> Self {
        Self {
            attack,
            defense,
            speed,
        }
    }
}

/// Immutable card definition.
///
/// ## Example
///
/// ```
/// use cardclash_core::core::{Card, CardCategory, CardId, CardRarity, CardStats};
///
/// let card = Card::new(CardId::new(7), "Cinder Drake", CardCategory::Elemental)
///     .with_rarity(CardRarity::Rare)
///     .with_stats(CardStats::new(12, 6, 4));
///
/// assert_eq!(card.stats.attack, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Display name (for UI/debugging).
    pub name: String,

    /// Gameplay category tag.
    pub category: CardCategory,

    /// Scarcity tag.
    pub rarity: CardRarity,

    /// Stat block.
    pub stats: CardStats,

    /// Opaque artwork reference for the external renderer.
    pub artwork: Option<String>,
}

impl Card {
    /// Create a new card with default stats and common rarity.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            rarity: CardRarity::Common,
            stats: CardStats::default(),
            artwork: None,
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Set the stat block (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: CardStats) -> Self {
        self.stats = stats;
        self
    }

    /// Set the artwork reference (builder pattern).
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }
}
