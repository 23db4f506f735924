//! Card instances - runtime card state.
//!
//! `CardInstance` is one dealt copy of a definition. It owns a copy of the
//! definition (decks deal one copy per definition, and views ship the full
//! card data) plus the two mutable fields the effect system writes:
//! `current_power`, recomputed from scratch on every full pass, and
//! `stacked_bonus`, the only accumulation that survives a recomputation.
//!
//! An instance is owned by exactly one zone (deck, hand, field slot, or
//! discard pile) at any time; moving a card between zones moves the value.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardType};

/// Unique identifier for a card instance within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create a new instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// One dealt copy of a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique within the session.
    pub instance_id: InstanceId,

    /// This copy's definition.
    pub definition: CardDefinition,

    /// Power after the most recent recomputation pass.
    pub current_power: i32,

    /// Permanent, cumulative bonus from stacking event-triggered effects.
    /// Re-added (when positive) on every recomputation pass.
    pub stacked_bonus: i32,
}

impl CardInstance {
    /// Deal a fresh copy of a definition.
    #[must_use]
    pub fn new(instance_id: InstanceId, definition: CardDefinition) -> Self {
        let current_power = definition.base_power;
        Self {
            instance_id,
            definition,
            current_power,
            stacked_bonus: 0,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Deployment cost.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.definition.cost
    }

    /// Card type.
    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }

    /// Power before any modifier.
    #[must_use]
    pub fn base_power(&self) -> i32 {
        self.definition.base_power
    }

    /// True for unit-type cards.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.definition.card_type == CardType::Unit
    }

    /// Whether this card carries a keyword.
    ///
    /// A card "has" a keyword if it appears in the literal keyword set OR
    /// as a substring of the display name. The name rule is deliberate:
    /// keyword-bearing names like 农田 or 见习冒险者 match effect wording
    /// without an explicit keyword entry.
    #[must_use]
    pub fn has_keyword(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }
        self.definition.keywords.iter().any(|k| k == keyword)
            || self.definition.name.contains(keyword)
    }

    /// Whether this card carries any of the given keywords.
    #[must_use]
    pub fn has_any_keyword<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        keywords.iter().any(|k| self.has_keyword(k.as_ref()))
    }

    /// Add a permanent stacking bonus, applied immediately and re-applied
    /// on every future recomputation pass.
    pub fn add_stacked_bonus(&mut self, value: i32) {
        self.stacked_bonus += value;
        self.current_power += value;
    }
}
