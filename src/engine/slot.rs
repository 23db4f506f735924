//! Field slots.
//!
//! A player's field starts as six base slots and grows as resident cards
//! spawn extra slots. Slots own their card: a `CardInstance` sits in at
//! most one slot, and moving it out transfers the value.

use serde::{Deserialize, Serialize};

use crate::cards::{CardInstance, CardType};

/// Number of base slots per player, fixed at game start.
pub const BASE_SLOT_COUNT: usize = 6;

/// One position on a player's field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSlot {
    /// Index into the owner's field array.
    pub position: usize,

    /// The resident card, if any.
    pub card: Option<CardInstance>,

    /// Extra slots are spawned by card effects, accept units only, and are
    /// never removed. A base slot is never marked extra.
    pub is_extra: bool,

    /// For extra slots: the slot whose deployed card caused this slot's
    /// creation. A lookup link, not an ownership relation.
    pub parent_slot: Option<usize>,
}

impl FieldSlot {
    /// Create an empty base slot.
    #[must_use]
    pub fn base(position: usize) -> Self {
        Self {
            position,
            card: None,
            is_extra: false,
            parent_slot: None,
        }
    }

    /// Create an empty extra slot parented to `parent_slot`.
    #[must_use]
    pub fn extra(position: usize, parent_slot: usize) -> Self {
        Self {
            position,
            card: None,
            is_extra: true,
            parent_slot: Some(parent_slot),
        }
    }

    /// Whether the slot holds no card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.card.is_none()
    }

    /// Whether a card of the given type may be placed here (ignoring
    /// occupancy). Extra slots accept units only.
    #[must_use]
    pub fn accepts(&self, card_type: CardType) -> bool {
        !self.is_extra || card_type == CardType::Unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slot() {
        let slot = FieldSlot::base(3);
        assert_eq!(slot.position, 3);
        assert!(slot.is_empty());
        assert!(!slot.is_extra);
        assert_eq!(slot.parent_slot, None);
    }

    #[test]
    fn test_extra_slot_parent() {
        let slot = FieldSlot::extra(6, 2);
        assert!(slot.is_extra);
        assert_eq!(slot.parent_slot, Some(2));
    }

    #[test]
    fn test_eligibility() {
        let base = FieldSlot::base(0);
        assert!(base.accepts(CardType::Unit));
        assert!(base.accepts(CardType::Environment));
        assert!(base.accepts(CardType::Tactic));

        let extra = FieldSlot::extra(6, 0);
        assert!(extra.accepts(CardType::Unit));
        assert!(!extra.accepts(CardType::Environment));
        assert!(!extra.accepts(CardType::Tactic));
    }
}
