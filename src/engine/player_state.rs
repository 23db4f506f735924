//! Per-player authoritative state.
//!
//! Each player owns four zones (deck, hand, field, discard), a cost pool,
//! a cumulative bonus power independent of fielded cards, and the
//! per-round play flags. Cards move between zones by value, so an instance
//! is reachable from exactly one zone at any time.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;

use super::slot::{FieldSlot, BASE_SLOT_COUNT};

/// One player's zones, resources and per-round flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Stable identity assigned by the transport layer.
    pub uid: String,

    /// Display name.
    pub name: String,

    /// Draw order: the top of the deck is the end of the Vec.
    pub deck: Vec<CardInstance>,

    /// Ordered by draw order.
    pub hand: Vec<CardInstance>,

    /// Base slots first (by construction), extra slots appended after.
    pub field: Vec<FieldSlot>,

    /// Spent tactic cards.
    pub discard: Vec<CardInstance>,

    /// Resource pool. Validated before a play; a tactic drain may push it
    /// negative, and no rule clamps it.
    pub current_cost: i32,

    /// Cumulative scoring bonus independent of fielded cards.
    pub bonus_power: i32,

    /// Whether this player has made their ordinary play this round.
    pub has_played_this_turn: bool,

    /// One additional play granted by a deployment effect, this round only.
    pub can_play_extra: bool,
}

impl PlayerState {
    /// Create a player with a dealt (already shuffled) deck, an empty hand
    /// and six empty base slots.
    #[must_use]
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        deck: Vec<CardInstance>,
        starting_cost: i32,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            deck,
            hand: Vec::new(),
            field: (0..BASE_SLOT_COUNT).map(FieldSlot::base).collect(),
            discard: Vec::new(),
            current_cost: starting_cost,
            bonus_power: 0,
            has_played_this_turn: false,
            can_play_extra: false,
        }
    }

    /// Draw the top card of the deck into the hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty.
    pub fn draw_card(&mut self) -> Option<&CardInstance> {
        let card = self.deck.pop()?;
        self.hand.push(card);
        self.hand.last()
    }

    /// Iterate over fielded cards.
    pub fn fielded_cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.field.iter().filter_map(|slot| slot.card.as_ref())
    }

    /// Number of base slots currently holding a card.
    #[must_use]
    pub fn filled_base_slots(&self) -> usize {
        self.field
            .iter()
            .filter(|slot| !slot.is_extra && slot.card.is_some())
            .count()
    }

    /// Whether all six base slots hold a card simultaneously.
    #[must_use]
    pub fn base_field_full(&self) -> bool {
        self.filled_base_slots() == BASE_SLOT_COUNT
    }

    /// Total card instances reachable from this player's zones.
    ///
    /// Conservation invariant: equals the number of instances dealt at
    /// session start, at every point in the game.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.hand.len()
            + self.deck.len()
            + self.discard.len()
            + self.fielded_cards().count()
    }

    /// Final score: bonus power plus the power of cards in *base* occupied
    /// slots. Extra slots are auxiliary and never score.
    #[must_use]
    pub fn total_power(&self) -> i32 {
        let field_power: i32 = self
            .field
            .iter()
            .filter(|slot| !slot.is_extra)
            .filter_map(|slot| slot.card.as_ref())
            .map(|card| card.current_power)
            .sum();
        self.bonus_power + field_power
    }

    /// Reset the per-round play flags at a round boundary.
    pub fn reset_round_flags(&mut self) {
        self.has_played_this_turn = false;
        self.can_play_extra = false;
    }
}
