//! Per-player redacted snapshots of a session.
//!
//! The session is authoritative and private; everything a client sees goes
//! through [`SessionView::for_player`], which deep-copies the state and
//! strips what the requester may not know:
//!
//! - the opponent's hand and deck contents (counts stay visible),
//! - every card played this round but not yet revealed, replaced on the
//!   field by a faceless placeholder,
//! - the cost spent on unrevealed cards, added back to the owner's
//!   visible pool so spending patterns leak nothing.
//!
//! Masking is symmetric: the requester's own pending cards are hidden in
//! their view too, so both clients render the same board until the round
//! boundary reveals it.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, CardInstance, CardType, InstanceId};
use crate::core::PlayerId;

use super::session::{GameResult, GameSession, Phase};
use super::slot::FieldSlot;

/// Display name of the placeholder standing in for an unrevealed card.
pub const FACELESS_NAME: &str = "？？？";

/// What one seat looks like from outside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerViewState {
    pub uid: String,
    pub name: String,
    /// Full contents for the requester's own seat, empty for the opponent.
    pub hand: Vec<CardInstance>,
    pub hand_count: usize,
    /// Same visibility rule as the hand.
    pub deck: Vec<CardInstance>,
    pub deck_count: usize,
    /// Deep copy with unrevealed cards replaced by placeholders.
    pub field: Vec<FieldSlot>,
    /// Discards are public information.
    pub discard: Vec<CardInstance>,
    /// Cost pool with unrevealed spending added back.
    pub current_cost: i32,
    pub bonus_power: i32,
    pub decision_made: bool,
    pub ready: bool,
}

/// A complete redacted snapshot, requester's seat first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub round: u32,
    pub phase: Phase,
    pub is_final_round: bool,
    pub message: String,
    /// `players[0]` is always the requester.
    pub players: [PlayerViewState; 2],
    pub winner: Option<GameResult>,
}

impl SessionView {
    /// Snapshot the session as `requester` is allowed to see it.
    #[must_use]
    pub fn for_player(session: &GameSession, requester: PlayerId) -> Self {
        Self {
            round: session.round(),
            phase: session.phase(),
            is_final_round: session.is_final_round(),
            message: session.message().to_string(),
            players: [
                seat_view(session, requester, requester),
                seat_view(session, requester.opponent(), requester),
            ],
            winner: session.result(),
        }
    }
}

/// Build the redacted view of `seat` for `requester`.
fn seat_view(session: &GameSession, seat: PlayerId, requester: PlayerId) -> PlayerViewState {
    let state = session.player(seat);
    let own = seat == requester;

    let mut field = state.field.clone();
    let mut hidden_cost = 0;
    for reveal in session.pending_reveals(seat) {
        hidden_cost += reveal.cost;
        // Tactics have already left their slot; only persistent cards
        // need the placeholder.
        if let Some(slot) = field.get_mut(reveal.slot_index) {
            if slot.card.is_some() {
                slot.card = Some(faceless());
            }
        }
    }

    PlayerViewState {
        uid: state.uid.clone(),
        name: state.name.clone(),
        hand: if own { state.hand.clone() } else { Vec::new() },
        hand_count: state.hand.len(),
        deck: if own { state.deck.clone() } else { Vec::new() },
        deck_count: state.deck.len(),
        field,
        discard: state.discard.clone(),
        current_cost: state.current_cost + hidden_cost,
        bonus_power: state.bonus_power,
        decision_made: session.decision(seat).is_some(),
        ready: session.is_ready(seat),
    }
}

/// The placeholder carries no information from the hidden card: not its
/// identity, type, power, or cost.
fn faceless() -> CardInstance {
    CardInstance::new(
        InstanceId::new(0),
        CardDefinition::new(CardId::new(0), FACELESS_NAME, CardType::Unit),
    )
}
