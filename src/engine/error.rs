//! Structured rejection reasons.
//!
//! Every fallible engine operation returns `Result<_, EngineError>`.
//! A rejection is reported to the acting player only and leaves
//! authoritative state byte-for-byte unchanged: all validation happens
//! before the first mutation, so there is no partial application and
//! nothing to roll back.

use serde::{Deserialize, Serialize};

use super::session::{DecisionChoice, Phase};

/// Why an inbound action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum EngineError {
    /// The acting player id is not part of this session.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// The room id is not registered with the coordinator.
    #[error("unknown room: {0}")]
    UnknownRoom(String),

    /// A room with this id already exists.
    #[error("room already exists: {0}")]
    RoomExists(String),

    /// The game has ended; no further actions are accepted.
    #[error("game is over")]
    GameOver,

    /// The action is not legal in the current phase.
    #[error("action requires {expected:?} phase, current phase is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    /// The action requires the player to have recorded a different decision.
    #[error("action requires a recorded {required:?} decision")]
    DecisionRequired { required: DecisionChoice },

    /// Hand index out of range.
    #[error("invalid hand index {index} (hand size {hand_size})")]
    InvalidHandIndex { index: usize, hand_size: usize },

    /// Slot index out of range.
    #[error("invalid slot index {index} (field size {field_size})")]
    InvalidSlotIndex { index: usize, field_size: usize },

    /// The target slot already holds a card.
    #[error("slot {index} is occupied")]
    SlotOccupied { index: usize },

    /// Extra slots accept unit cards only.
    #[error("slot {index} is an extra slot and accepts unit cards only")]
    SlotRequiresUnit { index: usize },

    /// Not enough cost to pay for the card.
    #[error("insufficient cost: need {needed}, have {available}")]
    InsufficientCost { needed: i32, available: i32 },

    /// The player already played this round and holds no extra-play grant.
    #[error("already played this round")]
    AlreadyPlayed,

    /// A reforge must select exactly two options.
    #[error("reforge requires exactly 2 options, got {given}")]
    ReforgeOptionCount { given: usize },

    /// The two reforge options must be distinct.
    #[error("reforge options must be distinct")]
    DuplicateReforgeOptions,

    /// The redraw option was selected without a valid hand index.
    #[error("redraw requires a valid hand index")]
    RedrawIndexRequired,

    /// Round advance requested before both players were ready.
    #[error("both players must be ready before the round can advance")]
    PlayersNotReady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EngineError::InsufficientCost {
            needed: 3,
            available: 1,
        };
        assert_eq!(err.to_string(), "insufficient cost: need 3, have 1");

        let err = EngineError::UnknownPlayer("p9".to_string());
        assert_eq!(err.to_string(), "unknown player: p9");
    }

    #[test]
    fn test_error_serialization() {
        let err = EngineError::SlotOccupied { index: 2 };
        let json = serde_json::to_string(&err).unwrap();
        let back: EngineError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
