//! Room management and action dispatch.
//!
//! The coordinator owns one [`GameSession`] per room id and is the single
//! entry point a transport layer talks to. Inbound actions arrive as
//! [`PlayerAction`] values (the wire format is a tagged JSON object),
//! are routed to the session, and every successful dispatch returns a
//! fresh redacted view per player for the transport to fan out.
//!
//! Rejections surface as [`EngineError`] and leave the session unchanged;
//! the transport reports them to the acting player only.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::{EngineError, GameSession, ReforgeOption, SessionView};

/// An inbound player action, tagged for the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayerAction {
    ChoosePlay,
    ChooseReforge,
    #[serde(rename_all = "camelCase")]
    PlayCard { card_index: usize, slot_index: usize },
    #[serde(rename_all = "camelCase")]
    ExecuteReforge {
        options: Vec<ReforgeOption>,
        selected_card_index: Option<usize>,
    },
    SkipTurn,
    StartNewRound,
    EndGame,
}

/// Owns the sessions of all active rooms.
#[derive(Debug, Default)]
pub struct SessionCoordinator {
    rooms: FxHashMap<String, GameSession>,
}

impl SessionCoordinator {
    /// Create a coordinator with no rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room and start its session.
    pub fn create_room(
        &mut self,
        room_id: &str,
        seats: [(String, String); 2],
        catalog: &crate::cards::CardCatalog,
        seed: u64,
    ) -> Result<(), EngineError> {
        if self.rooms.contains_key(room_id) {
            return Err(EngineError::RoomExists(room_id.to_string()));
        }
        let session = GameSession::new(catalog, seats, seed);
        info!(room = %room_id, seed, "room created");
        self.rooms.insert(room_id.to_string(), session);
        Ok(())
    }

    /// Drop a room and its session.
    pub fn close_room(&mut self, room_id: &str) -> Result<(), EngineError> {
        match self.rooms.remove(room_id) {
            Some(_) => {
                info!(room = %room_id, "room closed");
                Ok(())
            }
            None => Err(EngineError::UnknownRoom(room_id.to_string())),
        }
    }

    /// The session behind a room, if it exists.
    #[must_use]
    pub fn room(&self, room_id: &str) -> Option<&GameSession> {
        self.rooms.get(room_id)
    }

    /// Number of active rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Route an action from `uid` to its room's session.
    ///
    /// On success, returns one `(uid, view)` pair per seated player, in
    /// seat order, for the transport to deliver. On rejection the session
    /// is untouched and only the acting player should be told.
    pub fn dispatch(
        &mut self,
        room_id: &str,
        uid: &str,
        action: PlayerAction,
    ) -> Result<Vec<(String, SessionView)>, EngineError> {
        let session = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| EngineError::UnknownRoom(room_id.to_string()))?;
        let player = session.player_id_for_uid(uid)?;

        let outcome = match &action {
            PlayerAction::ChoosePlay => session.choose_play(player),
            PlayerAction::ChooseReforge => session.choose_reforge(player),
            PlayerAction::PlayCard {
                card_index,
                slot_index,
            } => session.play_card(player, *card_index, *slot_index),
            PlayerAction::ExecuteReforge {
                options,
                selected_card_index,
            } => session.execute_reforge(player, options, *selected_card_index),
            PlayerAction::SkipTurn => session.skip_turn(player),
            PlayerAction::StartNewRound => session.start_new_round(),
            PlayerAction::EndGame => session.end_game(),
        };

        if let Err(error) = outcome {
            warn!(room = %room_id, %player, ?action, %error, "action rejected");
            return Err(error);
        }
        info!(room = %room_id, %player, ?action, message = %session.message(), "action applied");

        let views = session
            .players()
            .iter()
            .map(|(id, state)| (state.uid.clone(), SessionView::for_player(session, id)))
            .collect();
        Ok(views)
    }
}
