//! Authoritative engine for a two-player simultaneous-turn card game.
//!
//! Both players act every round: each commits to playing a card or
//! reforging without seeing the other's choice, then both carry it out.
//! Cards played stay hidden from the opponent (placeholder on the field,
//! spent cost masked) until the round boundary reveals them. Filling all
//! six base slots arms the final round and the game is scored one round
//! later.
//!
//! The crate is transport-agnostic: [`SessionCoordinator`] accepts tagged
//! [`PlayerAction`] values and returns per-player [`SessionView`]
//! snapshots, and whatever delivers those (websocket, channel, test
//! harness) lives outside.
//!
//! ## Layout
//!
//! - [`core`] - player identity, per-player storage, deterministic RNG
//! - [`cards`] - card definitions, dealt instances, the standard catalog
//! - [`engine`] - slots, player state, effect resolver, session state
//!   machine, redacted views
//! - [`coordinator`] - room registry and action dispatch
//!
//! ## Example
//!
//! ```
//! use reforge::{CardCatalog, PlayerAction, SessionCoordinator};
//!
//! let mut coordinator = SessionCoordinator::new();
//! coordinator
//!     .create_room(
//!         "room-1",
//!         [
//!             ("u0".to_string(), "Alice".to_string()),
//!             ("u1".to_string(), "Bob".to_string()),
//!         ],
//!         &CardCatalog::standard(),
//!         42,
//!     )
//!     .unwrap();
//!
//! let views = coordinator
//!     .dispatch("room-1", "u0", PlayerAction::ChoosePlay)
//!     .unwrap();
//! assert_eq!(views.len(), 2);
//! ```

pub mod cards;
pub mod coordinator;
pub mod core;
pub mod engine;

pub use cards::{CardCatalog, CardDefinition, CardId, CardInstance, CardType, InstanceId};
pub use coordinator::{PlayerAction, SessionCoordinator};
pub use core::{PlayerId, PlayerMap};
pub use engine::{
    DecisionChoice, EngineError, GameResult, GameSession, Phase, ReforgeOption, SessionView,
};
