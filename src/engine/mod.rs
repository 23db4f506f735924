//! The game engine: field slots, per-player state, the effect resolver,
//! the session state machine, and the redacted views it hands out.

pub mod effects;
pub mod error;
pub mod player_state;
pub mod session;
pub mod slot;
pub mod view;

pub use error::EngineError;
pub use player_state::PlayerState;
pub use session::{
    DecisionChoice, GameResult, GameSession, PendingReveal, Phase, ReforgeOption, STARTING_COST,
    STARTING_HAND_SIZE,
};
pub use slot::{FieldSlot, BASE_SLOT_COUNT};
pub use view::{PlayerViewState, SessionView, FACELESS_NAME};
