//! Core building blocks: player identity, per-player storage,
//! deterministic RNG.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
