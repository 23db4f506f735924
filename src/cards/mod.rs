//! Card data: definitions, dealt instances, and the static catalog.

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::{keywords, names, CardCatalog};
pub use definition::{
    CardDefinition, CardId, CardType, EffectKind, EffectRecipient, EffectSpec, EffectTiming,
    PowerFormula,
};
pub use instance::{CardInstance, InstanceId};
